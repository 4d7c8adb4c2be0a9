use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub description: String,
    /// JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub alternate_names: Json,
    /// JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    /// Public characters are visible to every user, not just their owner.
    pub public: bool,
    pub default_model: String,

    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    #[sea_orm(has_many)]
    pub facts: HasMany<super::character_fact::Entity>,

    #[sea_orm(has_many)]
    pub traits: HasMany<super::character_trait::Entity>,

    #[sea_orm(has_many, via = "character_conversation")]
    pub conversations: HasMany<super::conversation::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
