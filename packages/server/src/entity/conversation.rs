use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conversation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub scenario: String,
    /// JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    /// Whether an assistant participates in the conversation.
    pub assistant: bool,
    pub initial_message: Option<String>,

    pub persona_id: Uuid,
    #[sea_orm(belongs_to, from = "persona_id", to = "id")]
    pub persona: HasOne<super::persona::Entity>,

    #[sea_orm(has_many)]
    pub facts: HasMany<super::conversation_fact::Entity>,

    #[sea_orm(has_many, via = "character_conversation")]
    pub characters: HasMany<super::character::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
