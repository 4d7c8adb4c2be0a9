use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// External id assigned by the OAuth provider. NULL for users that have
    /// never logged in through GitHub (e.g. the seeded dev user).
    #[sea_orm(unique)]
    pub github_id: Option<String>,
    pub avatar_url: Option<String>,

    #[sea_orm(has_many)]
    pub personas: HasMany<super::persona::Entity>,

    #[sea_orm(has_many)]
    pub characters: HasMany<super::character::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
