use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pure association record linking characters to conversations. Rows have no
/// lifecycle of their own; they are removed when either side is deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character_conversation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub character_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub conversation_id: Uuid,

    #[sea_orm(belongs_to, from = "character_id", to = "id")]
    pub character: Option<super::character::Entity>,
    #[sea_orm(belongs_to, from = "conversation_id", to = "id")]
    pub conversation: Option<super::conversation::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
