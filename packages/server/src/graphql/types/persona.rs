use async_graphql::{Context, ID, Object, Result};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::entity::persona;
use crate::graphql::db_error;
use crate::repo;

use super::{Conversation, User};

pub struct Persona {
    model: persona::Model,
}

impl Persona {
    pub fn new(model: persona::Model) -> Self {
        Self { model }
    }
}

#[Object]
impl Persona {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    async fn description(&self) -> &str {
        &self.model.description
    }

    #[graphql(name = "default")]
    async fn is_default(&self) -> bool {
        self.model.is_default
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let row = repo::users::find_by_id(db, self.model.user_id)
            .await
            .map_err(db_error)?;
        Ok(row.map(User::new))
    }

    async fn conversations(&self, ctx: &Context<'_>) -> Result<Vec<Conversation>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let rows = repo::conversations::list_for_persona(db, self.model.id)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Conversation::new).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.model.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.model.updated_at
    }
}
