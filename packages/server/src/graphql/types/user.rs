use async_graphql::{Context, ID, Object, Result};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::entity::user;
use crate::graphql::db_error;
use crate::repo;

use super::{Character, Conversation, Persona};

pub struct User {
    model: user::Model,
}

impl User {
    pub fn new(model: user::Model) -> Self {
        Self { model }
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    async fn email(&self) -> &str {
        &self.model.email
    }

    async fn github_id(&self) -> Option<&str> {
        self.model.github_id.as_deref()
    }

    async fn avatar_url(&self) -> Option<&str> {
        self.model.avatar_url.as_deref()
    }

    async fn personas(&self, ctx: &Context<'_>) -> Result<Vec<Persona>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let rows = repo::personas::list_for_user(db, self.model.id)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Persona::new).collect())
    }

    /// Characters owned by this user, public or not.
    async fn characters(&self, ctx: &Context<'_>) -> Result<Vec<Character>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let rows = repo::characters::list_for_user(db, self.model.id, false)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Character::new).collect())
    }

    /// Conversations across all of this user's personas.
    async fn conversations(&self, ctx: &Context<'_>) -> Result<Vec<Conversation>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let rows = repo::conversations::list_for_user(db, self.model.id)
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
