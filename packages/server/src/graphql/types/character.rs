use async_graphql::{Context, ID, Object, Result};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::entity::{character, character_fact, character_trait, conversation};
use crate::graphql::db_error;
use crate::repo::{self, characters::CharacterBundle};
use crate::utils::json::string_list;

use super::{Conversation, User};

/// A character, optionally carrying relations batch-loaded by the listing
/// that produced it. Relations not loaded up front are fetched on demand.
pub struct Character {
    model: character::Model,
    facts: Option<Vec<character_fact::Model>>,
    traits: Option<Vec<character_trait::Model>>,
    conversations: Option<Vec<conversation::Model>>,
}

impl Character {
    pub fn new(model: character::Model) -> Self {
        Self {
            model,
            facts: None,
            traits: None,
            conversations: None,
        }
    }

    pub fn preloaded(bundle: CharacterBundle) -> Self {
        Self {
            model: bundle.character,
            facts: Some(bundle.facts),
            traits: Some(bundle.traits),
            conversations: Some(bundle.conversations),
        }
    }

}

#[Object]
impl Character {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.model.name
    }

    async fn description(&self) -> &str {
        &self.model.description
    }

    async fn alternate_names(&self) -> Vec<String> {
        string_list(&self.model.alternate_names)
    }

    async fn tags(&self) -> Vec<String> {
        string_list(&self.model.tags)
    }

    async fn public(&self) -> bool {
        self.model.public
    }

    async fn default_model(&self) -> &str {
        &self.model.default_model
    }

    async fn facts(&self, ctx: &Context<'_>) -> Result<Vec<CharacterFact>> {
        let rows = match &self.facts {
            Some(rows) => rows.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::characters::facts_for(db, self.model.id)
                    .await
                    .map_err(db_error)?
            }
        };
        Ok(rows.into_iter().map(CharacterFact::new).collect())
    }

    async fn traits(&self, ctx: &Context<'_>) -> Result<Vec<CharacterTrait>> {
        let rows = match &self.traits {
            Some(rows) => rows.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::characters::traits_for(db, self.model.id)
                    .await
                    .map_err(db_error)?
            }
        };
        Ok(rows.into_iter().map(CharacterTrait::new).collect())
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let db = ctx.data::<DatabaseConnection>()?;
        let row = repo::users::find_by_id(db, self.model.user_id)
            .await
            .map_err(db_error)?;
        Ok(row.map(User::new))
    }

    async fn conversations(&self, ctx: &Context<'_>) -> Result<Vec<Conversation>> {
        let rows = match &self.conversations {
            Some(rows) => rows.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::characters::conversations_for(db, self.model.id)
                    .await
                    .map_err(db_error)?
            }
        };
        Ok(rows.into_iter().map(Conversation::new).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.model.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.model.updated_at
    }
}

pub struct CharacterFact {
    model: character_fact::Model,
}

impl CharacterFact {
    pub fn new(model: character_fact::Model) -> Self {
        Self { model }
    }
}

#[Object]
impl CharacterFact {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn fact(&self) -> &str {
        &self.model.fact
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.model.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.model.updated_at
    }
}

pub struct CharacterTrait {
    model: character_trait::Model,
}

impl CharacterTrait {
    pub fn new(model: character_trait::Model) -> Self {
        Self { model }
    }
}

#[Object]
impl CharacterTrait {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn trait_type(&self) -> &str {
        &self.model.trait_type
    }

    async fn value(&self) -> &str {
        &self.model.value
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.model.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.model.updated_at
    }
}
