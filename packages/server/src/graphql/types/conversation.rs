use async_graphql::{Context, Error, ID, Object, Result};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::entity::{character, conversation, conversation_fact, persona};
use crate::graphql::db_error;
use crate::repo::{self, conversations::ConversationBundle};
use crate::utils::json::string_list;

use super::{Character, Persona};

/// A conversation, optionally carrying relations batch-loaded by the listing
/// that produced it.
pub struct Conversation {
    model: conversation::Model,
    persona: Option<persona::Model>,
    characters: Option<Vec<character::Model>>,
    facts: Option<Vec<conversation_fact::Model>>,
}

impl Conversation {
    pub fn new(model: conversation::Model) -> Self {
        Self {
            model,
            persona: None,
            characters: None,
            facts: None,
        }
    }

    pub fn preloaded(bundle: ConversationBundle) -> Self {
        Self {
            model: bundle.conversation,
            persona: bundle.persona,
            characters: Some(bundle.characters),
            facts: Some(bundle.facts),
        }
    }
}

#[Object]
impl Conversation {
    async fn id(&self) -> ID {
        ID(self.model.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.model.title
    }

    async fn scenario(&self) -> &str {
        &self.model.scenario
    }

    async fn tags(&self) -> Vec<String> {
        string_list(&self.model.tags)
    }

    async fn assistant(&self) -> bool {
        self.model.assistant
    }

    async fn initial_message(&self) -> Option<&str> {
        self.model.initial_message.as_deref()
    }

    async fn persona(&self, ctx: &Context<'_>) -> Result<Persona> {
        let row = match &self.persona {
            Some(row) => row.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::personas::find_by_id(db, self.model.persona_id)
                    .await
                    .map_err(db_error)?
                    .ok_or_else(|| Error::new("Internal error"))?
            }
        };
        Ok(Persona::new(row))
    }

    async fn characters(&self, ctx: &Context<'_>) -> Result<Vec<Character>> {
        let rows = match &self.characters {
            Some(rows) => rows.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::conversations::characters_for(db, self.model.id)
                    .await
                    .map_err(db_error)?
            }
        };
        Ok(rows.into_iter().map(Character::new).collect())
    }

    /// Accrued facts as plain strings.
    async fn facts(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        let rows = match &self.facts {
            Some(rows) => rows.clone(),
            None => {
                let db = ctx.data::<DatabaseConnection>()?;
                repo::conversations::facts_for(db, self.model.id)
                    .await
                    .map_err(db_error)?
            }
        };
        Ok(rows.into_iter().map(|f| f.fact).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.model.created_at
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        self.model.updated_at
    }
}
