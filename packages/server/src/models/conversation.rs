use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::entity::{character, persona};
use crate::repo::conversations::ConversationBundle;
use crate::utils::json::string_list;

/// Legacy REST listing of conversations with relations inlined. Retained for
/// pre-GraphQL clients; new consumers should query `conversations` over
/// GraphQL instead.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationDto>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ConversationDto {
    pub id: Uuid,
    pub title: String,
    pub scenario: String,
    pub tags: Vec<String>,
    pub assistant: bool,
    pub initial_message: Option<String>,
    pub persona: Option<PersonaDto>,
    pub characters: Vec<CharacterSummaryDto>,
    pub conversation_facts: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PersonaDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub default: bool,
}

impl From<persona::Model> for PersonaDto {
    fn from(p: persona::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            default: p.is_default,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CharacterSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl From<character::Model> for CharacterSummaryDto {
    fn from(c: character::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            public: c.public,
        }
    }
}

impl From<ConversationBundle> for ConversationDto {
    fn from(bundle: ConversationBundle) -> Self {
        let c = bundle.conversation;
        Self {
            id: c.id,
            title: c.title,
            scenario: c.scenario,
            tags: string_list(&c.tags),
            assistant: c.assistant,
            initial_message: c.initial_message,
            persona: bundle.persona.map(PersonaDto::from),
            characters: bundle
                .characters
                .into_iter()
                .map(CharacterSummaryDto::from)
                .collect(),
            conversation_facts: bundle.facts.into_iter().map(|f| f.fact).collect(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
