use async_graphql::{Context, InputObject, Object, Result, SimpleObject};
use sea_orm::DatabaseConnection;

use crate::repo::{self, characters::NewCharacter};

use super::types::Character;
use super::{AuthSession, db_error};

pub struct MutationRoot;

#[derive(InputObject)]
pub struct CreateCharacterInput {
    pub name: String,
    pub description: String,
    pub alternate_names: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub public: Option<bool>,
    pub default_model: Option<String>,
}

/// Mutation result carrying either the created character or field-level
/// validation messages, never both.
#[derive(SimpleObject)]
pub struct CreateCharacterPayload {
    pub character: Option<Character>,
    pub errors: Vec<String>,
}

#[Object]
impl MutationRoot {
    async fn create_character(
        &self,
        ctx: &Context<'_>,
        input: CreateCharacterInput,
    ) -> Result<CreateCharacterPayload> {
        // Auth failures are data-shaped here, unlike the query roots.
        let Some(viewer) = ctx.data::<AuthSession>()?.user.as_ref() else {
            return Ok(CreateCharacterPayload {
                character: None,
                errors: vec!["Authentication required".to_string()],
            });
        };
        let db = ctx.data::<DatabaseConnection>()?;

        let errors = validation_errors(&input.name, &input.description);
        if !errors.is_empty() {
            return Ok(CreateCharacterPayload {
                character: None,
                errors,
            });
        }

        let created = repo::characters::create(
            db,
            viewer.id,
            NewCharacter {
                name: input.name,
                description: input.description,
                alternate_names: input.alternate_names.unwrap_or_default(),
                tags: input.tags.unwrap_or_default(),
                public: input.public.unwrap_or(false),
                default_model: input.default_model.unwrap_or_else(|| "llama3.2".to_string()),
            },
        )
        .await
        .map_err(db_error)?;

        Ok(CreateCharacterPayload {
            character: Some(Character::new(created)),
            errors: Vec::new(),
        })
    }
}

fn validation_errors(name: &str, description: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Name can't be blank".to_string());
    }
    if description.trim().is_empty() {
        errors.push("Description can't be blank".to_string());
    }
    errors
}
