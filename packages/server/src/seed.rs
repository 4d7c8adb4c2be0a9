use chrono::Utc;
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::entity::{character, character_conversation, conversation, persona, user};

/// Email of the demo user created on startup. The dev sentinel token
/// resolves to this user.
pub const DEMO_USER_EMAIL: &str = "dev@hivemind.local";

/// Seed a demo user with a default persona, a public character, and a linked
/// conversation. Idempotent: keyed on the demo user's unique email.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(DEMO_USER_EMAIL))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    let demo_user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Dev User".to_string()),
        email: Set(DEMO_USER_EMAIL.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let demo_persona = persona::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Kent".to_string()),
        description: Set(
            "Kent is a seasoned software engineer with a passion for building scalable \
             applications."
                .to_string(),
        ),
        is_default: Set(true),
        user_id: Set(demo_user.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let demo_character = character::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Seraphima".to_string()),
        description: Set("A sorceress searching for the lost city of Eldoria.".to_string()),
        alternate_names: Set(serde_json::json!([])),
        tags: Set(serde_json::json!(["Fantasy", "Magic", "Adventure"])),
        public: Set(true),
        default_model: Set("llama3.2".to_string()),
        user_id: Set(demo_user.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let demo_conversation = conversation::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set("Seraphima's Journey".to_string()),
        scenario: Set(
            "Seraphima embarks on a quest to find the lost city of Eldoria, facing magical \
             creatures and ancient puzzles along the way."
                .to_string(),
        ),
        tags: Set(serde_json::json!(["Fantasy", "Adventure"])),
        assistant: Set(true),
        persona_id: Set(demo_persona.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    character_conversation::ActiveModel {
        character_id: Set(demo_character.id),
        conversation_id: Set(demo_conversation.id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Seeded demo data for {}", DEMO_USER_EMAIL);

    Ok(())
}
