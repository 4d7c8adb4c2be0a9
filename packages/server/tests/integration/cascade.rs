use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use server::entity::{
    character, character_conversation, character_fact, character_trait, conversation,
    conversation_fact, persona, user,
};
use server::repo;

use crate::common::TestApp;

async fn count<E: EntityTrait>(app: &TestApp, _entity: E) -> u64
where
    E::Model: sea_orm::FromQueryResult + Send + Sync,
{
    E::find().count(&app.db).await.expect("count failed")
}

#[tokio::test]
async fn deleting_a_character_removes_its_subtree_only() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.create_user("Ada", "ada@example.com").await;

    let doomed = app.insert_character(owner, "Doomed", false).await;
    app.insert_character_fact(doomed.id, "Will not last").await;
    app.insert_character_trait(doomed.id, "mood", "gloomy").await;

    let survivor = app.insert_character(owner, "Survivor", false).await;
    app.insert_character_fact(survivor.id, "Still here").await;

    let persona = app.insert_persona(owner, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "Shared Scene").await;
    app.link_character(doomed.id, conversation.id).await;
    app.link_character(survivor.id, conversation.id).await;

    repo::characters::delete_character(&app.db, doomed.id)
        .await
        .expect("delete failed");

    assert!(
        character::Entity::find_by_id(doomed.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    let orphan_facts = character_fact::Entity::find()
        .filter(character_fact::Column::CharacterId.eq(doomed.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphan_facts, 0);
    let orphan_traits = character_trait::Entity::find()
        .filter(character_trait::Column::CharacterId.eq(doomed.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphan_traits, 0);
    let orphan_links = character_conversation::Entity::find()
        .filter(character_conversation::Column::CharacterId.eq(doomed.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphan_links, 0);

    // The sibling character and the shared conversation are untouched.
    assert!(
        character::Entity::find_by_id(survivor.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        conversation::Entity::find_by_id(conversation.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(count(&app, character_fact::Entity).await, 1);
}

#[tokio::test]
async fn deleting_a_conversation_removes_facts_and_links() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.create_user("Ada", "ada@example.com").await;

    let persona = app.insert_persona(owner, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "Doomed Scene").await;
    let character = app.insert_character(owner, "Zara", false).await;
    app.link_character(character.id, conversation.id).await;
    app.insert_conversation_fact(conversation.id, "Fleeting").await;

    repo::conversations::delete_conversation(&app.db, conversation.id)
        .await
        .expect("delete failed");

    assert!(
        conversation::Entity::find_by_id(conversation.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    let orphan_facts = conversation_fact::Entity::find()
        .filter(conversation_fact::Column::ConversationId.eq(conversation.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphan_facts, 0);
    let orphan_links = character_conversation::Entity::find()
        .filter(character_conversation::Column::ConversationId.eq(conversation.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(orphan_links, 0);

    // The character survives its conversation.
    assert!(
        character::Entity::find_by_id(character.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn deleting_a_persona_removes_its_conversations() {
    let app = TestApp::spawn().await;
    let (owner, _) = app.create_user("Ada", "ada@example.com").await;

    let doomed = app.insert_persona(owner, "Doomed").await;
    let conversation = app.insert_conversation(doomed.id, "Gone Soon").await;
    app.insert_conversation_fact(conversation.id, "Fleeting").await;

    let survivor = app.insert_persona(owner, "Survivor").await;
    app.insert_conversation(survivor.id, "Still Here").await;

    repo::personas::delete_persona(&app.db, doomed.id)
        .await
        .expect("delete failed");

    assert!(
        persona::Entity::find_by_id(doomed.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        conversation::Entity::find_by_id(conversation.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    let surviving = conversation::Entity::find()
        .filter(conversation::Column::PersonaId.eq(survivor.id))
        .count(&app.db)
        .await
        .unwrap();
    assert_eq!(surviving, 1);
}

#[tokio::test]
async fn deleting_a_user_leaves_no_orphans() {
    let app = TestApp::spawn().await;
    let (doomed, _) = app.create_user("Doomed", "doomed@example.com").await;
    let (survivor, _) = app.create_user("Survivor", "survivor@example.com").await;

    let character = app.insert_character(doomed, "Zara", false).await;
    app.insert_character_fact(character.id, "Gone soon").await;
    app.insert_character_trait(character.id, "mood", "gloomy").await;
    let persona = app.insert_persona(doomed, "Kent").await;
    let conversation = app.insert_conversation(persona.id, "Final Act").await;
    app.link_character(character.id, conversation.id).await;
    app.insert_conversation_fact(conversation.id, "The end").await;

    let keeper = app.insert_character(survivor, "Keeper", false).await;
    app.insert_character_fact(keeper.id, "Still here").await;

    repo::users::delete_user(&app.db, doomed).await.expect("delete failed");

    assert!(
        user::Entity::find_by_id(doomed)
            .one(&app.db)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(orphan_count(&app, doomed).await, 0);

    // The other user's data is intact.
    assert!(
        character::Entity::find_by_id(keeper.id)
            .one(&app.db)
            .await
            .unwrap()
            .is_some()
    );
    assert_eq!(count(&app, character_fact::Entity).await, 1);
}

/// Rows still referencing any of the user's deleted aggregates.
async fn orphan_count(app: &TestApp, user_id: Uuid) -> u64 {
    let characters = character::Entity::find()
        .filter(character::Column::UserId.eq(user_id))
        .count(&app.db)
        .await
        .unwrap();
    let personas = persona::Entity::find()
        .filter(persona::Column::UserId.eq(user_id))
        .count(&app.db)
        .await
        .unwrap();
    characters + personas
}
