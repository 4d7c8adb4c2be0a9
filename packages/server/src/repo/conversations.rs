use std::collections::HashMap;

use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{character, character_conversation, conversation, conversation_fact, persona};

/// A conversation with its persona, participating characters, and accrued
/// facts attached.
pub struct ConversationBundle {
    pub conversation: conversation::Model,
    pub persona: Option<persona::Model>,
    pub characters: Vec<character::Model>,
    pub facts: Vec<conversation_fact::Model>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<conversation::Model>, DbErr> {
    conversation::Entity::find_by_id(id).one(db).await
}

/// List conversations belonging to any of the user's personas, ordered by
/// title then id.
pub async fn list_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<conversation::Model>, DbErr> {
    conversation::Entity::find()
        .filter(
            conversation::Column::PersonaId.in_subquery(
                SeaQuery::select()
                    .column(persona::Column::Id)
                    .from(persona::Entity)
                    .and_where(persona::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        )
        .order_by_asc(conversation::Column::Title)
        .order_by_asc(conversation::Column::Id)
        .all(db)
        .await
}

pub async fn list_for_persona<C: ConnectionTrait>(
    db: &C,
    persona_id: Uuid,
) -> Result<Vec<conversation::Model>, DbErr> {
    conversation::Entity::find()
        .filter(conversation::Column::PersonaId.eq(persona_id))
        .order_by_asc(conversation::Column::Title)
        .order_by_asc(conversation::Column::Id)
        .all(db)
        .await
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<conversation::Model>, DbErr> {
    conversation::Entity::find()
        .order_by_asc(conversation::Column::Title)
        .order_by_asc(conversation::Column::Id)
        .all(db)
        .await
}

/// Attach personas, characters, and facts to a listing in four batched
/// queries.
pub async fn load_relations<C: ConnectionTrait>(
    db: &C,
    rows: Vec<conversation::Model>,
) -> Result<Vec<ConversationBundle>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|c| c.id).collect();
    let persona_ids: Vec<Uuid> = rows.iter().map(|c| c.persona_id).collect();

    let personas_by_id: HashMap<Uuid, persona::Model> = persona::Entity::find()
        .filter(persona::Column::Id.is_in(persona_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut facts_by_conversation: HashMap<Uuid, Vec<conversation_fact::Model>> = HashMap::new();
    for fact in conversation_fact::Entity::find()
        .filter(conversation_fact::Column::ConversationId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        facts_by_conversation.entry(fact.conversation_id).or_default().push(fact);
    }

    let links = character_conversation::Entity::find()
        .filter(character_conversation::Column::ConversationId.is_in(ids))
        .all(db)
        .await?;
    let character_ids: Vec<Uuid> = links.iter().map(|l| l.character_id).collect();
    let characters_by_id: HashMap<Uuid, character::Model> = character::Entity::find()
        .filter(character::Column::Id.is_in(character_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let mut characters_by_conversation: HashMap<Uuid, Vec<character::Model>> = HashMap::new();
    for link in links {
        if let Some(ch) = characters_by_id.get(&link.character_id) {
            characters_by_conversation
                .entry(link.conversation_id)
                .or_default()
                .push(ch.clone());
        }
    }

    Ok(rows
        .into_iter()
        .map(|c| {
            let id = c.id;
            let persona = personas_by_id.get(&c.persona_id).cloned();
            ConversationBundle {
                conversation: c,
                persona,
                characters: characters_by_conversation.remove(&id).unwrap_or_default(),
                facts: facts_by_conversation.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

pub async fn facts_for<C: ConnectionTrait>(
    db: &C,
    conversation_id: Uuid,
) -> Result<Vec<conversation_fact::Model>, DbErr> {
    conversation_fact::Entity::find()
        .filter(conversation_fact::Column::ConversationId.eq(conversation_id))
        .all(db)
        .await
}

pub async fn characters_for<C: ConnectionTrait>(
    db: &C,
    conversation_id: Uuid,
) -> Result<Vec<character::Model>, DbErr> {
    let character_ids: Vec<Uuid> = character_conversation::Entity::find()
        .filter(character_conversation::Column::ConversationId.eq(conversation_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.character_id)
        .collect();

    if character_ids.is_empty() {
        return Ok(Vec::new());
    }

    character::Entity::find()
        .filter(character::Column::Id.is_in(character_ids))
        .all(db)
        .await
}

/// Delete a conversation and its dependent rows, child-first, in one
/// transaction.
pub async fn delete_conversation(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    delete_subtrees(&txn, &[id]).await?;
    txn.commit().await
}

/// Delete facts, character links, then the conversation rows themselves.
/// Callers own the surrounding transaction.
pub(crate) async fn delete_subtrees<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<(), DbErr> {
    if ids.is_empty() {
        return Ok(());
    }

    conversation_fact::Entity::delete_many()
        .filter(conversation_fact::Column::ConversationId.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    character_conversation::Entity::delete_many()
        .filter(character_conversation::Column::ConversationId.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    conversation::Entity::delete_many()
        .filter(conversation::Column::Id.is_in(ids.to_vec()))
        .exec(conn)
        .await?;

    Ok(())
}
