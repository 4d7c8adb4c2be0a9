use std::collections::HashMap;

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{character, character_conversation, character_fact, character_trait, conversation};
use crate::utils::json::to_string_list;

/// Validated input for creating a character. Defaults are applied by the
/// GraphQL mutation before this struct is built.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub description: String,
    pub alternate_names: Vec<String>,
    pub tags: Vec<String>,
    pub public: bool,
    pub default_model: String,
}

/// A character with its related rows attached, as returned by listings.
pub struct CharacterBundle {
    pub character: character::Model,
    pub facts: Vec<character_fact::Model>,
    pub traits: Vec<character_trait::Model>,
    pub conversations: Vec<conversation::Model>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<character::Model>, DbErr> {
    character::Entity::find_by_id(id).one(db).await
}

/// List characters visible to a user: their own, plus every public
/// character when `include_public` is set. Ordered by name (byte order,
/// deterministic), ties broken by id.
pub async fn list_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    include_public: bool,
) -> Result<Vec<character::Model>, DbErr> {
    let mut scope = Condition::any().add(character::Column::UserId.eq(user_id));
    if include_public {
        scope = scope.add(character::Column::Public.eq(true));
    }

    character::Entity::find()
        .filter(scope)
        .order_by_asc(character::Column::Name)
        .order_by_asc(character::Column::Id)
        .all(db)
        .await
}

/// Attach facts, traits, and linked conversations to a listing in three
/// batched queries.
pub async fn load_relations<C: ConnectionTrait>(
    db: &C,
    rows: Vec<character::Model>,
) -> Result<Vec<CharacterBundle>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = rows.iter().map(|c| c.id).collect();

    let mut facts_by_character: HashMap<Uuid, Vec<character_fact::Model>> = HashMap::new();
    for fact in character_fact::Entity::find()
        .filter(character_fact::Column::CharacterId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        facts_by_character.entry(fact.character_id).or_default().push(fact);
    }

    let mut traits_by_character: HashMap<Uuid, Vec<character_trait::Model>> = HashMap::new();
    for t in character_trait::Entity::find()
        .filter(character_trait::Column::CharacterId.is_in(ids.clone()))
        .all(db)
        .await?
    {
        traits_by_character.entry(t.character_id).or_default().push(t);
    }

    let links = character_conversation::Entity::find()
        .filter(character_conversation::Column::CharacterId.is_in(ids))
        .all(db)
        .await?;
    let conversation_ids: Vec<Uuid> = links.iter().map(|l| l.conversation_id).collect();
    let conversations_by_id: HashMap<Uuid, conversation::Model> = conversation::Entity::find()
        .filter(conversation::Column::Id.is_in(conversation_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let mut conversations_by_character: HashMap<Uuid, Vec<conversation::Model>> = HashMap::new();
    for link in links {
        if let Some(conv) = conversations_by_id.get(&link.conversation_id) {
            conversations_by_character
                .entry(link.character_id)
                .or_default()
                .push(conv.clone());
        }
    }

    Ok(rows
        .into_iter()
        .map(|c| {
            let id = c.id;
            CharacterBundle {
                character: c,
                facts: facts_by_character.remove(&id).unwrap_or_default(),
                traits: traits_by_character.remove(&id).unwrap_or_default(),
                conversations: conversations_by_character.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

pub async fn facts_for<C: ConnectionTrait>(
    db: &C,
    character_id: Uuid,
) -> Result<Vec<character_fact::Model>, DbErr> {
    character_fact::Entity::find()
        .filter(character_fact::Column::CharacterId.eq(character_id))
        .all(db)
        .await
}

pub async fn traits_for<C: ConnectionTrait>(
    db: &C,
    character_id: Uuid,
) -> Result<Vec<character_trait::Model>, DbErr> {
    character_trait::Entity::find()
        .filter(character_trait::Column::CharacterId.eq(character_id))
        .all(db)
        .await
}

pub async fn conversations_for<C: ConnectionTrait>(
    db: &C,
    character_id: Uuid,
) -> Result<Vec<conversation::Model>, DbErr> {
    let conversation_ids: Vec<Uuid> = character_conversation::Entity::find()
        .filter(character_conversation::Column::CharacterId.eq(character_id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.conversation_id)
        .collect();

    if conversation_ids.is_empty() {
        return Ok(Vec::new());
    }

    conversation::Entity::find()
        .filter(conversation::Column::Id.is_in(conversation_ids))
        .all(db)
        .await
}

/// Persist a new character owned by `user_id`.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    input: NewCharacter,
) -> Result<character::Model, DbErr> {
    let now = Utc::now();
    character::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        alternate_names: Set(to_string_list(&input.alternate_names)),
        tags: Set(to_string_list(&input.tags)),
        public: Set(input.public),
        default_model: Set(input.default_model),
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Delete a character and its dependent rows, child-first, in one
/// transaction.
pub async fn delete_character(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    delete_subtrees(&txn, &[id]).await?;
    txn.commit().await
}

/// Delete facts, traits, conversation links, then the character rows
/// themselves. Callers own the surrounding transaction.
pub(crate) async fn delete_subtrees<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<(), DbErr> {
    if ids.is_empty() {
        return Ok(());
    }

    character_fact::Entity::delete_many()
        .filter(character_fact::Column::CharacterId.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    character_trait::Entity::delete_many()
        .filter(character_trait::Column::CharacterId.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    character_conversation::Entity::delete_many()
        .filter(character_conversation::Column::CharacterId.is_in(ids.to_vec()))
        .exec(conn)
        .await?;
    character::Entity::delete_many()
        .filter(character::Column::Id.is_in(ids.to_vec()))
        .exec(conn)
        .await?;

    Ok(())
}
