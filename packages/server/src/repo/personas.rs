use sea_orm::*;
use uuid::Uuid;

use crate::entity::{conversation, persona};

use super::conversations;

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<persona::Model>, DbErr> {
    persona::Entity::find_by_id(id).one(db).await
}

pub async fn list_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<persona::Model>, DbErr> {
    persona::Entity::find()
        .filter(persona::Column::UserId.eq(user_id))
        .order_by_asc(persona::Column::Name)
        .order_by_asc(persona::Column::Id)
        .all(db)
        .await
}

/// Delete a persona and everything hanging off it: its conversations with
/// their facts and character links, then the persona itself.
pub async fn delete_persona(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    let conversation_ids: Vec<Uuid> = conversation::Entity::find()
        .filter(conversation::Column::PersonaId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    conversations::delete_subtrees(&txn, &conversation_ids).await?;

    persona::Entity::delete_many()
        .filter(persona::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await
}
