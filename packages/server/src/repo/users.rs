use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{character, persona, user};
use crate::github::GithubProfile;

use super::{characters, conversations};

/// Email of the user minted by the mock login endpoint.
pub const MOCK_USER_EMAIL: &str = "test@example.com";

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

/// Create or refresh the local user for a GitHub profile, keyed on the
/// provider id. Profile fields without a value fall back to derived ones so
/// a user row is always complete: login for the name, `login@github.local`
/// for the email.
pub async fn upsert_github_user(
    db: &DatabaseConnection,
    profile: &GithubProfile,
) -> Result<user::Model, DbErr> {
    let name = profile.name.clone().unwrap_or_else(|| profile.login.clone());
    let email = profile
        .email
        .clone()
        .unwrap_or_else(|| format!("{}@github.local", profile.login));
    let now = Utc::now();

    let txn = db.begin().await?;

    let existing = user::Entity::find()
        .filter(user::Column::GithubId.eq(profile.id.as_str()))
        .one(&txn)
        .await?;

    let saved = match existing {
        Some(found) => {
            let mut row = found.into_active_model();
            row.name = Set(name);
            row.email = Set(email);
            row.avatar_url = Set(profile.avatar_url.clone());
            row.updated_at = Set(now);
            row.update(&txn).await?
        }
        None => {
            user::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name),
                email: Set(email),
                github_id: Set(Some(profile.id.clone())),
                avatar_url: Set(profile.avatar_url.clone()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    Ok(saved)
}

/// Find or create the well-known mock user. Insertion races are settled by
/// the unique email index: a conflicting insert is dropped and the winner's
/// row is read back.
pub async fn find_or_create_mock_user(db: &DatabaseConnection) -> Result<user::Model, DbErr> {
    if let Some(found) = find_by_email(db, MOCK_USER_EMAIL).await? {
        return Ok(found);
    }

    let now = Utc::now();
    let insert = user::Entity::insert(user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Test User".to_string()),
        email: Set(MOCK_USER_EMAIL.to_string()),
        github_id: Set(Some("mock_123".to_string())),
        avatar_url: Set(Some(
            "https://avatars.githubusercontent.com/u/0?v=4".to_string(),
        )),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(user::Column::Email)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await;

    match insert {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(err) => return Err(err),
    }

    find_by_email(db, MOCK_USER_EMAIL)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("mock user vanished after insert".to_string()))
}

/// Delete a user together with their characters, personas, conversations,
/// and every dependent row, child-first, in one transaction.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    let character_ids: Vec<Uuid> = character::Entity::find()
        .filter(character::Column::UserId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    characters::delete_subtrees(&txn, &character_ids).await?;

    let persona_ids: Vec<Uuid> = persona::Entity::find()
        .filter(persona::Column::UserId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if !persona_ids.is_empty() {
        let conversation_ids: Vec<Uuid> = crate::entity::conversation::Entity::find()
            .filter(crate::entity::conversation::Column::PersonaId.is_in(persona_ids.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        conversations::delete_subtrees(&txn, &conversation_ids).await?;

        persona::Entity::delete_many()
            .filter(persona::Column::Id.is_in(persona_ids))
            .exec(&txn)
            .await?;
    }

    user::Entity::delete_many()
        .filter(user::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await
}
