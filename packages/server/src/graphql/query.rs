use async_graphql::connection::{Connection, Edge};
use async_graphql::{Context, Error, ID, Object, Result};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::pagination::{PageArgs, paginate};
use crate::repo;

use super::types::{Character, Conversation, User};
use super::{AuthSession, db_error, page_error};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The viewer, or null when the request carries no usable token.
    async fn current_user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let session = ctx.data::<AuthSession>()?;
        Ok(session.user.clone().map(User::new))
    }

    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        ctx.data::<AuthSession>()?.require_user()?;
        let db = ctx.data::<DatabaseConnection>()?;
        let id = parse_id(&id)?;
        let row = repo::users::find_by_id(db, id).await.map_err(db_error)?;
        Ok(row.map(User::new))
    }

    /// Characters visible to the viewer, ordered by name. With
    /// `includePublic` the listing is the union of owned and public
    /// characters.
    async fn characters(
        &self,
        ctx: &Context<'_>,
        include_public: Option<bool>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, Character>> {
        let viewer = ctx.data::<AuthSession>()?.require_user()?;
        let db = ctx.data::<DatabaseConnection>()?;

        let rows = repo::characters::list_for_user(db, viewer.id, include_public.unwrap_or(false))
            .await
            .map_err(db_error)?;
        let bundles = repo::characters::load_relations(db, rows)
            .await
            .map_err(db_error)?;

        let args = PageArgs {
            first,
            after,
            last,
            before,
        };
        let page =
            paginate(bundles, |b| b.character.id.to_string(), &args).map_err(page_error)?;

        let mut connection = Connection::new(page.has_previous_page, page.has_next_page);
        connection.edges.extend(
            page.edges
                .into_iter()
                .map(|(cursor, bundle)| Edge::new(cursor, Character::preloaded(bundle))),
        );
        Ok(connection)
    }

    /// The viewer's conversations across all of their personas, ordered by
    /// title.
    async fn conversations(
        &self,
        ctx: &Context<'_>,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> Result<Connection<String, Conversation>> {
        let viewer = ctx.data::<AuthSession>()?.require_user()?;
        let db = ctx.data::<DatabaseConnection>()?;

        let rows = repo::conversations::list_for_user(db, viewer.id)
            .await
            .map_err(db_error)?;
        let bundles = repo::conversations::load_relations(db, rows)
            .await
            .map_err(db_error)?;

        let args = PageArgs {
            first,
            after,
            last,
            before,
        };
        let page =
            paginate(bundles, |b| b.conversation.id.to_string(), &args).map_err(page_error)?;

        let mut connection = Connection::new(page.has_previous_page, page.has_next_page);
        connection.edges.extend(
            page.edges
                .into_iter()
                .map(|(cursor, bundle)| Edge::new(cursor, Conversation::preloaded(bundle))),
        );
        Ok(connection)
    }

    /// Model identifiers selectable for new characters.
    async fn available_models(&self) -> Vec<String> {
        vec!["Llama 3.2".to_string()]
    }
}

fn parse_id(id: &ID) -> Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| Error::new("Invalid id"))
}
