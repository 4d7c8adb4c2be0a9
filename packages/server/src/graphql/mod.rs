//! GraphQL schema: query and mutation roots, output types, and the
//! per-request viewer context. The schema owns a database handle; everything
//! request-scoped arrives through [`AuthSession`].

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Error, Schema};
use sea_orm::{DatabaseConnection, DbErr};
use tracing::error;

use crate::entity::user;
use crate::pagination::PageError;

use mutation::MutationRoot;
use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The viewer resolved from the request's bearer token, or no one.
#[derive(Clone)]
pub struct AuthSession {
    pub user: Option<user::Model>,
}

impl AuthSession {
    /// The viewer, or the uniform error every gated field raises.
    pub fn require_user(&self) -> Result<&user::Model, Error> {
        self.user
            .as_ref()
            .ok_or_else(|| Error::new("Authentication required"))
    }
}

pub fn build_schema(db: DatabaseConnection) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

/// Database failures surface as generic messages; the cause goes to the log.
pub(crate) fn db_error(err: DbErr) -> Error {
    error!("database error in resolver: {err}");
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            Error::new("Service temporarily unavailable")
        }
        _ => Error::new("Internal error"),
    }
}

pub(crate) fn page_error(err: PageError) -> Error {
    Error::new(err.to_string())
}
