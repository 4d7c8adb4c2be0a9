pub mod auth;
pub mod conversation;
pub mod graphql;
pub mod health;
