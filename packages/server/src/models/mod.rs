pub mod auth;
pub mod conversation;
