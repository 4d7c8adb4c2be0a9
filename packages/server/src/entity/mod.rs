pub mod character;
pub mod character_conversation;
pub mod character_fact;
pub mod character_trait;
pub mod conversation;
pub mod conversation_fact;
pub mod persona;
pub mod user;
