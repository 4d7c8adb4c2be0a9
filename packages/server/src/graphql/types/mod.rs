mod character;
mod conversation;
mod persona;
mod user;

pub use character::{Character, CharacterFact, CharacterTrait};
pub use conversation::Conversation;
pub use persona::Persona;
pub use user::User;
