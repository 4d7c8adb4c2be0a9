//! Data access, one module per aggregate. Resolvers and handlers never build
//! queries themselves; cross-entity references stay foreign-key only and
//! multi-row listings are batch-loaded here to avoid per-row fetch fan-out.

pub mod characters;
pub mod conversations;
pub mod personas;
pub mod users;
