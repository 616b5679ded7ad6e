// Session view of the signed-in user and the rules gating destructive actions

pub use models::{AuthSession, Role, User, UserId};
pub use permissions::{can_delete, ensure_can_author, is_reviewer, Authored};

pub mod models;
mod permissions;
