use super::models::{Role, User, UserId};
use crate::shared::AppError;

/// Content that belongs to a single author
pub trait Authored {
    fn author_id(&self) -> UserId;
}

/// Whether `actor` may delete `content`.
///
/// Authors may delete their own content; admins and moderators may delete
/// anything. Nobody may delete while signed out. Evaluate this on every
/// render, since the actor can change without the content reloading.
pub fn can_delete<C: Authored + ?Sized>(actor: Option<&User>, content: &C) -> bool {
    match actor {
        None => false,
        Some(user) => user.id == content.author_id() || user.role.is_moderator(),
    }
}

pub fn is_reviewer(actor: Option<&User>) -> bool {
    actor.is_some_and(|user| user.role == Role::Reviewer)
}

/// Rejects writes from signed-out or banned accounts before any remote call
pub fn ensure_can_author<'a>(actor: Option<&'a User>, message: &str) -> Result<&'a User, AppError> {
    match actor {
        None => Err(AppError::Unauthenticated(message.to_string())),
        Some(user) if user.banned => {
            Err(AppError::Unauthenticated("Your account has been suspended.".to_string()))
        }
        Some(user) => Ok(user),
    }
}
