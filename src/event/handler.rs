use async_trait::async_trait;

use super::events::AuthEvent;
use crate::shared::AppError;

/// Trait for components that react to authentication changes
#[async_trait]
pub trait AuthEventHandler: Send + Sync {
    /// Handle an authentication change
    ///
    /// Errors are logged by the subscription and do not stop it.
    async fn handle_auth_event(&self, event: AuthEvent) -> Result<(), AppError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
