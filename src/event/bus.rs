use tokio::sync::broadcast;
use tracing::debug;

use super::events::{AuthEvent, Notice};

/// Event bus for authentication changes and user notices
#[derive(Debug, Clone)]
pub struct EventBus {
    auth: broadcast::Sender<AuthEvent>,
    notices: broadcast::Sender<Notice>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

impl EventBus {
    /// Creates a new event bus whose channels buffer `capacity` events
    pub fn new(capacity: usize) -> Self {
        let (auth, _) = broadcast::channel(capacity);
        let (notices, _) = broadcast::channel(capacity);
        Self { auth, notices }
    }

    /// Publishes an authentication change to all subscribers
    pub fn emit_auth(&self, event: AuthEvent) {
        let event_type = event.event_type();
        match self.auth.send(event) {
            Ok(receiver_count) => {
                debug!(event_type, receivers = receiver_count, "Auth event emitted");
            }
            Err(_) => {
                debug!(event_type, "Auth event emitted with no receivers");
            }
        }
    }

    pub fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth.subscribe()
    }

    /// Publishes a notice for the UI
    pub fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            debug!("Notice emitted with no receivers");
        }
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }
}
