use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{bus::EventBus, handler::AuthEventHandler};

/// Routes authentication changes from the bus to a handler
pub struct AuthSubscription {
    handler: Arc<dyn AuthEventHandler>,
    event_bus: EventBus,
}

impl AuthSubscription {
    pub fn new(handler: Arc<dyn AuthEventHandler>, event_bus: EventBus) -> Self {
        Self { handler, event_bus }
    }

    /// Start the subscription - spawns a background task that listens for
    /// authentication changes and hands each one to the handler in order
    pub fn start(self) -> JoinHandle<()> {
        let handler_name = self.handler.handler_name();
        let mut receiver = self.event_bus.subscribe_auth();

        info!(handler = handler_name, "Starting auth subscription");

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        // Only the latest state matters; keep going
                        warn!(handler = handler_name, skipped, "Auth subscription lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                info!(
                    handler = handler_name,
                    event_type = event.event_type(),
                    "Received auth event"
                );

                if let Err(e) = self.handler.handle_auth_event(event).await {
                    warn!(handler = handler_name, error = %e, "Auth event handler failed");
                }
            }

            warn!(handler = handler_name, "Auth subscription ended - no more events");
        })
    }
}
