// Event plumbing between the auth collaborator, the controller and the UI
//
// Authentication changes flow in, user-facing notices flow out.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{AuthEvent, Notice, NoticeLevel};
pub use handler::AuthEventHandler;
pub use subscription::AuthSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
