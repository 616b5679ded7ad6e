// Library crate for the GameVerdict review and social engagement engine
// This file exposes the public API for integration tests and frontends

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod embed;
pub mod engagement;
pub mod event;
pub mod favorite;
pub mod rating;
pub mod review;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use api::ApiClient;
pub use auth::{can_delete, AuthSession, Role, User};
pub use catalog::Game;
pub use config::{ApiConfig, EngagementConfig};
pub use embed::to_embed_url;
pub use engagement::{Backends, EngagementController};
pub use event::{AuthEvent, EventBus, Notice, NoticeLevel};
pub use rating::{label_to_value, stars_for, value_to_label, RatingLabel, StarDisplay};
pub use review::{Comment, Review};
pub use shared::{AppError, AppResult};
