// Orchestrates the game list and the game detail view in response to user actions

pub use backends::Backends;
pub use controller::EngagementController;
pub use state::ReviewDraft;

mod backends;
mod controller;
pub mod notices;
mod state;
