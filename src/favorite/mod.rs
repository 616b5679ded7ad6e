// Favorite games: the user-to-game relation and its projection onto the catalog

pub use reconciler::{project, FavoriteSet};
pub use repository::{FavoriteRepository, HttpFavoriteRepository, InMemoryFavoriteRepository};
pub use service::{FavoriteService, ToggleError};

mod reconciler;
pub mod repository;
mod service;
