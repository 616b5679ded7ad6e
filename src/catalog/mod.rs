// Read-only view of the game catalog

pub use models::{Game, GameId};
pub use repository::{CatalogRepository, HttpCatalogRepository, InMemoryCatalogRepository};

pub mod models;
pub mod repository;
