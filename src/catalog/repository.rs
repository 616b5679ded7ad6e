use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{Game, GameId};
use crate::api::ApiClient;
use crate::shared::AppError;

/// Trait for catalog reads
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_games(&self) -> Result<Vec<Game>, AppError>;
    async fn get_game(&self, game_id: GameId) -> Result<Game, AppError>;
}

/// In-memory catalog for development and testing
pub struct InMemoryCatalogRepository {
    games: Mutex<Vec<Game>>,
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::with_games(Vec::new())
    }

    pub fn with_games(games: Vec<Game>) -> Self {
        Self {
            games: Mutex::new(games),
        }
    }

    pub fn add_game(&self, game: Game) {
        self.games.lock().unwrap().push(game);
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        let games = self.games.lock().unwrap().clone();
        debug!(game_count = games.len(), "Listing games from memory");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: GameId) -> Result<Game, AppError> {
        self.games
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == game_id)
            .cloned()
            .ok_or_else(|| {
                warn!(game_id, "Game not found in memory");
                AppError::NotFound(format!("Game {} not found", game_id))
            })
    }
}

/// Catalog backed by `GET /games`
pub struct HttpCatalogRepository {
    api: ApiClient,
}

impl HttpCatalogRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CatalogRepository for HttpCatalogRepository {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        let games: Vec<Game> = self.api.get_json("games", None).await?;
        debug!(game_count = games.len(), "Fetched games");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: GameId) -> Result<Game, AppError> {
        self.api
            .get_json(&format!("games/{}", game_id), None)
            .await
            .map_err(|e| match e {
                AppError::Remote {
                    status: StatusCode::NOT_FOUND,
                    ..
                } => AppError::NotFound(format!("Game {} not found", game_id)),
                other => other,
            })
    }
}
