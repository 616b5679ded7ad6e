use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::api::ApiClient;
use crate::auth::{AuthSession, UserId};
use crate::catalog::{Game, GameId};
use crate::shared::AppError;

/// Trait for the user-to-game favorite relation.
///
/// Every call is made on behalf of the signed-in user in `session`.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favorite games of the session user, in backend order
    async fn list_favorites(&self, session: &AuthSession) -> Result<Vec<Game>, AppError>;
    async fn add_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError>;
    async fn remove_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError>;
}

/// In-memory favorites keyed by user id, resolving games against a fixed catalog
pub struct InMemoryFavoriteRepository {
    catalog: Vec<Game>,
    edges: Mutex<HashMap<UserId, Vec<GameId>>>,
}

impl InMemoryFavoriteRepository {
    pub fn new(catalog: Vec<Game>) -> Self {
        Self {
            catalog,
            edges: Mutex::new(HashMap::new()),
        }
    }

    /// Seeds existing favorites for a user
    pub fn with_favorites(self, user_id: UserId, game_ids: Vec<GameId>) -> Self {
        self.edges.lock().unwrap().insert(user_id, game_ids);
        self
    }

    pub fn favorite_ids(&self, user_id: UserId) -> Vec<GameId> {
        self.edges
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn list_favorites(&self, session: &AuthSession) -> Result<Vec<Game>, AppError> {
        let ids = self.favorite_ids(session.user.id);
        let games: Vec<Game> = ids
            .iter()
            .filter_map(|id| self.catalog.iter().find(|g| g.id == *id).cloned())
            .collect();
        debug!(favorite_count = games.len(), "Listing favorites from memory");
        Ok(games)
    }

    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn add_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        if !self.catalog.iter().any(|g| g.id == game_id) {
            warn!(game_id, "Cannot favorite unknown game");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        let mut edges = self.edges.lock().unwrap();
        let ids = edges.entry(session.user.id).or_default();
        if !ids.contains(&game_id) {
            ids.push(game_id);
        }
        debug!(game_id, "Favorite added in memory");
        Ok(())
    }

    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn remove_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        let mut edges = self.edges.lock().unwrap();
        if let Some(ids) = edges.get_mut(&session.user.id) {
            ids.retain(|id| *id != game_id);
        }
        debug!(game_id, "Favorite removed in memory");
        Ok(())
    }
}

/// Favorites backed by the `/favorites` endpoints
pub struct HttpFavoriteRepository {
    api: ApiClient,
}

impl HttpFavoriteRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl FavoriteRepository for HttpFavoriteRepository {
    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn list_favorites(&self, session: &AuthSession) -> Result<Vec<Game>, AppError> {
        self.api
            .get_json("favorites/user", Some(&session.token))
            .await
    }

    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn add_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        self.api
            .post_empty(&format!("favorites/{}", game_id), Some(&session.token))
            .await
    }

    #[instrument(skip(self, session), fields(user_id = session.user.id))]
    async fn remove_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        self.api
            .delete(&format!("favorites/game/{}", game_id), Some(&session.token))
            .await
    }
}
