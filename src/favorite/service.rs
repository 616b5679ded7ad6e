use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::reconciler::{project, FavoriteSet};
use super::repository::FavoriteRepository;
use crate::auth::{ensure_can_author, AuthSession, UserId};
use crate::catalog::{Game, GameId};
use crate::shared::AppError;

pub const LOGIN_REQUIRED: &str = "Please log in to add favorites";

/// A failed toggle and the state it was trying to reach
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ToggleError {
    /// True when the failed call was an add
    pub adding: bool,
    pub error: AppError,
}

/// Local favorite set and the reconcile it came from
#[derive(Debug, Default)]
struct LocalFavorites {
    set: FavoriteSet,
    /// User the set was last reconciled for
    owner: Option<UserId>,
    /// Bumped on every reconcile
    epoch: u64,
}

impl LocalFavorites {
    fn replace(&mut self, set: FavoriteSet, owner: Option<UserId>) {
        self.set = set;
        self.owner = owner;
        self.epoch += 1;
    }
}

/// Keeps the local favorite set in step with the backend
pub struct FavoriteService {
    repository: Arc<dyn FavoriteRepository>,
    favorites: RwLock<LocalFavorites>,
    /// One lock per game so toggles on the same game run one after another
    toggle_locks: Mutex<HashMap<GameId, Arc<AsyncMutex<()>>>>,
}

impl FavoriteService {
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Self {
        Self {
            repository,
            favorites: RwLock::new(LocalFavorites::default()),
            toggle_locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn snapshot(&self) -> FavoriteSet {
        self.favorites.read().await.set.clone()
    }

    pub async fn is_favorite(&self, game_id: GameId) -> bool {
        self.favorites.read().await.set.contains(game_id)
    }

    /// Projects the current favorite set onto `games` without a remote call
    pub async fn annotate(&self, games: &[Game]) -> Vec<Game> {
        project(games, &self.favorites.read().await.set)
    }

    /// Refreshes the favorite set from the backend and projects it onto `games`.
    ///
    /// Signed out, the set is cleared and the favorites endpoint is never
    /// called. If the fetch fails the set is cleared too, so no flag from a
    /// previous user survives; the error is still returned.
    #[instrument(skip(self, games, actor), fields(game_count = games.len()))]
    pub async fn reconcile(
        &self,
        games: &[Game],
        actor: Option<&AuthSession>,
    ) -> Result<Vec<Game>, AppError> {
        let Some(session) = actor else {
            debug!("No signed-in user, clearing favorites");
            self.favorites.write().await.replace(FavoriteSet::new(), None);
            return Ok(project(games, &FavoriteSet::new()));
        };

        match self.repository.list_favorites(session).await {
            Ok(favorite_games) => {
                let set = FavoriteSet::from_games(&favorite_games);
                debug!(favorite_count = set.len(), "Favorites reconciled");
                let projected = project(games, &set);
                self.favorites
                    .write()
                    .await
                    .replace(set, Some(session.user.id));
                Ok(projected)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load favorites");
                self.favorites
                    .write()
                    .await
                    .replace(FavoriteSet::new(), Some(session.user.id));
                Err(e)
            }
        }
    }

    fn toggle_lock(&self, game_id: GameId) -> Arc<AsyncMutex<()>> {
        self.toggle_locks
            .lock()
            .unwrap()
            .entry(game_id)
            .or_default()
            .clone()
    }

    /// Flips the favorite state of a game and returns the new state.
    ///
    /// The local set is flipped before the remote call. A confirmed call is
    /// written again afterwards, since a reconcile for the same user may have
    /// replaced the set meanwhile; a set reconciled for another user is left
    /// alone. A failed call is reverted only if no reconcile happened while
    /// it was in flight. A second toggle of the same game waits for the first
    /// to settle and then flips the settled state.
    #[instrument(skip(self, actor))]
    pub async fn toggle(
        &self,
        game_id: GameId,
        actor: Option<&AuthSession>,
    ) -> Result<bool, ToggleError> {
        let rejected = |error: AppError, adding: bool| ToggleError { adding, error };
        let session = match actor {
            Some(session) => session,
            None => {
                let adding = !self.is_favorite(game_id).await;
                return Err(rejected(
                    AppError::Unauthenticated(LOGIN_REQUIRED.to_string()),
                    adding,
                ));
            }
        };
        if let Err(e) = ensure_can_author(Some(&session.user), LOGIN_REQUIRED) {
            let adding = !self.is_favorite(game_id).await;
            return Err(rejected(e, adding));
        }

        let lock = self.toggle_lock(game_id);
        let _guard = lock.lock().await;

        let (was_favorite, epoch) = {
            let mut local = self.favorites.write().await;
            let was_favorite = local.set.contains(game_id);
            local.set.set(game_id, !was_favorite);
            (was_favorite, local.epoch)
        };
        let target = !was_favorite;

        let result = if target {
            self.repository.add_favorite(session, game_id).await
        } else {
            self.repository.remove_favorite(session, game_id).await
        };

        let mut local = self.favorites.write().await;
        let reconciled = local.epoch != epoch;
        match result {
            Ok(()) => {
                if !reconciled || local.owner == Some(session.user.id) {
                    local.set.set(game_id, target);
                } else {
                    debug!(game_id, "Favorites reloaded for another user, not applying toggle");
                }
                info!(game_id, is_favorite = target, "Favorite toggled");
                Ok(target)
            }
            Err(e) => {
                if reconciled {
                    debug!(game_id, "Favorites reloaded during toggle, keeping reloaded state");
                } else {
                    local.set.set(game_id, was_favorite);
                }
                warn!(game_id, error = %e, "Favorite toggle failed");
                Err(rejected(e, target))
            }
        }
    }

    /// The signed-in user's favorites page
    #[instrument(skip(self, actor))]
    pub async fn list_favorites(&self, actor: Option<&AuthSession>) -> Result<Vec<Game>, AppError> {
        let session =
            actor.ok_or_else(|| AppError::Unauthenticated(LOGIN_REQUIRED.to_string()))?;
        let mut games = self.repository.list_favorites(session).await?;
        for game in &mut games {
            game.is_favorite = true;
        }
        Ok(games)
    }

    /// Removes a game from the favorites page after the backend confirms
    #[instrument(skip(self, list, actor))]
    pub async fn remove_from_list(
        &self,
        list: &mut Vec<Game>,
        game_id: GameId,
        actor: Option<&AuthSession>,
    ) -> Result<(), AppError> {
        let session =
            actor.ok_or_else(|| AppError::Unauthenticated(LOGIN_REQUIRED.to_string()))?;

        let lock = self.toggle_lock(game_id);
        let _guard = lock.lock().await;

        self.repository.remove_favorite(session, game_id).await?;
        list.retain(|g| g.id != game_id);
        self.favorites.write().await.set.set(game_id, false);
        info!(game_id, "Removed from favorites page");
        Ok(())
    }

    /// First `limit` favorites, empty when signed out
    #[instrument(skip(self, actor))]
    pub async fn recent_favorites(
        &self,
        actor: Option<&AuthSession>,
        limit: usize,
    ) -> Result<Vec<Game>, AppError> {
        if actor.is_none() {
            return Ok(Vec::new());
        }
        let mut games = self.list_favorites(actor).await?;
        games.truncate(limit);
        Ok(games)
    }
}
