use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::backends::Backends;
use super::notices::*;
use super::state::{ReviewDraft, ViewState};
use crate::auth::{can_delete, AuthSession, User};
use crate::catalog::{CatalogRepository, Game, GameId};
use crate::config::EngagementConfig;
use crate::event::{AuthEvent, AuthEventHandler, AuthSubscription, EventBus, Notice};
use crate::favorite::{FavoriteService, ToggleError};
use crate::rating::RatingLabel;
use crate::review::{Comment, CommentId, Review, ReviewId, ReviewService};
use crate::shared::AppError;

/// Drives the game list and the game detail view.
///
/// Remote calls never run under a lock. Results that arrive after the
/// detail view was closed or reopened are dropped.
pub struct EngagementController {
    catalog: Arc<dyn CatalogRepository>,
    favorites: FavoriteService,
    reviews: ReviewService,
    event_bus: EventBus,
    config: EngagementConfig,
    session: RwLock<Option<AuthSession>>,
    state: RwLock<ViewState>,
}

impl EngagementController {
    pub fn new(backends: Backends, event_bus: EventBus, config: EngagementConfig) -> Self {
        Self {
            catalog: backends.catalog,
            favorites: FavoriteService::new(backends.favorites),
            reviews: ReviewService::new(backends.reviews, backends.comments),
            event_bus,
            config,
            session: RwLock::new(None),
            state: RwLock::new(ViewState::default()),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Reacts to authentication changes published on the event bus
    pub fn watch_auth(self: &Arc<Self>) -> JoinHandle<()> {
        AuthSubscription::new(self.clone(), self.event_bus.clone()).start()
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Replaces the session without reloading anything
    pub async fn set_session(&self, session: Option<AuthSession>) {
        *self.session.write().await = session;
    }

    fn notify_failure(&self, err: &AppError, fallback: &str) {
        // Blank input is ignored silently, like a disabled submit button
        if matches!(err, AppError::Validation(_)) {
            return;
        }
        self.event_bus.notify(Notice::error(err.user_message(fallback)));
    }

    // ------------------------------------------------------------------
    // Game list and favorites
    // ------------------------------------------------------------------

    /// Reloads the catalog and reconciles favorite flags.
    ///
    /// A favorites failure is logged and leaves every flag cleared; only a
    /// catalog failure is reported to the user.
    #[instrument(skip(self))]
    pub async fn load_games(&self) -> Result<Vec<Game>, AppError> {
        let catalog = match self.catalog.list_games().await {
            Ok(games) => games,
            Err(e) => {
                warn!(error = %e, "Failed to load games");
                self.notify_failure(&e, LOAD_GAMES_FAILED);
                return Err(e);
            }
        };
        self.state.write().await.catalog = catalog.clone();

        let session = self.session().await;
        let games = match self.favorites.reconcile(&catalog, session.as_ref()).await {
            Ok(games) => games,
            Err(e) => {
                warn!(error = %e, "Failed to load favorites");
                self.favorites.annotate(&catalog).await
            }
        };

        info!(game_count = games.len(), "Games loaded");
        Ok(games)
    }

    /// The game list with favorite flags projected from the current set
    pub async fn games(&self) -> Vec<Game> {
        let catalog = self.state.read().await.catalog.clone();
        self.favorites.annotate(&catalog).await
    }

    pub async fn game(&self, game_id: GameId) -> Option<Game> {
        self.games().await.into_iter().find(|g| g.id == game_id)
    }

    /// Flips a game's favorite state; the list reflects it before the backend answers
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, game_id: GameId) -> Result<bool, AppError> {
        let session = self.session().await;

        match self.favorites.toggle(game_id, session.as_ref()).await {
            Ok(true) => {
                self.event_bus.notify(Notice::success(FAVORITE_ADDED));
                Ok(true)
            }
            Ok(false) => {
                self.event_bus.notify(Notice::success(FAVORITE_REMOVED));
                Ok(false)
            }
            Err(ToggleError { adding, error }) => {
                let fallback = if adding {
                    FAVORITE_ADD_FAILED
                } else {
                    FAVORITE_REMOVE_FAILED
                };
                self.notify_failure(&error, fallback);
                Err(error)
            }
        }
    }

    /// The signed-in user's favorites page
    pub async fn favorites_page(&self) -> Result<Vec<Game>, AppError> {
        let session = self.session().await;
        self.favorites.list_favorites(session.as_ref()).await
    }

    pub async fn remove_from_favorites_page(
        &self,
        page: &mut Vec<Game>,
        game_id: GameId,
    ) -> Result<(), AppError> {
        let session = self.session().await;
        match self
            .favorites
            .remove_from_list(page, game_id, session.as_ref())
            .await
        {
            Ok(()) => {
                self.event_bus.notify(Notice::success(FAVORITE_REMOVED));
                Ok(())
            }
            Err(e) => {
                self.notify_failure(&e, FAVORITE_REMOVE_FAILED);
                Err(e)
            }
        }
    }

    /// Favorites for the home view; empty when signed out
    pub async fn recent_favorites(&self) -> Result<Vec<Game>, AppError> {
        let session = self.session().await;
        self.favorites
            .recent_favorites(session.as_ref(), self.config.recent_favorites)
            .await
    }

    // ------------------------------------------------------------------
    // Detail view
    // ------------------------------------------------------------------

    /// Opens the detail view of a game, loading its reviews and then every
    /// review's comments concurrently.
    #[instrument(skip(self))]
    pub async fn open_game(&self, game_id: GameId) -> Result<(), AppError> {
        let generation = self.state.write().await.open(game_id);
        debug!(generation, "Detail view opened");

        let reviews = match self.reviews.load_reviews(game_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                if self.state.read().await.current_generation() == Some(generation) {
                    self.notify_failure(&e, LOAD_REVIEWS_FAILED);
                }
                return Err(e);
            }
        };

        let review_ids: Vec<ReviewId> = {
            let mut state = self.state.write().await;
            let Some(view) = state.view_for(generation) else {
                debug!(generation, "Detail view changed, dropping reviews");
                return Ok(());
            };
            view.thread.replace_reviews(reviews);
            view.thread.reviews().iter().map(|r| r.id).collect()
        };

        self.load_comments(generation, review_ids).await;
        Ok(())
    }

    /// One comment request per review, attached by review id as each arrives
    async fn load_comments(&self, generation: u64, review_ids: Vec<ReviewId>) {
        let mut pending: FuturesUnordered<_> = review_ids
            .into_iter()
            .map(|review_id| async move { (review_id, self.reviews.load_comments(review_id).await) })
            .collect();

        while let Some((review_id, result)) = pending.next().await {
            let mut state = self.state.write().await;
            let Some(view) = state.view_for(generation) else {
                debug!(review_id, generation, "Detail view changed, dropping comments");
                continue;
            };

            match result {
                Ok(comments) => {
                    view.thread.attach_comments(review_id, comments);
                }
                Err(e) => {
                    warn!(review_id, error = %e, "Failed to load comments");
                    self.notify_failure(&e, LOAD_COMMENTS_FAILED);
                }
            }
        }
    }

    /// Closes the detail view; in-flight loads for it are ignored when they land
    pub async fn close_game(&self) {
        self.state.write().await.close();
        debug!("Detail view closed");
    }

    pub async fn open_game_id(&self) -> Option<GameId> {
        self.state
            .read()
            .await
            .open
            .as_ref()
            .map(|view| view.thread.game_id())
    }

    /// Reviews of the open game, empty when closed
    pub async fn reviews(&self) -> Vec<Review> {
        self.state
            .read()
            .await
            .open
            .as_ref()
            .map(|view| view.thread.reviews().to_vec())
            .unwrap_or_default()
    }

    pub async fn review(&self, review_id: ReviewId) -> Option<Review> {
        let state = self.state.read().await;
        state.open.as_ref()?.thread.review(review_id).cloned()
    }

    pub async fn can_delete_review(&self, review_id: ReviewId) -> bool {
        let user = self.current_user().await;
        let state = self.state.read().await;
        state
            .open
            .as_ref()
            .and_then(|view| view.thread.review(review_id))
            .is_some_and(|review| can_delete(user.as_ref(), review))
    }

    pub async fn can_delete_comment(&self, comment_id: CommentId) -> bool {
        let user = self.current_user().await;
        let state = self.state.read().await;
        state
            .open
            .as_ref()
            .and_then(|view| view.thread.comment(comment_id))
            .is_some_and(|comment| can_delete(user.as_ref(), comment))
    }

    // ------------------------------------------------------------------
    // Drafts
    // ------------------------------------------------------------------

    pub async fn set_review_content(&self, content: impl Into<String>) {
        if let Some(view) = self.state.write().await.open.as_mut() {
            view.review_draft.content = content.into();
        }
    }

    /// Picks the star rating for the review draft, 1 through 5
    pub async fn set_rating(&self, stars: u8) -> Result<(), AppError> {
        let rating = RatingLabel::from_value(stars)
            .ok_or_else(|| AppError::Validation(format!("rating must be 1-5, got {}", stars)))?;
        if let Some(view) = self.state.write().await.open.as_mut() {
            view.review_draft.rating = rating;
        }
        Ok(())
    }

    pub async fn review_draft(&self) -> Option<ReviewDraft> {
        self.state
            .read()
            .await
            .open
            .as_ref()
            .map(|view| view.review_draft.clone())
    }

    pub async fn set_comment_draft(&self, review_id: ReviewId, content: impl Into<String>) {
        if let Some(view) = self.state.write().await.open.as_mut() {
            view.comment_drafts.insert(review_id, content.into());
        }
    }

    pub async fn comment_draft(&self, review_id: ReviewId) -> Option<String> {
        let state = self.state.read().await;
        state.open.as_ref()?.comment_drafts.get(&review_id).cloned()
    }

    // ------------------------------------------------------------------
    // Review and comment mutations
    // ------------------------------------------------------------------

    /// Submits the review draft for the open game.
    ///
    /// The review is appended only once the backend has accepted it.
    #[instrument(skip(self))]
    pub async fn submit_review(&self) -> Result<Review, AppError> {
        let (generation, game_id, draft) = {
            let state = self.state.read().await;
            let view = state
                .open
                .as_ref()
                .ok_or_else(|| AppError::Validation("no game is open".to_string()))?;
            (
                view.thread.generation(),
                view.thread.game_id(),
                view.review_draft.clone(),
            )
        };
        let session = self.session().await;

        let review = match self
            .reviews
            .submit_review(session.as_ref(), game_id, &draft.content, draft.rating)
            .await
        {
            Ok(review) => review,
            Err(e) => {
                self.notify_failure(&e, REVIEW_SUBMIT_FAILED);
                return Err(e);
            }
        };

        if let Some(view) = self.state.write().await.view_for(generation) {
            view.thread.push_review(review.clone());
            view.review_draft.content.clear();
        }
        self.event_bus.notify(Notice::success(REVIEW_SUBMITTED));
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, review_id: ReviewId) -> Result<(), AppError> {
        let session = self.session().await;
        if let Err(e) = self.reviews.delete_review(session.as_ref(), review_id).await {
            self.notify_failure(&e, REVIEW_DELETE_FAILED);
            return Err(e);
        }

        if let Some(view) = self.state.write().await.open.as_mut() {
            view.thread.remove_review(review_id);
        }
        self.event_bus.notify(Notice::success(REVIEW_DELETED));
        Ok(())
    }

    /// Submits the comment draft of a review in the open game
    #[instrument(skip(self))]
    pub async fn submit_comment(&self, review_id: ReviewId) -> Result<Comment, AppError> {
        let (generation, content) = {
            let state = self.state.read().await;
            let view = state
                .open
                .as_ref()
                .ok_or_else(|| AppError::Validation("no game is open".to_string()))?;
            (
                view.thread.generation(),
                view.comment_drafts.get(&review_id).cloned().unwrap_or_default(),
            )
        };
        let session = self.session().await;

        let comment = match self
            .reviews
            .submit_comment(session.as_ref(), review_id, &content)
            .await
        {
            Ok(comment) => comment,
            Err(e) => {
                self.notify_failure(&e, COMMENT_SUBMIT_FAILED);
                return Err(e);
            }
        };

        if let Some(view) = self.state.write().await.view_for(generation) {
            view.thread.push_comment(comment.clone());
            view.comment_drafts.remove(&review_id);
        }
        self.event_bus.notify(Notice::success(COMMENT_SUBMITTED));
        Ok(comment)
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: CommentId) -> Result<(), AppError> {
        let session = self.session().await;
        if let Err(e) = self.reviews.delete_comment(session.as_ref(), comment_id).await {
            self.notify_failure(&e, COMMENT_DELETE_FAILED);
            return Err(e);
        }

        if let Some(view) = self.state.write().await.open.as_mut() {
            view.thread.remove_comment(comment_id);
        }
        self.event_bus.notify(Notice::success(COMMENT_DELETED));
        Ok(())
    }
}

#[async_trait]
impl AuthEventHandler for EngagementController {
    /// Swaps the session and reloads the game list so favorite flags and
    /// delete permissions follow the new user
    async fn handle_auth_event(&self, event: AuthEvent) -> Result<(), AppError> {
        info!(event_type = event.event_type(), "Authentication changed");
        self.set_session(event.session().cloned()).await;
        self.load_games().await.map(|_| ())
    }

    fn handler_name(&self) -> &'static str {
        "engagement_controller"
    }
}
