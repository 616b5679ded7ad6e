use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use gameverdict::{
    auth::AuthSession,
    catalog::{CatalogRepository, Game, GameId, InMemoryCatalogRepository},
    favorite::{FavoriteRepository, InMemoryFavoriteRepository},
    review::{
        Comment, CommentId, CommentRepository, InMemoryCommentRepository,
        InMemoryReviewRepository, NewComment, NewReview, Review, ReviewId, ReviewRepository,
    },
    AppError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// In-memory backend that records every call and can hold or fail them
///
/// Call keys look like `list_comments:3` or `add_favorite:1`. A gated key
/// blocks until `release` is called for it; a failing operation name returns
/// a 500 without a message.
pub struct MockBackend {
    catalog: InMemoryCatalogRepository,
    favorites: InMemoryFavoriteRepository,
    reviews: InMemoryReviewRepository,
    comments: InMemoryCommentRepository,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl MockBackend {
    pub fn new(
        games: Vec<Game>,
        favorites: Vec<(i64, Vec<GameId>)>,
        reviews: Vec<Review>,
        comments: Vec<Comment>,
    ) -> Self {
        let mut favorite_repo = InMemoryFavoriteRepository::new(games.clone());
        for (user_id, ids) in favorites {
            favorite_repo = favorite_repo.with_favorites(user_id, ids);
        }

        Self {
            catalog: InMemoryCatalogRepository::with_games(games),
            favorites: favorite_repo,
            reviews: InMemoryReviewRepository::with_reviews(reviews),
            comments: InMemoryCommentRepository::with_comments(comments),
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls for an operation, whatever the argument
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn recover(&self, operation: &str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn gate(&self, key: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.add_permits(1);
        }
    }

    pub fn favorite_ids(&self, user_id: i64) -> Vec<GameId> {
        self.favorites.favorite_ids(user_id)
    }

    pub fn review_count(&self) -> usize {
        self.reviews.review_count()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.comment_count()
    }

    async fn enter(&self, operation: &str, arg: impl std::fmt::Display) -> Result<(), AppError> {
        let key = format!("{}:{}", operation, arg);
        self.calls.lock().unwrap().push(key.clone());

        let gate = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        if self.failing.lock().unwrap().contains(operation) {
            return Err(AppError::Remote {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MockBackend {
    async fn list_games(&self) -> Result<Vec<Game>, AppError> {
        self.enter("list_games", "").await?;
        self.catalog.list_games().await
    }

    async fn get_game(&self, game_id: GameId) -> Result<Game, AppError> {
        self.enter("get_game", game_id).await?;
        self.catalog.get_game(game_id).await
    }
}

#[async_trait]
impl FavoriteRepository for MockBackend {
    async fn list_favorites(&self, session: &AuthSession) -> Result<Vec<Game>, AppError> {
        self.enter("list_favorites", session.user.id).await?;
        self.favorites.list_favorites(session).await
    }

    async fn add_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        self.enter("add_favorite", game_id).await?;
        self.favorites.add_favorite(session, game_id).await
    }

    async fn remove_favorite(&self, session: &AuthSession, game_id: GameId) -> Result<(), AppError> {
        self.enter("remove_favorite", game_id).await?;
        self.favorites.remove_favorite(session, game_id).await
    }
}

#[async_trait]
impl ReviewRepository for MockBackend {
    async fn list_reviews(&self, game_id: GameId) -> Result<Vec<Review>, AppError> {
        self.enter("list_reviews", game_id).await?;
        self.reviews.list_reviews(game_id).await
    }

    async fn create_review(
        &self,
        session: &AuthSession,
        review: &NewReview,
    ) -> Result<Review, AppError> {
        self.enter("create_review", review.game_id).await?;
        self.reviews.create_review(session, review).await
    }

    async fn delete_review(
        &self,
        session: &AuthSession,
        review_id: ReviewId,
    ) -> Result<(), AppError> {
        self.enter("delete_review", review_id).await?;
        self.reviews.delete_review(session, review_id).await
    }
}

#[async_trait]
impl CommentRepository for MockBackend {
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, AppError> {
        self.enter("list_comments", review_id).await?;
        self.comments.list_comments(review_id).await
    }

    async fn create_comment(
        &self,
        session: &AuthSession,
        comment: &NewComment,
    ) -> Result<Comment, AppError> {
        self.enter("create_comment", comment.review_id).await?;
        self.comments.create_comment(session, comment).await
    }

    async fn delete_comment(
        &self,
        session: &AuthSession,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        self.enter("delete_comment", comment_id).await?;
        self.comments.delete_comment(session, comment_id).await
    }
}
