use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{Comment, CommentId, NewComment, NewReview, Review, ReviewId};
use crate::api::ApiClient;
use crate::auth::{can_delete, AuthSession};
use crate::catalog::GameId;
use crate::shared::AppError;

/// Trait for review lifecycle calls
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list_reviews(&self, game_id: GameId) -> Result<Vec<Review>, AppError>;
    async fn create_review(
        &self,
        session: &AuthSession,
        review: &NewReview,
    ) -> Result<Review, AppError>;
    async fn delete_review(&self, session: &AuthSession, review_id: ReviewId)
        -> Result<(), AppError>;
}

/// Trait for comment lifecycle calls
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, AppError>;
    async fn create_comment(
        &self,
        session: &AuthSession,
        comment: &NewComment,
    ) -> Result<Comment, AppError>;
    async fn delete_comment(
        &self,
        session: &AuthSession,
        comment_id: CommentId,
    ) -> Result<(), AppError>;
}

fn forbidden(message: &str) -> AppError {
    AppError::Remote {
        status: StatusCode::FORBIDDEN,
        message: Some(message.to_string()),
    }
}

/// In-memory review store that enforces the same delete rule as the backend
pub struct InMemoryReviewRepository {
    reviews: Mutex<Vec<Review>>,
    next_id: AtomicI64,
}

impl Default for InMemoryReviewRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::with_reviews(Vec::new())
    }

    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        let next_id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            reviews: Mutex::new(reviews),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub fn review_count(&self) -> usize {
        self.reviews.lock().unwrap().len()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    #[instrument(skip(self))]
    async fn list_reviews(&self, game_id: GameId) -> Result<Vec<Review>, AppError> {
        let reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        debug!(review_count = reviews.len(), "Listing reviews from memory");
        Ok(reviews)
    }

    #[instrument(skip(self, session, review), fields(game_id = review.game_id))]
    async fn create_review(
        &self,
        session: &AuthSession,
        review: &NewReview,
    ) -> Result<Review, AppError> {
        let created = Review {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            content: review.content.clone(),
            rating: review.rating,
            created_at: Utc::now(),
            game_id: review.game_id,
            reviewer_id: review.reviewer_id,
            reviewer_username: session.user.name.clone(),
            comments: None,
        };
        self.reviews.lock().unwrap().push(created.clone());
        debug!(review_id = created.id, "Review created in memory");
        Ok(created)
    }

    #[instrument(skip(self, session))]
    async fn delete_review(
        &self,
        session: &AuthSession,
        review_id: ReviewId,
    ) -> Result<(), AppError> {
        let mut reviews = self.reviews.lock().unwrap();
        let Some(index) = reviews.iter().position(|r| r.id == review_id) else {
            warn!(review_id, "Review not found for deletion in memory");
            return Err(AppError::NotFound(format!("Review {} not found", review_id)));
        };
        if !can_delete(Some(&session.user), &reviews[index]) {
            warn!(review_id, user_id = session.user.id, "Review delete forbidden");
            return Err(forbidden("You are not allowed to delete this review"));
        }
        reviews.remove(index);
        debug!(review_id, "Review deleted from memory");
        Ok(())
    }
}

/// In-memory comment store that enforces the same delete rule as the backend
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
    next_id: AtomicI64,
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::with_comments(Vec::new())
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        let next_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            comments: Mutex::new(comments),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub fn comment_count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    #[instrument(skip(self))]
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, AppError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.review_id == review_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self, session, comment), fields(review_id = comment.review_id))]
    async fn create_comment(
        &self,
        session: &AuthSession,
        comment: &NewComment,
    ) -> Result<Comment, AppError> {
        let created = Comment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            content: comment.content.clone(),
            created_at: Utc::now(),
            review_id: comment.review_id,
            user_id: comment.user_id,
            username: session.user.name.clone(),
        };
        self.comments.lock().unwrap().push(created.clone());
        debug!(comment_id = created.id, "Comment created in memory");
        Ok(created)
    }

    #[instrument(skip(self, session))]
    async fn delete_comment(
        &self,
        session: &AuthSession,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        let mut comments = self.comments.lock().unwrap();
        let Some(index) = comments.iter().position(|c| c.id == comment_id) else {
            warn!(comment_id, "Comment not found for deletion in memory");
            return Err(AppError::NotFound(format!("Comment {} not found", comment_id)));
        };
        if !can_delete(Some(&session.user), &comments[index]) {
            warn!(comment_id, user_id = session.user.id, "Comment delete forbidden");
            return Err(forbidden("You are not allowed to delete this comment"));
        }
        comments.remove(index);
        debug!(comment_id, "Comment deleted from memory");
        Ok(())
    }
}

/// Reviews backed by the `/reviews` endpoints
pub struct HttpReviewRepository {
    api: ApiClient,
}

impl HttpReviewRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReviewRepository for HttpReviewRepository {
    #[instrument(skip(self))]
    async fn list_reviews(&self, game_id: GameId) -> Result<Vec<Review>, AppError> {
        self.api
            .get_json(&format!("reviews/game/{}", game_id), None)
            .await
    }

    #[instrument(skip(self, session, review), fields(game_id = review.game_id))]
    async fn create_review(
        &self,
        session: &AuthSession,
        review: &NewReview,
    ) -> Result<Review, AppError> {
        self.api
            .post_json("reviews", review, Some(&session.token))
            .await
    }

    #[instrument(skip(self, session))]
    async fn delete_review(
        &self,
        session: &AuthSession,
        review_id: ReviewId,
    ) -> Result<(), AppError> {
        self.api
            .delete(&format!("reviews/{}", review_id), Some(&session.token))
            .await
    }
}

/// Comments backed by the `/comments` endpoints
pub struct HttpCommentRepository {
    api: ApiClient,
}

impl HttpCommentRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CommentRepository for HttpCommentRepository {
    #[instrument(skip(self))]
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, AppError> {
        self.api
            .get_json(&format!("comments/review/{}", review_id), None)
            .await
    }

    #[instrument(skip(self, session, comment), fields(review_id = comment.review_id))]
    async fn create_comment(
        &self,
        session: &AuthSession,
        comment: &NewComment,
    ) -> Result<Comment, AppError> {
        self.api
            .post_json("comments", comment, Some(&session.token))
            .await
    }

    #[instrument(skip(self, session))]
    async fn delete_comment(
        &self,
        session: &AuthSession,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        self.api
            .delete(&format!("comments/{}", comment_id), Some(&session.token))
            .await
    }
}
