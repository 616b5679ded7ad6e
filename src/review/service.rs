use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{Comment, CommentId, NewComment, NewReview, Review, ReviewId},
    repository::{CommentRepository, ReviewRepository},
};
use crate::auth::{ensure_can_author, AuthSession};
use crate::catalog::GameId;
use crate::rating::RatingLabel;
use crate::shared::AppError;

pub const REVIEW_LOGIN_REQUIRED: &str = "You must be logged in to write a review.";
pub const COMMENT_LOGIN_REQUIRED: &str = "You must be logged in to comment.";
const DELETE_LOGIN_REQUIRED: &str = "You must be logged in to delete content.";

/// Validation and remote calls for reviews and comments
///
/// Holds no view state; `ReviewThread` applies the results.
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    comments: Arc<dyn CommentRepository>,
}

fn require_content(content: &str, what: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

fn require_session<'a>(
    actor: Option<&'a AuthSession>,
    message: &str,
) -> Result<&'a AuthSession, AppError> {
    let session = actor.ok_or_else(|| AppError::Unauthenticated(message.to_string()))?;
    ensure_can_author(Some(&session.user), message)?;
    Ok(session)
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { reviews, comments }
    }

    /// Reviews for a game; their comments are not loaded yet
    #[instrument(skip(self))]
    pub async fn load_reviews(&self, game_id: GameId) -> Result<Vec<Review>, AppError> {
        let mut reviews = self.reviews.list_reviews(game_id).await?;
        for review in &mut reviews {
            review.comments = None;
        }
        info!(review_count = reviews.len(), "Reviews loaded");
        Ok(reviews)
    }

    #[instrument(skip(self))]
    pub async fn load_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>, AppError> {
        self.comments.list_comments(review_id).await
    }

    /// Creates a review as the signed-in user.
    ///
    /// Blank content and missing or banned accounts are rejected before any
    /// remote call.
    #[instrument(skip(self, actor, content))]
    pub async fn submit_review(
        &self,
        actor: Option<&AuthSession>,
        game_id: GameId,
        content: &str,
        rating: RatingLabel,
    ) -> Result<Review, AppError> {
        require_content(content, "Review")?;
        let session = require_session(actor, REVIEW_LOGIN_REQUIRED)?;

        let body = NewReview {
            content: content.to_string(),
            game_id,
            reviewer_id: session.user.id,
            rating,
        };
        let review = self.reviews.create_review(session, &body).await?;
        info!(review_id = review.id, "Review submitted");
        Ok(review)
    }

    #[instrument(skip(self, actor))]
    pub async fn delete_review(
        &self,
        actor: Option<&AuthSession>,
        review_id: ReviewId,
    ) -> Result<(), AppError> {
        let session =
            actor.ok_or_else(|| AppError::Unauthenticated(DELETE_LOGIN_REQUIRED.to_string()))?;
        self.reviews
            .delete_review(session, review_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Review delete failed"))?;
        info!("Review deleted");
        Ok(())
    }

    #[instrument(skip(self, actor, content))]
    pub async fn submit_comment(
        &self,
        actor: Option<&AuthSession>,
        review_id: ReviewId,
        content: &str,
    ) -> Result<Comment, AppError> {
        require_content(content, "Comment")?;
        let session = require_session(actor, COMMENT_LOGIN_REQUIRED)?;

        let body = NewComment {
            content: content.to_string(),
            review_id,
            user_id: session.user.id,
        };
        let comment = self.comments.create_comment(session, &body).await?;
        info!(comment_id = comment.id, "Comment submitted");
        Ok(comment)
    }

    #[instrument(skip(self, actor))]
    pub async fn delete_comment(
        &self,
        actor: Option<&AuthSession>,
        comment_id: CommentId,
    ) -> Result<(), AppError> {
        let session =
            actor.ok_or_else(|| AppError::Unauthenticated(DELETE_LOGIN_REQUIRED.to_string()))?;
        self.comments
            .delete_comment(session, comment_id)
            .await
            .inspect_err(|e| warn!(error = %e, "Comment delete failed"))?;
        info!("Comment deleted");
        Ok(())
    }
}
