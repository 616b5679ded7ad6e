use tracing::debug;

use super::models::{Comment, CommentId, Review, ReviewId};
use crate::catalog::GameId;

/// Reviews of one open game, each with its (possibly unloaded) comments
///
/// Every open of a detail view gets a fresh `generation`; results from an
/// earlier open are recognised by a mismatching generation and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewThread {
    game_id: GameId,
    generation: u64,
    reviews: Vec<Review>,
}

impl ReviewThread {
    pub fn new(game_id: GameId, generation: u64) -> Self {
        Self {
            game_id,
            generation,
            reviews: Vec::new(),
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, review_id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    pub fn comment(&self, comment_id: CommentId) -> Option<&Comment> {
        self.reviews
            .iter()
            .filter_map(|r| r.comments.as_ref())
            .flatten()
            .find(|c| c.id == comment_id)
    }

    /// Replaces the review list; comments start out unloaded
    pub fn replace_reviews(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews
            .into_iter()
            .map(|review| Review {
                comments: None,
                ..review
            })
            .collect();
    }

    /// Attaches a loaded comment list to its review.
    ///
    /// Returns false when the review is no longer in the thread.
    pub fn attach_comments(&mut self, review_id: ReviewId, comments: Vec<Comment>) -> bool {
        match self.reviews.iter_mut().find(|r| r.id == review_id) {
            Some(review) => {
                review.comments = Some(comments);
                true
            }
            None => {
                debug!(review_id, "Review gone, dropping comments");
                false
            }
        }
    }

    /// Appends a newly created review; no re-sorting
    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Removes the review node; its comments go with it but nothing else is touched
    pub fn remove_review(&mut self, review_id: ReviewId) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        self.reviews.len() != before
    }

    /// Appends a comment, turning an unloaded comment list into a loaded one
    pub fn push_comment(&mut self, comment: Comment) -> bool {
        match self.reviews.iter_mut().find(|r| r.id == comment.review_id) {
            Some(review) => {
                review.comments.get_or_insert_with(Vec::new).push(comment);
                true
            }
            None => false,
        }
    }

    pub fn remove_comment(&mut self, comment_id: CommentId) -> bool {
        let mut removed = false;
        for comments in self.reviews.iter_mut().filter_map(|r| r.comments.as_mut()) {
            let before = comments.len();
            comments.retain(|c| c.id != comment_id);
            removed |= comments.len() != before;
        }
        removed
    }
}
