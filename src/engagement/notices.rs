//! User-facing notice texts.

pub const LOAD_GAMES_FAILED: &str = "Failed to load games";
pub const LOAD_REVIEWS_FAILED: &str = "Failed to load reviews";
pub const LOAD_COMMENTS_FAILED: &str = "Failed to load comments";

pub const REVIEW_SUBMITTED: &str = "Review submitted successfully";
pub const REVIEW_SUBMIT_FAILED: &str = "Failed to submit review";
pub const REVIEW_DELETED: &str = "Review deleted successfully";
pub const REVIEW_DELETE_FAILED: &str = "Failed to delete review";

pub const COMMENT_SUBMITTED: &str = "Comment submitted successfully";
pub const COMMENT_SUBMIT_FAILED: &str = "Failed to submit comment";
pub const COMMENT_DELETED: &str = "Comment deleted successfully";
pub const COMMENT_DELETE_FAILED: &str = "Failed to delete comment";

pub const FAVORITE_ADDED: &str = "Added to favorites";
pub const FAVORITE_REMOVED: &str = "Removed from favorites";
pub const FAVORITE_ADD_FAILED: &str = "Failed to add to favorites";
pub const FAVORITE_REMOVE_FAILED: &str = "Failed to remove from favorites";
