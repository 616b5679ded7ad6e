// Reviews of a game and the comment threads hanging off each review

pub use models::{Comment, CommentId, NewComment, NewReview, Review, ReviewId};
pub use repository::{
    CommentRepository, HttpCommentRepository, HttpReviewRepository, InMemoryCommentRepository,
    InMemoryReviewRepository, ReviewRepository,
};
pub use service::ReviewService;
pub use thread::ReviewThread;

pub mod models;
pub mod repository;
mod service;
mod thread;
