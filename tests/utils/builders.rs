use chrono::Utc;

use gameverdict::{catalog::Game, Comment, RatingLabel, Review};

pub fn game(id: i64, title: &str) -> Game {
    Game::new(id, title)
}

pub fn review(id: i64, game_id: i64, reviewer_id: i64) -> Review {
    Review {
        id,
        content: format!("review {}", id),
        rating: RatingLabel::FourStar,
        created_at: Utc::now(),
        game_id,
        reviewer_id,
        reviewer_username: format!("user-{}", reviewer_id),
        comments: None,
    }
}

pub fn comment(id: i64, review_id: i64, user_id: i64) -> Comment {
    Comment {
        id,
        content: format!("comment {}", id),
        created_at: Utc::now(),
        review_id,
        user_id,
        username: format!("user-{}", user_id),
    }
}
