use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{Authored, UserId};
use crate::catalog::GameId;
use crate::rating::RatingLabel;

pub type ReviewId = i64;
pub type CommentId = i64;

/// A star-rated review of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub content: String,
    pub rating: RatingLabel,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub game_id: GameId,
    pub reviewer_id: UserId,
    pub reviewer_username: String,
    /// `None` until the comment load for this review has completed;
    /// `Some(vec![])` means loaded and empty.
    #[serde(skip)]
    pub comments: Option<Vec<Comment>>,
}

impl Review {
    pub fn comments_loaded(&self) -> bool {
        self.comments.is_some()
    }

    pub fn stars(&self) -> u8 {
        self.rating.value()
    }
}

impl Authored for Review {
    fn author_id(&self) -> UserId {
        self.reviewer_id
    }
}

/// A comment on a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub username: String,
}

impl Authored for Comment {
    fn author_id(&self) -> UserId {
        self.user_id
    }
}

/// Body of `POST /reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub content: String,
    pub game_id: GameId,
    pub reviewer_id: UserId,
    pub rating: RatingLabel,
}

/// Body of `POST /comments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub review_id: ReviewId,
    pub user_id: UserId,
}

/// Backend timestamps arrive either as RFC 3339 or as a zone-less local
/// date-time; the latter is taken as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
