use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type GameId = i64;

/// Catalog entry as served by `GET /games`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Trailer link as entered by an admin; see `embed::to_embed_url`
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Derived from the favorite set, never persisted
    #[serde(default)]
    pub is_favorite: bool,
}

impl Game {
    pub fn new(id: GameId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            link: String::new(),
            release_date: String::new(),
            platforms: Vec::new(),
            genres: Vec::new(),
            cover_img: None,
            average_rating: None,
            review_count: None,
            is_favorite: false,
        }
    }

    /// Release date parsed from either `YYYY-MM-DD` or a full timestamp
    pub fn release_date(&self) -> Option<NaiveDate> {
        let date = self.release_date.get(..10)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    pub fn embed_url(&self) -> String {
        crate::embed::to_embed_url(&self.link)
    }
}
