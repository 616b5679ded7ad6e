use std::time::Duration;

use url::Url;

use crate::shared::AppError;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RECENT_FAVORITES: usize = 3;

/// Connection settings for the review backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    /// Every request is bounded by this; expiry is reported as a network failure
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: Url, request_timeout: Duration) -> Self {
        Self {
            base_url,
            request_timeout,
        }
    }

    /// Reads `GAMEVERDICT_API_URL` and `GAMEVERDICT_REQUEST_TIMEOUT_SECS`,
    /// falling back to a local backend with a 10 second timeout.
    pub fn from_env() -> Result<Self, AppError> {
        let raw_url =
            std::env::var("GAMEVERDICT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| AppError::Validation(format!("invalid GAMEVERDICT_API_URL: {}", e)))?;

        let timeout_secs = std::env::var("GAMEVERDICT_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self::new(base_url, Duration::from_secs(timeout_secs)))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API url is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Tunables for the engagement controller
#[derive(Debug, Clone)]
pub struct EngagementConfig {
    /// Capacity of the notice and auth broadcast channels
    pub channel_capacity: usize,
    /// How many favorites the home view shows
    pub recent_favorites: usize,
}

impl EngagementConfig {
    pub fn from_env() -> Self {
        let recent_favorites = std::env::var("GAMEVERDICT_RECENT_FAVORITES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RECENT_FAVORITES);

        Self {
            recent_favorites,
            ..Self::default()
        }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            recent_favorites: DEFAULT_RECENT_FAVORITES,
        }
    }
}
