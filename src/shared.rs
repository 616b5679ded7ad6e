use reqwest::StatusCode;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Remote error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Remote {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl AppError {
    /// Text shown to the user for a failed operation.
    ///
    /// Backend messages are passed through verbatim, local rejections keep
    /// their own text, everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Remote {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AppError::Validation(msg) | AppError::Unauthenticated(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True for rejections decided locally, before any remote call.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Unauthenticated(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Remote {
                status,
                message: None,
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_backend_message_through() {
        let err = AppError::Remote {
            status: StatusCode::FORBIDDEN,
            message: Some("You can only delete your own reviews".to_string()),
        };
        assert_eq!(
            err.user_message("Failed to delete review"),
            "You can only delete your own reviews"
        );
    }

    #[test]
    fn test_user_message_falls_back_without_backend_message() {
        let err = AppError::Remote {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(
            err.user_message("Failed to delete review"),
            "Failed to delete review"
        );

        let blank = AppError::Remote {
            status: StatusCode::BAD_REQUEST,
            message: Some("   ".to_string()),
        };
        assert_eq!(blank.user_message("Failed"), "Failed");

        let network = AppError::Network("connection refused".to_string());
        assert_eq!(network.user_message("Failed to load games"), "Failed to load games");
    }

    #[test]
    fn test_local_rejections_keep_their_text() {
        let err = AppError::Unauthenticated("You must be logged in to comment.".to_string());
        assert!(err.is_local());
        assert_eq!(err.user_message("ignored"), "You must be logged in to comment.");
        assert!(!AppError::Network("x".to_string()).is_local());
    }
}
