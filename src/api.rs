use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::shared::{AppError, AppResult};

/// Error body returned by the backend on rejected calls
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Thin JSON client shared by every HTTP repository
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        // Url::join replaces the last path segment unless the base ends in '/'
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Validation(format!("invalid request path {}: {}", path, e)))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> AppResult<RequestBuilder> {
        let mut builder = self.client.request(method, self.url(path)?);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    #[instrument(skip(self, token))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> AppResult<T> {
        let response = self.request(Method::GET, path, token)?.send().await?;
        Self::decode(Self::check(response).await?).await
    }

    #[instrument(skip(self, body, token))]
    pub async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, token)?
            .json(body)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    /// POST whose response body is ignored
    #[instrument(skip(self, token))]
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> AppResult<()> {
        let response = self
            .request(Method::POST, path, token)?
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::check(response).await.map(|_| ())
    }

    #[instrument(skip(self, token))]
    pub async fn delete(&self, path: &str, token: Option<&str>) -> AppResult<()> {
        let response = self.request(Method::DELETE, path, token)?.send().await?;
        Self::check(response).await.map(|_| ())
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            debug!(status = %status, url = %response.url(), "Request succeeded");
            return Ok(response);
        }

        // The backend reports authorization failures as { "message": ... }
        let message = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.message);

        warn!(status = %status, message = ?message, "Backend rejected request");
        Err(AppError::Remote { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "Failed to decode backend payload");
            AppError::Decode(e.to_string())
        })
    }
}
