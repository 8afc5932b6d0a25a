//! HTTP client for the Wealthtrack backend API.
//!
//! One shared `reqwest::Client` serves every screen of the app; requests
//! that need a signed-in user carry the session token as a bearer header.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wealthtrack_core::errors::{Error, Result};
use wealthtrack_core::market_data::{PriceProviderTrait, PriceQuote};
use wealthtrack_core::users::{AuthProviderTrait, AuthSession, Credentials, Registration, User};
use wealthtrack_core::{
    Asset, AssetProviderTrait, AssetType, NewAsset, PortfolioProviderTrait, PortfolioSnapshot,
};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Longest slice of a non-JSON error body echoed back to the user.
const MAX_ERROR_BODY_CHARS: usize = 200;

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types (internal, for parsing backend responses)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Wealthtrack backend.
///
/// # Example
///
/// ```ignore
/// let client = ApiClient::new("http://localhost:3000")?;
/// let session = client.login(&Credentials::new("jane@example.com", "secret")).await?;
/// let snapshot = client.fetch_portfolio(&session.token).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be
    /// initialized.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create default headers, with the bearer token when one is given.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Unexpected(format!("Invalid access token format: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Make a GET request and parse the response.
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let url = self.url(path);
        debug!("[ApiClient] GET {}", url);

        let request = self.client.get(&url).headers(self.headers(token)?);
        let response = self.send(request).await?;
        self.parse_response(response).await
    }

    /// Make a POST request with a JSON body and parse the response.
    async fn post<B, T>(&self, path: &str, token: Option<&str>, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("[ApiClient] POST {}", url);

        let request = self
            .client
            .post(&url)
            .headers(self.headers(token)?)
            .json(body);
        let response = self.send(request).await?;
        self.parse_response(response).await
    }

    /// Make a DELETE request. Any success status is accepted; the body is ignored.
    async fn delete(&self, path: &str, token: Option<&str>) -> Result<()> {
        let url = self.url(path);
        debug!("[ApiClient] DELETE {}", url);

        let request = self.client.delete(&url).headers(self.headers(token)?);
        let response = self.send(request).await?;
        self.read_success_body(response).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Network(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                Error::Network(format!("Could not reach {}: {}", self.base_url, e))
            } else {
                Error::Network(format!("Request failed: {}", e))
            }
        })
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let body = self.read_success_body(response).await?;

        decode_payload(&body).map_err(|e| {
            Error::Unexpected(format!(
                "Failed to parse response: {} - {}",
                e,
                truncate(&body)
            ))
        })
    }

    /// Returns the body of a success response, or the mapped error otherwise.
    async fn read_success_body(&self, response: Response) -> Result<String> {
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }
        Err(map_error_status(status, &path, &body))
    }
}

/// Maps a non-success response to the client error taxonomy.
fn map_error_status(status: StatusCode, path: &str, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .filter(|m| !m.trim().is_empty());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized,
        StatusCode::NOT_FOUND => Error::NotFound(message.unwrap_or_else(|| path.to_string())),
        _ => Error::Api {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| {
                let trimmed = truncate(body);
                if trimmed.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    trimmed
                }
            }),
        },
    }
}

/// Some routes wrap their payload in `{ "data": ... }`, others return it bare.
/// A wrapped payload is decoded on its own, so its errors are never masked by
/// a fallback to the bare shape.
fn decode_payload<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    let mut value: Value = serde_json::from_str(body)?;
    match value.as_object_mut().and_then(|object| object.remove("data")) {
        Some(data) => serde_json::from_value(data),
        None => serde_json::from_value(value),
    }
}

fn truncate(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider Trait Implementations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AuthProviderTrait for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        let session: AuthSession = self.post("/api/auth/login", None, credentials).await?;
        info!("[ApiClient] Logged in as {}", session.user.email);
        Ok(session)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession> {
        let session: AuthSession = self
            .post("/api/auth/register", None, registration)
            .await?;
        info!("[ApiClient] Registered {}", session.user.email);
        Ok(session)
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        self.get("/api/users/me", Some(token)).await
    }
}

#[async_trait]
impl AssetProviderTrait for ApiClient {
    async fn list_assets(&self, token: &str) -> Result<Vec<Asset>> {
        let assets: Vec<Asset> = self.get("/api/assets", Some(token)).await?;
        info!("[ApiClient] Fetched {} assets", assets.len());
        Ok(assets)
    }

    async fn get_asset(&self, token: &str, asset_id: &str) -> Result<Asset> {
        self.get(&format!("/api/assets/{}", encode(asset_id)), Some(token))
            .await
    }

    async fn create_asset(&self, token: &str, new_asset: &NewAsset) -> Result<Asset> {
        self.post("/api/assets", Some(token), new_asset).await
    }

    async fn delete_asset(&self, token: &str, asset_id: &str) -> Result<()> {
        self.delete(&format!("/api/assets/{}", encode(asset_id)), Some(token))
            .await
    }
}

#[async_trait]
impl PriceProviderTrait for ApiClient {
    async fn get_price(
        &self,
        token: &str,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<PriceQuote> {
        let path = format!(
            "/api/prices/{}?type={}",
            encode(&symbol.trim().to_uppercase()),
            asset_type.as_str()
        );
        self.get(&path, Some(token)).await
    }
}

#[async_trait]
impl PortfolioProviderTrait for ApiClient {
    async fn fetch_portfolio(&self, token: &str) -> Result<PortfolioSnapshot> {
        let snapshot: PortfolioSnapshot = self.get("/api/portfolio/value", Some(token)).await?;
        info!(
            "[ApiClient] Fetched portfolio: {} holdings, total value {:.2}",
            snapshot.assets.len(),
            snapshot.total_value
        );
        Ok(snapshot)
    }
}
