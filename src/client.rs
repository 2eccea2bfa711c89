//! Lunch Money API client.
//!
//! Low-level HTTP client that handles authentication, raw requests, and
//! status-code interpretation. Higher-level operations are implemented via
//! traits on entity types and exposed through the [`LunchMoney`] facade.
//!
//! [`LunchMoney`]: crate::LunchMoney

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{LunchMoneyError, Result};
use crate::wire;

const DEFAULT_API_URL: &str = "https://api.lunchmoney.dev/v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const USER_AGENT: &str = concat!("lunchmoney/", env!("CARGO_PKG_VERSION"));

/// Low-level Lunch Money API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update`, and `Delete`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use lunchmoney::LunchMoneyClient;
///
/// # fn example() -> lunchmoney::Result<()> {
/// // Create from environment variables
/// let client = LunchMoneyClient::from_env()?;
///
/// // Or configure manually
/// let client = LunchMoneyClient::new("your-token", "https://api.lunchmoney.dev/v2")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LunchMoneyClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for LunchMoneyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunchMoneyClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl LunchMoneyClient {
    /// Create a client from environment variables.
    ///
    /// Uses `LUNCHMONEY_ACCESS_TOKEN` for authentication and optionally
    /// `LUNCHMONEY_API_URL` for the base URL (defaults to
    /// `https://api.lunchmoney.dev/v2`).
    ///
    /// # Errors
    ///
    /// Returns an error if `LUNCHMONEY_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("LUNCHMONEY_ACCESS_TOKEN").map_err(|_| {
            LunchMoneyError::ConfigMissing(
                "LUNCHMONEY_ACCESS_TOKEN environment variable not set".to_string(),
            )
        })?;

        let base_url =
            env::var("LUNCHMONEY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided access token and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::build(token, base_url, DEFAULT_TIMEOUT)
    }

    /// Rebuild the client with a different request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        Self::build(&self.token, self.base_url.as_str(), timeout)
    }

    fn build(token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(LunchMoneyError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn delete_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(LunchMoneyError::HttpError)?;

        Self::check_response(response).await
    }

    /// Read a successful response body and decode it into `T`.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(LunchMoneyError::HttpError)?;
        Ok(wire::decode(&bytes)?)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "response received");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LunchMoneyError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(Self::categorize(status, message))
    }

    /// Map a non-success status onto an error category.
    fn categorize(status: StatusCode, message: String) -> LunchMoneyError {
        match status {
            StatusCode::BAD_REQUEST => LunchMoneyError::Validation { message },
            StatusCode::UNAUTHORIZED => LunchMoneyError::Unauthorized { message },
            StatusCode::NOT_FOUND => LunchMoneyError::NotFound { message },
            s if s.is_server_error() => LunchMoneyError::Server {
                status_code: s.as_u16(),
                message,
            },
            s => LunchMoneyError::Api {
                status_code: s.as_u16(),
                message,
            },
        }
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) if !b.trim().is_empty() => b,
            _ => return format!("HTTP {status}"),
        };

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => message_from_json(&json).unwrap_or(body),
            Err(_) => body,
        }
    }
}

/// Find a human-readable message in an error body.
///
/// Accepts `{"message": ".."}`, `{"error": ".."}`, `{"error": ["..", ..]}`
/// and `{"errors": [{"errMsg": ".."}, ..]}`.
fn message_from_json(json: &serde_json::Value) -> Option<String> {
    if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
        let details = json
            .get("errors")
            .and_then(|e| e.as_array())
            .map(|errors| joined_messages(errors))
            .filter(|d| !d.is_empty());
        return Some(match details {
            Some(d) => format!("{msg}: {d}"),
            None => msg.to_string(),
        });
    }

    match json.get("error") {
        Some(serde_json::Value::String(s)) => return Some(s.clone()),
        Some(serde_json::Value::Array(items)) => return Some(joined_messages(items)),
        _ => {}
    }

    json.get("errors")
        .and_then(|e| e.as_array())
        .map(|errors| joined_messages(errors))
}

fn joined_messages(items: &[serde_json::Value]) -> String {
    items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s.as_str()),
            other => other.get("errMsg").and_then(|m| m.as_str()),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_debug() {
        let client = LunchMoneyClient::new("test-token", "https://api.lunchmoney.dev/v2").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("LunchMoneyClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = LunchMoneyClient::new("token", "https://api.lunchmoney.dev/v2").unwrap();
        let client2 = LunchMoneyClient::new("token", "https://api.lunchmoney.dev/v2/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.base_url().join("transactions/group").unwrap().as_str(),
            "https://api.lunchmoney.dev/v2/transactions/group"
        );
    }

    #[test]
    fn test_with_timeout_keeps_base_url() {
        let client = LunchMoneyClient::new("token", "http://localhost:9000")
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = LunchMoneyClient::new("token", "not a url");
        assert!(matches!(result, Err(LunchMoneyError::UrlError(_))));
    }

    #[test]
    fn test_categorize_statuses() {
        let msg = || "m".to_string();
        assert!(matches!(
            LunchMoneyClient::categorize(StatusCode::BAD_REQUEST, msg()),
            LunchMoneyError::Validation { .. }
        ));
        assert!(matches!(
            LunchMoneyClient::categorize(StatusCode::UNAUTHORIZED, msg()),
            LunchMoneyError::Unauthorized { .. }
        ));
        assert!(matches!(
            LunchMoneyClient::categorize(StatusCode::NOT_FOUND, msg()),
            LunchMoneyError::NotFound { .. }
        ));
        assert!(matches!(
            LunchMoneyClient::categorize(StatusCode::BAD_GATEWAY, msg()),
            LunchMoneyError::Server {
                status_code: 502,
                ..
            }
        ));
        assert!(matches!(
            LunchMoneyClient::categorize(StatusCode::CONFLICT, msg()),
            LunchMoneyError::Api {
                status_code: 409,
                ..
            }
        ));
    }

    #[test]
    fn test_message_from_json_shapes() {
        assert_eq!(
            message_from_json(&json!({"message": "Invalid ids"})).as_deref(),
            Some("Invalid ids")
        );
        assert_eq!(
            message_from_json(&json!({
                "message": "Request validation failed",
                "errors": [{"errMsg": "ids must have at least 2 items"}]
            }))
            .as_deref(),
            Some("Request validation failed: ids must have at least 2 items")
        );
        assert_eq!(
            message_from_json(&json!({"error": ["a", "b"]})).as_deref(),
            Some("a; b")
        );
        assert_eq!(
            message_from_json(&json!({"error": "Access token does not exist."})).as_deref(),
            Some("Access token does not exist.")
        );
        assert_eq!(message_from_json(&json!({"other": 1})), None);
    }
}
