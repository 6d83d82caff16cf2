//! HTTP client for the shop admin API.
//!
//! # Endpoints
//!
//! - `POST {base}/admin/signin` - credential check; returns a token and its
//!   expiry
//! - `GET {base}/api/{path}/admin/products/all` - full catalog; requires the
//!   raw token in the `Authorization` header (the service does not use a
//!   `Bearer` scheme)
//!
//! Response bodies are read as text before parsing so failures can be logged
//! with a truncated body snippet.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use shopkeeper_core::{Product, ProductId, Session};

use crate::config::ClientConfig;
use crate::error::{AuthError, FetchError};
use crate::session::Credentials;

/// Maximum number of body characters included in diagnostics.
const BODY_SNIPPET_LEN: usize = 200;

#[derive(Debug, Serialize)]
struct SigninRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Successful signin payload.
#[derive(Debug, Deserialize)]
struct SigninResponse {
    token: String,
    #[serde(rename = "expired", deserialize_with = "date_like")]
    expires_at: DateTime<Utc>,
}

/// Error payload shape used by the service; `message` is best effort.
#[derive(Debug, Deserialize)]
struct ServiceMessage {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Option<HashMap<ProductId, Product>>,
}

/// Client for the shop admin API.
///
/// Cheaply cloneable; all clones share one `reqwest` connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    api_base: String,
    api_path: String,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                api_base: config.api_base.as_str().trim_end_matches('/').to_owned(),
                api_path: config.api_path.clone(),
            }),
        }
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the transport fails, the service rejects the
    /// credentials, the response cannot be parsed, or the token is empty.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signin(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = format!("{}/admin/signin", self.inner.api_base);
        let body = SigninRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        let response = self.inner.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = %status, body = %snippet(&text), "signin rejected");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: service_message(&text),
            });
        }

        let parsed: SigninResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&text),
                "failed to parse signin response"
            );
            e
        })?;

        if parsed.token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        Ok(Session::new(parsed.token, parsed.expires_at))
    }

    /// Fetch the complete product catalog.
    ///
    /// The map is fully decoded before it is returned, so callers replacing
    /// their catalog with it never observe a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the transport fails, the service rejects the
    /// request, or the response cannot be parsed.
    #[instrument(skip(self, token))]
    pub async fn products_all(
        &self,
        token: &str,
    ) -> Result<HashMap<ProductId, Product>, FetchError> {
        let url = format!(
            "{}/api/{}/admin/products/all",
            self.inner.api_base, self.inner.api_path
        );

        let response = self
            .inner
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = %status, body = %snippet(&text), "catalog request rejected");
            return Err(FetchError::Rejected {
                status: status.as_u16(),
                message: service_message(&text),
            });
        }

        let parsed: ProductsResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&text),
                "failed to parse catalog response"
            );
            e
        })?;

        // Missing or null `products` is an empty catalog, never an error.
        Ok(parsed.products.unwrap_or_default())
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

/// Best-effort extraction of the service's error message.
fn service_message(body: &str) -> String {
    serde_json::from_str::<ServiceMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .unwrap_or_else(|| snippet(body))
}

/// Accepts the `expired` value as epoch milliseconds or a datetime string.
fn date_like<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DateLike;

    impl serde::de::Visitor<'_> for DateLike {
        type Value = DateTime<Utc>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("epoch milliseconds or a datetime string")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            DateTime::from_timestamp_millis(v)
                .ok_or_else(|| E::custom(format!("timestamp out of range: {v}")))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            let millis = i64::try_from(v)
                .map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
            self.visit_i64(millis)
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            #[allow(clippy::cast_possible_truncation)] // sub-millisecond precision is irrelevant here
            let millis = v as i64;
            self.visit_i64(millis)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(v) {
                return Ok(parsed.with_timezone(&Utc));
            }
            if let Ok(parsed) = DateTime::parse_from_rfc2822(v) {
                return Ok(parsed.with_timezone(&Utc));
            }
            Err(E::custom(format!("unrecognized datetime: {v}")))
        }
    }

    deserializer.deserialize_any(DateLike)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signin_response_with_millis_expiry() {
        let parsed: SigninResponse = serde_json::from_str(
            r#"{"success":true,"token":"abc123","expired":1767225600000}"#,
        )
        .unwrap();
        assert_eq!(parsed.token, "abc123");
        assert_eq!(
            parsed.expires_at,
            DateTime::from_timestamp_millis(1_767_225_600_000).unwrap()
        );
    }

    #[test]
    fn test_signin_response_with_string_expiry() {
        let parsed: SigninResponse =
            serde_json::from_str(r#"{"token":"abc123","expired":"2026-01-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(
            parsed.expires_at,
            DateTime::from_timestamp_millis(1_767_225_600_000).unwrap()
        );
    }

    #[test]
    fn test_signin_response_rejects_garbage_expiry() {
        let result: Result<SigninResponse, _> =
            serde_json::from_str(r#"{"token":"abc123","expired":"not a date"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_service_message_extraction() {
        assert_eq!(
            service_message(r#"{"success":false,"message":"username or password is incorrect"}"#),
            "username or password is incorrect"
        );
        // Unparseable bodies fall back to a snippet
        assert_eq!(service_message("<html>502</html>"), "<html>502</html>");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(1000);
        assert_eq!(snippet(&long).len(), BODY_SNIPPET_LEN);
    }

    #[test]
    fn test_products_response_null_and_missing_are_empty() {
        let parsed: ProductsResponse = serde_json::from_str(r#"{"products":null}"#).unwrap();
        assert!(parsed.products.unwrap_or_default().is_empty());

        let parsed: ProductsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.products.unwrap_or_default().is_empty());
    }
}
