// API client: a small blocking HTTP wrapper around the Envoy REST API.
// Resource-specific calls live in the submodules; this module owns the
// request plumbing and the error classification.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;

pub mod auth;
pub mod environments;
pub mod projects;
pub mod variables;

/// Flat per-request timeout applied to every outbound call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error message the server uses to signal token expiry on a 401.
const EXPIRY_MESSAGE: &str = "Token has expired";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

/// How a ≥400 response should be surfaced.
#[derive(Debug, PartialEq, Eq)]
enum Rejection {
    Expired,
    Server(String),
}

/// Decide whether a ≥400 response carries a classifiable error body.
/// Responses without a non-empty `{"error": ...}` message are passed
/// through to the caller untouched.
fn classify_rejection(status: StatusCode, body: &str) -> Option<Rejection> {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.is_empty())?;

    if status == StatusCode::UNAUTHORIZED && message == EXPIRY_MESSAGE {
        Some(Rejection::Expired)
    } else {
        Some(Rejection::Server(message))
    }
}

/// A fully-read response. Some callers decode JSON out of it, others
/// (delete operations) only inspect the status code.
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("failed to decode server response")
    }
}

/// Client holding the HTTP connection, the server base URL, the bearer
/// token and the loaded config (so token changes persist immediately).
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        let base_url = config.server_url();
        let token = config.token().map(str::to_string);

        Ok(Self {
            http,
            base_url,
            token,
            config,
        })
    }

    /// Fail with [`ApiError::NoToken`] before any network call when the
    /// command requires authentication and no token is stored.
    pub fn require_token(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(ApiError::NoToken.into());
        }
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Persist a freshly issued token and use it for the rest of this
    /// process.
    fn adopt_token(&mut self, token: &str) -> Result<()> {
        self.config.set_token(token)?;
        self.token = Some(token.to_string());
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and classify the response. A ≥400 status with a
    /// non-empty `{"error": ...}` body becomes [`ApiError::ExpiredToken`]
    /// (clearing the stored token first) or [`ApiError::Server`]; any
    /// other response is returned for the caller to inspect.
    pub(crate) fn request<B: Serialize>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth_required: bool,
    ) -> Result<ApiResponse> {
        let mut req = self
            .http
            .request(method.clone(), self.url(path))
            .header(CONTENT_TYPE, "application/json");

        if auth_required {
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().context("request failed")?;
        let status = resp.status();
        let body = resp.text().context("failed to read response body")?;
        debug!(method = %method, path, status = status.as_u16(), "api request");

        if status.is_client_error() || status.is_server_error() {
            match classify_rejection(status, &body) {
                Some(Rejection::Expired) => {
                    if self.config.clear_token().is_ok() {
                        self.token = None;
                    }
                    return Err(ApiError::ExpiredToken.into());
                }
                Some(Rejection::Server(message)) => {
                    return Err(ApiError::Server(message).into());
                }
                None => {}
            }
        }

        Ok(ApiResponse { status, body })
    }

    fn get(&mut self, path: &str) -> Result<ApiResponse> {
        self.request::<()>(Method::GET, path, None, true)
    }

    /// Issue a DELETE and accept exactly 200 and 204 as success.
    fn delete(&mut self, path: &str) -> Result<()> {
        let resp = self.request::<()>(Method::DELETE, path, None, true)?;
        if !delete_succeeded(resp.status) {
            return Err(ApiError::UnexpectedStatus(resp.status.as_u16()).into());
        }
        Ok(())
    }
}

fn delete_succeeded(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_sentinel_on_401() {
        let classified = classify_rejection(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Token has expired"}"#,
        );
        assert_eq!(classified, Some(Rejection::Expired));
    }

    #[test]
    fn other_401_message_is_a_server_error() {
        let classified =
            classify_rejection(StatusCode::UNAUTHORIZED, r#"{"error":"invalid token"}"#);
        assert_eq!(classified, Some(Rejection::Server("invalid token".into())));
    }

    #[test]
    fn expiry_message_on_other_status_is_a_server_error() {
        let classified =
            classify_rejection(StatusCode::FORBIDDEN, r#"{"error":"Token has expired"}"#);
        assert_eq!(
            classified,
            Some(Rejection::Server("Token has expired".into()))
        );
    }

    #[test]
    fn empty_or_undecodable_bodies_pass_through() {
        assert_eq!(classify_rejection(StatusCode::NOT_FOUND, ""), None);
        assert_eq!(classify_rejection(StatusCode::NOT_FOUND, "not json"), None);
        assert_eq!(
            classify_rejection(StatusCode::NOT_FOUND, r#"{"error":""}"#),
            None
        );
        assert_eq!(
            classify_rejection(StatusCode::NOT_FOUND, r#"{"detail":"other shape"}"#),
            None
        );
    }

    #[test]
    fn delete_accepts_exactly_200_and_204() {
        assert!(delete_succeeded(StatusCode::OK));
        assert!(delete_succeeded(StatusCode::NO_CONTENT));
        assert!(!delete_succeeded(StatusCode::ACCEPTED));
        assert!(!delete_succeeded(StatusCode::CREATED));
        assert!(!delete_succeeded(StatusCode::NOT_FOUND));
    }

    #[test]
    fn no_token_fails_before_any_network_call() {
        let client = ApiClient::new(Config::default()).unwrap();
        let err = client.require_token().unwrap_err();
        assert_eq!(err.downcast_ref::<ApiError>(), Some(&ApiError::NoToken));
    }
}
