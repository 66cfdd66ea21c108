//! REST client for the authentication service.
//!
//! Wraps the auth process's HTTP surface using [`reqwest`]: one raw
//! `forward` used by the API proxy, and a typed `get_session` used by the
//! auth extractors.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};
use serde::Deserialize;

use mentora_core::types::{Timestamp, UserId};

/// Cookie name under which the auth service issues its session token.
pub const SESSION_COOKIE: &str = "better-auth.session_token";

/// Header some clients use to carry the session token directly.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// HTTP client for a single auth service instance.
#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    client: reqwest::Client,
    base_url: String,
}

/// A verified session as reported by `GET /api/auth/get-session`.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

/// The account owning a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Errors from the auth service client.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// The HTTP request itself failed (connect, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The auth service answered with an unexpected status.
    #[error("Auth service error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl AuthServiceClient {
    /// Create a client for the auth service at `base_url`
    /// (e.g. `http://localhost:8001`), with a per-request timeout.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forward a raw request to the auth service, single attempt.
    ///
    /// `path_and_query` must start with `/`. Headers are sent as given;
    /// callers are responsible for stripping `host`/`content-length`
    /// beforehand (reqwest derives both). Returns the raw response so the
    /// caller can relay status, headers, and body.
    pub async fn forward(
        &self,
        method: reqwest::Method,
        path_and_query: &str,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path_and_query);
        self.client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await
    }

    /// Verify a session token against `GET /api/auth/get-session`.
    ///
    /// Credential headers from the inbound request are forwarded verbatim.
    /// Returns `Ok(None)` when the auth service reports no valid session
    /// (401, or a 200 with a null body — both shapes occur in the wild).
    pub async fn get_session(
        &self,
        cookie: Option<&str>,
        authorization: Option<&str>,
        session_token: Option<&str>,
    ) -> Result<Option<Session>, AuthServiceError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie.and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(COOKIE, cookie);
        }
        if let Some(auth) = authorization.and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(AUTHORIZATION, auth);
        }
        if let Some(token) = session_token.and_then(|v| HeaderValue::from_str(v).ok()) {
            headers.insert(SESSION_TOKEN_HEADER, token);
        }

        let response = self
            .client
            .get(format!("{}/api/auth/get-session", self.base_url))
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AuthServiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let session: Option<Session> = response.json().await?;
        Ok(session)
    }
}
