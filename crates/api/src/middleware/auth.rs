//! Session-introspection extractors for Axum handlers.
//!
//! Every authenticated request is verified against the auth service's
//! `get-session` endpoint — there is no locally trusted token format. The
//! session token may arrive as the auth service's cookie, a Bearer header,
//! or the `x-session-token` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mentora_authsvc::client::{SESSION_COOKIE, SESSION_TOKEN_HEADER};
use mentora_core::error::CoreError;
use mentora_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user, verified against the auth service for this request.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user's id as issued by the auth service.
    pub user_id: UserId,
    /// Account email, when the auth service reports one.
    pub email: Option<String>,
}

/// Like [`CurrentUser`], but never rejects: anonymous requests and
/// introspection failures both yield `None` (personalization degrades
/// instead of failing the request).
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

/// Credential headers found on an inbound request.
struct SessionCredentials {
    cookie: Option<String>,
    authorization: Option<String>,
    session_token: Option<String>,
}

impl SessionCredentials {
    fn from_parts(parts: &Parts) -> Self {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };

        // Only forward the cookie header when it actually carries the
        // session cookie; other cookies are none of the auth service's
        // business.
        let cookie = header("cookie").filter(|c| has_session_cookie(c));
        let authorization = header("authorization").filter(|a| a.starts_with("Bearer "));
        let session_token = header(SESSION_TOKEN_HEADER);

        Self {
            cookie,
            authorization,
            session_token,
        }
    }

    fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.authorization.is_none() && self.session_token.is_none()
    }
}

fn has_session_cookie(cookie_header: &str) -> bool {
    cookie_header
        .split(';')
        .any(|pair| pair.trim_start().starts_with(SESSION_COOKIE))
}

async fn introspect(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<CurrentUser>, AppError> {
    let creds = SessionCredentials::from_parts(parts);
    if creds.is_empty() {
        return Ok(None);
    }

    let session = state
        .auth_client
        .get_session(
            creds.cookie.as_deref(),
            creds.authorization.as_deref(),
            creds.session_token.as_deref(),
        )
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Session introspection failed");
            AppError::Upstream {
                message: "Authentication service is temporarily unavailable".to_string(),
                retryable: true,
            }
        })?;

    Ok(session.map(|s| CurrentUser {
        user_id: s.user.id,
        email: s.user.email,
    }))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match introspect(parts, state).await? {
            Some(user) => Ok(user),
            None => Err(AppError::Core(CoreError::Unauthorized(
                "No valid session".into(),
            ))),
        }
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match introspect(parts, state).await {
            Ok(user) => Ok(OptionalUser(user)),
            Err(err) => {
                // Anonymous degradation: the query pipeline works without a
                // user, so an unreachable auth service must not fail it.
                tracing::warn!(error = %err, "Proceeding unauthenticated");
                Ok(OptionalUser(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_session_cookie_among_others() {
        assert!(has_session_cookie(
            "theme=dark; better-auth.session_token=abc123; lang=en"
        ));
    }

    #[test]
    fn ignores_unrelated_cookies() {
        assert!(!has_session_cookie("theme=dark; lang=en"));
    }
}
