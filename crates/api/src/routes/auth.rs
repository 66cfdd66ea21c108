//! Route definition for the auth service passthrough.
//!
//! The whole subtree is a fallback so every method and path under
//! `/auth` reaches the proxy handler unrouted.

use axum::Router;

use crate::handlers::auth_proxy;
use crate::state::AppState;

/// Proxy routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new().fallback(auth_proxy::forward)
}
