pub mod auth;
pub mod health;
pub mod personalization;
pub mod profile;
pub mod query;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profile                       create, get, update, delete (auth required)
/// /profile/preferences           personalization flag flip (PUT)
/// /profile/export                data export (POST)
///
/// /personalization/context       get, upsert (auth required)
/// /personalization/opt-out       disable personalization (POST)
/// /personalization/opt-in        re-enable personalization (POST)
///
/// /query                         personalized retrieval (POST, auth optional)
///
/// /auth/{*}                      opaque passthrough to the auth service
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profile", profile::router())
        .nest("/personalization", personalization::router())
        .merge(query::router())
        .nest("/auth", auth::router())
}
