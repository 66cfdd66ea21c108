//! Route definition for the query orchestrator.

use axum::routing::post;
use axum::Router;

use crate::handlers::query;
use crate::state::AppState;

/// Query route mounted at `/query`.
pub fn router() -> Router<AppState> {
    Router::new().route("/query", post(query::run_query))
}
