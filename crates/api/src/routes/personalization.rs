//! Route definitions for the personalization context API.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::personalization;
use crate::state::AppState;

/// Personalization routes mounted at `/personalization`.
///
/// ```text
/// GET  /context  -> get_context
/// PUT  /context  -> update_context
/// POST /opt-out  -> opt_out
/// POST /opt-in   -> opt_in
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/context",
            get(personalization::get_context).put(personalization::update_context),
        )
        .route("/opt-out", post(personalization::opt_out))
        .route("/opt-in", post(personalization::opt_in))
}
