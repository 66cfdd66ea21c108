//! Route definitions for the user profile API.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes mounted at `/profile`.
///
/// ```text
/// POST   /             -> create_profile
/// GET    /             -> get_profile
/// PUT    /             -> update_profile
/// DELETE /             -> delete_profile
/// PUT    /preferences  -> update_preferences
/// POST   /export       -> export_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(profile::create_profile)
                .get(profile::get_profile)
                .put(profile::update_profile)
                .delete(profile::delete_profile),
        )
        .route("/preferences", put(profile::update_preferences))
        .route("/export", post(profile::export_profile))
}
