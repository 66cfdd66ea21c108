//! Handlers for the personalization context and opt-in/opt-out toggles.

use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;
use validator::Validate;

use mentora_core::error::CoreError;
use mentora_db::models::personalization_context::UpsertContext;
use mentora_db::repositories::{PersonalizationContextRepo, ProfileRepo};

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// GET /api/personalization/context
///
/// Returns the stored context, or a `{user_id}` stub when none has been
/// created yet (the row is made lazily on first PUT).
pub async fn get_context(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let context = PersonalizationContextRepo::get(&state.pool, user.user_id).await?;

    let body = match context {
        Some(ctx) => json!(ctx),
        None => json!({ "user_id": user.user_id }),
    };

    Ok(Json(body))
}

/// PUT /api/personalization/context
///
/// Upsert: lazily creates the row, then updates only provided fields.
/// Requires an existing profile row to own the context.
pub async fn update_context(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<UpsertContext>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if ProfileRepo::get(&state.pool, user.user_id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        }
        .into());
    }

    let context = PersonalizationContextRepo::upsert(&state.pool, user.user_id, &input).await?;

    tracing::info!(user_id = %user.user_id, "Personalization context updated");

    Ok(Json(context))
}

/// POST /api/personalization/opt-out
pub async fn opt_out(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    set_enabled(&state, &user, false).await
}

/// POST /api/personalization/opt-in
pub async fn opt_in(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    set_enabled(&state, &user, true).await
}

async fn set_enabled(
    state: &AppState,
    user: &CurrentUser,
    enabled: bool,
) -> AppResult<Json<serde_json::Value>> {
    let profile = ProfileRepo::set_personalization_enabled(&state.pool, user.user_id, enabled)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        })?;

    tracing::info!(
        user_id = %user.user_id,
        personalization_enabled = enabled,
        "Personalization toggled",
    );

    Ok(Json(json!({
        "success": true,
        "profile": profile,
    })))
}
