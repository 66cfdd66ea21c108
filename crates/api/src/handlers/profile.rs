//! Handlers for the user profile API.
//!
//! All routes operate on the authenticated user's own row; there is no
//! cross-user access. Updates are PATCH-semantics PUTs: only provided
//! fields change, and `profile_updated_at` is re-stamped on every mutation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use validator::Validate;

use mentora_core::error::CoreError;
use mentora_db::models::profile::{CreateProfile, UpdatePreferences, UpdateProfile};
use mentora_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;

/// POST /api/profile
///
/// Create the authenticated user's profile. Conflicts when one already
/// exists (the racing-insert case is caught by the primary key and mapped
/// to the same 409).
pub async fn create_profile(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if ProfileRepo::get(&state.pool, user.user_id).await?.is_some() {
        return Err(CoreError::Conflict("Profile already exists".into()).into());
    }

    let profile = ProfileRepo::create(&state.pool, user.user_id, &input).await?;

    tracing::info!(user_id = %user.user_id, "User profile created");

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profile
pub async fn get_profile(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::get(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        })?;

    Ok(Json(profile))
}

/// PUT /api/profile
///
/// Partial update: absent fields keep their stored values.
pub async fn update_profile(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        })?;

    tracing::info!(user_id = %user.user_id, "User profile updated");

    Ok(Json(profile))
}

/// DELETE /api/profile
///
/// Removes the profile and its personalization context atomically.
pub async fn delete_profile(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let removed = ProfileRepo::delete(&state.pool, user.user_id).await?;

    if !removed {
        return Err(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        }
        .into());
    }

    tracing::info!(user_id = %user.user_id, "User profile deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Profile deleted successfully",
    })))
}

/// POST /api/profile/export
///
/// Data export for the account owner (GDPR-style): the profile bundle as
/// JSON.
pub async fn export_profile(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let profile = ProfileRepo::get(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Profile",
            user_id: user.user_id,
        })?;

    let exported_at = profile.profile_updated_at;
    Ok(Json(json!({
        "profile": profile,
        "createdAt": exported_at,
    })))
}

/// PUT /api/profile/preferences
///
/// Flip the personalization flag. The body must carry a real boolean;
/// anything else is rejected with 400 before any row is touched.
pub async fn update_preferences(
    user: CurrentUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePreferences>,
) -> AppResult<impl IntoResponse> {
    let profile =
        ProfileRepo::set_personalization_enabled(&state.pool, user.user_id, input.personalization_enabled)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Profile",
                user_id: user.user_id,
            })?;

    tracing::info!(
        user_id = %user.user_id,
        personalization_enabled = profile.personalization_enabled,
        "Personalization preference updated",
    );

    Ok(Json(json!({
        "success": true,
        "profile": profile,
    })))
}
