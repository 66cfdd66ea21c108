//! The query orchestrator: profile lookup, query-side adaptation,
//! retrieval, response-side adaptation.
//!
//! Personalization must never fail a query. A missing user, missing
//! profile, disabled flag, or a failed profile lookup all degrade to the
//! unpersonalized pipeline; only retrieval itself can error the request.

use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use mentora_core::error::CoreError;
use mentora_core::personalize::{adapt_response, enhance_query, query_complexity, QueryComplexity};
use mentora_core::profile::{DeviceType, ExperienceLevel, OsPreference};
use mentora_db::models::profile::UserProfile;
use mentora_db::repositories::ProfileRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::OptionalUser;
use crate::retrieval::RetrievalChoice;
use crate::state::AppState;

/// Default number of results when the caller does not ask for a count.
const DEFAULT_TOP_K: usize = 5;

/// Upper bound on requested results.
const MAX_TOP_K: usize = 50;

/// Body of `POST /api/query`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: Option<String>,
    pub top_k: Option<usize>,
}

/// The orchestrator's response envelope (camelCase is this endpoint's wire
/// format).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub original_query: String,
    pub processed_query: String,
    pub results: Vec<RetrievalChoice>,
    pub user_context: Option<UserContextEnvelope>,
    pub top_k: usize,
}

/// Personalization context reported back to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContextEnvelope {
    pub personalization_enabled: bool,
    pub user_context: Option<UserContextFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_complexity: Option<QueryComplexity>,
    pub profile: UserProfile,
}

/// The profile fields the adapter actually read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContextFields {
    pub experience_level: ExperienceLevel,
    pub os_preference: OsPreference,
    pub familiar_tools: Vec<String>,
    pub device_type: DeviceType,
    pub consent_given: bool,
}

/// POST /api/query
pub async fn run_query(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Json(input): Json<QueryRequest>,
) -> AppResult<impl IntoResponse> {
    let query = input
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| CoreError::Validation("Query is required".into()))?
        .to_string();

    let top_k = input.top_k.unwrap_or(DEFAULT_TOP_K).clamp(1, MAX_TOP_K);

    // Profile lookup degrades to anonymous on failure.
    let profile = match &user {
        Some(u) => match ProfileRepo::get(&state.pool, u.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(
                    user_id = %u.user_id,
                    error = %err,
                    "Profile lookup failed, serving unpersonalized results",
                );
                None
            }
        },
        None => None,
    };

    let response = match profile {
        Some(profile) if profile.personalization_enabled => {
            let settings = profile.personalization();
            let processed = enhance_query(&query, &settings);
            let complexity = query_complexity(settings.experience);

            let mut retrieval = retrieve(&state, &processed, top_k).await?;
            for choice in &mut retrieval.choices {
                choice.message.content = adapt_response(&choice.message.content, &settings);
            }

            let fields = UserContextFields {
                experience_level: profile.programming_experience,
                os_preference: profile.os_preference,
                familiar_tools: profile.development_tools.clone(),
                device_type: profile.device_type,
                consent_given: profile.consent_given,
            };

            QueryResponse {
                original_query: query,
                processed_query: processed,
                results: retrieval.choices,
                user_context: Some(UserContextEnvelope {
                    personalization_enabled: true,
                    user_context: Some(fields),
                    query_complexity: Some(complexity),
                    profile,
                }),
                top_k,
            }
        }
        Some(profile) => {
            // Personalization switched off: text passes through untouched,
            // and the envelope says so.
            let retrieval = retrieve(&state, &query, top_k).await?;
            QueryResponse {
                original_query: query.clone(),
                processed_query: query,
                results: retrieval.choices,
                user_context: Some(UserContextEnvelope {
                    personalization_enabled: false,
                    user_context: None,
                    query_complexity: None,
                    profile,
                }),
                top_k,
            }
        }
        None => {
            let retrieval = retrieve(&state, &query, top_k).await?;
            QueryResponse {
                original_query: query.clone(),
                processed_query: query,
                results: retrieval.choices,
                user_context: None,
                top_k,
            }
        }
    };

    Ok(Json(response))
}

async fn retrieve(
    state: &AppState,
    query: &str,
    top_k: usize,
) -> AppResult<crate::retrieval::RetrievalResponse> {
    state.retriever.retrieve(query, top_k).await.map_err(|err| {
        tracing::error!(error = %err, "Retrieval failed");
        crate::error::AppError::InternalError("Failed to process query".to_string())
    })
}
