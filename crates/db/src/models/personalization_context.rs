//! Personalization context model and DTO.

use mentora_core::profile::{ContentFormat, ExperienceLevel};
use mentora_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `user_personalization_context` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PersonalizationContext {
    pub id: uuid::Uuid,
    pub user_id: UserId,
    pub last_course_module_visited: Option<String>,
    pub preferred_content_format: ContentFormat,
    pub difficulty_override: Option<ExperienceLevel>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a user's personalization context.
///
/// The row is created lazily on first upsert; afterwards only provided
/// fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertContext {
    #[validate(length(max = 100, message = "module slug too long"))]
    pub last_course_module_visited: Option<String>,
    pub preferred_content_format: Option<ContentFormat>,
    pub difficulty_override: Option<ExperienceLevel>,
}
