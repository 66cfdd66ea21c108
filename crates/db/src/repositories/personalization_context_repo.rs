//! Repository for the `user_personalization_context` table.

use sqlx::PgPool;

use mentora_core::types::UserId;

use crate::models::personalization_context::{PersonalizationContext, UpsertContext};

/// Column list for `user_personalization_context` queries.
const COLUMNS: &str = "\
    id, user_id, last_course_module_visited, preferred_content_format, \
    difficulty_override, created_at, updated_at";

/// Provides data access for personalization contexts.
pub struct PersonalizationContextRepo;

impl PersonalizationContextRepo {
    /// Get the context for a user. Returns `None` if none has been created.
    pub async fn get(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<PersonalizationContext>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_personalization_context WHERE user_id = $1");
        sqlx::query_as::<_, PersonalizationContext>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or update a user's context in one atomic statement.
    ///
    /// Lazily creates the row on first call (`ON CONFLICT (user_id) DO
    /// UPDATE`); afterwards only provided fields change, and `updated_at`
    /// is re-stamped. Requires the owning profile row to exist (FK).
    pub async fn upsert(
        pool: &PgPool,
        user_id: UserId,
        dto: &UpsertContext,
    ) -> Result<PersonalizationContext, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_personalization_context \
                 (user_id, last_course_module_visited, preferred_content_format, \
                  difficulty_override) \
             VALUES ($1, $2, COALESCE($3, 'text'), $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 last_course_module_visited = \
                     COALESCE($2, user_personalization_context.last_course_module_visited), \
                 preferred_content_format = \
                     COALESCE($3, user_personalization_context.preferred_content_format), \
                 difficulty_override = \
                     COALESCE($4, user_personalization_context.difficulty_override), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PersonalizationContext>(&query)
            .bind(user_id)
            .bind(&dto.last_course_module_visited)
            .bind(dto.preferred_content_format)
            .bind(dto.difficulty_override)
            .fetch_one(pool)
            .await
    }
}
