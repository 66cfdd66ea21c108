//! Repository for the `user_profiles` table.
//!
//! Partial updates go through an allow-listed column set with per-column
//! `COALESCE`, never through SQL assembled from input keys. Every mutation
//! re-stamps `profile_updated_at`.

use sqlx::PgPool;

use mentora_core::types::UserId;

use crate::models::profile::{CreateProfile, UpdateProfile, UserProfile};

/// Column list for `user_profiles` queries.
const COLUMNS: &str = "\
    user_id, programming_experience, os_preference, development_tools, \
    device_type, personalization_enabled, consent_given, consent_timestamp, \
    profile_updated_at, data_retention_expires";

/// Retention window applied at creation (three years, as 1095 days).
const RETENTION_INTERVAL: &str = "1095 days";

/// Provides data access for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, filling defaults for omitted fields.
    ///
    /// `consent_timestamp` is stamped only when consent is actually given.
    /// A second insert for the same user fails with a unique violation,
    /// which the API layer reports as a conflict.
    pub async fn create(
        pool: &PgPool,
        user_id: UserId,
        dto: &CreateProfile,
    ) -> Result<UserProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_profiles \
                 (user_id, programming_experience, os_preference, development_tools, \
                  device_type, personalization_enabled, consent_given, consent_timestamp, \
                  data_retention_expires) \
             VALUES ($1, \
                 COALESCE($2, 'beginner'), \
                 COALESCE($3, 'other'), \
                 COALESCE($4, ARRAY[]::TEXT[]), \
                 COALESCE($5, 'other'), \
                 COALESCE($6, TRUE), \
                 COALESCE($7, FALSE), \
                 CASE WHEN COALESCE($7, FALSE) THEN NOW() END, \
                 NOW() + INTERVAL '{RETENTION_INTERVAL}') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(dto.programming_experience)
            .bind(dto.os_preference)
            .bind(&dto.development_tools)
            .bind(dto.device_type)
            .bind(dto.personalization_enabled)
            .bind(dto.consent_given)
            .fetch_one(pool)
            .await
    }

    /// Get a profile by user id. Returns `None` if the user never
    /// submitted one.
    pub async fn get(pool: &PgPool, user_id: UserId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Absent DTO fields keep their stored values.
    ///
    /// Returns `None` when no profile row exists.
    pub async fn update(
        pool: &PgPool,
        user_id: UserId,
        dto: &UpdateProfile,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET \
                 programming_experience = COALESCE($2, programming_experience), \
                 os_preference = COALESCE($3, os_preference), \
                 development_tools = COALESCE($4, development_tools), \
                 device_type = COALESCE($5, device_type), \
                 personalization_enabled = COALESCE($6, personalization_enabled), \
                 consent_given = COALESCE($7, consent_given), \
                 profile_updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(dto.programming_experience)
            .bind(dto.os_preference)
            .bind(&dto.development_tools)
            .bind(dto.device_type)
            .bind(dto.personalization_enabled)
            .bind(dto.consent_given)
            .fetch_optional(pool)
            .await
    }

    /// Flip the personalization flag, stamping `profile_updated_at`.
    pub async fn set_personalization_enabled(
        pool: &PgPool,
        user_id: UserId,
        enabled: bool,
    ) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE user_profiles SET \
                 personalization_enabled = $2, \
                 profile_updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(enabled)
            .fetch_optional(pool)
            .await
    }

    /// Delete a profile and its personalization context in one transaction.
    ///
    /// Returns `true` if a profile row was removed.
    pub async fn delete(pool: &PgPool, user_id: UserId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_personalization_context WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove profiles whose retention window has passed.
    ///
    /// Context rows go with them via the FK cascade. Returns the number of
    /// profiles removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE data_retention_expires < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
