//! User profile model and DTOs.

use mentora_core::profile::{DeviceType, ExperienceLevel, OsPreference, PersonalizationSettings};
use mentora_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `user_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub programming_experience: ExperienceLevel,
    pub os_preference: OsPreference,
    pub development_tools: Vec<String>,
    pub device_type: DeviceType,
    pub personalization_enabled: bool,
    pub consent_given: bool,
    pub consent_timestamp: Option<Timestamp>,
    pub profile_updated_at: Timestamp,
    pub data_retention_expires: Timestamp,
}

impl UserProfile {
    /// The adapter-facing view of this row.
    pub fn personalization(&self) -> PersonalizationSettings<'_> {
        PersonalizationSettings {
            experience: self.programming_experience,
            os: self.os_preference,
            device: self.device_type,
            tools: &self.development_tools,
        }
    }
}

/// DTO for creating a profile. Omitted fields take the documented defaults.
///
/// `consent_timestamp` and `data_retention_expires` are server-controlled
/// and intentionally absent here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProfile {
    pub programming_experience: Option<ExperienceLevel>,
    pub os_preference: Option<OsPreference>,
    #[validate(length(max = 32, message = "at most 32 development tools"))]
    pub development_tools: Option<Vec<String>>,
    pub device_type: Option<DeviceType>,
    pub personalization_enabled: Option<bool>,
    pub consent_given: Option<bool>,
}

/// DTO for partially updating a profile (PUT with PATCH semantics).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    pub programming_experience: Option<ExperienceLevel>,
    pub os_preference: Option<OsPreference>,
    #[validate(length(max = 32, message = "at most 32 development tools"))]
    pub development_tools: Option<Vec<String>>,
    pub device_type: Option<DeviceType>,
    pub personalization_enabled: Option<bool>,
    pub consent_given: Option<bool>,
}

/// Body of `PUT /api/profile/preferences`. The flag is mandatory and must
/// be a real boolean; anything else is rejected before reaching the
/// repository.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePreferences {
    pub personalization_enabled: bool,
}
