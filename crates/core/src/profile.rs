//! Profile vocabulary: the closed sets a user can pick from, plus the
//! personalization view consumed by the text adapter.
//!
//! Enums are stored as lowercase VARCHAR (CHECK-constrained) and travel as
//! lowercase JSON, so both serde and sqlx use the same renaming.

use serde::{Deserialize, Serialize};

/// Self-reported programming experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Preferred operating system for commands and examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum OsPreference {
    Windows,
    Macos,
    Linux,
    #[default]
    Other,
}

/// Device class the user mostly studies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Laptop,
    Tablet,
    #[default]
    Other,
}

/// Preferred content format, kept on the personalization context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "VARCHAR", rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Text,
    Video,
    Interactive,
    Audio,
}

impl OsPreference {
    /// Lowercase wire name, e.g. `"macos"`.
    pub fn as_str(self) -> &'static str {
        match self {
            OsPreference::Windows => "windows",
            OsPreference::Macos => "macos",
            OsPreference::Linux => "linux",
            OsPreference::Other => "other",
        }
    }
}

/// The slice of a stored profile the text adapter reads.
///
/// Borrowed from the full database row so adaptation never clones the tool
/// list. All rules treat this as read-only input.
#[derive(Debug, Clone, Copy)]
pub struct PersonalizationSettings<'a> {
    pub experience: ExperienceLevel,
    pub os: OsPreference,
    pub device: DeviceType,
    pub tools: &'a [String],
}
