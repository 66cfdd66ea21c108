//! Query-side adaptation: appended context hints before retrieval.

use serde::Serialize;

use crate::profile::{ExperienceLevel, PersonalizationSettings};

/// Keywords marking a question as technical enough to tune by experience.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "code",
    "programming",
    "algorithm",
    "function",
    "variable",
    "class",
    "method",
    "debug",
    "error",
    "bug",
    "test",
    "framework",
    "library",
    "api",
    "database",
    "server",
    "client",
    "network",
    "security",
    "architecture",
];

/// Keywords that make the user's familiar-tool list relevant.
const TOOL_KEYWORDS: &[&str] = &["tool", "software", "library", "framework", "language"];

/// Keywords that make the OS preference relevant.
const SYSTEM_KEYWORDS: &[&str] = &[
    "install",
    "command",
    "terminal",
    "bash",
    "shell",
    "setup",
    "configuration",
];

/// Coarse complexity bucket reported alongside the enhanced query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryComplexity {
    Simple,
    Moderate,
    Complex,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

fn is_technical_query(query: &str) -> bool {
    contains_any(query, TECHNICAL_KEYWORDS)
}

/// Rewrite a query with profile-derived hints.
///
/// Rules run in order (experience, tools, OS) and each appends a fixed
/// parenthetical when its keyword table matches the text accumulated so far.
/// A query that matches nothing comes back unchanged.
pub fn enhance_query(query: &str, settings: &PersonalizationSettings<'_>) -> String {
    let mut enhanced = query.to_string();

    match settings.experience {
        ExperienceLevel::Beginner if is_technical_query(&enhanced) => {
            enhanced = format!("{enhanced} (explain in simple terms, with examples, for a beginner)");
        }
        ExperienceLevel::Advanced if is_technical_query(&enhanced) => {
            enhanced =
                format!("{enhanced} (include advanced concepts, best practices, and optimization)");
        }
        _ => {}
    }

    if !settings.tools.is_empty() && contains_any(&enhanced, TOOL_KEYWORDS) {
        let tools = settings.tools.join(", ");
        enhanced = format!("{enhanced} (considering familiarity with: {tools})");
    }

    if contains_any(&enhanced, SYSTEM_KEYWORDS) {
        enhanced = format!("{enhanced} (for {} operating system)", settings.os.as_str());
    }

    enhanced
}

/// Complexity bucket for the user's experience level.
pub fn query_complexity(experience: ExperienceLevel) -> QueryComplexity {
    match experience {
        ExperienceLevel::Beginner => QueryComplexity::Simple,
        ExperienceLevel::Intermediate => QueryComplexity::Moderate,
        ExperienceLevel::Advanced => QueryComplexity::Complex,
    }
}
