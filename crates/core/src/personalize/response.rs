//! Response-side adaptation: rewrite retrieved answer text for a profile.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::{ExperienceLevel, OsPreference, PersonalizationSettings};

/// Jargon replaced for beginners. Matching is case-insensitive; the
/// replacement is always the plain lowercase phrase.
const JARGON_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("algorithm", "step-by-step procedure"),
    ("implementation", "way to do"),
    ("optimization", "improvement"),
];

/// Fixed disclaimer appended by the beginner rule.
pub const BEGINNER_DISCLAIMER: &str = "\n\nNote: This concept might take some time to fully \
     understand. Practice with simple examples first.\n\n**Beginner Tip:** Take your time to \
     understand each part before moving to the next. Feel free to ask for more examples if needed.";

/// Fixed note appended by the advanced rule.
pub const ADVANCED_NOTE: &str = "\n\n**Advanced Note:** Consider the performance implications, \
     memory usage, and scalability of this approach in production environments.";

/// Fixed line appended for intermediate users.
pub const INTERMEDIATE_NOTE: &str =
    "\n\nThis approach balances simplicity and effectiveness for most use cases.";

static JARGON_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    JARGON_SUBSTITUTIONS
        .iter()
        .map(|(term, plain)| {
            let re = Regex::new(&format!("(?i){}", regex::escape(term))).expect("valid regex");
            (re, *plain)
        })
        .collect()
});

/// Beginner rule: substitute jargon, then append the fixed disclaimer.
///
/// Text containing none of the jargon terms comes back as the original plus
/// exactly the disclaimer.
pub fn apply_beginner_rule(text: &str) -> String {
    let mut out = text.to_string();
    for (re, plain) in JARGON_RES.iter() {
        out = re.replace_all(&out, *plain).into_owned();
    }
    out.push_str(BEGINNER_DISCLAIMER);
    out
}

/// Experience rule dispatch.
fn apply_experience(text: &str, experience: ExperienceLevel) -> String {
    match experience {
        ExperienceLevel::Beginner => apply_beginner_rule(text),
        ExperienceLevel::Intermediate => format!("{text}{INTERMEDIATE_NOTE}"),
        ExperienceLevel::Advanced => format!("{text}{ADVANCED_NOTE}"),
    }
}

/// Replace package-manager tokens with the target OS equivalents.
///
/// Three-way fixed mapping; `other` leaves the text alone. Plain substring
/// replacement, applied in table order.
pub fn replace_os_commands(text: &str, os: OsPreference) -> String {
    match os {
        OsPreference::Windows => text
            .replace("sudo ", "")
            .replace("apt-get", "choco")
            .replace("brew", "choco"),
        OsPreference::Macos => text.replace("apt-get", "brew").replace("yum", "brew"),
        OsPreference::Linux => text.replace("brew", "apt-get"),
        OsPreference::Other => text.to_string(),
    }
}

/// Tool rule: when the text talks about editors or IDEs, name the user's
/// familiar tools.
fn reference_familiar_tools(text: &str, tools: &[String]) -> String {
    if tools.is_empty() {
        return text.to_string();
    }
    let lower = text.to_lowercase();
    if lower.contains("editor") || lower.contains("ide") {
        let joined = tools.join(", ");
        format!(
            "{text}\n\nSince you're familiar with {joined}, you might want to use its specific \
             features for this task."
        )
    } else {
        text.to_string()
    }
}

/// Append a fixed OS-specific installation example when the text mentions
/// installing or setting something up.
fn add_os_example(text: &str, os: OsPreference) -> String {
    let lower = text.to_lowercase();
    if !lower.contains("install") && !lower.contains("setup") {
        return text.to_string();
    }
    let (heading, example) = match os {
        OsPreference::Windows => (
            "Windows",
            "Use Windows Subsystem for Linux (WSL) for a Unix-like environment, or install tools \
             via Chocolatey package manager.",
        ),
        OsPreference::Macos => (
            "Macos",
            "Use Homebrew package manager (brew install [package]) or install via official \
             installers.",
        ),
        OsPreference::Linux => (
            "Linux",
            "Use your distribution's package manager (apt for Ubuntu/Debian, yum/dnf for \
             RedHat/Fedora, pacman for Arch).",
        ),
        OsPreference::Other => (
            "Other",
            "Use appropriate package managers or installation methods for your system.",
        ),
    };
    format!("{text}\n\n**{heading} Example:** {example}")
}

/// Append a usage pointer for the first familiar tool the text mentions.
fn add_tool_example(text: &str, tools: &[String]) -> String {
    let lower = text.to_lowercase();
    match tools.iter().find(|t| lower.contains(&t.to_lowercase())) {
        Some(tool) => format!(
            "{text}\n\n**Using {tool}:** You can accomplish this with {tool}'s built-in \
             functionality."
        ),
        None => text.to_string(),
    }
}

/// Rewrite answer text according to the profile's settings.
///
/// Rule order is fixed for reproducibility: experience, OS commands, tool
/// reference, OS example, tool example.
pub fn adapt_response(text: &str, settings: &PersonalizationSettings<'_>) -> String {
    let out = apply_experience(text, settings.experience);
    let out = replace_os_commands(&out, settings.os);
    let out = reference_familiar_tools(&out, settings.tools);
    let out = add_os_example(&out, settings.os);
    add_tool_example(&out, settings.tools)
}
