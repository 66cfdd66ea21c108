//! Preference-driven text adaptation.
//!
//! Two sides of the same rule-table approach:
//! - [`query`] rewrites a user question before retrieval (appended context
//!   hints keyed off the profile).
//! - [`response`] rewrites retrieved answer text (jargon substitution, OS
//!   command mapping, appended notes).
//!
//! Everything is keyword/substring matching over fixed tables. No rule ever
//! fails: adaptation is total over its inputs, which is what lets callers
//! degrade to unpersonalized text only when the *profile lookup* fails.

pub mod query;
pub mod response;

pub use query::{enhance_query, query_complexity, QueryComplexity};
pub use response::adapt_response;
