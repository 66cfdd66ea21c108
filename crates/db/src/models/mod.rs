//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for creates and partial updates (all-`Option`
//!   fields; an absent field leaves the stored value untouched)

pub mod personalization_context;
pub mod profile;
