//! Request handlers.
//!
//! Each submodule provides async handler functions for one API area.
//! Handlers delegate to the repositories in `mentora_db` (or to the auth
//! service client) and map errors via [`crate::error::AppError`].

pub mod auth_proxy;
pub mod personalization;
pub mod profile;
pub mod query;
