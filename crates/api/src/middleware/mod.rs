//! Authentication extractors.
//!
//! - [`auth::CurrentUser`] -- Requires a session verified against the
//!   external auth service.
//! - [`auth::OptionalUser`] -- Same verification, but anonymous (or
//!   unverifiable) requests proceed without a user.

pub mod auth;
