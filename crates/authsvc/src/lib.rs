//! HTTP client for the external authentication service.
//!
//! The auth service (a separate process) owns accounts, credentials, and
//! sessions. This crate treats it as an untyped black box for raw
//! passthrough forwarding, plus one typed call: session introspection via
//! `GET /api/auth/get-session`.

pub mod client;

pub use client::{AuthServiceClient, AuthServiceError, Session, SessionUser};
