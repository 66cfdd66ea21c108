//! Domain layer for the Mentora personalization backend.
//!
//! Holds the shared type aliases, the domain error enum, the profile
//! vocabulary (experience level, OS, device, content format), and the pure
//! text-adaptation rules used by the query pipeline. Nothing in this crate
//! performs I/O.

pub mod error;
pub mod personalize;
pub mod profile;
pub mod types;
