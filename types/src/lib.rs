//! Fundamental types for the ballot engine.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! caller identities and timestamps.

pub mod principal;
pub mod time;

pub use principal::Principal;
pub use time::Timestamp;
