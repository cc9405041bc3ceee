//! Single-election governance engine.
//!
//! One chairperson instantiates the election, schedules a nomination window
//! and a voting window, nominates candidates and enrolls voters. Enrolled
//! voters then either cast a ballot directly or delegate their voting weight
//! to another voter; delegation chains are resolved to their terminal voter
//! with cycle detection. The winner is the candidate with the highest
//! accumulated weight (earliest nomination wins ties).
//!
//! The engine assumes a single-writer host: every operation is synchronous
//! and atomic, and the current time is an explicit parameter rather than an
//! ambient clock.

pub mod candidate;
mod delegation;
pub mod engine;
pub mod error;
pub mod phase;
pub mod voter;

pub use candidate::{Candidate, CandidateId};
pub use engine::{ElectionEngine, ElectionSnapshot};
pub use error::ElectionError;
pub use phase::{PhaseKind, PhaseWindow};
pub use voter::{Voter, VoterStatus};
