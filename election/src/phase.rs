//! Time windows gating nomination and voting.

use ballot_types::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which window an operation is gated by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    Nomination,
    Voting,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nomination => write!(f, "nomination"),
            Self::Voting => write!(f, "voting"),
        }
    }
}

/// A time window relative to election creation.
///
/// The default window has zero duration and is never open, so both phases
/// stay closed until the chairperson schedules them. Nothing prevents the
/// two windows from overlapping; the latest scheduling call wins and no
/// history of past settings is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    /// Seconds after election creation at which the window opens.
    pub start_offset: u64,
    /// How long the window stays open, in seconds.
    pub duration: u64,
}

impl PhaseWindow {
    pub fn new(start_offset: u64, duration: u64) -> Self {
        Self {
            start_offset,
            duration,
        }
    }

    /// Whether the window is open at `now` for an election created at
    /// `created_at`. Open means strictly inside the interval:
    /// `created_at + start_offset < now < created_at + start_offset + duration`.
    pub fn is_open(&self, created_at: Timestamp, now: Timestamp) -> bool {
        let opens = created_at.saturating_add(self.start_offset);
        let closes = opens.saturating_add(self.duration);
        opens < now && now < closes
    }
}
