//! Voter records.

use crate::candidate::CandidateId;
use ballot_types::Principal;
use serde::{Deserialize, Serialize};

/// What a voter has done with their ballot.
///
/// A ballot ends in exactly one of two terminal states: a direct vote or a
/// delegation. Both consume it — a delegator can neither vote nor delegate
/// again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoterStatus {
    /// Ballot still in hand.
    #[default]
    NotVoted,
    /// Ballot cast for this candidate.
    VotedDirectly(CandidateId),
    /// Ballot handed to the terminal delegate resolved at delegation time.
    Delegated(Principal),
}

impl VoterStatus {
    /// Whether the ballot has been consumed, by either terminal state.
    pub fn has_voted(&self) -> bool {
        !matches!(self, Self::NotVoted)
    }

    /// The delegate this voter handed their ballot to, if any.
    pub fn delegate(&self) -> Option<&Principal> {
        match self {
            Self::Delegated(to) => Some(to),
            _ => None,
        }
    }
}

/// One voter record per principal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Voter {
    /// Accumulated voting power. 0 means "not enrolled".
    pub weight: u64,
    pub status: VoterStatus,
}

impl Voter {
    /// A freshly enrolled voter holding the base weight of 1.
    pub fn enrolled() -> Self {
        Self {
            weight: 1,
            status: VoterStatus::NotVoted,
        }
    }
}
