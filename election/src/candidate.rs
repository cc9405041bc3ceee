//! Candidate records.

use serde::{Deserialize, Serialize};

/// 1-based sequential candidate id, assigned at nomination and never reused.
/// 0 means "no candidate".
pub type CandidateId = u32;

/// A nominated candidate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    /// Display name. Names are not deduplicated; the id disambiguates.
    pub name: String,
    /// Accumulated voting weight. Only ever grows after nomination.
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            vote_count: 0,
        }
    }
}
