use crate::candidate::CandidateId;
use crate::phase::PhaseKind;
use thiserror::Error;

/// Every failure is terminal for the call that produced it and leaves the
/// engine's state untouched. Retry policy (e.g. "wait until the window
/// opens") belongs to the caller.
#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("caller {0} is not the election chairperson")]
    Unauthorized(String),

    #[error("voter {0} has already voted or delegated")]
    AlreadyVoted(String),

    #[error("voter {0} already has the right to vote")]
    AlreadyEnrolled(String),

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("delegation by {0} would close a cycle")]
    DelegationCycle(String),

    #[error("the {0} window is not open")]
    PhaseClosed(PhaseKind),

    #[error("candidate id {0} does not exist")]
    InvalidCandidate(CandidateId),

    #[error("voter {0} has no right to vote")]
    NotEligible(String),

    #[error("no candidate has received any votes")]
    NoWinner,

    #[error("snapshot serialization error: {0}")]
    Serialization(String),
}
