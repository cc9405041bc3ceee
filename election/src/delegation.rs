//! Delegation-chain resolution.
//!
//! A ballot handed to a delegate who has themselves delegated keeps moving
//! until it reaches a voter who still holds their own ballot or has already
//! cast it. Resolution is pure: the walk never mutates voter state, so a
//! failed delegation leaves nothing behind.

use std::collections::HashMap;

use crate::error::ElectionError;
use crate::voter::{Voter, VoterStatus};
use ballot_types::Principal;

/// Follow the delegation chain from `start` to its terminal voter.
///
/// Every step compares the current node against the original `caller`, not
/// against intermediate nodes: reaching the caller again means the new
/// delegation would close a cycle. The walk is additionally bounded by
/// `max_hops` (the enrolled voter count) — by pigeonhole a longer chain must
/// have revisited someone, so exhausting the bound is reported as a cycle
/// too. The bound guarantees termination even on corrupted state containing
/// a cycle the caller is not part of.
pub(crate) fn resolve_terminal(
    voters: &HashMap<Principal, Voter>,
    caller: &Principal,
    start: &Principal,
    max_hops: usize,
) -> Result<Principal, ElectionError> {
    let mut current = start.clone();
    for _ in 0..=max_hops {
        if current == *caller {
            return Err(ElectionError::DelegationCycle(caller.to_string()));
        }
        match voters.get(&current).map(|v| &v.status) {
            Some(VoterStatus::Delegated(next)) => current = next.clone(),
            // Not delegating (or no record at all): end of the chain.
            _ => return Ok(current),
        }
    }
    Err(ElectionError::DelegationCycle(caller.to_string()))
}
