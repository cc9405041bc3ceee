//! The election engine — owns all state and exposes the operation surface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateId};
use crate::delegation::resolve_terminal;
use crate::error::ElectionError;
use crate::phase::{PhaseKind, PhaseWindow};
use crate::voter::{Voter, VoterStatus};
use ballot_types::{Principal, Timestamp};

/// A single-election governance engine.
///
/// The principal that instantiates the election becomes its chairperson: the
/// only caller allowed to schedule phases, nominate candidates and enroll
/// voters. Enrolled voters spend their ballot exactly once, on a direct vote
/// or a delegation.
///
/// Every operation validates before it mutates, so a failed call leaves no
/// partial state behind. The engine holds no lock; `&mut self` on the
/// mutating operations is the serialization boundary a concurrent host must
/// provide (a single-threaded actor or a lock around the whole engine).
#[derive(Debug)]
pub struct ElectionEngine {
    /// The chairperson. Fixed at instantiation.
    admission: Principal,
    /// When the election was instantiated; phase offsets are relative to it.
    created_at: Timestamp,
    nomination_phase: PhaseWindow,
    voting_phase: PhaseWindow,
    /// Voter records keyed by principal.
    voters: HashMap<Principal, Voter>,
    /// Candidates ordered by id (`id - 1` is the index).
    candidates: Vec<Candidate>,
}

impl ElectionEngine {
    /// Instantiate the election. The creator becomes the chairperson and is
    /// enrolled with the base weight of 1. Both windows start closed.
    pub fn new(admission: Principal, created_at: Timestamp) -> Self {
        let mut voters = HashMap::new();
        voters.insert(admission.clone(), Voter::enrolled());
        Self {
            admission,
            created_at,
            nomination_phase: PhaseWindow::default(),
            voting_phase: PhaseWindow::default(),
            voters,
            candidates: Vec::new(),
        }
    }

    fn require_admission(&self, caller: &Principal) -> Result<(), ElectionError> {
        if caller != &self.admission {
            return Err(ElectionError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Schedule the nomination window. Chairperson only; overwrites any
    /// previous setting unconditionally.
    pub fn set_nomination_phase(
        &mut self,
        caller: &Principal,
        start_offset: u64,
        duration: u64,
    ) -> Result<(), ElectionError> {
        self.require_admission(caller)?;
        self.nomination_phase = PhaseWindow::new(start_offset, duration);
        tracing::debug!(start_offset, duration, "nomination window rescheduled");
        Ok(())
    }

    /// Schedule the voting window. Chairperson only; overwrites any previous
    /// setting unconditionally.
    pub fn set_voting_phase(
        &mut self,
        caller: &Principal,
        start_offset: u64,
        duration: u64,
    ) -> Result<(), ElectionError> {
        self.require_admission(caller)?;
        self.voting_phase = PhaseWindow::new(start_offset, duration);
        tracing::debug!(start_offset, duration, "voting window rescheduled");
        Ok(())
    }

    /// Nominate a candidate. Chairperson only, and only while the nomination
    /// window is open. Returns the new candidate's id, sequential from 1.
    pub fn add_candidate(
        &mut self,
        caller: &Principal,
        name: impl Into<String>,
        now: Timestamp,
    ) -> Result<CandidateId, ElectionError> {
        self.require_admission(caller)?;
        if !self.is_nomination_open(now) {
            return Err(ElectionError::PhaseClosed(PhaseKind::Nomination));
        }
        let id = self.candidates.len() as CandidateId + 1;
        self.candidates.push(Candidate::new(id, name));
        tracing::info!(id, "candidate nominated");
        Ok(id)
    }

    /// Grant `target` the right to vote. Chairperson only. Enrollment is
    /// binary — weight is exactly 1 at grant time and grows only by
    /// absorbing delegated weight later.
    pub fn grant_voting_right(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), ElectionError> {
        self.require_admission(caller)?;
        if let Some(existing) = self.voters.get(target) {
            if existing.status.has_voted() {
                return Err(ElectionError::AlreadyVoted(target.to_string()));
            }
            if existing.weight != 0 {
                return Err(ElectionError::AlreadyEnrolled(target.to_string()));
            }
        }
        self.voters.entry(target.clone()).or_default().weight = 1;
        tracing::debug!(voter = %target, "voting right granted");
        Ok(())
    }

    /// Hand the caller's ballot, and with it their accumulated weight, to
    /// `target`.
    ///
    /// Existing delegations are followed to the terminal voter first, so the
    /// caller's record points at the chain's end rather than its next hop.
    /// The weight lands in exactly one place: the terminal delegate's chosen
    /// candidate if they have already voted, otherwise the terminal
    /// delegate's own weight, to be carried by their eventual vote or
    /// further delegation.
    pub fn delegate(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), ElectionError> {
        let voter = self.voters.get(caller);
        if voter.map_or(false, |v| v.status.has_voted()) {
            return Err(ElectionError::AlreadyVoted(caller.to_string()));
        }
        if target == caller {
            return Err(ElectionError::SelfDelegation);
        }
        let weight = voter.map_or(0, |v| v.weight);
        if weight == 0 {
            return Err(ElectionError::NotEligible(caller.to_string()));
        }
        let terminal = resolve_terminal(&self.voters, caller, target, self.voters.len())?;

        // All guards passed; nothing below can fail.
        if let Some(v) = self.voters.get_mut(caller) {
            v.status = VoterStatus::Delegated(terminal.clone());
        }
        let voted_for = self.voters.get(&terminal).and_then(|v| match v.status {
            VoterStatus::VotedDirectly(id) => Some(id),
            _ => None,
        });
        match voted_for {
            Some(candidate_id) => {
                if let Some(candidate) = self.candidates.get_mut((candidate_id - 1) as usize) {
                    candidate.vote_count += weight;
                }
                tracing::info!(
                    from = %caller,
                    to = %terminal,
                    candidate_id,
                    weight,
                    "delegated weight applied to tally"
                );
            }
            None => {
                self.voters.entry(terminal.clone()).or_default().weight += weight;
                tracing::info!(from = %caller, to = %terminal, weight, "weight delegated");
            }
        }
        Ok(())
    }

    /// Cast a direct vote for `candidate_id` with the caller's current
    /// accumulated weight — base 1 plus whatever has been delegated in.
    pub fn vote(
        &mut self,
        caller: &Principal,
        candidate_id: CandidateId,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        let voter = self.voters.get(caller);
        let weight = voter.map_or(0, |v| v.weight);
        if weight == 0 {
            return Err(ElectionError::NotEligible(caller.to_string()));
        }
        if voter.map_or(false, |v| v.status.has_voted()) {
            return Err(ElectionError::AlreadyVoted(caller.to_string()));
        }
        if candidate_id == 0 || candidate_id as usize > self.candidates.len() {
            return Err(ElectionError::InvalidCandidate(candidate_id));
        }
        if !self.is_voting_open(now) {
            return Err(ElectionError::PhaseClosed(PhaseKind::Voting));
        }
        if let Some(v) = self.voters.get_mut(caller) {
            v.status = VoterStatus::VotedDirectly(candidate_id);
        }
        if let Some(candidate) = self.candidates.get_mut((candidate_id - 1) as usize) {
            candidate.vote_count += weight;
        }
        tracing::info!(voter = %caller, candidate_id, weight, "vote recorded");
        Ok(())
    }

    /// The current leader: the first candidate (lowest id) holding the
    /// maximum vote count. 0 when there are no candidates or no votes yet.
    pub fn winning_candidate(&self) -> CandidateId {
        let mut winner = 0;
        let mut best = 0;
        for candidate in &self.candidates {
            if candidate.vote_count > best {
                best = candidate.vote_count;
                winner = candidate.id;
            }
        }
        winner
    }

    /// Name of the current leader.
    ///
    /// When no candidate has received any votes there is no leader to name
    /// and this returns [`ElectionError::NoWinner`] — deliberately an error
    /// rather than an empty string, since candidate names are unvalidated
    /// and `""` could be an actual name.
    pub fn winner_name(&self) -> Result<&str, ElectionError> {
        let id = self.winning_candidate();
        if id == 0 {
            return Err(ElectionError::NoWinner);
        }
        self.candidates
            .get((id - 1) as usize)
            .map(|c| c.name.as_str())
            .ok_or(ElectionError::NoWinner)
    }

    /// Whether candidates can be nominated at `now`.
    pub fn is_nomination_open(&self, now: Timestamp) -> bool {
        self.nomination_phase.is_open(self.created_at, now)
    }

    /// Whether ballots are accepted at `now`. Delegation is not gated by
    /// this window.
    pub fn is_voting_open(&self, now: Timestamp) -> bool {
        self.voting_phase.is_open(self.created_at, now)
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn admission(&self) -> &Principal {
        &self.admission
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn nomination_phase(&self) -> PhaseWindow {
        self.nomination_phase
    }

    pub fn voting_phase(&self) -> PhaseWindow {
        self.voting_phase
    }

    /// The voter record for a principal, if one exists.
    pub fn voter(&self, principal: &Principal) -> Option<&Voter> {
        self.voters.get(principal)
    }

    /// The candidate with the given 1-based id.
    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        if id == 0 {
            return None;
        }
        self.candidates.get((id - 1) as usize)
    }

    /// All candidates in nomination order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate_count(&self) -> u32 {
        self.candidates.len() as u32
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }
}

/// Serializable snapshot of an election's full state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub admission: Principal,
    pub created_at: Timestamp,
    pub nomination_phase: PhaseWindow,
    pub voting_phase: PhaseWindow,
    pub voters: HashMap<Principal, Voter>,
    pub candidates: Vec<Candidate>,
}

impl ElectionEngine {
    /// Serialize the whole election state to bytes. The hosting environment
    /// decides where the bytes live; the engine only produces them.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = ElectionSnapshot {
            admission: self.admission.clone(),
            created_at: self.created_at,
            nomination_phase: self.nomination_phase,
            voting_phase: self.voting_phase,
            voters: self.voters.clone(),
            candidates: self.candidates.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore an election from serialized bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, ElectionError> {
        let snapshot: ElectionSnapshot = bincode::deserialize(data)
            .map_err(|e| ElectionError::Serialization(e.to_string()))?;
        Ok(Self {
            admission: snapshot.admission,
            created_at: snapshot.created_at,
            nomination_phase: snapshot.nomination_phase,
            voting_phase: snapshot.voting_phase,
            voters: snapshot.voters,
            candidates: snapshot.candidates,
        })
    }
}
