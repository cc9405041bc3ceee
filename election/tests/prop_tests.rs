use proptest::prelude::*;

use ballot_election::{ElectionEngine, VoterStatus};
use ballot_types::{Principal, Timestamp};

fn chair() -> Principal {
    Principal::new("chair")
}

fn now() -> Timestamp {
    Timestamp::new(10)
}

#[derive(Clone, Debug)]
enum Action {
    Vote { actor: usize, candidate: u32 },
    Delegate { actor: usize, target: usize },
}

fn action_strategy(pool: usize, candidates: u32) -> impl Strategy<Value = Action> {
    prop_oneof![
        // candidate range deliberately includes 0 and out-of-range ids
        (0..pool, 0..candidates + 2)
            .prop_map(|(actor, candidate)| Action::Vote { actor, candidate }),
        (0..pool, 0..pool).prop_map(|(actor, target)| Action::Delegate { actor, target }),
    ]
}

fn scenario() -> impl Strategy<Value = (usize, u32, Vec<Action>)> {
    (2usize..6, 1u32..4).prop_flat_map(|(pool, candidates)| {
        prop::collection::vec(action_strategy(pool, candidates), 0..24)
            .prop_map(move |actions| (pool, candidates, actions))
    })
}

/// Build an open election with `candidates` candidates and `pool` enrolled
/// voters, then replay `actions`, ignoring rejections — rejected calls must
/// not affect state, which is exactly what the properties check.
fn run(pool: usize, candidates: u32, actions: &[Action]) -> (ElectionEngine, Vec<Principal>) {
    let mut engine = ElectionEngine::new(chair(), Timestamp::EPOCH);
    engine.set_nomination_phase(&chair(), 0, 3600).unwrap();
    engine.set_voting_phase(&chair(), 0, 3600).unwrap();
    for i in 0..candidates {
        engine
            .add_candidate(&chair(), format!("candidate-{i}"), now())
            .unwrap();
    }
    let voters: Vec<Principal> = (0..pool)
        .map(|i| Principal::new(format!("voter-{i}")))
        .collect();
    for voter in &voters {
        engine.grant_voting_right(&chair(), voter).unwrap();
    }
    for action in actions {
        let _ = match action {
            Action::Vote { actor, candidate } => engine.vote(&voters[*actor], *candidate, now()),
            Action::Delegate { actor, target } => {
                engine.delegate(&voters[*actor], &voters[*target])
            }
        };
    }
    (engine, voters)
}

/// Whether this principal's ballot ultimately landed on a candidate,
/// following the stored delegation links.
fn ballot_landed(engine: &ElectionEngine, start: &Principal) -> bool {
    let mut current = start.clone();
    for _ in 0..=engine.voter_count() {
        match engine.voter(&current).map(|v| v.status.clone()) {
            Some(VoterStatus::VotedDirectly(_)) => return true,
            Some(VoterStatus::Delegated(next)) => current = next,
            _ => return false,
        }
    }
    false
}

proptest! {
    /// The tally across candidates equals the combined weight of voters
    /// whose ballot (directly or through delegation) reached a candidate,
    /// and never exceeds the total enrolled weight.
    #[test]
    fn weight_is_conserved((pool, candidates, actions) in scenario()) {
        let (engine, voters) = run(pool, candidates, &actions);

        let tally: u64 = engine.candidates().iter().map(|c| c.vote_count).sum();
        let landed = voters
            .iter()
            .chain(std::iter::once(&chair()))
            .filter(|p| ballot_landed(&engine, p))
            .count() as u64;

        prop_assert_eq!(tally, landed, "tally {} != landed ballots {}", tally, landed);
        prop_assert!(
            tally <= engine.voter_count() as u64,
            "tally {} exceeds enrolled weight {}",
            tally,
            engine.voter_count()
        );
    }

    /// The winning candidate always holds the maximum count, and is the
    /// earliest-nominated among equals; 0 only when no ballot has landed.
    #[test]
    fn winner_holds_the_maximum((pool, candidates, actions) in scenario()) {
        let (engine, _) = run(pool, candidates, &actions);

        let max = engine.candidates().iter().map(|c| c.vote_count).max().unwrap_or(0);
        let winner = engine.winning_candidate();
        if max == 0 {
            prop_assert_eq!(winner, 0);
        } else {
            let first = engine
                .candidates()
                .iter()
                .find(|c| c.vote_count == max)
                .map(|c| c.id)
                .unwrap_or(0);
            prop_assert_eq!(winner, first);
        }
    }

    /// No weight is ever created or destroyed: every base unit is either
    /// in the tally or parked on a voter who still holds their ballot.
    /// Delegating to a voter who already voted moves the unit straight to
    /// the tally; otherwise it waits on the terminal delegate.
    #[test]
    fn every_base_unit_is_in_the_tally_or_parked((pool, candidates, actions) in scenario()) {
        let (engine, voters) = run(pool, candidates, &actions);

        let tally: u64 = engine.candidates().iter().map(|c| c.vote_count).sum();
        let parked: u64 = voters
            .iter()
            .chain(std::iter::once(&chair()))
            .filter_map(|p| engine.voter(p))
            .filter(|v| !v.status.has_voted())
            .map(|v| v.weight)
            .sum();
        prop_assert_eq!(
            tally + parked,
            engine.voter_count() as u64,
            "tally {} + parked {} != enrolled {}",
            tally,
            parked,
            engine.voter_count()
        );
    }
}
