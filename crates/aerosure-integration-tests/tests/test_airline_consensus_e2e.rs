//! Membership governance end-to-end: bootstrap admissions, the consensus
//! boundary at the fifth airline, and threshold recomputation as the
//! active set grows.

use aerosure_core::{Amount, EngineConfig, EngineError, Principal};
use aerosure_engine::Engine;

fn principal(byte: u8) -> Principal {
    Principal::from_bytes([byte; 20])
}

const OWNER: u8 = 0xA0;

fn engine() -> Engine {
    Engine::new(EngineConfig::default(), principal(OWNER), principal(1)).unwrap()
}

fn deposit() -> Amount {
    EngineConfig::default().funding_deposit
}

#[test]
fn test_unfunded_first_airline_cannot_register() {
    let mut eng = engine();
    let result = eng.register_airline(&principal(1), principal(2));
    assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
    assert!(!eng.airline_status(&principal(2)).registered);
}

#[test]
fn test_funded_first_airline_registers_up_to_fourth() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();

    for b in 2..=4 {
        let outcome = eng.register_airline(&principal(1), principal(b)).unwrap();
        assert!(outcome.auto_approved, "airline {b} should be auto-approved");
    }
    assert_eq!(eng.airlines().registered_count(), 4);
}

#[test]
fn test_fifth_airline_requires_consensus() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();
    for b in 2..=4 {
        eng.register_airline(&principal(1), principal(b)).unwrap();
    }

    // Fifth registration enters unapproved.
    let outcome = eng.register_airline(&principal(1), principal(5)).unwrap();
    assert!(!outcome.auto_approved);
    let status = eng.airline_status(&principal(5));
    assert!(status.registered);
    assert!(!status.approved);

    // Fund airlines 2..4 so four airlines are active.
    for b in 2..=4 {
        eng.fund_airline(&principal(b), deposit()).unwrap();
    }
    assert_eq!(eng.airlines().active_count(), 4);

    // Votes mirror the scheme's canonical sequence: yes, no, yes.
    let info = eng.approve_airline(&principal(1), &principal(5), true).unwrap();
    assert_eq!((info.required, info.affirmative), (2, 1));
    assert!(!info.approved);

    let info = eng.approve_airline(&principal(2), &principal(5), false).unwrap();
    assert_eq!(info.affirmative, 1);
    assert!(!info.approved);

    let info = eng.approve_airline(&principal(3), &principal(5), true).unwrap();
    assert_eq!(info.affirmative, 2);
    assert!(info.approved, "2 of 4 active airlines reach the threshold");
    assert!(eng.airline_status(&principal(5)).approved);
}

#[test]
fn test_approval_survives_later_negative_votes() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();
    for b in 2..=4 {
        eng.register_airline(&principal(1), principal(b)).unwrap();
        eng.fund_airline(&principal(b), deposit()).unwrap();
    }
    eng.register_airline(&principal(1), principal(5)).unwrap();
    eng.approve_airline(&principal(1), &principal(5), true).unwrap();
    eng.approve_airline(&principal(2), &principal(5), true).unwrap();
    assert!(eng.airline_status(&principal(5)).approved);

    let info = eng.approve_airline(&principal(3), &principal(5), false).unwrap();
    assert!(info.approved, "approval is monotonic");
}

#[test]
fn test_voting_twice_is_rejected() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();
    for b in 2..=4 {
        eng.register_airline(&principal(1), principal(b)).unwrap();
        eng.fund_airline(&principal(b), deposit()).unwrap();
    }
    eng.register_airline(&principal(1), principal(5)).unwrap();
    eng.approve_airline(&principal(1), &principal(5), true).unwrap();
    let result = eng.approve_airline(&principal(1), &principal(5), true);
    assert!(matches!(result, Err(EngineError::DuplicateVote { .. })));
}

#[test]
fn test_threshold_tracks_growing_active_set() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();
    for b in 2..=4 {
        eng.register_airline(&principal(1), principal(b)).unwrap();
        eng.fund_airline(&principal(b), deposit()).unwrap();
    }
    eng.register_airline(&principal(1), principal(5)).unwrap();
    assert_eq!(eng.votes_info(&principal(5)).unwrap().required, 2);

    // The candidate funds itself before the vote completes; with five
    // funded airlines the threshold moves to three.
    eng.fund_airline(&principal(5), deposit()).unwrap();
    assert_eq!(eng.votes_info(&principal(5)).unwrap().required, 3);

    eng.approve_airline(&principal(1), &principal(5), true).unwrap();
    let info = eng.approve_airline(&principal(2), &principal(5), true).unwrap();
    assert!(!info.approved, "2 of 5 is below the recomputed threshold");
    let info = eng.approve_airline(&principal(3), &principal(5), true).unwrap();
    assert!(info.approved);
}

#[test]
fn test_approved_always_implies_registered() {
    let mut eng = engine();
    eng.fund_airline(&principal(1), deposit()).unwrap();
    for b in 2..=4 {
        eng.register_airline(&principal(1), principal(b)).unwrap();
    }
    for airline in eng.airlines().iter_in_order() {
        if airline.approved {
            assert!(eng.airline_status(&airline.principal).registered);
        }
    }
}
