//! Escrow end-to-end: the full fund → flight → purchase → delay report →
//! payout → withdrawal flow, plus the pause gate, oracle authorization,
//! and state persistence across a JSON round-trip.

use aerosure_core::{Amount, EngineConfig, EngineError, FlightStatus, Principal};
use aerosure_engine::Engine;
use aerosure_insurance::{FailingTransfer, RecordingTransfer};

fn principal(byte: u8) -> Principal {
    Principal::from_bytes([byte; 20])
}

const OWNER: u8 = 0xA0;
const ORACLE: u8 = 0xB0;
const AIRLINE: u8 = 1;
const PASSENGER: u8 = 0x10;
const DEPARTURE: u64 = 1_700_000_000;

/// Engine with the first airline funded, the oracle authorized, and
/// flight ND1309 registered.
fn prepared_engine() -> Engine {
    let mut eng =
        Engine::new(EngineConfig::default(), principal(OWNER), principal(AIRLINE)).unwrap();
    eng.fund_airline(&principal(AIRLINE), Amount::from_units(10))
        .unwrap();
    eng.authorize_caller(&principal(OWNER), principal(ORACLE))
        .unwrap();
    eng.register_flight(&principal(AIRLINE), "ND1309", DEPARTURE)
        .unwrap();
    eng
}

fn report(eng: &mut Engine, status: FlightStatus) -> u32 {
    eng.process_flight_status(
        &principal(ORACLE),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        status,
    )
    .unwrap()
    .newly_settled
}

#[test]
fn test_full_escrow_lifecycle() {
    let mut eng = prepared_engine();

    // Passenger pays 1.0 on ND1309.
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();

    // Oracle reports an airline-fault delay; the policy settles at 1.5.
    assert_eq!(report(&mut eng, FlightStatus::LateAirline), 1);
    let info = eng
        .insurance_info(&principal(PASSENGER), &principal(AIRLINE), "ND1309", DEPARTURE)
        .unwrap();
    assert_eq!(info.payout_owed, Amount::parse_units("1.5").unwrap());
    assert!(info.settled);
    assert!(!info.refunded);

    // Payout credits the balance to 1.5.
    let credited = eng.insurance_payout(&principal(PASSENGER)).unwrap();
    assert_eq!(credited, Amount::parse_units("1.5").unwrap());
    assert_eq!(
        eng.passenger_balance(&principal(PASSENGER)),
        Amount::parse_units("1.5").unwrap()
    );

    // Withdrawal of 1.0 leaves 0.5 and moves value through the transfer.
    let mut sink = RecordingTransfer::new();
    eng.withdraw_balance(&principal(PASSENGER), Amount::from_units(1), &mut sink)
        .unwrap();
    assert_eq!(
        eng.passenger_balance(&principal(PASSENGER)),
        Amount::parse_units("0.5").unwrap()
    );
    assert_eq!(
        sink.total_to(&principal(PASSENGER)),
        Amount::from_units(1)
    );
}

#[test]
fn test_payout_credits_exactly_once() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
    report(&mut eng, FlightStatus::LateAirline);

    eng.insurance_payout(&principal(PASSENGER)).unwrap();
    let balance = eng.passenger_balance(&principal(PASSENGER));

    let result = eng.insurance_payout(&principal(PASSENGER));
    assert!(matches!(result, Err(EngineError::NothingToPayout { .. })));
    assert_eq!(eng.passenger_balance(&principal(PASSENGER)), balance);
}

#[test]
fn test_repeated_delay_report_never_double_credits() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();

    assert_eq!(report(&mut eng, FlightStatus::LateAirline), 1);
    eng.insurance_payout(&principal(PASSENGER)).unwrap();

    // The oracle re-reports the same status. The refunded policy must
    // not settle or credit again.
    assert_eq!(report(&mut eng, FlightStatus::LateAirline), 0);
    let result = eng.insurance_payout(&principal(PASSENGER));
    assert!(matches!(result, Err(EngineError::NothingToPayout { .. })));
    assert_eq!(
        eng.passenger_balance(&principal(PASSENGER)),
        Amount::parse_units("1.5").unwrap()
    );
}

#[test]
fn test_premium_cap_enforced_end_to_end() {
    let mut eng = prepared_engine();
    let over = Amount::parse_units("1.1").unwrap();
    let result = eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        over,
    );
    assert!(matches!(result, Err(EngineError::AmountExceedsCap { .. })));

    // Exactly the cap is accepted.
    let info = eng
        .purchase_insurance(
            &principal(PASSENGER),
            &principal(AIRLINE),
            "ND1309",
            DEPARTURE,
            Amount::from_units(1),
        )
        .unwrap();
    assert_eq!(info.premium_paid, Amount::from_units(1));
}

#[test]
fn test_weather_delay_pays_nothing() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
    assert_eq!(report(&mut eng, FlightStatus::LateWeather), 0);
    let result = eng.insurance_payout(&principal(PASSENGER));
    assert!(matches!(result, Err(EngineError::NothingToPayout { .. })));
}

#[test]
fn test_overdraw_rejected_and_balance_untouched() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
    report(&mut eng, FlightStatus::LateAirline);
    eng.insurance_payout(&principal(PASSENGER)).unwrap();

    let mut sink = RecordingTransfer::new();
    let result = eng.withdraw_balance(&principal(PASSENGER), Amount::from_units(2), &mut sink);
    assert!(matches!(
        result,
        Err(EngineError::InsufficientBalance { .. })
    ));
    assert_eq!(
        eng.passenger_balance(&principal(PASSENGER)),
        Amount::parse_units("1.5").unwrap()
    );
    assert!(sink.completed.is_empty());
}

#[test]
fn test_failed_transfer_rolls_back_the_debit() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
    report(&mut eng, FlightStatus::LateAirline);
    eng.insurance_payout(&principal(PASSENGER)).unwrap();
    let before = eng.passenger_balance(&principal(PASSENGER));

    let mut failing = FailingTransfer::new("settlement rail offline");
    let err = eng
        .withdraw_balance(&principal(PASSENGER), Amount::from_units(1), &mut failing)
        .unwrap_err();
    match err {
        EngineError::TransferFailed {
            rolled_back,
            reason,
        } => {
            assert!(rolled_back);
            assert_eq!(reason, "settlement rail offline");
        }
        other => panic!("expected TransferFailed, got {other:?}"),
    }
    assert_eq!(eng.passenger_balance(&principal(PASSENGER)), before);
}

#[test]
fn test_pause_blocks_the_whole_surface() {
    let mut eng = prepared_engine();
    eng.set_operating_status(&principal(OWNER), false).unwrap();

    assert!(matches!(
        eng.purchase_insurance(
            &principal(PASSENGER),
            &principal(AIRLINE),
            "ND1309",
            DEPARTURE,
            Amount::from_units(1),
        ),
        Err(EngineError::NotOperational)
    ));
    assert!(matches!(
        eng.process_flight_status(
            &principal(ORACLE),
            &principal(AIRLINE),
            "ND1309",
            DEPARTURE,
            FlightStatus::LateAirline,
        ),
        Err(EngineError::NotOperational)
    ));

    eng.set_operating_status(&principal(OWNER), true).unwrap();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
}

#[test]
fn test_unauthorized_oracle_cannot_settle() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();

    let result = eng.process_flight_status(
        &principal(0xCC),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        FlightStatus::LateAirline,
    );
    assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
    let info = eng
        .insurance_info(&principal(PASSENGER), &principal(AIRLINE), "ND1309", DEPARTURE)
        .unwrap();
    assert!(!info.settled);
}

#[test]
fn test_state_survives_json_roundtrip_mid_flow() {
    let mut eng = prepared_engine();
    eng.purchase_insurance(
        &principal(PASSENGER),
        &principal(AIRLINE),
        "ND1309",
        DEPARTURE,
        Amount::from_units(1),
    )
    .unwrap();
    report(&mut eng, FlightStatus::LateAirline);

    // Persist after settlement, resume in a fresh engine, finish the flow.
    let json = serde_json::to_string(&eng).unwrap();
    let mut resumed: Engine = serde_json::from_str(&json).unwrap();

    let credited = resumed.insurance_payout(&principal(PASSENGER)).unwrap();
    assert_eq!(credited, Amount::parse_units("1.5").unwrap());
    let mut sink = RecordingTransfer::new();
    resumed
        .withdraw_balance(&principal(PASSENGER), Amount::from_units(1), &mut sink)
        .unwrap();
    assert_eq!(
        resumed.passenger_balance(&principal(PASSENGER)),
        Amount::parse_units("0.5").unwrap()
    );
}
