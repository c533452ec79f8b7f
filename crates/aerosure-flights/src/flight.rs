//! # Flight Records
//!
//! A flight record is created once by a funded airline and carries the
//! oracle-reported status thereafter. The record's identity is the derived
//! [`FlightKey`]; registering the same `(airline, code, departure)` twice
//! is rejected.
//!
//! Status recording reports back whether the new status is the
//! airline-fault delay, so the engine can trigger insurance settlement.
//! The settlement itself is idempotent at the pool layer; re-reporting a
//! status here only refreshes the update timestamp.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aerosure_core::{EngineError, FlightKey, FlightStatus, Principal, Timestamp};
use aerosure_registry::AirlineRegistry;

// ─── Flight Record ───────────────────────────────────────────────────

/// A registered flight and its oracle-reported status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    /// The derived composite key.
    pub key: FlightKey,
    /// The operating airline.
    pub airline: Principal,
    /// The flight code, e.g. `ND1309`.
    pub code: String,
    /// Scheduled departure, unix seconds. Part of the flight's identity.
    pub departure: u64,
    /// Latest oracle-reported status.
    pub status: FlightStatus,
    /// When the record was created.
    pub registered_at: Timestamp,
    /// When the status was last updated by an oracle report.
    pub status_updated_at: Option<Timestamp>,
}

/// Result of recording an oracle status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRecorded {
    /// The flight the report applied to.
    pub key: FlightKey,
    /// The recorded status.
    pub status: FlightStatus,
    /// Whether the status is the airline-fault delay that triggers
    /// insurance settlement.
    pub qualifies_for_settlement: bool,
}

// ─── Registry ────────────────────────────────────────────────────────

/// The flight table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightRegistry {
    flights: BTreeMap<FlightKey, Flight>,
}

impl FlightRegistry {
    /// Create an empty flight registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flight for a funded airline.
    pub fn register(
        &mut self,
        airlines: &AirlineRegistry,
        caller: &Principal,
        code: &str,
        departure: u64,
    ) -> Result<FlightKey, EngineError> {
        if !airlines.is_funded(caller) {
            return Err(EngineError::Unauthorized {
                caller: caller.to_string(),
                operation: "register flights",
            });
        }
        let key = FlightKey::derive(caller, code, departure);
        if self.flights.contains_key(&key) {
            return Err(EngineError::AlreadyRegistered {
                subject: key.to_string(),
            });
        }
        self.flights.insert(
            key,
            Flight {
                key,
                airline: *caller,
                code: code.to_string(),
                departure,
                status: FlightStatus::Unknown,
                registered_at: Timestamp::now(),
                status_updated_at: None,
            },
        );
        tracing::info!(flight = %key, airline = %caller, code, "flight registered");
        Ok(key)
    }

    /// Record an oracle status report for `(airline, code, departure)`.
    ///
    /// Idempotent with respect to settlement: the returned flag tells the
    /// engine a settlement pass is due, and the pool skips policies that
    /// are already settled.
    pub fn record_status(
        &mut self,
        airline: &Principal,
        code: &str,
        departure: u64,
        status: FlightStatus,
    ) -> Result<StatusRecorded, EngineError> {
        let key = FlightKey::derive(airline, code, departure);
        let flight = self
            .flights
            .get_mut(&key)
            .ok_or_else(|| EngineError::UnknownFlight {
                key: key.to_hex(),
            })?;
        flight.status = status;
        flight.status_updated_at = Some(Timestamp::now());
        tracing::info!(flight = %key, status = %status, "flight status recorded");
        Ok(StatusRecorded {
            key,
            status,
            qualifies_for_settlement: status.is_airline_fault(),
        })
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Whether a record exists for `key`.
    pub fn is_registered(&self, key: &FlightKey) -> bool {
        self.flights.contains_key(key)
    }

    /// The flight record for `key`, if registered.
    pub fn flight(&self, key: &FlightKey) -> Option<&Flight> {
        self.flights.get(key)
    }

    /// The status of `(airline, code, departure)`.
    pub fn status_of(
        &self,
        airline: &Principal,
        code: &str,
        departure: u64,
    ) -> Result<FlightStatus, EngineError> {
        let key = FlightKey::derive(airline, code, departure);
        self.flights
            .get(&key)
            .map(|f| f.status)
            .ok_or_else(|| EngineError::UnknownFlight { key: key.to_hex() })
    }

    /// Number of registered flights.
    pub fn count(&self) -> usize {
        self.flights.len()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
