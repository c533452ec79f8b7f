//! # Engine Operation Surface
//!
//! [`Engine`] owns the four tables and exposes the full operation surface.
//! Entry point discipline, in order:
//!
//! 1. operational gate (`NotOperational` when paused),
//! 2. caller authorization (owner, authorized caller, or airline
//!    privilege as the operation demands),
//! 3. component preconditions.
//!
//! All guards precede the first write, so every operation either fully
//! commits or leaves the state untouched. The whole engine serializes as
//! one JSON document; the CLI persists it between invocations.

use serde::{Deserialize, Serialize};

use aerosure_core::{
    Amount, EngineConfig, EngineError, FlightKey, FlightStatus, Principal,
};
use aerosure_flights::FlightRegistry;
use aerosure_insurance::{InsuranceInfo, InsurancePool, ValueTransfer};
use aerosure_registry::{
    AirlineRegistry, AirlineStatus, RegistrationOutcome, VotesInfo,
};

/// Result of processing an oracle status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    /// The flight the report applied to.
    pub key: FlightKey,
    /// The recorded status.
    pub status: FlightStatus,
    /// Policies newly settled by this report (zero unless the status is
    /// the airline-fault delay, and zero again on repeated reports).
    pub newly_settled: u32,
}

/// The AeroSure governance and escrow engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    config: EngineConfig,
    switch: crate::OperationalSwitch,
    gateway: crate::AccessGateway,
    airlines: AirlineRegistry,
    flights: FlightRegistry,
    pool: InsurancePool,
}

impl Engine {
    /// Create an engine with the given owner and seeded first airline.
    ///
    /// Mirrors deployment: the first airline starts registered and
    /// approved, and must fund before exercising privileges.
    pub fn new(
        config: EngineConfig,
        owner: Principal,
        first_airline: Principal,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            switch: crate::OperationalSwitch::new(),
            gateway: crate::AccessGateway::new(owner),
            airlines: AirlineRegistry::bootstrap(first_airline),
            flights: FlightRegistry::new(),
            pool: InsurancePool::new(),
        })
    }

    // ── Operational switch ───────────────────────────────────────────

    /// Whether the engine is accepting mutations.
    pub fn is_operational(&self) -> bool {
        self.switch.is_operational()
    }

    /// Toggle the operational gate. Owner only; deliberately NOT behind
    /// the gate itself, so a paused engine can be resumed.
    pub fn set_operating_status(
        &mut self,
        caller: &Principal,
        operational: bool,
    ) -> Result<(), EngineError> {
        self.gateway.require_owner(caller, "set operating status")?;
        self.switch.set(operational);
        tracing::info!(operational, "operating status set");
        Ok(())
    }

    // ── Access gateway ───────────────────────────────────────────────

    /// Add `who` to the authorized-caller list. Owner only.
    pub fn authorize_caller(
        &mut self,
        caller: &Principal,
        who: Principal,
    ) -> Result<(), EngineError> {
        self.switch.require_operational()?;
        self.gateway.authorize(caller, who)
    }

    /// Remove `who` from the authorized-caller list. Owner only.
    pub fn deauthorize_caller(
        &mut self,
        caller: &Principal,
        who: &Principal,
    ) -> Result<(), EngineError> {
        self.switch.require_operational()?;
        self.gateway.deauthorize(caller, who)
    }

    // ── Airline governance ───────────────────────────────────────────

    /// Register a new airline (bootstrap or sponsored).
    pub fn register_airline(
        &mut self,
        caller: &Principal,
        new: Principal,
    ) -> Result<RegistrationOutcome, EngineError> {
        self.switch.require_operational()?;
        self.airlines.register(&self.config, caller, new)
    }

    /// Accept an airline's funding deposit.
    pub fn fund_airline(&mut self, caller: &Principal, amount: Amount) -> Result<(), EngineError> {
        self.switch.require_operational()?;
        self.airlines.fund(&self.config, caller, amount)
    }

    /// Record a consensus vote for `target`.
    pub fn approve_airline(
        &mut self,
        caller: &Principal,
        target: &Principal,
        vote: bool,
    ) -> Result<VotesInfo, EngineError> {
        self.switch.require_operational()?;
        self.airlines.approve(caller, target, vote)
    }

    // ── Flights ──────────────────────────────────────────────────────

    /// Register a flight for a funded airline.
    pub fn register_flight(
        &mut self,
        caller: &Principal,
        code: &str,
        departure: u64,
    ) -> Result<FlightKey, EngineError> {
        self.switch.require_operational()?;
        self.flights.register(&self.airlines, caller, code, departure)
    }

    /// Apply an oracle status report. Authorized callers only.
    ///
    /// When the status is the airline-fault delay, every open policy on
    /// the flight is settled in the same step; repeated reports settle
    /// nothing further.
    pub fn process_flight_status(
        &mut self,
        caller: &Principal,
        airline: &Principal,
        code: &str,
        departure: u64,
        status: FlightStatus,
    ) -> Result<StatusReport, EngineError> {
        self.switch.require_operational()?;
        self.gateway
            .require_authorized(caller, "process flight status")?;
        let recorded = self.flights.record_status(airline, code, departure, status)?;
        let newly_settled = if recorded.qualifies_for_settlement {
            self.pool.settle_flight(&self.config, &recorded.key)?
        } else {
            0
        };
        Ok(StatusReport {
            key: recorded.key,
            status: recorded.status,
            newly_settled,
        })
    }

    // ── Insurance ────────────────────────────────────────────────────

    /// Purchase or top up insurance on a registered flight.
    pub fn purchase_insurance(
        &mut self,
        passenger: &Principal,
        airline: &Principal,
        code: &str,
        departure: u64,
        amount: Amount,
    ) -> Result<InsuranceInfo, EngineError> {
        let key = FlightKey::derive(airline, code, departure);
        self.purchase_insurance_by_key(passenger, &key, amount)
    }

    /// Purchase or top up insurance by flight key.
    pub fn purchase_insurance_by_key(
        &mut self,
        passenger: &Principal,
        key: &FlightKey,
        amount: Amount,
    ) -> Result<InsuranceInfo, EngineError> {
        self.switch.require_operational()?;
        let flight = self
            .flights
            .flight(key)
            .ok_or_else(|| EngineError::UnknownFlight { key: key.to_hex() })?
            .clone();
        self.pool.purchase(&self.config, &flight, passenger, amount)
    }

    /// Credit the passenger's settled, unrefunded policies to their
    /// withdrawable balance. Returns the total credited.
    pub fn insurance_payout(&mut self, passenger: &Principal) -> Result<Amount, EngineError> {
        self.switch.require_operational()?;
        self.pool.payout(passenger)
    }

    /// Withdraw from the passenger's balance through the transfer
    /// collaborator. Ledger debit precedes the transfer; a failed
    /// transfer is compensated.
    pub fn withdraw_balance(
        &mut self,
        passenger: &Principal,
        amount: Amount,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), EngineError> {
        self.switch.require_operational()?;
        self.pool.withdraw(passenger, amount, transfer)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The owner principal.
    pub fn owner(&self) -> &Principal {
        self.gateway.owner()
    }

    /// The airline table (read-only).
    pub fn airlines(&self) -> &AirlineRegistry {
        &self.airlines
    }

    /// The flight table (read-only).
    pub fn flights(&self) -> &FlightRegistry {
        &self.flights
    }

    /// The policy/balance tables (read-only).
    pub fn pool(&self) -> &InsurancePool {
        &self.pool
    }

    /// Lifecycle snapshot of an airline.
    pub fn airline_status(&self, principal: &Principal) -> AirlineStatus {
        self.airlines.status(principal)
    }

    /// Vote tally of a candidate airline.
    pub fn votes_info(&self, target: &Principal) -> Result<VotesInfo, EngineError> {
        self.airlines.votes_info(target)
    }

    /// Whether a flight key is registered.
    pub fn is_flight_registered(&self, key: &FlightKey) -> bool {
        self.flights.is_registered(key)
    }

    /// The status of `(airline, code, departure)`.
    pub fn flight_status(
        &self,
        airline: &Principal,
        code: &str,
        departure: u64,
    ) -> Result<FlightStatus, EngineError> {
        self.flights.status_of(airline, code, departure)
    }

    /// Read view of the passenger's policy on `(airline, code, departure)`.
    pub fn insurance_info(
        &self,
        passenger: &Principal,
        airline: &Principal,
        code: &str,
        departure: u64,
    ) -> Option<InsuranceInfo> {
        let key = FlightKey::derive(airline, code, departure);
        self.pool.insurance_info(&key, passenger)
    }

    /// The passenger's withdrawable balance.
    pub fn passenger_balance(&self, passenger: &Principal) -> Amount {
        self.pool.balance_of(passenger)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
