//! # Insurance Policies
//!
//! A policy is the escrow record for one passenger on one flight. It moves
//! through three one-way latches:
//!
//! ```text
//! purchased ──settle()──▶ settled ──payout()──▶ refunded
//! ```
//!
//! `settled` latches when the payout is computed (qualifying delay
//! reported); `refunded` latches when the owed amount moves to the
//! passenger's balance. Both are checked before mutation, which is what
//! makes repeated oracle reports and repeated payout calls safe.

use serde::{Deserialize, Serialize};

use aerosure_core::{Amount, PolicyId, Principal, Timestamp};

/// One passenger's insurance position on one flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier (audit handle; identity is the
    /// `(flight, passenger)` pair).
    pub id: PolicyId,
    /// The airline operating the insured flight.
    pub airline: Principal,
    /// Cumulative premium paid, never above the configured cap.
    pub premium_paid: Amount,
    /// Payout owed after settlement; zero until then.
    pub payout_owed: Amount,
    /// Whether the payout has been computed (one-way latch).
    pub settled: bool,
    /// Whether the payout has been credited to the passenger's balance
    /// (one-way latch).
    pub refunded: bool,
    /// When the policy was first purchased.
    pub purchased_at: Timestamp,
    /// When the policy was settled, if it has been.
    pub settled_at: Option<Timestamp>,
}

impl Policy {
    /// Open a new policy with an initial premium.
    pub fn open(airline: Principal, premium: Amount) -> Self {
        Self {
            id: PolicyId::new(),
            airline,
            premium_paid: premium,
            payout_owed: Amount::ZERO,
            settled: false,
            refunded: false,
            purchased_at: Timestamp::now(),
            settled_at: None,
        }
    }

    /// Whether the owed payout is waiting to be credited.
    pub fn payout_pending(&self) -> bool {
        self.settled && !self.refunded
    }
}

/// Read view of a policy, the shape external callers consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceInfo {
    /// The airline operating the insured flight.
    pub airline: Principal,
    /// Cumulative premium paid.
    pub premium_paid: Amount,
    /// Payout owed (zero before settlement).
    pub payout_owed: Amount,
    /// Whether the payout has been computed.
    pub settled: bool,
    /// Whether the payout has been credited.
    pub refunded: bool,
}

impl From<&Policy> for InsuranceInfo {
    fn from(p: &Policy) -> Self {
        Self {
            airline: p.airline,
            premium_paid: p.premium_paid,
            payout_owed: p.payout_owed,
            settled: p.settled,
            refunded: p.refunded,
        }
    }
}
