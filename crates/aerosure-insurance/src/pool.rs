//! # Insurance Pool
//!
//! The policy table and the passenger balance ledger, with the three
//! financial state transitions of the scheme: purchase, settlement, and
//! payout, plus the reentrancy-ordered withdrawal.
//!
//! ## Ordering Contract
//!
//! `withdraw` debits the ledger BEFORE the external value transfer is
//! attempted. A reentrant call arriving through the transfer therefore
//! observes the already-debited balance and cannot double-withdraw. If the
//! transfer fails, the debit is compensated and the error reports that the
//! rollback completed — the operation as a whole is all-or-nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aerosure_core::{Amount, EngineConfig, EngineError, FlightKey, Principal, Timestamp};
use aerosure_flights::Flight;

use crate::policy::{InsuranceInfo, Policy};
use crate::transfer::ValueTransfer;

/// The policy table and passenger balance ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsurancePool {
    /// Policies per flight, keyed by passenger within each flight.
    policies: BTreeMap<FlightKey, BTreeMap<Principal, Policy>>,
    /// Withdrawable passenger balances. Absent means zero.
    balances: BTreeMap<Principal, Amount>,
}

impl InsurancePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Purchase or top up insurance on a registered flight.
    ///
    /// The cumulative premium per policy may not exceed the configured
    /// cap; reaching it exactly is allowed.
    pub fn purchase(
        &mut self,
        config: &EngineConfig,
        flight: &Flight,
        passenger: &Principal,
        amount: Amount,
    ) -> Result<InsuranceInfo, EngineError> {
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(
                "premium must be positive".to_string(),
            ));
        }
        let per_flight = self.policies.entry(flight.key).or_default();
        match per_flight.get_mut(passenger) {
            Some(policy) => {
                let total = policy.premium_paid.checked_add(amount).ok_or_else(|| {
                    EngineError::InvalidAmount("premium overflow".to_string())
                })?;
                if total > config.premium_cap {
                    return Err(EngineError::AmountExceedsCap {
                        cap: config.premium_cap,
                        attempted: total,
                    });
                }
                policy.premium_paid = total;
                tracing::info!(flight = %flight.key, passenger = %passenger, premium = %total, "policy topped up");
                Ok(InsuranceInfo::from(&*policy))
            }
            None => {
                if amount > config.premium_cap {
                    return Err(EngineError::AmountExceedsCap {
                        cap: config.premium_cap,
                        attempted: amount,
                    });
                }
                let policy = Policy::open(flight.airline, amount);
                tracing::info!(flight = %flight.key, passenger = %passenger, premium = %amount, "policy opened");
                let info = InsuranceInfo::from(&policy);
                per_flight.insert(*passenger, policy);
                Ok(info)
            }
        }
    }

    /// Settle every open policy on a flight after a qualifying delay.
    ///
    /// Sets `payout_owed = premium * ratio` and latches `settled` on each
    /// policy not yet settled. Returns how many policies were newly
    /// settled; re-invocation settles nothing, which is what makes
    /// repeated oracle reports harmless.
    pub fn settle_flight(
        &mut self,
        config: &EngineConfig,
        key: &FlightKey,
    ) -> Result<u32, EngineError> {
        let Some(per_flight) = self.policies.get_mut(key) else {
            return Ok(0);
        };
        let mut newly_settled = 0u32;
        for policy in per_flight.values_mut() {
            if policy.settled {
                continue;
            }
            policy.payout_owed = config.payout_of(policy.premium_paid)?;
            policy.settled = true;
            policy.settled_at = Some(Timestamp::now());
            newly_settled += 1;
        }
        if newly_settled > 0 {
            tracing::info!(flight = %key, newly_settled, "flight settled");
        }
        Ok(newly_settled)
    }

    /// Credit every settled, unrefunded policy of `passenger` to their
    /// withdrawable balance and latch `refunded`.
    ///
    /// Returns the total credited. Fails with
    /// [`EngineError::NothingToPayout`] when no eligible policy exists —
    /// including on repeat calls, so a second invocation can never credit
    /// twice.
    pub fn payout(&mut self, passenger: &Principal) -> Result<Amount, EngineError> {
        let mut credited = Amount::ZERO;
        for per_flight in self.policies.values_mut() {
            let Some(policy) = per_flight.get_mut(passenger) else {
                continue;
            };
            if !policy.payout_pending() {
                continue;
            }
            credited = credited.checked_add(policy.payout_owed).ok_or_else(|| {
                EngineError::InvalidAmount("payout overflow".to_string())
            })?;
            policy.refunded = true;
        }
        if credited.is_zero() {
            return Err(EngineError::NothingToPayout {
                passenger: passenger.to_string(),
            });
        }
        let balance = self.balance_of(passenger);
        let new_balance = balance.checked_add(credited).ok_or_else(|| {
            EngineError::InvalidAmount("balance overflow".to_string())
        })?;
        self.balances.insert(*passenger, new_balance);
        tracing::info!(passenger = %passenger, credited = %credited, balance = %new_balance, "payout credited");
        Ok(credited)
    }

    /// Withdraw from a passenger's balance through the external transfer
    /// collaborator.
    ///
    /// Debits the ledger first, then attempts the transfer; on transfer
    /// failure the debit is compensated and the returned error carries the
    /// rollback outcome.
    pub fn withdraw(
        &mut self,
        passenger: &Principal,
        amount: Amount,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<(), EngineError> {
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(
                "withdrawal must be positive".to_string(),
            ));
        }
        let balance = self.balance_of(passenger);
        let Some(remaining) = balance.checked_sub(amount) else {
            return Err(EngineError::InsufficientBalance {
                available: balance,
                requested: amount,
            });
        };
        // Debit before the transfer: the one reentrancy surface sees the
        // updated ledger.
        self.balances.insert(*passenger, remaining);
        match transfer.transfer(passenger, amount) {
            Ok(()) => {
                tracing::info!(passenger = %passenger, amount = %amount, remaining = %remaining, "withdrawal transferred");
                Ok(())
            }
            Err(err) => {
                self.balances.insert(*passenger, balance);
                tracing::warn!(passenger = %passenger, amount = %amount, error = %err, "transfer failed, debit rolled back");
                Err(EngineError::TransferFailed {
                    rolled_back: true,
                    reason: err.to_string(),
                })
            }
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The policy of `passenger` on `key`, if any.
    pub fn policy(&self, key: &FlightKey, passenger: &Principal) -> Option<&Policy> {
        self.policies.get(key)?.get(passenger)
    }

    /// Read view of the policy of `passenger` on `key`.
    pub fn insurance_info(&self, key: &FlightKey, passenger: &Principal) -> Option<InsuranceInfo> {
        self.policy(key, passenger).map(InsuranceInfo::from)
    }

    /// The passenger's withdrawable balance (zero if never credited).
    pub fn balance_of(&self, passenger: &Principal) -> Amount {
        self.balances.get(passenger).copied().unwrap_or(Amount::ZERO)
    }

    /// Number of policies on a flight.
    pub fn policy_count(&self, key: &FlightKey) -> usize {
        self.policies.get(key).map_or(0, |m| m.len())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
