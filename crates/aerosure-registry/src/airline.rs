//! # Airline Lifecycle and Voting Consensus
//!
//! Per-airline progression:
//!
//! ```text
//! Unregistered ──register()──▶ Registered ──fund()──▶ Funded
//!                   │                                    │
//!         (bootstrap admissions                 votes ≥ ⌈active/2⌉
//!          are approved on entry)                        │
//!                   └────────────▶ Approved ◀────────────┘
//! ```
//!
//! `registered`, `funded`, and `approved` move independently: a
//! bootstrap-admitted airline is approved before it funds, while a
//! consensus-admitted airline may fund before its vote completes. An
//! airline is **active** once it is both funded and approved; only active
//! airlines sponsor new members after bootstrap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aerosure_core::{Amount, EngineConfig, EngineError, Principal, Timestamp};

// ─── Airline Record ──────────────────────────────────────────────────

/// A member airline with its lifecycle flags and vote ledger.
///
/// Existence of the record is what `registered` means; records are never
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airline {
    /// The airline's account principal.
    pub principal: Principal,
    /// Whether the funding deposit has been received.
    pub funded: bool,
    /// Whether the airline has been approved (bootstrap or consensus).
    pub approved: bool,
    /// When the registration was recorded.
    pub registered_at: Timestamp,
    /// When the deposit was received, if funded.
    pub funded_at: Option<Timestamp>,
    /// Recorded votes, keyed by voter. `true` is affirmative. Both kinds
    /// consume the voter's single vote; only affirmative votes count
    /// toward the threshold.
    pub votes: BTreeMap<Principal, bool>,
}

impl Airline {
    fn new(principal: Principal, approved: bool) -> Self {
        Self {
            principal,
            funded: false,
            approved,
            registered_at: Timestamp::now(),
            funded_at: None,
            votes: BTreeMap::new(),
        }
    }

    /// Whether the airline may exercise privileged operations.
    pub fn is_active(&self) -> bool {
        self.funded && self.approved
    }

    /// Count of affirmative votes received.
    pub fn affirmative_votes(&self) -> u32 {
        self.votes.values().filter(|v| **v).count() as u32
    }
}

// ─── Read Views ──────────────────────────────────────────────────────

/// Snapshot of an airline's lifecycle flags. All-false for principals
/// with no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineStatus {
    /// A registry record exists.
    pub registered: bool,
    /// Bootstrap-admitted or vote threshold met.
    pub approved: bool,
    /// Funded and approved.
    pub active: bool,
}

impl AirlineStatus {
    const UNREGISTERED: AirlineStatus = AirlineStatus {
        registered: false,
        approved: false,
        active: false,
    };
}

/// Tally of a candidate's consensus vote against the live threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotesInfo {
    /// Affirmative votes required: ⌈active airline count / 2⌉.
    pub required: u32,
    /// Affirmative votes received so far.
    pub affirmative: u32,
    /// Whether the candidate is approved.
    pub approved: bool,
}

/// Result of a registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// The newly registered airline.
    pub airline: Principal,
    /// Whether the admission was approved on entry (bootstrap rule).
    pub auto_approved: bool,
}

// ─── Registry ────────────────────────────────────────────────────────

/// The airline table and its governance rules.
///
/// Registration order is tracked because the bootstrap rule privileges
/// the first registered airline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirlineRegistry {
    airlines: BTreeMap<Principal, Airline>,
    order: Vec<Principal>,
}

impl AirlineRegistry {
    /// Create a registry seeded with the first airline, registered and
    /// approved (it must still fund before exercising privileges).
    pub fn bootstrap(first: Principal) -> Self {
        let mut airlines = BTreeMap::new();
        airlines.insert(first, Airline::new(first, true));
        Self {
            airlines,
            order: vec![first],
        }
    }

    /// Register a new airline.
    ///
    /// While fewer than `config.bootstrap_threshold` airlines are
    /// registered, only the funded first airline may register, and the
    /// admission is approved on entry. Afterwards any active airline may
    /// sponsor, and the admission awaits consensus votes.
    pub fn register(
        &mut self,
        config: &EngineConfig,
        caller: &Principal,
        new: Principal,
    ) -> Result<RegistrationOutcome, EngineError> {
        if self.airlines.contains_key(&new) {
            return Err(EngineError::AlreadyRegistered {
                subject: format!("airline {new}"),
            });
        }
        let sponsor = self
            .airlines
            .get(caller)
            .ok_or_else(|| unauthorized(caller, "register airlines"))?;

        let bootstrap = (self.airlines.len() as u32) < config.bootstrap_threshold;
        if bootstrap {
            let is_first = self.order.first() == Some(caller);
            if !is_first || !sponsor.funded {
                return Err(unauthorized(caller, "register airlines during bootstrap"));
            }
        } else if !sponsor.is_active() {
            return Err(unauthorized(caller, "sponsor airline registrations"));
        }

        self.airlines.insert(new, Airline::new(new, bootstrap));
        self.order.push(new);
        tracing::info!(
            airline = %new,
            sponsor = %caller,
            auto_approved = bootstrap,
            "airline registered"
        );
        Ok(RegistrationOutcome {
            airline: new,
            auto_approved: bootstrap,
        })
    }

    /// Accept an airline's funding deposit.
    ///
    /// The deposit must match the configured amount exactly and is
    /// accepted at most once.
    pub fn fund(
        &mut self,
        config: &EngineConfig,
        caller: &Principal,
        amount: Amount,
    ) -> Result<(), EngineError> {
        let airline = self
            .airlines
            .get_mut(caller)
            .ok_or_else(|| unauthorized(caller, "fund"))?;
        if airline.funded {
            return Err(EngineError::AlreadyRegistered {
                subject: format!("deposit for airline {caller}"),
            });
        }
        if amount != config.funding_deposit {
            return Err(EngineError::InvalidAmount(format!(
                "funding deposit must be exactly {}, got {amount}",
                config.funding_deposit
            )));
        }
        airline.funded = true;
        airline.funded_at = Some(Timestamp::now());
        tracing::info!(airline = %caller, deposit = %amount, "airline funded");
        Ok(())
    }

    /// Record a consensus vote for `target` by `caller`.
    ///
    /// The caller must be funded and may vote once per candidate. After
    /// the vote is recorded, the candidate is approved if affirmative
    /// votes reach the live threshold. Approval is monotonic: later votes
    /// are still recorded but cannot revoke it.
    pub fn approve(
        &mut self,
        caller: &Principal,
        target: &Principal,
        vote: bool,
    ) -> Result<VotesInfo, EngineError> {
        let voter = self
            .airlines
            .get(caller)
            .ok_or_else(|| unauthorized(caller, "vote on airline approvals"))?;
        if !voter.funded {
            return Err(unauthorized(caller, "vote on airline approvals"));
        }
        if !self.airlines.contains_key(target) {
            return Err(EngineError::UnknownAirline {
                principal: target.to_string(),
            });
        }
        // Threshold over the live table, computed before the mutable borrow.
        let required = self.required_votes();

        let candidate = self
            .airlines
            .get_mut(target)
            .ok_or_else(|| EngineError::UnknownAirline {
                principal: target.to_string(),
            })?;
        if candidate.votes.contains_key(caller) {
            return Err(EngineError::DuplicateVote {
                voter: caller.to_string(),
                target: target.to_string(),
            });
        }
        candidate.votes.insert(*caller, vote);

        let affirmative = candidate.affirmative_votes();
        if vote && !candidate.approved && affirmative >= required {
            candidate.approved = true;
            tracing::info!(airline = %target, affirmative, required, "airline approved by consensus");
        } else {
            tracing::debug!(airline = %target, affirmative, required, "vote recorded");
        }
        Ok(VotesInfo {
            required,
            affirmative,
            approved: candidate.approved,
        })
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Whether a registry record exists for `principal`.
    pub fn is_registered(&self, principal: &Principal) -> bool {
        self.airlines.contains_key(principal)
    }

    /// Whether `principal` is approved.
    pub fn is_approved(&self, principal: &Principal) -> bool {
        self.airlines.get(principal).is_some_and(|a| a.approved)
    }

    /// Whether `principal` is funded.
    pub fn is_funded(&self, principal: &Principal) -> bool {
        self.airlines.get(principal).is_some_and(|a| a.funded)
    }

    /// Lifecycle snapshot for `principal` (all-false if unregistered).
    pub fn status(&self, principal: &Principal) -> AirlineStatus {
        match self.airlines.get(principal) {
            Some(a) => AirlineStatus {
                registered: true,
                approved: a.approved,
                active: a.is_active(),
            },
            None => AirlineStatus::UNREGISTERED,
        }
    }

    /// Vote tally for `target` against the live threshold.
    pub fn votes_info(&self, target: &Principal) -> Result<VotesInfo, EngineError> {
        let candidate = self
            .airlines
            .get(target)
            .ok_or_else(|| EngineError::UnknownAirline {
                principal: target.to_string(),
            })?;
        Ok(VotesInfo {
            required: self.required_votes(),
            affirmative: candidate.affirmative_votes(),
            approved: candidate.approved,
        })
    }

    /// The airline record for `principal`, if registered.
    pub fn airline(&self, principal: &Principal) -> Option<&Airline> {
        self.airlines.get(principal)
    }

    /// Number of registered airlines.
    pub fn registered_count(&self) -> u32 {
        self.airlines.len() as u32
    }

    /// Number of funded airlines. This is the "active" count the voting
    /// threshold is computed over.
    pub fn active_count(&self) -> u32 {
        self.airlines.values().filter(|a| a.funded).count() as u32
    }

    /// The first registered airline (the bootstrap sponsor).
    pub fn first_airline(&self) -> Option<&Principal> {
        self.order.first()
    }

    /// Registered airlines in registration order.
    pub fn iter_in_order(&self) -> impl Iterator<Item = &Airline> {
        self.order.iter().filter_map(|p| self.airlines.get(p))
    }

    /// Affirmative votes required right now: ⌈funded count / 2⌉.
    fn required_votes(&self) -> u32 {
        self.active_count().div_ceil(2)
    }
}

fn unauthorized(caller: &Principal, operation: &'static str) -> EngineError {
    EngineError::Unauthorized {
        caller: caller.to_string(),
        operation,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
