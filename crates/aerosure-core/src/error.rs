//! # Error Taxonomy — Structured Rejections
//!
//! Defines [`EngineError`], the single error type for every operation on
//! the AeroSure engine. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every rejected precondition is a distinct, matchable kind; callers
//!   inspect the kind and decide whether to retry with corrected input.
//! - Errors are synchronous rejections of the single operation that raised
//!   them. No partial state mutation survives a failed operation.
//! - Rejections carry the offending values (caller, amounts, keys) so that
//!   audit logs identify exactly what was refused.

use thiserror::Error;

use crate::amount::Amount;

/// The canonical error taxonomy of the AeroSure engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operational switch is off; all mutations are refused.
    #[error("engine is not operational")]
    NotOperational,

    /// The caller lacks the privilege required for the operation.
    #[error("caller {caller} is not authorized to {operation}")]
    Unauthorized {
        /// The principal that attempted the operation, rendered as hex.
        caller: String,
        /// The operation that was refused.
        operation: &'static str,
    },

    /// An amount failed validation (wrong deposit, zero premium, malformed input).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A premium purchase would exceed the per-policy cap.
    #[error("premium {attempted} exceeds cap {cap}")]
    AmountExceedsCap {
        /// The configured per-policy premium cap.
        cap: Amount,
        /// The cumulative premium the purchase would have reached.
        attempted: Amount,
    },

    /// The subject of a registration already exists.
    #[error("already registered: {subject}")]
    AlreadyRegistered {
        /// What was registered twice (airline, deposit, or flight key).
        subject: String,
    },

    /// The voter has already cast a vote for this candidate.
    #[error("voter {voter} has already voted for {target}")]
    DuplicateVote {
        /// The voting airline, rendered as hex.
        voter: String,
        /// The candidate airline, rendered as hex.
        target: String,
    },

    /// A withdrawal requested more than the passenger's balance.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The passenger's withdrawable balance.
        available: Amount,
        /// The amount the withdrawal requested.
        requested: Amount,
    },

    /// The passenger holds no settled, unrefunded policy.
    #[error("nothing to pay out for passenger {passenger}")]
    NothingToPayout {
        /// The passenger, rendered as hex.
        passenger: String,
    },

    /// An operation named an airline with no registry record.
    #[error("unknown airline: {principal}")]
    UnknownAirline {
        /// The principal with no record, rendered as hex.
        principal: String,
    },

    /// An operation named a flight that was never registered.
    #[error("unknown flight: {key}")]
    UnknownFlight {
        /// The flight key, rendered as hex.
        key: String,
    },

    /// The external value-transfer step of a withdrawal failed.
    ///
    /// The ledger debit is applied before the transfer is attempted; on
    /// failure the debit is compensated. `rolled_back` reports whether the
    /// compensation completed, so callers can distinguish a clean rejection
    /// from a ledger inconsistency.
    #[error("value transfer failed (rolled back: {rolled_back}): {reason}")]
    TransferFailed {
        /// Whether the ledger debit was restored.
        rolled_back: bool,
        /// The transfer collaborator's failure reason.
        reason: String,
    },

    /// An input string failed to parse (principal, flight key, or status).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
