//! # Value Transfer Seam
//!
//! [`ValueTransfer`] is the trait boundary between the ledger and the
//! outside world: the one step of a withdrawal that leaves the engine.
//! The pool debits the ledger before invoking it and compensates the
//! debit if it fails, so implementations need no knowledge of ledger
//! state.
//!
//! [`RecordingTransfer`] is the in-process implementation used by the CLI
//! and the test suites; [`FailingTransfer`] exercises the rollback path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aerosure_core::{Amount, Principal};

/// Failure of the external value-transfer step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct TransferError {
    /// Why the transfer did not complete.
    pub reason: String,
}

impl TransferError {
    /// Create a transfer error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The external value-transfer collaborator invoked by withdrawals.
pub trait ValueTransfer {
    /// Move `amount` to `to`. Must either fully complete or fail without
    /// side effects — the ledger compensates its debit on failure.
    fn transfer(&mut self, to: &Principal, amount: Amount) -> Result<(), TransferError>;
}

/// In-process transfer sink that records every completed transfer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordingTransfer {
    /// Completed transfers in order.
    pub completed: Vec<(Principal, Amount)>,
}

impl RecordingTransfer {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount transferred to `to`.
    pub fn total_to(&self, to: &Principal) -> Amount {
        self.completed
            .iter()
            .filter(|(p, _)| p == to)
            .fold(Amount::ZERO, |acc, (_, a)| {
                acc.checked_add(*a).unwrap_or(acc)
            })
    }
}

impl ValueTransfer for RecordingTransfer {
    fn transfer(&mut self, to: &Principal, amount: Amount) -> Result<(), TransferError> {
        self.completed.push((*to, amount));
        Ok(())
    }
}

/// Transfer collaborator that always fails. Exercises the ledger
/// rollback path in tests.
#[derive(Debug, Clone)]
pub struct FailingTransfer {
    reason: String,
}

impl FailingTransfer {
    /// Create a failing transfer with the given failure reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ValueTransfer for FailingTransfer {
    fn transfer(&mut self, _to: &Principal, _amount: Amount) -> Result<(), TransferError> {
        Err(TransferError::new(self.reason.clone()))
    }
}
