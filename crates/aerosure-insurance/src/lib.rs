//! # aerosure-insurance — Premium Escrow and Payout Ledger
//!
//! Owns the policy table and the passenger balance ledger:
//!
//! - **Purchase**: capped premium collection per `(flight, passenger)`.
//! - **Settlement**: exactly-once payout computation when a flight is
//!   reported delayed at airline fault.
//! - **Payout**: exactly-once movement of owed amounts into the
//!   passenger's withdrawable balance.
//! - **Withdrawal**: ledger debit strictly ordered before the external
//!   value transfer, with a compensating rollback if the transfer fails.
//!
//! The external transfer step is the one reentrancy surface of the whole
//! engine; it is isolated behind the [`ValueTransfer`] trait so the ledger
//! ordering contract is enforced here, not at call sites.

pub mod policy;
pub mod pool;
pub mod transfer;

// Re-export primary types.
pub use policy::{InsuranceInfo, Policy};
pub use pool::InsurancePool;
pub use transfer::{FailingTransfer, RecordingTransfer, TransferError, ValueTransfer};
