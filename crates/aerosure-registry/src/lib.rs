//! # aerosure-registry — Airline Membership Governance
//!
//! Owns the airline table and every mutation of it:
//!
//! - **Registration** with the bootstrap rule: the first airline (seeded at
//!   engine construction) admits up to three more directly; from the fifth
//!   registration onward, admission requires multiparty consensus.
//!
//! - **Funding**: a registered airline stakes the exact configured deposit
//!   to unlock privileged operations.
//!
//! - **Voting**: one recorded vote per funded airline per candidate; a
//!   candidate is approved once affirmative votes reach half the live
//!   count of funded airlines, rounded up.
//!
//! The approval threshold is recomputed from the table at every vote —
//! never cached — so membership changes between votes are always
//! reflected.

pub mod airline;

// Re-export primary types.
pub use airline::{Airline, AirlineRegistry, AirlineStatus, RegistrationOutcome, VotesInfo};
