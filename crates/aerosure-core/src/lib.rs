//! # aerosure-core — Foundational Types for the AeroSure Stack
//!
//! This crate is the bedrock of the AeroSure Stack. It defines the
//! type-system primitives every other crate builds on: principals, amounts,
//! flight keys, status codes, timestamps, engine configuration, and the
//! canonical error taxonomy. Every other crate in the workspace depends on
//! `aerosure-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Principal`, `FlightKey`,
//!    `PolicyId`, `Amount` — all newtypes with validated constructors. No
//!    bare strings for identifiers, no bare integers for money.
//!
//! 2. **Integer money only.** `Amount` is an unsigned 128-bit count of base
//!    units with checked arithmetic. No floating point anywhere in
//!    financial state.
//!
//! 3. **Deterministic flight keys.** `FlightKey` is a SHA-256 digest over
//!    the airline principal, flight code, and departure time. The same
//!    inputs always produce the same key.
//!
//! 4. **One error taxonomy.** Every rejected precondition across the stack
//!    surfaces as a distinct [`EngineError`] kind that callers can match on.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aerosure-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod amount;
pub mod config;
pub mod error;
pub mod identity;
pub mod key;
pub mod status;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use amount::Amount;
pub use config::EngineConfig;
pub use error::EngineError;
pub use identity::{PolicyId, Principal};
pub use key::FlightKey;
pub use status::FlightStatus;
pub use temporal::Timestamp;
