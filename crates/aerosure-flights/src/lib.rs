//! # aerosure-flights — Flight Record Registry
//!
//! Owns the flight table: records keyed by the digest of
//! `(airline, code, departure)`, created by funded airlines and updated by
//! oracle status reports. Reads airline state from
//! [`aerosure_registry::AirlineRegistry`] for authorization; never writes
//! it.

pub mod flight;

// Re-export primary types.
pub use flight::{Flight, FlightRegistry, StatusRecorded};
