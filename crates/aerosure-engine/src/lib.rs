//! # aerosure-engine — The Composed Governance/Escrow Engine
//!
//! Assembles the operational switch, the caller gateway, and the three
//! table-owning components into the single operation surface callers see.
//! The engine owns all four tables (airlines, flights, policies,
//! balances); every mutation funnels through a documented entry point that
//! checks, in order: the operational gate, caller authorization, then
//! component preconditions. Guards run before the first write, so a failed
//! operation leaves every table untouched.
//!
//! Every public operation executes to completion as a single serialized
//! step — entry points take `&mut self` and hold no internal suspension
//! points. The one external call is the value-transfer step of
//! [`Engine::withdraw_balance`], which the pool orders strictly after its
//! ledger debit.

pub mod engine;
pub mod gateway;
pub mod ops;

// Re-export primary types.
pub use engine::{Engine, StatusReport};
pub use gateway::AccessGateway;
pub use ops::OperationalSwitch;
