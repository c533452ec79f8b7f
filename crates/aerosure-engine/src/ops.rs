//! # Operational Switch
//!
//! Process-wide boolean gate. When off, every state-changing operation on
//! the engine fails with [`EngineError::NotOperational`] — except the gate
//! toggle itself, which stays reachable so a paused engine can be resumed.
//! Reads remain available while paused.

use serde::{Deserialize, Serialize};

use aerosure_core::EngineError;

/// The operational gate. Starts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalSwitch {
    operational: bool,
}

impl OperationalSwitch {
    /// A switch in the operational state.
    pub fn new() -> Self {
        Self { operational: true }
    }

    /// Whether the engine is accepting mutations.
    pub fn is_operational(&self) -> bool {
        self.operational
    }

    /// Set the gate. Ownership is checked by the caller (the engine),
    /// not here.
    pub fn set(&mut self, operational: bool) {
        self.operational = operational;
    }

    /// Guard for mutating entry points.
    pub fn require_operational(&self) -> Result<(), EngineError> {
        if self.operational {
            Ok(())
        } else {
            Err(EngineError::NotOperational)
        }
    }
}

impl Default for OperationalSwitch {
    fn default() -> Self {
        Self::new()
    }
}
