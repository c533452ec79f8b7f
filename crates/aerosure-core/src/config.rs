//! # Engine Configuration
//!
//! Defines [`EngineConfig`], the parameter block every component reads:
//! the funding deposit, the premium cap, the payout ratio, and the
//! bootstrap membership threshold. Defaults match the scheme's canonical
//! parameters; deployments may override any of them through the CLI's
//! config file.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::EngineError;

/// Tunable parameters of the AeroSure engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The exact deposit an airline must stake to become funded.
    pub funding_deposit: Amount,
    /// The maximum cumulative premium per policy.
    pub premium_cap: Amount,
    /// Payout ratio numerator (payout = premium * numerator / denominator).
    pub payout_numerator: u32,
    /// Payout ratio denominator.
    pub payout_denominator: u32,
    /// Number of airlines admitted under the bootstrap rule before
    /// registration requires multiparty consensus.
    pub bootstrap_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            funding_deposit: Amount::from_units(10),
            premium_cap: Amount::from_units(1),
            payout_numerator: 3,
            payout_denominator: 2,
            bootstrap_threshold: 4,
        }
    }
}

impl EngineConfig {
    /// Compute the payout owed for a settled premium.
    ///
    /// Integer multiply-then-divide, truncating. The premium cap keeps the
    /// multiplication far from `u128` overflow, but the arithmetic stays
    /// checked regardless.
    pub fn payout_of(&self, premium: Amount) -> Result<Amount, EngineError> {
        premium
            .checked_scale(self.payout_numerator, self.payout_denominator)
            .ok_or_else(|| {
                EngineError::InvalidAmount(format!(
                    "payout overflow for premium {premium} at ratio {}/{}",
                    self.payout_numerator, self.payout_denominator
                ))
            })
    }

    /// Reject configurations the engine cannot operate under.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.payout_denominator == 0 {
            return Err(EngineError::InvalidAmount(
                "payout denominator must be nonzero".to_string(),
            ));
        }
        if self.funding_deposit.is_zero() {
            return Err(EngineError::InvalidAmount(
                "funding deposit must be nonzero".to_string(),
            ));
        }
        if self.bootstrap_threshold == 0 {
            return Err(EngineError::InvalidAmount(
                "bootstrap threshold must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}
