//! # Flight Status Codes — Single Source of Truth
//!
//! Defines the [`FlightStatus`] enum with the six oracle-reportable status
//! codes. This is the ONE definition used across the stack. Every `match`
//! on `FlightStatus` must be exhaustive — adding a status forces every
//! consumer to handle it at compile time.
//!
//! Wire codes are fixed by the oracle protocol: multiples of ten, with `0`
//! reserved for flights the oracle has not yet reported on.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Oracle-reported status of a flight.
///
/// | Code | Status | Insurance effect |
/// |------|--------|------------------|
/// |  0 | Unknown | none |
/// | 10 | OnTime | none |
/// | 20 | LateAirline | settles every open policy on the flight |
/// | 30 | LateWeather | none |
/// | 40 | LateTechnical | none |
/// | 50 | LateOther | none |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    /// No oracle report yet.
    Unknown,
    /// Flight departed on time.
    OnTime,
    /// Delay attributed to the airline. The qualifying code for settlement.
    LateAirline,
    /// Delay attributed to weather.
    LateWeather,
    /// Delay attributed to a technical fault outside airline responsibility.
    LateTechnical,
    /// Delay with another attributed cause.
    LateOther,
}

impl FlightStatus {
    /// All statuses in wire-code order.
    pub fn all() -> &'static [FlightStatus] {
        &[
            Self::Unknown,
            Self::OnTime,
            Self::LateAirline,
            Self::LateWeather,
            Self::LateTechnical,
            Self::LateOther,
        ]
    }

    /// The numeric wire code of this status.
    pub fn as_code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::OnTime => 10,
            Self::LateAirline => 20,
            Self::LateWeather => 30,
            Self::LateTechnical => 40,
            Self::LateOther => 50,
        }
    }

    /// Parse a status from its numeric wire code.
    pub fn from_code(code: u8) -> Result<Self, EngineError> {
        match code {
            0 => Ok(Self::Unknown),
            10 => Ok(Self::OnTime),
            20 => Ok(Self::LateAirline),
            30 => Ok(Self::LateWeather),
            40 => Ok(Self::LateTechnical),
            50 => Ok(Self::LateOther),
            other => Err(EngineError::MalformedInput(format!(
                "unassigned flight status code: {other}"
            ))),
        }
    }

    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::OnTime => "on_time",
            Self::LateAirline => "late_airline",
            Self::LateWeather => "late_weather",
            Self::LateTechnical => "late_technical",
            Self::LateOther => "late_other",
        }
    }

    /// Whether this status is any kind of delay.
    pub fn is_delay(&self) -> bool {
        matches!(
            self,
            Self::LateAirline | Self::LateWeather | Self::LateTechnical | Self::LateOther
        )
    }

    /// Whether this status triggers insurance settlement.
    pub fn is_airline_fault(&self) -> bool {
        matches!(self, Self::LateAirline)
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = EngineError;

    /// Parse a status from its snake_case name (accepts `-` for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "unknown" => Ok(Self::Unknown),
            "on_time" => Ok(Self::OnTime),
            "late_airline" => Ok(Self::LateAirline),
            "late_weather" => Ok(Self::LateWeather),
            "late_technical" => Ok(Self::LateTechnical),
            "late_other" => Ok(Self::LateOther),
            other => Err(EngineError::MalformedInput(format!(
                "unknown flight status: {other:?}"
            ))),
        }
    }
}
