//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines [`Timestamp`], the audit-record timestamp type: always UTC,
//! truncated to seconds precision, rendered with a `Z` suffix.
//!
//! Timestamps appear in audit state (registration times, funding times,
//! settlement times) — never in flight identity. Flight departure times
//! are plain unix seconds inside [`crate::FlightKey`] derivation, so key
//! material stays free of timezone ambiguity by construction.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A UTC timestamp truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_unix(Utc::now().timestamp())
    }

    /// Build a timestamp from unix seconds.
    ///
    /// Out-of-range values clamp to the unix epoch; the engine never
    /// produces them.
    pub fn from_unix(secs: i64) -> Self {
        match Utc.timestamp_opt(secs, 0).single() {
            Some(dt) => Self(dt),
            None => Self(Utc.timestamp_opt(0, 0).single().unwrap_or_default()),
        }
    }

    /// The timestamp as unix seconds.
    pub fn as_unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Parse an RFC 3339 timestamp. Only the `Z` suffix is accepted —
    /// explicit offsets are rejected so that rendered state is canonical.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        if !s.ends_with('Z') {
            return Err(EngineError::InvalidAmount(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| EngineError::InvalidAmount(format!("bad timestamp {s:?}: {e}")))?;
        Ok(Self::from_unix(dt.timestamp()))
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}
