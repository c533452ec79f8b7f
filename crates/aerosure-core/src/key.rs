//! # Flight Keys — Content-Derived Identifiers
//!
//! Defines [`FlightKey`], the composite identifier of a flight record.
//!
//! A flight is identified by `(airline, code, departure)`; the key is the
//! SHA-256 digest of those three fields, so the same triple always derives
//! the same key and distinct triples collide with negligible probability.
//! All key derivation flows through [`FlightKey::derive`] — no caller
//! assembles digest input bytes by hand.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::EngineError;
use crate::identity::Principal;

/// The composite key of a flight record: SHA-256 over the airline
/// principal bytes, the flight code, and the big-endian departure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightKey([u8; 32]);

impl FlightKey {
    /// Derive the key for `(airline, code, departure)`.
    ///
    /// `departure` is the scheduled departure as unix seconds; it is part
    /// of the identity, so the same code on a different day is a different
    /// flight.
    pub fn derive(airline: &Principal, code: &str, departure: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(airline.as_bytes());
        hasher.update(code.as_bytes());
        hasher.update(departure.to_be_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Construct a key from raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 64 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, EngineError> {
        let malformed = || EngineError::MalformedInput(format!("flight key {s:?}"));
        if !s.is_ascii() || s.len() != 64 {
            return Err(malformed());
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| malformed())?;
        }
        Ok(Self(bytes))
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the key as 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for FlightKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "flight:{}", self.to_hex())
    }
}

// Flight keys key the persisted flight and policy tables, so they
// serialize as hex strings (JSON map keys must be strings).
impl Serialize for FlightKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FlightKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FlightKey::from_hex(&s).map_err(de::Error::custom)
    }
}
