//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the AeroSure Stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `PolicyId` where a `Principal` is expected.
//!
//! ## Security Invariant
//!
//! Type-level distinction between identifier namespaces prevents
//! cross-namespace confusion where one kind of identifier is substituted
//! for another.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::EngineError;

/// Length of a principal in bytes.
pub const PRINCIPAL_LEN: usize = 20;

/// An address-like account principal: airlines, passengers, the engine
/// owner, and authorized callers are all identified by a `Principal`.
///
/// Rendered as `0x`-prefixed lowercase hex. The validated constructor
/// rejects malformed input — there is no way to hold a `Principal` of the
/// wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal([u8; PRINCIPAL_LEN]);

impl Principal {
    /// Create a principal from raw bytes.
    pub fn from_bytes(bytes: [u8; PRINCIPAL_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a principal from a `0x`-prefixed lowercase hex string.
    ///
    /// The `0x` prefix is optional on input; output always carries it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedInput`] if the input is not
    /// exactly 40 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, EngineError> {
        let malformed = || EngineError::MalformedInput(format!("principal {s:?}"));
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if !digits.is_ascii() || digits.len() != PRINCIPAL_LEN * 2 {
            return Err(malformed());
        }
        let mut bytes = [0u8; PRINCIPAL_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| malformed())?;
        }
        Ok(Self(bytes))
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; PRINCIPAL_LEN] {
        &self.0
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(2 + PRINCIPAL_LEN * 2);
        s.push_str("0x");
        for b in &self.0 {
            s.push_str(&format!("{b:02x}"));
        }
        s
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Principal {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Principals key the persisted tables, so they serialize as hex strings
// rather than byte arrays (JSON map keys must be strings).
impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Principal::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Unique identifier for an insurance policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyId(Uuid);

impl PolicyId {
    /// Generate a new random policy identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PolicyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "policy:{}", self.0)
    }
}
