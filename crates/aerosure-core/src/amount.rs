//! # Amounts — Integer Money
//!
//! Defines [`Amount`], the single monetary type of the AeroSure Stack.
//!
//! Financial amounts must never be represented as floating-point numbers.
//! `Amount` counts base units in an unsigned 128-bit integer, with one
//! display unit equal to 10^18 base units (ether-style granularity). All
//! arithmetic is checked; the payout computation uses integer
//! multiply-then-divide, truncating toward zero.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Base units per display unit.
pub const BASE_UNITS_PER_UNIT: u128 = 1_000_000_000_000_000_000;

/// A monetary amount in base units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from a raw base-unit count.
    pub fn from_base_units(base_units: u128) -> Self {
        Self(base_units)
    }

    /// Create an amount from whole display units.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * BASE_UNITS_PER_UNIT)
    }

    /// The raw base-unit count.
    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// Whether this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Scale by a rational factor `numerator / denominator`, truncating.
    ///
    /// Returns `None` on multiplication overflow or a zero denominator.
    pub fn checked_scale(self, numerator: u32, denominator: u32) -> Option<Amount> {
        if denominator == 0 {
            return None;
        }
        self.0
            .checked_mul(numerator as u128)
            .map(|v| Amount(v / denominator as u128))
    }

    /// Parse a decimal display-unit string, e.g. `"10"`, `"0.5"`, `"1.5"`.
    ///
    /// Accepts up to 18 fractional digits. Rejects empty input, multiple
    /// separators, and non-digit characters.
    pub fn parse_units(s: &str) -> Result<Self, EngineError> {
        let malformed = || EngineError::InvalidAmount(format!("malformed amount: {s:?}"));
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(malformed());
        }
        if frac.len() > 18 {
            return Err(EngineError::InvalidAmount(format!(
                "amount has more than 18 fractional digits: {s:?}"
            )));
        }
        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed())?
        };
        let frac_base: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<18}");
            padded.parse().map_err(|_| malformed())?
        };
        whole_units
            .checked_mul(BASE_UNITS_PER_UNIT)
            .and_then(|v| v.checked_add(frac_base))
            .map(Amount)
            .ok_or_else(malformed)
    }
}

impl std::fmt::Display for Amount {
    /// Render in display units with trailing zeros trimmed, e.g. `1.5`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.0 / BASE_UNITS_PER_UNIT;
        let frac = self.0 % BASE_UNITS_PER_UNIT;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let frac_str = format!("{frac:018}");
        write!(f, "{whole}.{}", frac_str.trim_end_matches('0'))
    }
}

impl std::str::FromStr for Amount {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_units(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_units_conversion() {
        assert_eq!(Amount::from_units(10).base_units(), 10 * BASE_UNITS_PER_UNIT);
        assert_eq!(Amount::from_units(0), Amount::ZERO);
    }

    #[test]
    fn test_checked_sub_underflow() {
        let one = Amount::from_units(1);
        let two = Amount::from_units(2);
        assert_eq!(one.checked_sub(two), None);
        assert_eq!(two.checked_sub(one), Some(one));
    }

    #[test]
    fn test_scale_three_halves() {
        // 1 unit * 3/2 = 1.5 units exactly.
        let one = Amount::from_units(1);
        let owed = one.checked_scale(3, 2).unwrap();
        assert_eq!(owed.base_units(), 3 * BASE_UNITS_PER_UNIT / 2);
        assert_eq!(owed.to_string(), "1.5");
    }

    #[test]
    fn test_scale_truncates() {
        // 3 base units * 3/2 = 4.5, truncated to 4.
        let v = Amount::from_base_units(3);
        assert_eq!(v.checked_scale(3, 2), Some(Amount::from_base_units(4)));
    }

    #[test]
    fn test_scale_zero_denominator() {
        assert_eq!(Amount::from_units(1).checked_scale(3, 0), None);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(Amount::parse_units("10").unwrap(), Amount::from_units(10));
        assert_eq!(
            Amount::parse_units("0.5").unwrap(),
            Amount::from_base_units(BASE_UNITS_PER_UNIT / 2)
        );
        assert_eq!(
            Amount::parse_units("1.5").unwrap(),
            Amount::from_units(1).checked_scale(3, 2).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Amount::parse_units("").is_err());
        assert!(Amount::parse_units(".").is_err());
        assert!(Amount::parse_units("1.2.3").is_err());
        assert!(Amount::parse_units("abc").is_err());
        assert!(Amount::parse_units("1.0000000000000000001").is_err());
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Amount::from_units(10).to_string(), "10");
        assert_eq!(
            Amount::from_base_units(BASE_UNITS_PER_UNIT / 2).to_string(),
            "0.5"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let a = Amount::from_base_units(123_456_789);
        let json = serde_json::to_string(&a).unwrap();
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }

    proptest! {
        #[test]
        fn prop_display_parse_roundtrip(base in 0u128..=10 * BASE_UNITS_PER_UNIT) {
            let a = Amount::from_base_units(base);
            let parsed = Amount::parse_units(&a.to_string()).unwrap();
            prop_assert_eq!(parsed, a);
        }

        #[test]
        fn prop_scale_three_halves_exact(units in 0u64..1000) {
            // Whole-unit premiums scale to exactly 1.5x with no residue.
            let premium = Amount::from_units(units);
            let owed = premium.checked_scale(3, 2).unwrap();
            prop_assert_eq!(owed.base_units() * 2, premium.base_units() * 3);
        }

        #[test]
        fn prop_add_sub_inverse(a in 0u128..u64::MAX as u128, b in 0u128..u64::MAX as u128) {
            let x = Amount::from_base_units(a);
            let y = Amount::from_base_units(b);
            let sum = x.checked_add(y).unwrap();
            prop_assert_eq!(sum.checked_sub(y), Some(x));
        }
    }
}
