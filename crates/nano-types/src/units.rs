//! Amount helpers.
//!
//! A Nano is 10^30 raw. Conversions into raw are done on the decimal text
//! itself so no precision is lost; the float conversion back is only meant
//! for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raw units per Nano (10^30).
pub const RAW_PER_NANO: u128 = 10u128.pow(30);

/// Number of decimal places of the display unit.
pub const NANO_DECIMALS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("amount must be a non-empty string")]
    Empty,

    #[error("invalid amount: {0:?}")]
    Invalid(String),

    #[error("too many decimal places ({places}, max {max})")]
    Precision { places: usize, max: usize },

    #[error("amount does not fit in 128 bits of raw: {0}")]
    Overflow(String),

    #[error("unknown unit: {0:?} (use nano or raw)")]
    UnknownUnit(String),
}

/// The unit an amount is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Nano,
    Raw,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nano => write!(f, "nano"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, UnitError> {
        match s.to_lowercase().as_str() {
            "nano" => Ok(Self::Nano),
            "raw" => Ok(Self::Raw),
            _ => Err(UnitError::UnknownUnit(s.to_string())),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Convert a decimal Nano amount (e.g. `"1.5"`) to raw.
///
/// Trailing fractional zeros are ignored, so `"1.000...0"` with more than 30
/// zeros still converts. Signs, exponents and grouping separators are
/// rejected.
pub fn to_raw(nano: &str) -> Result<u128, UnitError> {
    let s = nano.trim();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }

    let (whole_str, frac_str) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };
    if !is_digits(whole_str) || !(frac_str.is_empty() || is_digits(frac_str)) {
        return Err(UnitError::Invalid(s.to_string()));
    }

    let frac_str = frac_str.trim_end_matches('0');
    if frac_str.len() > NANO_DECIMALS {
        return Err(UnitError::Precision {
            places: frac_str.len(),
            max: NANO_DECIMALS,
        });
    }

    let overflow = || UnitError::Overflow(s.to_string());
    let whole: u128 = whole_str.parse().map_err(|_| overflow())?;
    let frac: u128 = if frac_str.is_empty() {
        0
    } else {
        format!("{:0<width$}", frac_str, width = NANO_DECIMALS)
            .parse()
            .map_err(|_| overflow())?
    };

    whole
        .checked_mul(RAW_PER_NANO)
        .and_then(|r| r.checked_add(frac))
        .ok_or_else(overflow)
}

/// Parse a raw amount written as plain base-10 digits.
pub fn parse_raw(raw: &str) -> Result<u128, UnitError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }
    if !is_digits(s) {
        return Err(UnitError::Invalid(s.to_string()));
    }
    s.parse().map_err(|_| UnitError::Overflow(s.to_string()))
}

/// Convert raw to Nano as a float. Lossy above 2^53 raw; display only.
pub fn to_nano(raw: u128) -> f64 {
    raw as f64 / RAW_PER_NANO as f64
}

/// Format raw as an exact decimal Nano string (e.g. `1.5`, `0.000001`).
pub fn format_nano(raw: u128) -> String {
    let whole = raw / RAW_PER_NANO;
    let frac = raw % RAW_PER_NANO;
    if frac == 0 {
        format!("{}.0", whole)
    } else {
        let frac_str = format!("{:030}", frac);
        format!("{}.{}", whole, frac_str.trim_end_matches('0'))
    }
}

/// An amount of currency, stored as raw.
///
/// Serializes as the raw decimal string, which is how the node expects
/// amounts on the wire.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u128 {
        self.0
    }

    pub fn from_nano(nano: &str) -> Result<Self, UnitError> {
        to_raw(nano).map(Self)
    }

    /// Parse an amount written in `unit`.
    pub fn parse(s: &str, unit: Unit) -> Result<Self, UnitError> {
        match unit {
            Unit::Nano => to_raw(s).map(Self),
            Unit::Raw => parse_raw(s).map(Self),
        }
    }

    pub fn to_nano(self) -> f64 {
        to_nano(self.0)
    }

    /// Render the amount in `unit` without losing precision.
    pub fn format(self, unit: Unit) -> String {
        match unit {
            Unit::Nano => format_nano(self.0),
            Unit::Raw => self.0.to_string(),
        }
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u128> for Amount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl TryFrom<String> for Amount {
    type Error = UnitError;

    fn try_from(raw: String) -> Result<Self, UnitError> {
        parse_raw(&raw).map(Self)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> String {
        amount.0.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_raw() {
        assert_eq!(to_raw("0"), Ok(0));
        assert_eq!(to_raw("1"), Ok(RAW_PER_NANO));
        assert_eq!(to_raw("1.0"), Ok(RAW_PER_NANO));
        assert_eq!(to_raw("1."), Ok(RAW_PER_NANO));
        assert_eq!(to_raw("0.5"), Ok(RAW_PER_NANO / 2));
        assert_eq!(to_raw(" 2.25 "), Ok(2 * RAW_PER_NANO + RAW_PER_NANO / 4));
        assert_eq!(to_raw("0.000000000000000000000000000001"), Ok(1));
        assert_eq!(to_raw("0.0000"), Ok(0));
    }

    #[test]
    fn test_to_raw_beyond_f64_precision() {
        // 133248297.920938463463374607431768211455 Nano is the full supply.
        let raw = to_raw("133248297.920938463463374607431768211455").unwrap();
        assert_eq!(raw, 133_248_297_920_938_463_463_374_607_431_768_211_455);
    }

    #[test]
    fn test_to_raw_trailing_zeros_past_precision() {
        let s = format!("3.{}", "0".repeat(40));
        assert_eq!(to_raw(&s), Ok(3 * RAW_PER_NANO));
    }

    #[test]
    fn test_to_raw_rejects() {
        assert_eq!(to_raw(""), Err(UnitError::Empty));
        assert!(matches!(to_raw("-1"), Err(UnitError::Invalid(_))));
        assert!(matches!(to_raw("+1"), Err(UnitError::Invalid(_))));
        assert!(matches!(to_raw(".5"), Err(UnitError::Invalid(_))));
        assert!(matches!(to_raw("1e3"), Err(UnitError::Invalid(_))));
        assert!(matches!(to_raw("1.2.3"), Err(UnitError::Invalid(_))));
        assert_eq!(
            to_raw("0.0000000000000000000000000000001"),
            Err(UnitError::Precision { places: 31, max: 30 })
        );
        assert!(matches!(to_raw("999999999"), Err(UnitError::Overflow(_))));
    }

    #[test]
    fn test_format_nano() {
        assert_eq!(format_nano(0), "0.0");
        assert_eq!(format_nano(RAW_PER_NANO), "1.0");
        assert_eq!(format_nano(RAW_PER_NANO / 2), "0.5");
        assert_eq!(format_nano(1), "0.000000000000000000000000000001");
        assert_eq!(format_nano(RAW_PER_NANO + 1), "1.000000000000000000000000000001");
    }

    #[test]
    fn test_round_trip() {
        for raw in [
            0u128,
            1,
            RAW_PER_NANO,
            RAW_PER_NANO / 1000,
            123_456_789_000_000_000_000_000_000_000_000,
            u128::MAX,
        ] {
            assert_eq!(to_raw(&format_nano(raw)), Ok(raw), "raw {raw}");
        }
    }

    #[test]
    fn test_to_nano() {
        assert_eq!(to_nano(RAW_PER_NANO), 1.0);
        assert!((to_nano(RAW_PER_NANO * 3 / 2) - 1.5).abs() < 1e-12);
        assert_eq!(to_nano(0), 0.0);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("nano".parse::<Unit>(), Ok(Unit::Nano));
        assert_eq!("RAW".parse::<Unit>(), Ok(Unit::Raw));
        assert!("xno".parse::<Unit>().is_err());
        assert_eq!(Unit::default(), Unit::Nano);
    }

    #[test]
    fn test_amount_parse_and_format() {
        let a = Amount::parse("1.5", Unit::Nano).unwrap();
        assert_eq!(a.raw(), RAW_PER_NANO * 3 / 2);
        assert_eq!(a.format(Unit::Nano), "1.5");
        assert_eq!(a.format(Unit::Raw), "1500000000000000000000000000000");
        assert_eq!(Amount::parse("42", Unit::Raw).unwrap().raw(), 42);
        assert!(Amount::parse("4.2", Unit::Raw).is_err());
    }

    #[test]
    fn test_amount_serde_as_raw_string() {
        let a = Amount::from_raw(1_000_000);
        assert_eq!(serde_json::to_value(a).unwrap(), serde_json::json!("1000000"));
        let back: Amount = serde_json::from_str("\"1000000\"").unwrap();
        assert_eq!(back, a);
        assert!(serde_json::from_str::<Amount>("\"abc\"").is_err());
    }
}
