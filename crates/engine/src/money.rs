use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (transaction
/// amounts, category totals) to avoid floating-point drift. The sign is not
/// enforced: a tracker may record refunds or income as negative values.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::new(250_00).compact(), "250");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; extra
/// decimals are rounded to the cent):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert_eq!("12.345".parse::<MoneyCents>().unwrap().cents(), 1235);
/// assert!("ten".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Adds every amount, failing with [`EngineError::TotalOverflow`] instead
    /// of wrapping.
    pub fn checked_sum(
        amounts: impl IntoIterator<Item = MoneyCents>,
    ) -> Result<Self, EngineError> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
            .ok_or(EngineError::TotalOverflow)
    }

    /// Default decimal rendering: whole amounts have no fraction (`250`),
    /// the others drop trailing zeros (`250.5`, `12.34`).
    ///
    /// Search compares queries against this rendering.
    #[must_use]
    pub fn compact(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        match abs % 100 {
            0 => format!("{sign}{units}"),
            cents if cents % 10 == 0 => format!("{sign}{units}.{}", cents / 10),
            cents => format!("{sign}{units}.{cents:02}"),
        }
    }

    fn from_f64(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - digits only around the separator (no exponent, no grouping)
    /// - more than 2 fractional digits are rounded half away from zero
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next().unwrap_or("");

        if parts.next().is_some() {
            return Err(invalid());
        }
        if units_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(units_str) || !all_digits(frac_str) {
            return Err(invalid());
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str.parse().map_err(|_| overflow())?
        };

        let frac = frac_str.as_bytes();
        let digit = |idx: usize| frac.get(idx).map_or(0, |b| i64::from(b - b'0'));
        let mut cents = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            cents += 1;
        }

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

impl Serialize for MoneyCents {
    /// Whole amounts are written as JSON integers, the others as decimals.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = MoneyCents;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a numeric amount")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                v.checked_mul(100)
                    .map(MoneyCents)
                    .ok_or_else(|| E::custom("amount too large"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(MoneyCents)
                    .ok_or_else(|| E::custom("amount too large"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                MoneyCents::from_f64(v).ok_or_else(|| E::custom("amount out of range"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn compact_drops_trailing_zeros() {
        assert_eq!(MoneyCents::new(25000).compact(), "250");
        assert_eq!(MoneyCents::new(25050).compact(), "250.5");
        assert_eq!(MoneyCents::new(1234).compact(), "12.34");
        assert_eq!(MoneyCents::new(5).compact(), "0.05");
        assert_eq!(MoneyCents::new(-150).compact(), "-1.5");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
        assert_eq!(".5".parse::<MoneyCents>().unwrap().cents(), 50);
        assert_eq!("7.".parse::<MoneyCents>().unwrap().cents(), 700);
    }

    #[test]
    fn parse_rounds_extra_decimals() {
        assert_eq!("12.345".parse::<MoneyCents>().unwrap().cents(), 1235);
        assert_eq!("12.344".parse::<MoneyCents>().unwrap().cents(), 1234);
        assert_eq!("-0.005".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("0.999".parse::<MoneyCents>().unwrap().cents(), 100);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<MoneyCents>().is_err());
        assert!("   ".parse::<MoneyCents>().is_err());
        assert!("abc".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
        assert!("1e3".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!(".".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn json_keeps_whole_amounts_integral() {
        assert_eq!(serde_json::to_string(&MoneyCents::new(25000)).unwrap(), "250");
        assert_eq!(serde_json::to_string(&MoneyCents::new(1234)).unwrap(), "12.34");

        let parsed: MoneyCents = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed.cents(), 1250);
        let parsed: MoneyCents = serde_json::from_str("-3").unwrap();
        assert_eq!(parsed.cents(), -300);
        assert!(serde_json::from_str::<MoneyCents>("\"12\"").is_err());
    }

    #[test]
    fn checked_sum_reports_overflow() {
        let amounts = [MoneyCents::new(1250), MoneyCents::new(-300)];
        assert_eq!(MoneyCents::checked_sum(amounts).unwrap().cents(), 950);
        assert_eq!(MoneyCents::checked_sum([]).unwrap(), MoneyCents::ZERO);

        let huge: MoneyCents = "50000000000000000".parse().unwrap();
        assert!(matches!(
            MoneyCents::checked_sum([huge, huge]),
            Err(EngineError::TotalOverflow)
        ));
    }
}
