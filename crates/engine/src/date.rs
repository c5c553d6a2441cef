//! Calendar dates in the fixed `YYYY-MM-DD` pattern.

use chrono::NaiveDate;

use crate::{EngineError, ResultEngine};

/// The only accepted date pattern, for input and for the snapshot.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a user supplied date, rejecting anything outside [`DATE_FORMAT`].
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(trimmed.to_string()))
}

/// Renders a date back into [`DATE_FORMAT`].
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `#[serde(with = "...")]` adapter storing dates as `YYYY-MM-DD` strings.
pub(crate) mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_pattern() {
        let date = parse_date("2024-03-09").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(format_date(date), "2024-03-09");
        assert_eq!(parse_date(" 2024-12-31 ").unwrap().to_string(), "2024-12-31");
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in ["09/03/2024", "2024-13-01", "2024-02-30", "yesterday", ""] {
            assert!(
                matches!(parse_date(raw), Err(EngineError::InvalidDate(_))),
                "{raw} should be rejected"
            );
        }
    }
}
