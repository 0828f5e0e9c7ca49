//! Common types used throughout the activity loader
//!
//! Shared type definitions for client identifiers and the date window
//! every report request is scoped to.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Client Identifier
// ============================================================================

/// Pseudonymous per-visitor key reported by the analytics view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Relative tokens the reporting API accepts in place of a calendar date
static RELATIVE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(today|yesterday|[0-9]+daysAgo)$").expect("valid relative date pattern")
});

/// Reporting window shared by client discovery and every activity lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Inclusive start, `YYYY-MM-DD` or a relative token
    pub start_date: String,
    /// Inclusive end, `YYYY-MM-DD` or a relative token
    pub end_date: String,
}

impl DateRange {
    /// Create a validated date range
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Result<Self> {
        let start_date = start_date.into();
        let end_date = end_date.into();
        validate_date("start_date", &start_date)?;
        validate_date("end_date", &end_date)?;

        if let (Ok(start), Ok(end)) = (
            chrono::NaiveDate::parse_from_str(&start_date, "%Y-%m-%d"),
            chrono::NaiveDate::parse_from_str(&end_date, "%Y-%m-%d"),
        ) {
            if start > end {
                return Err(Error::invalid_config(
                    "date_range",
                    format!("start {start_date} is after end {end_date}"),
                ));
            }
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// The fixed window every run uses: seven days ago through today
    pub fn last_seven_days() -> Self {
        Self {
            start_date: "7daysAgo".to_string(),
            end_date: "today".to_string(),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_seven_days()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_date, self.end_date)
    }
}

fn validate_date(field: &str, value: &str) -> Result<()> {
    if RELATIVE_DATE.is_match(value)
        || chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    {
        Ok(())
    } else {
        Err(Error::invalid_config(
            field,
            format!("'{value}' is neither YYYY-MM-DD nor a relative date"),
        ))
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_last_seven_days() {
        let range = DateRange::last_seven_days();
        assert_eq!(range.start_date, "7daysAgo");
        assert_eq!(range.end_date, "today");
        assert_eq!(DateRange::default(), range);
        assert_eq!(range.to_string(), "7daysAgo..today");
    }

    #[test]
    fn test_date_range_serializes_camel_case() {
        let json = serde_json::to_value(DateRange::last_seven_days()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"startDate": "7daysAgo", "endDate": "today"})
        );
    }

    #[test_case("today", "today" ; "both today")]
    #[test_case("30daysAgo", "yesterday" ; "relative tokens")]
    #[test_case("2024-01-01", "2024-01-31" ; "absolute dates")]
    #[test_case("2024-01-01", "today" ; "mixed")]
    fn test_date_range_valid(start: &str, end: &str) {
        assert!(DateRange::new(start, end).is_ok());
    }

    #[test_case("last week", "today" ; "free text")]
    #[test_case("2024-13-01", "today" ; "bad month")]
    #[test_case("today", "daysAgo" ; "token without count")]
    #[test_case("2024-02-01", "2024-01-01" ; "reversed")]
    fn test_date_range_invalid(start: &str, end: &str) {
        assert!(DateRange::new(start, end).is_err());
    }

    #[test]
    fn test_client_id() {
        let id = ClientId::new("123.456");
        assert_eq!(id.as_str(), "123.456");
        assert_eq!(id.to_string(), "123.456");
        assert_eq!(ClientId::from("123.456"), id);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"123.456\"");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
