use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static DAY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid day pattern"));

/// A calendar day in `YYYY-MM-DD` form.
///
/// Days computed from a real date are always valid calendar days. Days lifted
/// from free text keep their literal text and are only checked for shape, so
/// `2024-02-30` is representable. Zero-padded fields make the textual order
/// chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(String);

impl CalendarDay {
    /// Accepts any `YYYY-MM-DD` shaped text without calendar validation.
    pub fn from_literal(text: &str) -> Option<Self> {
        DAY_SHAPE.is_match(text).then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` for shape-only literals that name no real day.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive `[since, until]` interval with `since <= until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    since: CalendarDay,
    until: CalendarDay,
}

impl DateRange {
    /// Orders the bounds so the invariant holds whatever the caller passes.
    pub fn new(a: CalendarDay, b: CalendarDay) -> Self {
        if a <= b {
            Self { since: a, until: b }
        } else {
            Self { since: b, until: a }
        }
    }

    pub fn single(day: CalendarDay) -> Self {
        Self {
            since: day.clone(),
            until: day,
        }
    }

    pub fn since(&self) -> &CalendarDay {
        &self.since
    }

    pub fn until(&self) -> &CalendarDay {
        &self.until
    }

    /// The `time_range` parameter the insights endpoint expects.
    pub fn to_time_range_json(&self) -> String {
        serde_json::json!({ "since": self.since, "until": self.until }).to_string()
    }
}

/// What the relay hands back for a spend question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendReport {
    pub spend: String,
    pub since: CalendarDay,
    pub until: CalendarDay,
    pub message: String,
}

impl SpendReport {
    pub fn new(range: &DateRange, spend: String) -> Self {
        let message = format!(
            "Spend from {} to {} is {}",
            range.since(),
            range.until(),
            spend
        );
        Self {
            spend,
            since: range.since().clone(),
            until: range.until().clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> CalendarDay {
        CalendarDay::from_literal(s).unwrap()
    }

    #[test]
    fn test_literal_day_is_shape_checked_only() {
        assert!(CalendarDay::from_literal("2024-02-30").is_some());
        assert!(CalendarDay::from_literal("2024-2-3").is_none());
        assert!(CalendarDay::from_literal("on 2024-02-03").is_none());
        assert_eq!(day("2024-02-30").to_naive(), None);
        assert_eq!(
            day("2024-02-03").to_naive(),
            NaiveDate::from_ymd_opt(2024, 2, 3)
        );
    }

    #[test]
    fn test_range_orders_bounds() {
        let range = DateRange::new(day("2024-06-13"), day("2024-06-07"));
        assert_eq!(range.since().as_str(), "2024-06-07");
        assert_eq!(range.until().as_str(), "2024-06-13");
    }

    #[test]
    fn test_time_range_json() {
        let range = DateRange::new(day("2024-06-02"), day("2024-06-08"));
        assert_eq!(
            range.to_time_range_json(),
            r#"{"since":"2024-06-02","until":"2024-06-08"}"#
        );
    }

    #[test]
    fn test_report_message() {
        let range = DateRange::single(day("2024-05-01"));
        let report = SpendReport::new(&range, "12.34".to_string());
        assert_eq!(report.message, "Spend from 2024-05-01 to 2024-05-01 is 12.34");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["since"], "2024-05-01");
        assert_eq!(json["spend"], "12.34");
    }
}
