//! Free-text question to inclusive date range.
//!
//! The rules are tried in table order and the first one that matches wins.
//! Anything no rule recognises falls back to the trailing seven days.

use crate::domain::model::{CalendarDay, DateRange};
use chrono::{Datelike, Days, NaiveDate};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRule {
    LastWeek,
    Yesterday,
    Today,
    ExplicitDay,
    TrailingWeek,
}

impl fmt::Display for RangeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RangeRule::LastWeek => "last_week",
            RangeRule::Yesterday => "yesterday",
            RangeRule::Today => "today",
            RangeRule::ExplicitDay => "explicit_day",
            RangeRule::TrailingWeek => "trailing_week",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub rule: RangeRule,
    pub range: DateRange,
}

struct Rule {
    kind: RangeRule,
    pattern: Regex,
    build: fn(&Captures<'_>, NaiveDate) -> Option<DateRange>,
}

impl Rule {
    fn new(
        kind: RangeRule,
        pattern: &str,
        build: fn(&Captures<'_>, NaiveDate) -> Option<DateRange>,
    ) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("resolver patterns are valid"),
            build,
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(RangeRule::LastWeek, r"(?i-u)last week", |_, today| {
            Some(last_week(today))
        }),
        Rule::new(RangeRule::Yesterday, r"(?i-u)yesterday", |_, today| {
            Some(DateRange::single(days_before(today, 1).into()))
        }),
        Rule::new(RangeRule::Today, r"(?i-u)today", |_, today| {
            Some(DateRange::single(today.into()))
        }),
        Rule::new(RangeRule::ExplicitDay, r"[0-9]{4}-[0-9]{2}-[0-9]{2}", |caps, _| {
            CalendarDay::from_literal(&caps[0]).map(DateRange::single)
        }),
    ]
});

/// Saturates at the earliest representable day instead of overflowing.
fn days_before(day: NaiveDate, n: u64) -> NaiveDate {
    day.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// Weeks run Sunday (day 0) to Saturday. The range is the most recently
/// completed one: it ends on the Saturday just before the Sunday that starts
/// the current week, so on a Sunday it ends yesterday.
fn last_week(today: NaiveDate) -> DateRange {
    let week_start = days_before(today, u64::from(today.weekday().num_days_from_sunday()));
    let last_saturday = days_before(week_start, 1);
    let last_sunday = days_before(last_saturday, 6);
    DateRange::new(last_sunday.into(), last_saturday.into())
}

fn trailing_week(today: NaiveDate) -> DateRange {
    DateRange::new(days_before(today, 6).into(), today.into())
}

/// Resolves `question` and reports which rule produced the range.
pub fn classify(question: &str, today: NaiveDate) -> Resolution {
    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(question) {
            if let Some(range) = (rule.build)(&caps, today) {
                return Resolution {
                    rule: rule.kind,
                    range,
                };
            }
        }
    }

    Resolution {
        rule: RangeRule::TrailingWeek,
        range: trailing_week(today),
    }
}

/// Total over all inputs: every question yields some range.
pub fn resolve(question: &str, today: NaiveDate) -> DateRange {
    classify(question, today).range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bounds(range: &DateRange) -> (&str, &str) {
        (range.since().as_str(), range.until().as_str())
    }

    // 2024-06-13 is a Thursday.
    fn thursday() -> NaiveDate {
        date(2024, 6, 13)
    }

    #[test]
    fn test_last_week_is_sunday_anchored() {
        let range = resolve("What did we spend last week?", thursday());
        assert_eq!(bounds(&range), ("2024-06-02", "2024-06-08"));
    }

    #[test]
    fn test_last_week_on_sunday_ends_yesterday() {
        let range = resolve("last week", date(2024, 6, 16));
        assert_eq!(bounds(&range), ("2024-06-09", "2024-06-15"));
    }

    #[test]
    fn test_last_week_on_saturday() {
        let range = resolve("last week", date(2024, 6, 15));
        assert_eq!(bounds(&range), ("2024-06-02", "2024-06-08"));
    }

    #[test]
    fn test_last_week_on_monday() {
        let range = resolve("LAST WEEK please", date(2024, 6, 17));
        assert_eq!(bounds(&range), ("2024-06-09", "2024-06-15"));
    }

    #[test]
    fn test_yesterday() {
        let range = resolve("yesterday's spend?", thursday());
        assert_eq!(bounds(&range), ("2024-06-12", "2024-06-12"));
    }

    #[test]
    fn test_yesterday_across_year_boundary() {
        let range = resolve("Yesterday", date(2024, 1, 1));
        assert_eq!(bounds(&range), ("2023-12-31", "2023-12-31"));
    }

    #[test]
    fn test_today() {
        let range = resolve("spend today", thursday());
        assert_eq!(bounds(&range), ("2024-06-13", "2024-06-13"));
    }

    #[test]
    fn test_explicit_day() {
        let range = resolve("spend on 2024-05-01", thursday());
        assert_eq!(bounds(&range), ("2024-05-01", "2024-05-01"));
    }

    #[test]
    fn test_explicit_day_anywhere_in_text() {
        let resolution = classify("please check 2023-01-15 spend", thursday());
        assert_eq!(resolution.rule, RangeRule::ExplicitDay);
        assert_eq!(bounds(&resolution.range), ("2023-01-15", "2023-01-15"));
    }

    #[test]
    fn test_explicit_day_is_not_calendar_checked() {
        let range = resolve("what about 2024-02-30?", thursday());
        assert_eq!(bounds(&range), ("2024-02-30", "2024-02-30"));
    }

    #[test]
    fn test_fallback_is_trailing_seven_days() {
        let resolution = classify("how much did we spend?", thursday());
        assert_eq!(resolution.rule, RangeRule::TrailingWeek);
        assert_eq!(bounds(&resolution.range), ("2024-06-07", "2024-06-13"));
    }

    #[test]
    fn test_short_date_falls_back() {
        let range = resolve("spend on 2024-5-1", thursday());
        assert_eq!(bounds(&range), ("2024-06-07", "2024-06-13"));
    }

    #[test]
    fn test_yesterday_beats_today() {
        let resolution = classify("what about today, I meant yesterday", thursday());
        assert_eq!(resolution.rule, RangeRule::Yesterday);
        assert_eq!(bounds(&resolution.range), ("2024-06-12", "2024-06-12"));
    }

    #[test]
    fn test_keywords_fold_ascii_case_only() {
        assert_eq!(classify("LAST WEEK", thursday()).rule, RangeRule::LastWeek);
        assert_eq!(classify("YesterDay", thursday()).rule, RangeRule::Yesterday);

        // Long s and the Kelvin sign only fold to ASCII under Unicode rules.
        let resolution = classify("la\u{17F}t wee\u{212A}", thursday());
        assert_eq!(resolution.rule, RangeRule::TrailingWeek);
        let resolution = classify("ye\u{17F}terday", thursday());
        assert_eq!(resolution.rule, RangeRule::TrailingWeek);
    }

    #[test]
    fn test_keywords_beat_explicit_day() {
        let resolution = classify("today, not 2024-01-01", thursday());
        assert_eq!(resolution.rule, RangeRule::Today);

        let resolution = classify("2024-01-01 or last week?", thursday());
        assert_eq!(resolution.rule, RangeRule::LastWeek);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = resolve("last week", thursday());
        let second = resolve("last week", thursday());
        assert_eq!(first, second);
    }

    #[test]
    fn test_since_never_after_until() {
        let questions = [
            "",
            "last week",
            "yesterday",
            "today",
            "9999-99-99",
            "0000-00-00 spend",
            "anything else",
        ];
        let mut day = date(2023, 12, 25);
        for _ in 0..21 {
            for question in questions {
                let range = resolve(question, day);
                assert!(range.since() <= range.until(), "{question} on {day}");
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_earliest_day_does_not_overflow() {
        let range = resolve("yesterday", NaiveDate::MIN);
        assert_eq!(range.since(), range.until());
    }
}
