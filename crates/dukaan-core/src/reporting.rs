//! # Reporting Primitives
//!
//! Date windows and calendar-month arithmetic for the reporting layer.
//!
//! ## The Window Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Date Window                                       │
//! │                                                                         │
//! │  Query params: ?start_date=2026-08-01&end_date=2026-08-30              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DateWindow { start: 2026-08-01, end: 2026-08-30 }                     │
//! │       │                                                                 │
//! │       ▼  bounds()                                                       │
//! │  [2026-08-01 00:00:00 UTC, 2026-08-30 23:59:59 UTC]  (inclusive)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQL: WHERE sale_date >= ?1 AND sale_date <= ?2                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Calendar Months
//! The trailing 12-month dashboard series uses exact calendar-month
//! boundaries ([`trailing_months`]). The system this replaces approximated
//! month ends by stepping backward in 30-day increments and adding 4 days to
//! the 28th; that approximation drifts, so it is deliberately not reproduced.
//!
//! All functions take `today` as a parameter instead of reading the clock,
//! keeping this crate deterministic.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// A date string that did not parse as `YYYY-MM-DD`.
///
/// Non-fatal by contract: handlers surface it as a warning and fall back to
/// an unfiltered or default query.
#[derive(Debug, Error, PartialEq)]
#[error("Invalid date format. Please use YYYY-MM-DD.")]
pub struct MalformedDate;

/// An inclusive calendar-date range used to filter time-stamped records.
///
/// The window covers `[start 00:00:00, end 23:59:59]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Parses a window from two `YYYY-MM-DD` query parameters.
    pub fn parse(start: &str, end: &str) -> Result<Self, MalformedDate> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(DateWindow { start, end })
    }

    /// The single-day window `today..today` (default for sales listings).
    pub fn single_day(today: NaiveDate) -> Self {
        DateWindow {
            start: today,
            end: today,
        }
    }

    /// The window from the 1st of the current month through today
    /// (default for dashboard, revenue, and report views).
    pub fn month_to_date(today: NaiveDate) -> Self {
        DateWindow {
            start: first_of_month(today),
            end: today,
        }
    }

    /// Inclusive datetime bounds for SQL filtering.
    ///
    /// Returns `(start 00:00:00, end 23:59:59)`.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start.and_time(NaiveTime::MIN).and_utc();
        let end = self.end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
            - Duration::seconds(1);
        (start, end)
    }
}

/// Parses a single `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, MalformedDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| MalformedDate)
}

/// One calendar month in the trailing-months series.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSpan {
    /// Display label, e.g. "Aug 2026".
    pub label: String,

    /// First through last day of the month.
    pub window: DateWindow,
}

/// The last `count` calendar months up to and including `today`'s month,
/// oldest first.
///
/// Each span runs from the true first day of the month to the true last day,
/// so February is 28 or 29 days and year boundaries are exact.
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<MonthSpan> {
    let current = first_of_month(today);

    (0..count)
        .rev()
        .map(|back| {
            let start = current - Months::new(back);
            let end = start + Months::new(1) - Duration::days(1);
            MonthSpan {
                label: start.format("%b %Y").to_string(),
                window: DateWindow { start, end },
            }
        })
        .collect()
}

/// First day of the month containing `date`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month; the fallback is unreachable.
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_window() {
        let w = DateWindow::parse("2026-08-01", "2026-08-30").unwrap();
        assert_eq!(w.start, d(2026, 8, 1));
        assert_eq!(w.end, d(2026, 8, 30));

        assert_eq!(DateWindow::parse("2026-8-x", "2026-08-30"), Err(MalformedDate));
        assert_eq!(DateWindow::parse("08/01/2026", "08/30/2026"), Err(MalformedDate));
    }

    #[test]
    fn test_bounds_are_inclusive_day_edges() {
        let w = DateWindow::parse("2026-08-01", "2026-08-02").unwrap();
        let (start, end) = w.bounds();

        assert_eq!(start.date_naive(), d(2026, 8, 1));
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
        assert_eq!(end.date_naive(), d(2026, 8, 2));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn test_defaults() {
        let today = d(2026, 8, 30);
        assert_eq!(
            DateWindow::single_day(today),
            DateWindow { start: today, end: today }
        );
        assert_eq!(
            DateWindow::month_to_date(today),
            DateWindow { start: d(2026, 8, 1), end: today }
        );
        // On the 1st, month-to-date is a single-day window.
        assert_eq!(
            DateWindow::month_to_date(d(2026, 8, 1)),
            DateWindow { start: d(2026, 8, 1), end: d(2026, 8, 1) }
        );
    }

    #[test]
    fn test_trailing_months_count_and_order() {
        let spans = trailing_months(d(2026, 8, 30), 12);
        assert_eq!(spans.len(), 12);

        // Oldest first, ending with the current month.
        assert_eq!(spans[0].label, "Sep 2025");
        assert_eq!(spans[11].label, "Aug 2026");
        assert_eq!(spans[11].window.start, d(2026, 8, 1));
        assert_eq!(spans[11].window.end, d(2026, 8, 31));
    }

    #[test]
    fn test_trailing_months_exact_boundaries() {
        let spans = trailing_months(d(2024, 3, 15), 2);

        // Leap-year February ends on the 29th.
        assert_eq!(spans[0].window.start, d(2024, 2, 1));
        assert_eq!(spans[0].window.end, d(2024, 2, 29));
        assert_eq!(spans[0].label, "Feb 2024");

        assert_eq!(spans[1].window.start, d(2024, 3, 1));
        assert_eq!(spans[1].window.end, d(2024, 3, 31));
    }

    #[test]
    fn test_trailing_months_year_boundary() {
        let spans = trailing_months(d(2026, 1, 10), 3);
        assert_eq!(spans[0].label, "Nov 2025");
        assert_eq!(spans[1].label, "Dec 2025");
        assert_eq!(spans[1].window.end, d(2025, 12, 31));
        assert_eq!(spans[2].label, "Jan 2026");
    }
}
