//! # Request Handlers
//!
//! One module per view area, mirroring the route table. Handlers validate
//! input with `dukaan-core`, call `dukaan-db` repositories, and answer in
//! JSON; errors convert through `ApiError`.
//!
//! ## Date-window resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ?start_date=&end_date=       listing routes      reporting routes     │
//! │                               (sales, easypaisa)  (dashboard, etc.)     │
//! │                                                                         │
//! │  both absent              →   route default       month-to-date         │
//! │  both valid               →   parsed window       parsed window         │
//! │  malformed                →   warning + NO        warning + fall back   │
//! │                               filter at all       to the default        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Malformed dates are never fatal on GET routes; the response carries a
//! `warning` string instead.

pub mod auth;
pub mod easypaisa;
pub mod expenses;
pub mod inventory;
pub mod reports;
pub mod sales;

use dukaan_core::reporting::MalformedDate;
use dukaan_core::DateWindow;

/// Shared query-parameter shape for date-windowed GET routes.
#[derive(Debug, Default, serde::Deserialize)]
pub struct WindowQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolves the window for listing routes.
///
/// A filter applies only when both parameters arrive; malformed input
/// drops the filter entirely so no rows silently disappear.
pub(crate) fn listing_window(
    query: &WindowQuery,
    default: DateWindow,
) -> (Option<DateWindow>, Option<String>) {
    match (
        non_empty(query.start_date.as_deref()),
        non_empty(query.end_date.as_deref()),
    ) {
        (Some(start), Some(end)) => match DateWindow::parse(start, end) {
            Ok(window) => (Some(window), None),
            Err(MalformedDate) => (None, Some(MalformedDate.to_string())),
        },
        _ => (Some(default), None),
    }
}

/// Resolves the window for reporting routes.
///
/// Reports always need a window, so malformed input falls back to the
/// route's default instead of dropping the filter.
pub(crate) fn reporting_window(
    query: &WindowQuery,
    default: DateWindow,
) -> (DateWindow, Option<String>) {
    match (
        non_empty(query.start_date.as_deref()),
        non_empty(query.end_date.as_deref()),
    ) {
        (Some(start), Some(end)) => match DateWindow::parse(start, end) {
            Ok(window) => (window, None),
            Err(MalformedDate) => (default, Some(MalformedDate.to_string())),
        },
        _ => (default, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn query(start: &str, end: &str) -> WindowQuery {
        WindowQuery {
            start_date: Some(start.to_string()),
            end_date: Some(end.to_string()),
        }
    }

    fn default_window() -> DateWindow {
        DateWindow::single_day(NaiveDate::from_ymd_opt(2026, 8, 30).unwrap())
    }

    #[test]
    fn test_listing_window_resolution() {
        let (window, warning) = listing_window(&WindowQuery::default(), default_window());
        assert_eq!(window, Some(default_window()));
        assert!(warning.is_none());

        let (window, warning) = listing_window(&query("2026-08-01", "2026-08-15"), default_window());
        assert_eq!(window.unwrap().end, NaiveDate::from_ymd_opt(2026, 8, 15).unwrap());
        assert!(warning.is_none());

        // Malformed input drops the filter, with a warning.
        let (window, warning) = listing_window(&query("08/01/2026", "2026-08-15"), default_window());
        assert!(window.is_none());
        assert!(warning.unwrap().contains("YYYY-MM-DD"));

        // A lone parameter behaves like none at all.
        let lone = WindowQuery {
            start_date: Some("2026-08-01".to_string()),
            end_date: None,
        };
        let (window, warning) = listing_window(&lone, default_window());
        assert_eq!(window, Some(default_window()));
        assert!(warning.is_none());
    }

    #[test]
    fn test_reporting_window_falls_back_on_malformed() {
        let (window, warning) = reporting_window(&query("garbage", "also"), default_window());
        assert_eq!(window, default_window());
        assert!(warning.is_some());

        let (window, warning) = reporting_window(&query("2026-08-01", "2026-08-15"), default_window());
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert!(warning.is_none());
    }
}
