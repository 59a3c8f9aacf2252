use serde::Deserialize;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::error::ValidationError;

/// Trailing window for history queries, expressed in months ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum MonthsWindow {
    Months(u32),
    All,
}

impl TryFrom<String> for MonthsWindow {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match value.parse::<u32>() {
            Ok(n @ (1 | 3 | 6 | 12)) => Ok(Self::Months(n)),
            _ => Err(format!("invalid months window: {value}")),
        }
    }
}

impl MonthsWindow {
    /// Inclusive lower bound of the window, or `None` for all-time.
    pub fn start(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Self::All => None,
            Self::Months(n) => {
                let start = months_back(now.date(), n);
                Some(start.midnight().assume_utc())
            }
        }
    }
}

/// Calendar date `months` months before `from`, clamping the day of month
/// (e.g. Mar 31 minus one month is Feb 28/29).
pub fn months_back(from: Date, months: u32) -> Date {
    let total = from.year() * 12 + i32::from(from.month() as u8) - 1 - months as i32;
    let year = total.div_euclid(12);
    let month = Month::try_from((total.rem_euclid(12) + 1) as u8).unwrap_or(Month::January);
    let day = from.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).unwrap_or(from)
}

/// Parses a `YYYY-MM-DD` query parameter.
pub fn parse_day_param(s: &str) -> Result<Date, ValidationError> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|_| ValidationError::BadDate)
}

/// Half-open UTC bounds of one calendar day.
pub fn day_bounds(date: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_utc();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn months_back_simple() {
        assert_eq!(months_back(date!(2026 - 08 - 15), 3), date!(2026 - 05 - 15));
    }

    #[test]
    fn months_back_crosses_year_boundary() {
        assert_eq!(months_back(date!(2026 - 02 - 10), 6), date!(2025 - 08 - 10));
        assert_eq!(months_back(date!(2026 - 01 - 01), 12), date!(2025 - 01 - 01));
    }

    #[test]
    fn months_back_clamps_day_of_month() {
        assert_eq!(months_back(date!(2026 - 03 - 31), 1), date!(2026 - 02 - 28));
        assert_eq!(months_back(date!(2024 - 03 - 31), 1), date!(2024 - 02 - 29));
        assert_eq!(months_back(date!(2026 - 07 - 31), 1), date!(2026 - 06 - 30));
    }

    #[test]
    fn window_parses_allowed_values() {
        assert_eq!(
            MonthsWindow::try_from("3".to_string()),
            Ok(MonthsWindow::Months(3))
        );
        assert_eq!(
            MonthsWindow::try_from("all".to_string()),
            Ok(MonthsWindow::All)
        );
        assert!(MonthsWindow::try_from("5".to_string()).is_err());
        assert!(MonthsWindow::try_from("-1".to_string()).is_err());
    }

    #[test]
    fn all_time_window_has_no_start() {
        assert_eq!(MonthsWindow::All.start(OffsetDateTime::now_utc()), None);
    }

    #[test]
    fn day_param_parses_iso_dates_only() {
        assert_eq!(parse_day_param("2026-08-28"), Ok(date!(2026 - 08 - 28)));
        assert!(parse_day_param("28/08/2026").is_err());
        assert!(parse_day_param("today").is_err());
    }

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let (start, end) = day_bounds(date!(2026 - 08 - 28));
        assert_eq!(end - start, Duration::days(1));
        assert_eq!(start.date(), date!(2026 - 08 - 28));
    }
}
