use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{Result, StatsError};

/// En dash used between the two ends of a range label.
pub const RANGE_SEPARATOR: char = '\u{2013}';

/// Parse a `DD.MM.YY` sample date. Two-digit years are `2000 + YY`.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    let invalid = || StatsError::InvalidDateFormat {
        input: input.to_string(),
    };

    let parts = input.trim().split('.').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let field = |s: &str| -> Result<u32> {
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u32>().map_err(|_| invalid())
    };

    let day = field(parts[0])?;
    let month = field(parts[1])?;
    let year = 2000 + field(parts[2])? as i32;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

pub fn format_day(date: NaiveDate) -> String {
    date.format("%d.%m.%y").to_string()
}

/// `MM.YY` label of the month containing `date`.
pub fn format_month(date: NaiveDate) -> String {
    format!("{:02}.{:02}", date.month(), date.year().rem_euclid(100))
}

/// `DD.MM.YY–DD.MM.YY` label of the inclusive range.
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}{}{}", format_day(start), RANGE_SEPARATOR, format_day(end))
}

/// Label of the 7-day window starting at `start`.
pub fn format_week(start: NaiveDate) -> String {
    format_range(start, start + Duration::days(6))
}

/// First day of the month `offset` months after the month containing `date`.
pub fn month_start_after(date: NaiveDate, offset: u32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + offset as i32;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_two_digit_years_into_this_century() {
        assert_eq!(parse_day("01.01.24").unwrap(), ymd(2024, 1, 1));
        assert_eq!(parse_day("31.12.99").unwrap(), ymd(2099, 12, 31));
        assert_eq!(parse_day(" 7.3.25 ").unwrap(), ymd(2025, 3, 7));
    }

    #[test]
    fn rejects_malformed_dates() {
        for input in [
            "", "01.01", "01.01.24.00", "01/01/24", "aa.01.24", "01.-1.24", "32.01.24",
            "29.02.23", "01.13.24", "001.01.24", "01..24",
        ] {
            assert_eq!(
                parse_day(input),
                Err(StatsError::InvalidDateFormat {
                    input: input.to_string()
                }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn leap_day_is_valid_in_leap_years() {
        assert_eq!(parse_day("29.02.24").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn labels() {
        assert_eq!(format_day(ymd(2024, 1, 8)), "08.01.24");
        assert_eq!(format_month(ymd(2024, 3, 15)), "03.24");
        assert_eq!(format_week(ymd(2024, 1, 1)), "01.01.24\u{2013}07.01.24");
        assert_eq!(format_week(ymd(2023, 12, 29)), "29.12.23\u{2013}04.01.24");
    }

    #[test]
    fn month_offsets_roll_over_years() {
        assert_eq!(month_start_after(ymd(2026, 10, 17), 1), Some(ymd(2026, 11, 1)));
        assert_eq!(month_start_after(ymd(2026, 11, 30), 2), Some(ymd(2027, 1, 1)));
        assert_eq!(month_start_after(ymd(2026, 12, 31), 0), Some(ymd(2026, 12, 1)));
    }
}
