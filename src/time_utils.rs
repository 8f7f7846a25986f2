// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shared helpers for calendar arithmetic.

use chrono::{Months, NaiveDate, Utc};

/// Advance `date` by whole calendar months, clamping to the last day of
/// the target month when the day does not exist there.
///
/// Returns `None` only when the result falls outside chrono's range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(ymd(2025, 1, 31), 1), Some(ymd(2025, 2, 28)));
        assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2025, 8, 31), 1), Some(ymd(2025, 9, 30)));
    }

    #[test]
    fn test_add_months_crosses_year() {
        assert_eq!(add_months(ymd(2025, 11, 15), 3), Some(ymd(2026, 2, 15)));
        assert_eq!(add_months(ymd(2025, 3, 15), 12), Some(ymd(2026, 3, 15)));
    }

    #[test]
    fn test_today_is_utc_date() {
        assert_eq!(today_utc(), Utc::now().date_naive());
    }
}
