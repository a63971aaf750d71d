use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One slot of a month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCell {
    /// Padding before the 1st so that it lands under its weekday
    Blank,
    Day(NaiveDate),
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Blank => None,
            DayCell::Day(date) => Some(*date),
        }
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Length of the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Moves `delta` months away from `anchor`, always landing on the 1st.
///
/// Starting from the 1st means Jan 31 + 1 gives Feb 1 instead of overflowing
/// into March. Out-of-range results leave the anchor's month unchanged.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(anchor);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

/// Builds the cells of the month containing `anchor`: one blank per weekday
/// before the 1st (Sunday = 0), then every day of the month. No trailing
/// padding.
pub fn month_grid(anchor: NaiveDate) -> Vec<DayCell> {
    let first = first_of_month(anchor);
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(first) as usize;

    let mut cells = Vec::with_capacity(leading_blanks + day_count);
    cells.extend(std::iter::repeat(DayCell::Blank).take(leading_blanks));
    cells.extend(first.iter_days().take(day_count).map(DayCell::Day));
    cells
}

/// `February 2024`
pub fn month_label(anchor: NaiveDate) -> String {
    anchor.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_february_grid() {
        // 2024-02-01 is a Thursday
        let cells = month_grid(ymd(2024, 2, 17));
        assert_eq!(cells.len(), 32);
        assert!(cells[..4].iter().all(|c| *c == DayCell::Blank));
        assert_eq!(cells[4], DayCell::Day(ymd(2024, 2, 1)));
        assert_eq!(cells.last().copied(), Some(DayCell::Day(ymd(2024, 2, 29))));
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_blanks() {
        // 2024-09-01 is a Sunday
        let cells = month_grid(ymd(2024, 9, 1));
        assert_eq!(cells.len(), 30);
        assert_eq!(cells[0], DayCell::Day(ymd(2024, 9, 1)));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2000, 2, 1)), 29);
        assert_eq!(days_in_month(ymd(1900, 2, 28)), 28);
        assert_eq!(days_in_month(ymd(2024, 4, 30)), 30);
        assert_eq!(days_in_month(ymd(2024, 12, 31)), 31);
    }

    #[test]
    fn test_shift_month_never_overflows() {
        assert_eq!(shift_month(ymd(2024, 1, 31), 1), ymd(2024, 2, 1));
        assert_eq!(shift_month(ymd(2024, 1, 15), -1), ymd(2023, 12, 1));
        assert_eq!(shift_month(ymd(2024, 3, 31), 0), ymd(2024, 3, 1));
    }

    #[test]
    fn test_twelve_steps_forward_wraps_the_year() {
        let mut anchor = ymd(2024, 3, 20);
        for _ in 0..12 {
            anchor = shift_month(anchor, 1);
            assert_eq!(anchor.day(), 1);
        }
        assert_eq!(anchor, ymd(2025, 3, 1));
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(ymd(2024, 2, 9)), "February 2024");
    }
}
