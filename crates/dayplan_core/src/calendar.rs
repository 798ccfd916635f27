//! Date-range membership filters for calendar and home views.
//!
//! # Responsibility
//! - Decide whether a schedule belongs to a day, week or month view.
//! - Keep all filters pure functions over intervals, independent of any
//!   rendering concern.
//!
//! # Invariants
//! - Day membership truncates both schedule endpoints and the query date
//!   to midnight; time-of-day components never affect the answer.
//! - Week/month windows are half-open `[from, to)` date ranges.

use crate::model::schedule::Schedule;
use chrono::{DateTime, Datelike, Duration, NaiveDate};

/// Half-open date window `[from, to)` used for week/month overlap tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }
}

/// Calendar week containing `date`, starting on Sunday.
pub fn week_of(date: NaiveDate) -> DateWindow {
    let from = date - Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    DateWindow {
        from,
        to: from + Duration::days(7),
    }
}

/// Calendar month containing `date`.
pub fn month_of(date: NaiveDate) -> DateWindow {
    let from = date.with_day(1).unwrap_or(date);
    let to = if from.month() == 12 {
        NaiveDate::from_ymd_opt(from.year() + 1, 1, 1).unwrap_or(from)
    } else {
        NaiveDate::from_ymd_opt(from.year(), from.month() + 1, 1).unwrap_or(from)
    };
    DateWindow { from, to }
}

/// True when `date` falls within the schedule's day span, inclusive on
/// both ends after midnight truncation.
pub fn occurs_on(schedule: &Schedule, date: NaiveDate) -> bool {
    match (date_of_ms(schedule.start_at), date_of_ms(schedule.end_at)) {
        (Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    }
}

/// True when the schedule starts on exactly `date`.
///
/// The home view's "today" list keys off the start day only.
pub fn starts_on(schedule: &Schedule, date: NaiveDate) -> bool {
    date_of_ms(schedule.start_at) == Some(date)
}

/// True when the schedule's day span overlaps the window.
pub fn overlaps_window(schedule: &Schedule, window: &DateWindow) -> bool {
    match (date_of_ms(schedule.start_at), date_of_ms(schedule.end_at)) {
        (Some(start), Some(end)) => start < window.to && end >= window.from,
        _ => false,
    }
}

fn date_of_ms(ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::{month_of, week_of, DateWindow};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn week_window_starts_on_sunday() {
        // 2024-01-10 is a Wednesday.
        let window = week_of(date(2024, 1, 10));
        assert_eq!(window.from, date(2024, 1, 7));
        assert_eq!(window.to, date(2024, 1, 14));
        assert!(window.contains(date(2024, 1, 13)));
        assert!(!window.contains(date(2024, 1, 14)));
    }

    #[test]
    fn month_window_covers_whole_month_half_open() {
        let window = month_of(date(2024, 2, 15));
        assert_eq!(
            window,
            DateWindow {
                from: date(2024, 2, 1),
                to: date(2024, 3, 1),
            }
        );
    }

    #[test]
    fn december_month_window_rolls_into_next_year() {
        let window = month_of(date(2023, 12, 31));
        assert_eq!(window.to, date(2024, 1, 1));
    }
}
