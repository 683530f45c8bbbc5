//! Time-grid utilities shared by all calendar views.
//!
//! Pure functions; invalid inputs yield empty sequences rather than errors.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime};

/// Number of cells in the month grid: always six full weeks so adjacent
/// months render with stable geometry.
pub const MONTH_GRID_CELLS: i64 = 42;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The 7 dates of the week containing `reference`.
pub fn week_dates(reference: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = week_start(reference, first_day_of_week);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// The 42-cell month grid for the month containing `reference`.
///
/// Begins at the start of the calendar week containing the first of the
/// month, so leading and trailing days from adjacent months are included.
pub fn month_grid(reference: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    // with_day(1) cannot fail for an already-valid date
    let first_of_month = reference.with_day(1).unwrap_or(reference);
    let start = week_start(first_of_month, first_day_of_week);
    (0..MONTH_GRID_CELLS)
        .map(|i| start + Duration::days(i))
        .collect()
}

/// Ordered slot times between `start_hour` and `end_hour` (half-open),
/// stepping by `step_minutes`. Empty when the window is inverted or the
/// step is zero.
pub fn hour_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<NaiveTime> {
    if end_hour <= start_hour || step_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut minutes = start_hour.saturating_mul(60);
    let end_minutes = end_hour.min(24).saturating_mul(60);
    while minutes < end_minutes {
        if let Some(time) = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
            slots.push(time);
        }
        minutes += step_minutes;
    }
    slots
}

/// Calendar-day equality (year/month/day, not time).
pub fn is_same_day(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test]
    fn test_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_week_dates_are_consecutive() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let days = week_dates(date, 1);
        assert_eq!(days.len(), 7);
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(days.contains(&date));
    }

    #[test]
    fn test_month_grid_has_42_cells_and_covers_month() {
        // June 2025: the 1st is a Sunday
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let grid = month_grid(date, 1);
        assert_eq!(grid.len(), 42);
        // Week starts Monday, so the grid leads with May 26
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2025, 5, 26).unwrap());
        assert!(grid.contains(&NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(grid.contains(&NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()));
    }

    #[test]
    fn test_month_grid_starts_on_first_when_aligned() {
        // Sept 2025: the 1st is a Monday
        let date = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let grid = month_grid(date, 1);
        assert_eq!(grid[0], NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test_case(8, 22, 60 => 14; "hourly full schedule window")]
    #[test_case(8, 22, 30 => 28; "half hour steps")]
    #[test_case(0, 24, 60 => 24; "whole day")]
    #[test_case(10, 10, 60 => 0; "empty window")]
    #[test_case(22, 8, 60 => 0; "inverted window")]
    #[test_case(8, 22, 0 => 0; "zero step")]
    fn test_hour_slot_counts(start: u32, end: u32, step: u32) -> usize {
        hour_slots(start, end, step).len()
    }

    #[test]
    fn test_hour_slots_values() {
        let slots = hour_slots(8, 10, 30);
        let expected: Vec<NaiveTime> = [(8, 0), (8, 30), (9, 0), (9, 30)]
            .iter()
            .map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
            .collect();
        assert_eq!(slots, expected);
    }

    #[test]
    fn test_is_same_day_ignores_time() {
        let morning = Local.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
        let evening = Local.with_ymd_and_hms(2025, 1, 15, 21, 30, 0).unwrap();
        let next_day = Local.with_ymd_and_hms(2025, 1, 16, 8, 0, 0).unwrap();

        assert!(is_same_day(morning, evening));
        assert!(!is_same_day(morning, next_day));
    }
}
