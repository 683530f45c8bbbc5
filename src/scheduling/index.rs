//! Event index: look up the classes occupying a day or a time slot.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::event::ClassEvent;

/// Start minutes the week/day grids recognize. A class starting off-boundary
/// (for example 09:15) is shown in no slot bucket; this snapping policy is
/// intentional and relied upon by the grid views.
pub const BOUNDARY_MINUTES: [u32; 2] = [0, 30];

/// Classes whose start falls on `date` (calendar-day comparison), in input
/// order.
pub fn events_for_date<'a>(events: &'a [ClassEvent], date: NaiveDate) -> Vec<&'a ClassEvent> {
    events
        .iter()
        .filter(|e| e.start.date_naive() == date)
        .collect()
}

/// Classes that belong in the grid cell for `date` at `slot`.
///
/// Matches classes starting in the slot's hour whose minute is one of
/// [`BOUNDARY_MINUTES`].
pub fn events_for_slot<'a>(
    events: &'a [ClassEvent],
    date: NaiveDate,
    slot: NaiveTime,
) -> Vec<&'a ClassEvent> {
    events
        .iter()
        .filter(|e| {
            e.start.date_naive() == date
                && e.start.hour() == slot.hour()
                && BOUNDARY_MINUTES.contains(&e.start.minute())
        })
        .collect()
}
