//! Detect double-bookings on a court.
//!
//! Two bookings conflict when they share a court and their `[start, end)`
//! intervals strictly overlap. Adjacent classes (one ending exactly when the
//! next starts) are NOT conflicts.

use chrono::{DateTime, Local};

use crate::models::event::ClassEvent;

/// Every class in `events` (other than `candidate` itself) on the candidate's
/// court whose interval overlaps `[new_start, new_end)`.
///
/// Overlap is `existing.start < new_end && existing.end > new_start`.
/// The candidate is excluded by id; classes without ids are never treated as
/// the candidate. Linear in the visible event set, which is all the current
/// views need per hover.
pub fn detect_conflicts<'a>(
    events: &'a [ClassEvent],
    candidate: &ClassEvent,
    new_start: DateTime<Local>,
    new_end: DateTime<Local>,
) -> Vec<&'a ClassEvent> {
    events
        .iter()
        .filter(|existing| {
            if existing.id.is_some() && existing.id == candidate.id {
                return false;
            }
            existing.court.id == candidate.court.id
                && existing.start < new_end
                && existing.end > new_start
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::court::{Court, CourtKind};
    use crate::models::instructor::Instructor;
    use chrono::{Duration, TimeZone};

    fn court_a() -> Court {
        Court::new(1, "Court A", CourtKind::Tennis)
    }

    fn court_b() -> Court {
        Court::new(2, "Court B", CourtKind::Padel)
    }

    fn class(id: i64, title: &str, court: Court, hour: u32, minutes: i64) -> ClassEvent {
        let start = Local.with_ymd_and_hms(2025, 4, 10, hour, 0, 0).unwrap();
        let mut event = ClassEvent::new(
            title,
            start,
            start + Duration::minutes(minutes),
            court,
            Instructor::new(1, "Ana"),
        )
        .unwrap();
        event.id = Some(id);
        event
    }

    #[test]
    fn test_overlap_on_same_court_is_conflict() {
        let existing = class(1, "Pilates", court_a(), 10, 30);
        let candidate = class(2, "Yoga", court_a(), 9, 60);

        let new_start = Local.with_ymd_and_hms(2025, 4, 10, 10, 0, 0).unwrap();
        let conflicts = detect_conflicts(
            std::slice::from_ref(&existing),
            &candidate,
            new_start,
            new_start + Duration::hours(1),
        );

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].title, "Pilates");
    }

    #[test]
    fn test_other_court_is_not_conflict() {
        let existing = class(1, "Pilates", court_b(), 10, 30);
        let candidate = class(2, "Yoga", court_a(), 9, 60);

        let new_start = Local.with_ymd_and_hms(2025, 4, 10, 10, 0, 0).unwrap();
        let conflicts = detect_conflicts(
            std::slice::from_ref(&existing),
            &candidate,
            new_start,
            new_start + Duration::hours(1),
        );

        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_adjacent_intervals_do_not_conflict() {
        let existing = class(1, "Pilates", court_a(), 10, 60);
        let candidate = class(2, "Yoga", court_a(), 8, 60);

        // Candidate ends exactly when the existing class starts
        let new_start = Local.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap();
        let conflicts = detect_conflicts(
            std::slice::from_ref(&existing),
            &candidate,
            new_start,
            new_start + Duration::hours(1),
        );

        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_candidate_is_excluded_from_its_own_conflicts() {
        let candidate = class(2, "Yoga", court_a(), 10, 60);
        let events = vec![candidate.clone()];

        let conflicts = detect_conflicts(&events, &candidate, candidate.start, candidate.end);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_unsaved_classes_are_never_self() {
        let mut existing = class(1, "Pilates", court_a(), 10, 30);
        existing.id = None;
        let mut candidate = class(2, "Yoga", court_a(), 9, 60);
        candidate.id = None;

        let new_start = Local.with_ymd_and_hms(2025, 4, 10, 10, 0, 0).unwrap();
        let conflicts = detect_conflicts(
            std::slice::from_ref(&existing),
            &candidate,
            new_start,
            new_start + Duration::hours(1),
        );

        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = class(1, "A", court_a(), 10, 60);
        let b = class(2, "B", court_a(), 10, 30);

        let a_sees_b = !detect_conflicts(std::slice::from_ref(&b), &a, a.start, a.end).is_empty();
        let b_sees_a = !detect_conflicts(std::slice::from_ref(&a), &b, b.start, b.end).is_empty();
        assert_eq!(a_sees_b, b_sees_a);
        assert!(a_sees_b);
    }
}
