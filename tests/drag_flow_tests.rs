//! End-to-end drag flows: pick up a class, hover targets, drop, and run the
//! commit protocol against a real schedule backend.

mod fixtures;

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use pretty_assertions::assert_eq;

use club_scheduler::scheduling::commit::{
    execute_drop, BlockReason, CommitOutcome, PendingMoves,
};
use club_scheduler::scheduling::drag::{DragPhase, DragSession, VisibleHours};
use club_scheduler::services::schedule::ScheduleService;

use fixtures::{class_on, court_a, court_b, studio};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
}

fn slot(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[tokio::test]
async fn dropping_on_an_occupied_court_is_blocked_with_the_conflict_listed() {
    let mut service = ScheduleService::new();
    let yoga_id = service.add(class_on(0, "Yoga", court_a(), 10, 9, 0, 60));
    service.add(class_on(0, "Pilates", court_a(), 12, 14, 0, 30));

    let snapshot = service.snapshot();
    let yoga = service.get(yoga_id).unwrap().clone();

    let mut session = DragSession::new();
    let mut pending = PendingMoves::new();
    session.start_drag(&yoga);
    session.update_drop_zone(&snapshot, date(12), Some(slot(14)), VisibleHours::default());

    let conflicts: Vec<&str> = session.conflicts().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(conflicts, vec!["Pilates"]);

    let mut mover_calls = 0;
    let outcome = execute_drop(&mut session, &mut pending, |_| {
        mover_calls += 1;
        async { true }
    })
    .await;

    assert_eq!(outcome, CommitOutcome::Blocked(BlockReason::InvalidTarget));
    assert_eq!(mover_calls, 0);
    // The blocked drop is never snapped to a nearby free slot
    assert_eq!(session.phase(), DragPhase::Dragging);
    assert_eq!(service.snapshot(), snapshot);
}

#[tokio::test]
async fn dropping_on_a_free_slot_commits_through_the_backend() {
    let mut service = ScheduleService::new();
    let padel_id = service.add(class_on(0, "Padel Intro", court_b(), 10, 14, 0, 60));

    let snapshot = service.snapshot();
    let padel = service.get(padel_id).unwrap().clone();

    let mut session = DragSession::new();
    let mut pending = PendingMoves::new();
    session.start_drag(&padel);
    session.update_drop_zone(&snapshot, date(10), Some(slot(15)), VisibleHours::default());

    let outcome = execute_drop(&mut session, &mut pending, |plan| {
        let confirmed = service
            .apply_move(plan.event.id.unwrap(), plan.new_start, plan.new_end)
            .is_ok();
        async move { confirmed }
    })
    .await;

    assert!(matches!(outcome, CommitOutcome::Committed(_)));
    assert_eq!(session.phase(), DragPhase::Idle);
    assert!(pending.is_empty());

    let moved = service.get(padel_id).unwrap();
    assert_eq!(moved.start, Local.with_ymd_and_hms(2025, 4, 10, 15, 0, 0).unwrap());
    assert_eq!(moved.end, Local.with_ymd_and_hms(2025, 4, 10, 16, 0, 0).unwrap());
}

#[tokio::test]
async fn month_drop_keeps_the_time_of_day() {
    let mut service = ScheduleService::new();
    let yoga_id = service.add(class_on(0, "Morning Yoga", studio(), 5, 9, 30, 60));

    let snapshot = service.snapshot();
    let yoga = service.get(yoga_id).unwrap().clone();

    let mut session = DragSession::new();
    let mut pending = PendingMoves::new();
    session.start_drag(&yoga);
    // Month-view hovers carry no slot
    session.update_drop_zone(&snapshot, date(20), None, VisibleHours::default());

    let outcome = execute_drop(&mut session, &mut pending, |plan| {
        let confirmed = service
            .apply_move(plan.event.id.unwrap(), plan.new_start, plan.new_end)
            .is_ok();
        async move { confirmed }
    })
    .await;

    assert!(matches!(outcome, CommitOutcome::Committed(_)));
    let moved = service.get(yoga_id).unwrap();
    assert_eq!(moved.start, Local.with_ymd_and_hms(2025, 4, 20, 9, 30, 0).unwrap());
    assert_eq!(moved.duration(), chrono::Duration::hours(1));
}

#[tokio::test]
async fn rejected_move_leaves_the_schedule_untouched() {
    let mut service = ScheduleService::new();
    let yoga_id = service.add(class_on(0, "Yoga", court_a(), 10, 9, 0, 60));
    service.add(class_on(0, "Ladder Match", court_a(), 12, 14, 0, 120));

    // The drag sees a stale snapshot without the ladder match, so the hover
    // looks valid; the backend still refuses the double-booking.
    let stale: Vec<_> = service
        .snapshot()
        .into_iter()
        .filter(|e| e.title == "Yoga")
        .collect();
    let before = service.snapshot();
    let yoga = service.get(yoga_id).unwrap().clone();

    let mut session = DragSession::new();
    let mut pending = PendingMoves::new();
    session.start_drag(&yoga);
    session.update_drop_zone(&stale, date(12), Some(slot(14)), VisibleHours::default());
    assert!(session.candidate().unwrap().is_valid);

    let outcome = execute_drop(&mut session, &mut pending, |plan| {
        let confirmed = service
            .apply_move(plan.event.id.unwrap(), plan.new_start, plan.new_end)
            .is_ok();
        async move { confirmed }
    })
    .await;

    assert!(matches!(outcome, CommitOutcome::Rejected(_)));
    assert_eq!(session.phase(), DragPhase::Idle);
    assert!(pending.is_empty());
    assert_eq!(service.snapshot(), before);
}

#[tokio::test]
async fn a_class_with_a_move_in_flight_cannot_be_committed_again() {
    let mut service = ScheduleService::new();
    let yoga_id = service.add(class_on(0, "Yoga", court_a(), 10, 9, 0, 60));

    let snapshot = service.snapshot();
    let yoga = service.get(yoga_id).unwrap().clone();

    let mut session = DragSession::new();
    let mut pending = PendingMoves::new();
    pending.begin(yoga_id);

    session.start_drag(&yoga);
    session.update_drop_zone(&snapshot, date(12), Some(slot(10)), VisibleHours::default());

    let outcome = execute_drop(&mut session, &mut pending, |_| async { true }).await;

    assert_eq!(outcome, CommitOutcome::Blocked(BlockReason::MoveInFlight));
    assert_eq!(service.snapshot(), snapshot);
}
