#![allow(dead_code)]
//! Shared builders for integration tests.

use chrono::{Duration, Local, TimeZone};

use club_scheduler::models::court::{Court, CourtKind};
use club_scheduler::models::event::{ClassEvent, ClassType};
use club_scheduler::models::instructor::Instructor;

pub fn court_a() -> Court {
    Court::new(1, "Court A", CourtKind::Tennis)
}

pub fn court_b() -> Court {
    Court::new(2, "Court B", CourtKind::Padel)
}

pub fn studio() -> Court {
    Court::new(3, "Studio 1", CourtKind::Studio)
}

pub fn ana() -> Instructor {
    Instructor::new(1, "Ana Duarte")
}

/// A class in April 2025, well clear of DST transitions.
pub fn class_on(
    id: i64,
    title: &str,
    court: Court,
    day: u32,
    hour: u32,
    minute: u32,
    duration_minutes: i64,
) -> ClassEvent {
    let start = Local.with_ymd_and_hms(2025, 4, day, hour, minute, 0).unwrap();
    let mut event = ClassEvent::builder()
        .title(title)
        .start(start)
        .end(start + Duration::minutes(duration_minutes))
        .court(court)
        .instructor(ana())
        .class_type(ClassType::Tennis)
        .build()
        .unwrap();
    event.id = Some(id);
    event
}
