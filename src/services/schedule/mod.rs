//! Schedule service: the single owner of the mutable class list.
//!
//! Views receive immutable snapshots and request changes only through the
//! move callback; nothing else mutates the list. `apply_move` re-validates
//! on the "server" side, so a stale client snapshot cannot smuggle in a
//! double-booking.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use thiserror::Error;

use crate::models::court::{Court, CourtKind};
use crate::models::event::{Attendance, ClassEvent, ClassStatus, ClassType, ClientRef};
use crate::models::instructor::Instructor;
use crate::scheduling::conflict::detect_conflicts;
use crate::scheduling::grid::week_start;

/// Why a move was refused by the schedule owner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("class {0} not found")]
    UnknownEvent(i64),
    #[error("a cancelled class cannot be rescheduled")]
    Cancelled,
    #[error("court '{court}' is already booked at that time")]
    CourtBusy { court: String },
    #[error("invalid target time")]
    InvalidTimes,
}

/// In-memory schedule backing the demo app. Stands in for the club's API;
/// the engine only ever sees it through the boolean move callback.
#[derive(Debug, Default)]
pub struct ScheduleService {
    events: Vec<ClassEvent>,
    courts: Vec<Court>,
    instructors: Vec<Instructor>,
    next_id: i64,
}

impl ScheduleService {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            courts: Vec::new(),
            instructors: Vec::new(),
            next_id: 1,
        }
    }

    /// A schedule pre-populated with the demo club's courts, instructors and
    /// a week of classes around `reference`.
    pub fn with_demo_data(reference: NaiveDate) -> Self {
        let mut service = Self::new();

        let court_a = Court::new(1, "Court A", CourtKind::Tennis);
        let court_b = Court::new(2, "Court B", CourtKind::Padel);
        let studio = Court::new(3, "Studio 1", CourtKind::Studio);
        service.courts = vec![court_a.clone(), court_b.clone(), studio.clone()];

        let ana = Instructor::new(1, "Ana Duarte").with_email("ana@club.example");
        let marco = Instructor::new(2, "Marco Silva").with_email("marco@club.example");
        let iris = Instructor::new(3, "Iris Kovač");
        service.instructors = vec![ana.clone(), marco.clone(), iris.clone()];

        let monday = week_start(reference, 1);
        let mut seed = |title: &str,
                        day_offset: i64,
                        hour: u32,
                        minutes: i64,
                        court: &Court,
                        instructor: &Instructor,
                        class_type: ClassType,
                        attendance: Attendance| {
            let date = monday + Duration::days(day_offset);
            let Some(start) = date
                .and_hms_opt(hour, 0, 0)
                .and_then(|dt| Local.from_local_datetime(&dt).single())
            else {
                return;
            };
            match ClassEvent::builder()
                .title(title)
                .start(start)
                .end(start + Duration::minutes(minutes))
                .court(court.clone())
                .instructor(instructor.clone())
                .class_type(class_type)
                .price(18.0)
                .attendance(attendance)
                .build()
            {
                Ok(event) => {
                    service.add(event);
                }
                Err(err) => log::warn!("skipping demo class '{}': {}", title, err),
            }
        };

        seed(
            "Morning Yoga",
            0,
            9,
            60,
            &studio,
            &iris,
            ClassType::Yoga,
            Attendance::Group(vec![ClientRef::new(1, "Mia"), ClientRef::new(2, "Leo")]),
        );
        seed(
            "Tennis Drills",
            0,
            10,
            90,
            &court_a,
            &ana,
            ClassType::Tennis,
            Attendance::Single(ClientRef::new(3, "Sam")),
        );
        seed(
            "Padel Intro",
            1,
            17,
            60,
            &court_b,
            &marco,
            ClassType::Padel,
            Attendance::Unassigned,
        );
        seed(
            "Pilates",
            2,
            10,
            30,
            &studio,
            &iris,
            ClassType::Pilates,
            Attendance::Group(vec![ClientRef::new(4, "Noor")]),
        );
        seed(
            "Junior Tennis",
            3,
            15,
            60,
            &court_a,
            &ana,
            ClassType::Junior,
            Attendance::Group(vec![
                ClientRef::new(5, "Ada"),
                ClientRef::new(6, "Ben"),
                ClientRef::new(7, "Caro"),
            ]),
        );
        seed(
            "Evening Fitness",
            4,
            19,
            60,
            &studio,
            &marco,
            ClassType::Fitness,
            Attendance::Unassigned,
        );

        service
    }

    pub fn events(&self) -> &[ClassEvent] {
        &self.events
    }

    /// Immutable snapshot handed to the views each frame.
    pub fn snapshot(&self) -> Vec<ClassEvent> {
        self.events.clone()
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    /// Insert a class, assigning it an id.
    pub fn add(&mut self, mut event: ClassEvent) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        event.id = Some(id);
        self.events.push(event);
        id
    }

    pub fn get(&self, event_id: i64) -> Option<&ClassEvent> {
        self.events.iter().find(|e| e.id == Some(event_id))
    }

    /// Persist a move, re-validating against the authoritative list.
    ///
    /// Returns the updated class on success. On any error the list is left
    /// exactly as it was.
    pub fn apply_move(
        &mut self,
        event_id: i64,
        new_start: DateTime<Local>,
        new_end: DateTime<Local>,
    ) -> Result<ClassEvent, MoveError> {
        if new_end <= new_start {
            return Err(MoveError::InvalidTimes);
        }

        let current = self
            .get(event_id)
            .cloned()
            .ok_or(MoveError::UnknownEvent(event_id))?;

        if current.status == ClassStatus::Cancelled {
            return Err(MoveError::Cancelled);
        }

        if !detect_conflicts(&self.events, &current, new_start, new_end).is_empty() {
            return Err(MoveError::CourtBusy {
                court: current.court.name.clone(),
            });
        }

        // Validation passed; now mutate.
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == Some(event_id))
            .ok_or(MoveError::UnknownEvent(event_id))?;
        event.start = new_start;
        event.end = new_end;
        Ok(event.clone())
    }
}
