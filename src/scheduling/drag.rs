//! Drag session state machine.
//!
//! Tracks one in-progress reschedule gesture from pick-up, through hover
//! updates across candidate slots, to commit or cancel. The machine is
//! independent of any UI framework: views feed it dates/slots and read back
//! the candidate and conflict list to decide what to paint. It never touches
//! the shared event list itself; mutation happens only through the commit
//! protocol's move callback.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};

use crate::models::event::ClassEvent;
use crate::models::settings::Settings;
use crate::scheduling::conflict::detect_conflicts;

/// Visible schedule window for time-slotted views, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl VisibleHours {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.day_start_hour, settings.day_end_hour)
    }

    pub fn contains(&self, slot: NaiveTime) -> bool {
        let minutes = slot.hour() * 60 + slot.minute();
        self.start_hour * 60 <= minutes && minutes < self.end_hour * 60
    }
}

impl Default for VisibleHours {
    fn default() -> Self {
        Self::new(8, 22)
    }
}

/// Lifecycle phase of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    /// A drop was confirmed and its move callback is in flight.
    ConfirmPending,
}

/// The tentative drop target, recomputed wholesale on every hover.
///
/// Month-view candidates carry no slot; the move keeps the original
/// time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropCandidate {
    pub date: NaiveDate,
    pub slot: Option<NaiveTime>,
    pub is_valid: bool,
}

/// The payload of a confirmed drop, handed to the commit protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub event: ClassEvent,
    pub target_date: NaiveDate,
    pub target_slot: Option<NaiveTime>,
    pub new_start: DateTime<Local>,
    pub new_end: DateTime<Local>,
}

/// State machine for one drag gesture.
///
/// Invariant: the session is active (a drag or commit is underway) iff a
/// dragged event is held.
#[derive(Debug, Default)]
pub struct DragSession {
    phase: DragPhase,
    dragged: Option<ClassEvent>,
    candidate: Option<DropCandidate>,
    conflicts: Vec<ClassEvent>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// True while a drag or an in-flight commit holds an event.
    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<&ClassEvent> {
        self.dragged.as_ref()
    }

    pub fn candidate(&self) -> Option<&DropCandidate> {
        self.candidate.as_ref()
    }

    /// Classes that would be double-booked by the current candidate.
    pub fn conflicts(&self) -> &[ClassEvent] {
        &self.conflicts
    }

    /// Pick up an event. Returns false (and changes nothing) when a drag is
    /// already active; re-entrant drags are ignored, not errors.
    pub fn start_drag(&mut self, event: &ClassEvent) -> bool {
        if self.is_active() {
            log::debug!("ignoring drag start while a drag is active");
            return false;
        }

        self.phase = DragPhase::Dragging;
        self.dragged = Some(event.clone());
        self.candidate = None;
        self.conflicts.clear();
        true
    }

    /// Update the candidate drop zone from a hover. Only meaningful while
    /// dragging; hovers during `Idle` or `ConfirmPending` are ignored.
    ///
    /// The candidate span preserves the dragged event's duration: `slot`
    /// replaces the time-of-day for week/day views, `None` keeps the
    /// original time for month-view moves. The previous candidate and
    /// conflict list are replaced wholesale (last write wins).
    pub fn update_drop_zone(
        &mut self,
        events: &[ClassEvent],
        date: NaiveDate,
        slot: Option<NaiveTime>,
        window: VisibleHours,
    ) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        let Some(event) = self.dragged.clone() else {
            return;
        };

        let Some((new_start, new_end)) = span_for(&event, date, slot) else {
            // Nonexistent local time (DST gap): never a valid target.
            self.candidate = Some(DropCandidate {
                date,
                slot,
                is_valid: false,
            });
            self.conflicts.clear();
            return;
        };

        let conflicts: Vec<ClassEvent> = detect_conflicts(events, &event, new_start, new_end)
            .into_iter()
            .cloned()
            .collect();

        let in_window = slot.map_or(true, |s| window.contains(s));
        let is_valid = conflicts.is_empty() && in_window;

        self.candidate = Some(DropCandidate {
            date,
            slot,
            is_valid,
        });
        self.conflicts = conflicts;
    }

    /// The `[start, end)` the dragged event would occupy at the current
    /// candidate.
    pub fn proposed_span(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let event = self.dragged.as_ref()?;
        let candidate = self.candidate.as_ref()?;
        span_for(event, candidate.date, candidate.slot)
    }

    /// Drop without committing: back to `Idle`, discarding the candidate.
    /// Always succeeds and never touches the event list. Cannot cancel a
    /// commit that is already in flight.
    pub fn cancel_drag(&mut self) {
        if self.phase == DragPhase::ConfirmPending {
            return;
        }
        self.phase = DragPhase::Idle;
        self.dragged = None;
        self.candidate = None;
        self.conflicts.clear();
    }

    /// Pointer released without a drop target; same effect as cancelling.
    pub fn end_drag(&mut self) {
        self.cancel_drag();
    }

    /// Confirm the drop: `Some(MovePlan)` only when a valid candidate
    /// exists, transitioning to `ConfirmPending`. An invalid target is never
    /// auto-corrected to a nearby valid one; the caller gets `None` and must
    /// block the commit.
    pub fn begin_commit(&mut self) -> Option<MovePlan> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        let candidate = self.candidate?;
        if !candidate.is_valid {
            return None;
        }
        let event = self.dragged.clone()?;
        let (new_start, new_end) = span_for(&event, candidate.date, candidate.slot)?;

        self.phase = DragPhase::ConfirmPending;
        Some(MovePlan {
            event,
            target_date: candidate.date,
            target_slot: candidate.slot,
            new_start,
            new_end,
        })
    }

    /// The commit resolved (either way): back to `Idle`.
    pub fn finish_commit(&mut self) {
        self.phase = DragPhase::Idle;
        self.dragged = None;
        self.candidate = None;
        self.conflicts.clear();
    }
}

/// Duration-preserving span for `event` landing on `date`, taking the
/// time-of-day from `slot` when given. `None` when the local time does not
/// exist (DST gap).
fn span_for(
    event: &ClassEvent,
    date: NaiveDate,
    slot: Option<NaiveTime>,
) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let time = slot.unwrap_or_else(|| event.start.time());
    let new_start = date.and_time(time).and_local_timezone(Local).single()?;
    Some((new_start, new_start + event.duration()))
}
