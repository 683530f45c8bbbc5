//! Optimistic commit protocol for confirmed drops.
//!
//! The engine never persists anything itself. A confirmed drop is handed to
//! a caller-supplied asynchronous move callback; `false` means the
//! persistence layer rejected the move and the shared event list must be
//! left untouched. The session is back in `Idle` once the callback
//! resolves, whatever the outcome, and the engine never retries on its own.

use std::collections::HashSet;
use std::future::Future;

use crate::scheduling::drag::{DragSession, MovePlan};

/// Why a drop request did not reach the move callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Nothing hovered yet; there is no target to commit.
    NoCandidate,
    /// The hovered target has conflicts or lies outside the visible window.
    InvalidTarget,
    /// A previous move of the same class is still awaiting confirmation.
    MoveInFlight,
}

/// Result of [`execute_drop`].
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The move callback confirmed the new times.
    Committed(MovePlan),
    /// The move callback reported failure; the event list is unchanged.
    Rejected(MovePlan),
    /// The drop never reached the callback.
    Blocked(BlockReason),
}

/// Tracks classes with an in-flight move: at most one outstanding move per
/// event id. Other classes stay draggable while one is pending.
#[derive(Debug, Default)]
pub struct PendingMoves {
    in_flight: HashSet<i64>,
}

impl PendingMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an event id for an outgoing move. False when already claimed.
    pub fn begin(&mut self, event_id: i64) -> bool {
        self.in_flight.insert(event_id)
    }

    pub fn finish(&mut self, event_id: i64) {
        self.in_flight.remove(&event_id);
    }

    pub fn is_pending(&self, event_id: i64) -> bool {
        self.in_flight.contains(&event_id)
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}

/// Commit the session's current candidate through `mover`.
///
/// No-op (the callback is never invoked) when there is no candidate, the
/// candidate is invalid, or a move for the same class is already in flight.
/// Otherwise the callback runs exactly once; it must report failure as
/// `false` rather than panicking. On completion the session is `Idle` and
/// the event id is released.
pub async fn execute_drop<F, Fut>(
    session: &mut DragSession,
    pending: &mut PendingMoves,
    mover: F,
) -> CommitOutcome
where
    F: FnOnce(&MovePlan) -> Fut,
    Fut: Future<Output = bool>,
{
    match session.candidate() {
        None => return CommitOutcome::Blocked(BlockReason::NoCandidate),
        Some(candidate) if !candidate.is_valid => {
            return CommitOutcome::Blocked(BlockReason::InvalidTarget)
        }
        Some(_) => {}
    }

    if let Some(id) = session.dragged().and_then(|e| e.id) {
        if pending.is_pending(id) {
            return CommitOutcome::Blocked(BlockReason::MoveInFlight);
        }
    }

    let Some(plan) = session.begin_commit() else {
        return CommitOutcome::Blocked(BlockReason::NoCandidate);
    };

    if let Some(id) = plan.event.id {
        pending.begin(id);
    }

    let confirmed = mover(&plan).await;

    if let Some(id) = plan.event.id {
        pending.finish(id);
    }
    session.finish_commit();

    if confirmed {
        log::info!(
            "moved '{}' to {} {}",
            plan.event.title,
            plan.target_date,
            plan.new_start.format("%H:%M"),
        );
        CommitOutcome::Committed(plan)
    } else {
        log::warn!("move of '{}' rejected by the backend", plan.event.title);
        CommitOutcome::Rejected(plan)
    }
}
