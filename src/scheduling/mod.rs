//! Drag-and-drop rescheduling engine.
//!
//! Pure scheduling logic with no UI dependencies: time-grid math, the event
//! index, same-court conflict detection, the drag session state machine and
//! the commit protocol that persists a confirmed move through a
//! caller-supplied callback.

pub mod commit;
pub mod conflict;
pub mod drag;
pub mod grid;
pub mod index;
