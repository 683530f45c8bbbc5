//! Club class calendar with drag-and-drop rescheduling.
//!
//! The crate splits into a UI-independent core and an egui front end:
//! `models` holds the domain types, `scheduling` the grid math, conflict
//! detection, drag state machine and commit protocol, `services` the
//! schedule and settings owners, and `ui_egui` the desktop app built on
//! them.

pub mod models;
pub mod scheduling;
pub mod services;
pub mod ui_egui;
