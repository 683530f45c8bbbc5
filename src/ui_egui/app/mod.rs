//! Application shell: window chrome, view switching and the move pipeline.
//!
//! The schedule lives behind an `Arc<Mutex<_>>` shared with the tokio
//! runtime. A confirmed drop spawns an async task that asks the schedule to
//! apply the move; the task reports back over a channel and the UI thread
//! settles the drag session, refreshes its snapshot and raises a toast.
//! Until the answer arrives the class is marked in flight and cannot be
//! picked up again, while every other class stays draggable.

pub mod toast;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context as _, Result};
use chrono::{Local, Months, NaiveDate};
use eframe::egui;

use crate::models::event::ClassEvent;
use crate::models::settings::Settings;
use crate::scheduling::commit::PendingMoves;
use crate::scheduling::drag::{DragPhase, DragSession};
use crate::services::schedule::ScheduleService;
use crate::services::settings::SettingsService;
use crate::ui_egui::views::{DayView, MonthView, ViewResponse, WeekView};

use toast::ToastManager;

const SLIDE_SECONDS: f32 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Month,
    Week,
    Day,
}

/// Outcome of one async move task, sent back to the UI thread.
struct MoveMessage {
    event_id: i64,
    title: String,
    error: Option<String>,
}

struct MonthSlide {
    direction: i32,
    started: Instant,
}

impl MonthSlide {
    fn progress(&self) -> f32 {
        self.started.elapsed().as_secs_f32() / SLIDE_SECONDS
    }
}

pub struct SchedulerApp {
    store: Arc<Mutex<ScheduleService>>,
    /// Snapshot of the schedule rendered this frame; refreshed after every
    /// confirmed move.
    events: Vec<ClassEvent>,
    session: DragSession,
    pending: PendingMoves,
    toasts: ToastManager,
    settings: Settings,
    view: ViewKind,
    current_date: NaiveDate,
    runtime: tokio::runtime::Runtime,
    move_tx: Sender<MoveMessage>,
    move_rx: Receiver<MoveMessage>,
    month_slide: Option<MonthSlide>,
}

impl SchedulerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let settings = SettingsService::load();
        apply_theme(&cc.egui_ctx, settings.dark_theme);

        let today = Local::now().date_naive();
        let store = ScheduleService::with_demo_data(today);
        let events = store.snapshot();
        log::info!("schedule loaded with {} classes", events.len());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("starting async runtime")?;
        let (move_tx, move_rx) = mpsc::channel();

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            events,
            session: DragSession::new(),
            pending: PendingMoves::new(),
            toasts: ToastManager::new(),
            settings,
            view: ViewKind::Month,
            current_date: today,
            runtime,
            move_tx,
            move_rx,
            month_slide: None,
        })
    }

    fn refresh_events(&mut self) {
        self.events = lock_store(&self.store).snapshot();
    }

    /// Settle finished move tasks: release the in-flight claim, refresh the
    /// snapshot on success, raise a toast either way.
    fn drain_move_results(&mut self) {
        while let Ok(msg) = self.move_rx.try_recv() {
            self.pending.finish(msg.event_id);
            match msg.error {
                None => {
                    self.refresh_events();
                    self.toasts.success(format!("Moved '{}'", msg.title));
                }
                Some(err) => {
                    self.toasts.error(format!("Could not move '{}': {}", msg.title, err));
                }
            }
        }
    }

    /// Confirm the current candidate and hand the move to the runtime. The
    /// session is released immediately; the in-flight claim alone guards the
    /// class until the task reports back.
    fn spawn_move(&mut self, ctx: &egui::Context) {
        let Some(plan) = self.session.begin_commit() else {
            self.session.end_drag();
            return;
        };
        self.session.finish_commit();

        let Some(event_id) = plan.event.id else {
            log::warn!("dropped a class without an id; nothing to persist");
            return;
        };
        if !self.pending.begin(event_id) {
            self.toasts.info(format!("'{}' is still being moved", plan.event.title));
            return;
        }

        let store = Arc::clone(&self.store);
        let tx = self.move_tx.clone();
        let repaint = ctx.clone();
        self.runtime.spawn(async move {
            let result = {
                let mut store = store.lock().unwrap_or_else(|p| p.into_inner());
                store.apply_move(event_id, plan.new_start, plan.new_end)
            };
            let message = MoveMessage {
                event_id,
                title: plan.event.title.clone(),
                error: result.err().map(|e| e.to_string()),
            };
            if tx.send(message).is_err() {
                log::warn!("move result dropped; app shutting down");
            }
            repaint.request_repaint();
        });
    }

    /// A drop landed on a blocked target: report why and abandon the drag.
    fn reject_drop(&mut self) {
        let title = self
            .session
            .dragged()
            .map(|e| e.title.clone())
            .unwrap_or_default();
        let conflicts: Vec<String> = self
            .session
            .conflicts()
            .iter()
            .map(|c| c.title.clone())
            .collect();
        if conflicts.is_empty() {
            self.toasts
                .warning(format!("'{}' cannot move outside the schedule hours", title));
        } else {
            self.toasts.warning(format!(
                "'{}' would double-book {} with {}",
                title,
                self.session
                    .conflicts()
                    .first()
                    .map(|c| c.court.name.as_str())
                    .unwrap_or("the court"),
                conflicts.join(", "),
            ));
        }
        self.session.cancel_drag();
    }

    fn page(&mut self, delta: i32) {
        match self.view {
            ViewKind::Month => {
                self.current_date = shift_months(self.current_date, delta);
                self.month_slide = Some(MonthSlide {
                    direction: delta.signum(),
                    started: Instant::now(),
                });
            }
            ViewKind::Week => {
                self.current_date = self.current_date + chrono::Duration::days(7 * delta as i64);
            }
            ViewKind::Day => {
                self.current_date = self.current_date + chrono::Duration::days(delta as i64);
            }
        }
    }

    fn heading(&self) -> String {
        match self.view {
            ViewKind::Month => self.current_date.format("%B %Y").to_string(),
            ViewKind::Week => {
                let start = crate::scheduling::grid::week_start(
                    self.current_date,
                    self.settings.first_day_of_week,
                );
                let end = start + chrono::Duration::days(6);
                format!("{} - {}", start.format("%d %b"), end.format("%d %b %Y"))
            }
            ViewKind::Day => self.current_date.format("%A, %d %B %Y").to_string(),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.settings.dark_theme = !self.settings.dark_theme;
        apply_theme(ctx, self.settings.dark_theme);
        if let Err(err) = SettingsService::save(&self.settings) {
            log::warn!("failed to save settings: {:#}", err);
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.page(-1);
                }
                if ui.button("Today").clicked() {
                    self.current_date = Local::now().date_naive();
                }
                if ui.button("▶").clicked() {
                    self.page(1);
                }

                ui.separator();
                ui.heading(self.heading());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = if self.settings.dark_theme { "☀" } else { "🌙" };
                    if ui.button(theme_icon).clicked() {
                        self.toggle_theme(ctx);
                    }
                    ui.separator();
                    ui.selectable_value(&mut self.view, ViewKind::Day, "Day");
                    ui.selectable_value(&mut self.view, ViewKind::Week, "Week");
                    ui.selectable_value(&mut self.view, ViewKind::Month, "Month");
                });
            });
        });
    }

    fn central_view(&mut self, ctx: &egui::Context) -> ViewResponse {
        let today = Local::now().date_naive();
        let slide = self.month_slide.as_ref().map(|s| (s.direction, s.progress()));

        egui::CentralPanel::default()
            .show(ctx, |ui| match self.view {
                ViewKind::Month => MonthView::show(
                    ui,
                    self.current_date,
                    today,
                    &self.events,
                    &mut self.session,
                    &self.pending,
                    &self.settings,
                    slide,
                ),
                ViewKind::Week => WeekView::show(
                    ui,
                    self.current_date,
                    today,
                    &self.events,
                    &mut self.session,
                    &self.pending,
                    &self.settings,
                ),
                ViewKind::Day => DayView::show(
                    ui,
                    self.current_date,
                    today,
                    &self.events,
                    &mut self.session,
                    &self.pending,
                    &self.settings,
                ),
            })
            .inner
    }

    fn handle_pointer_release(&mut self, ctx: &egui::Context, response: &ViewResponse) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape))
            && self.session.phase() == DragPhase::Dragging
        {
            self.session.cancel_drag();
            return;
        }

        if !ctx.input(|i| i.pointer.primary_released())
            || self.session.phase() != DragPhase::Dragging
        {
            return;
        }

        if !response.drop_target_hovered {
            self.session.end_drag();
            return;
        }
        match self.session.candidate() {
            Some(candidate) if candidate.is_valid => self.spawn_move(ctx),
            Some(_) => self.reject_drop(),
            None => self.session.end_drag(),
        }
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_move_results();

        if self.month_slide.as_ref().is_some_and(|s| s.progress() >= 1.0) {
            self.month_slide = None;
        }

        self.top_bar(ctx);
        let response = self.central_view(ctx);

        if response.page_months != 0 {
            self.page(response.page_months);
        }
        if let Some(date) = response.open_day {
            self.current_date = date;
            self.view = ViewKind::Day;
        }

        self.handle_pointer_release(ctx, &response);
        self.toasts.render(ctx, self.settings.dark_theme);
    }
}

fn lock_store(store: &Arc<Mutex<ScheduleService>>) -> std::sync::MutexGuard<'_, ScheduleService> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    if dark {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

/// Month arithmetic that clamps the day when the target month is shorter.
fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}
