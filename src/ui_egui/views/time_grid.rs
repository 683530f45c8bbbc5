//! Shared rendering and geometry for the time-slotted (week and day) grids.
//!
//! [`TimeGridLayout`] maps between screen space and calendar space: which
//! rect a class occupies, which date/slot the pointer hovers. Slot times
//! snap down to the configured step so hovers always land on grid
//! boundaries. [`show_time_grid`] renders the grid itself and is shared by
//! the week and day views, which differ only in their day columns.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use egui::{Align2, FontId, Pos2, Rect, Rounding, Sense, Stroke};

use crate::models::event::ClassEvent;
use crate::models::settings::Settings;
use crate::scheduling::commit::PendingMoves;
use crate::scheduling::drag::{DragPhase, DragSession, VisibleHours};
use crate::scheduling::index::events_for_date;
use crate::ui_egui::views::{ghost, palette};

pub const GUTTER_WIDTH: f32 = 48.0;
pub const HOUR_HEIGHT: f32 = 56.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const CARD_INSET: f32 = 2.0;

/// Screen-space layout of one time grid: a left hour gutter and one column
/// per visible day.
#[derive(Debug, Clone)]
pub struct TimeGridLayout {
    grid_rect: Rect,
    days: Vec<NaiveDate>,
    window: VisibleHours,
    slot_minutes: u32,
}

impl TimeGridLayout {
    /// `grid_rect` is the area right of the gutter and below the header.
    pub fn new(
        grid_rect: Rect,
        days: Vec<NaiveDate>,
        window: VisibleHours,
        slot_minutes: u32,
    ) -> Self {
        Self {
            grid_rect,
            days,
            window,
            slot_minutes: slot_minutes.max(1),
        }
    }

    pub fn grid_rect(&self) -> Rect {
        self.grid_rect
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn window(&self) -> VisibleHours {
        self.window
    }

    pub fn column_width(&self) -> f32 {
        self.grid_rect.width() / self.days.len().max(1) as f32
    }

    /// Total pixel height of the visible window.
    pub fn content_height(window: VisibleHours) -> f32 {
        window.end_hour.saturating_sub(window.start_hour) as f32 * HOUR_HEIGHT
    }

    pub fn column_index(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|&d| d == date)
    }

    fn y_for_minutes(&self, minutes_from_midnight: f32) -> f32 {
        let offset = minutes_from_midnight - (self.window.start_hour * 60) as f32;
        self.grid_rect.top() + offset / 60.0 * HOUR_HEIGHT
    }

    pub fn y_for_time(&self, time: NaiveTime) -> f32 {
        self.y_for_minutes((time.hour() * 60 + time.minute()) as f32)
    }

    /// Rect a span `[start, start + minutes)` occupies in the column for
    /// `date`. `None` when the date is not visible. The rect is clamped to
    /// the grid, so a class running past the window still paints its visible
    /// part.
    pub fn span_rect(&self, date: NaiveDate, start: NaiveTime, minutes: i64) -> Option<Rect> {
        let col = self.column_index(date)?;
        let width = self.column_width();
        let left = self.grid_rect.left() + col as f32 * width;

        let top = self.y_for_time(start);
        let bottom = top + minutes.max(0) as f32 / 60.0 * HOUR_HEIGHT;

        let rect = Rect::from_min_max(
            Pos2::new(left + CARD_INSET, top),
            Pos2::new(left + width - CARD_INSET, bottom.max(top + 16.0)),
        );
        let clamped = rect.intersect(self.grid_rect);
        if clamped.height() <= 0.0 {
            None
        } else {
            Some(clamped)
        }
    }

    /// Rect for a class card.
    pub fn event_rect(&self, event: &ClassEvent) -> Option<Rect> {
        let minutes = event.duration().num_minutes();
        self.span_rect(event.start.date_naive(), event.start.time(), minutes)
    }

    /// The date and slot under `pos`, snapped down to the slot step. `None`
    /// outside the grid.
    pub fn slot_at(&self, pos: Pos2) -> Option<(NaiveDate, NaiveTime)> {
        if !self.grid_rect.contains(pos) {
            return None;
        }

        let col = ((pos.x - self.grid_rect.left()) / self.column_width()) as usize;
        let date = *self.days.get(col.min(self.days.len().saturating_sub(1)))?;

        let minutes_into_window = (pos.y - self.grid_rect.top()) / HOUR_HEIGHT * 60.0;
        let raw = self.window.start_hour * 60 + minutes_into_window.max(0.0) as u32;
        let snapped = raw - raw % self.slot_minutes;
        let slot = NaiveTime::from_hms_opt(snapped / 60, snapped % 60, 0)?;
        Some((date, slot))
    }
}

/// What happened inside the grid this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeGridOutcome {
    pub drop_target_hovered: bool,
    pub header_clicked: Option<NaiveDate>,
}

/// Render a time grid for `days`, one column per day.
#[allow(clippy::too_many_arguments)]
pub fn show_time_grid(
    ui: &mut egui::Ui,
    days: &[NaiveDate],
    today: NaiveDate,
    events: &[ClassEvent],
    session: &mut DragSession,
    pending: &PendingMoves,
    settings: &Settings,
) -> TimeGridOutcome {
    let mut outcome = TimeGridOutcome::default();
    if days.is_empty() {
        return outcome;
    }

    let is_dark = settings.dark_theme;
    let window = VisibleHours::from_settings(settings);

    // Day header row, aligned with the columns below
    let (header_rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), HEADER_HEIGHT), Sense::hover());
    let col_width = (header_rect.width() - GUTTER_WIDTH) / days.len() as f32;
    let painter = ui.painter_at(header_rect);
    for (i, &date) in days.iter().enumerate() {
        let left = header_rect.left() + GUTTER_WIDTH + i as f32 * col_width;
        let day_rect = Rect::from_min_size(
            Pos2::new(left, header_rect.top()),
            egui::vec2(col_width, HEADER_HEIGHT),
        );
        let color = if date == today {
            ui.visuals().strong_text_color()
        } else {
            ui.visuals().text_color()
        };
        painter.text(
            day_rect.center(),
            Align2::CENTER_CENTER,
            format!("{} {}", date.format("%a"), date.day()),
            FontId::proportional(13.0),
            color,
        );
        let resp = ui.interact(day_rect, ui.id().with(("day-header", date)), Sense::click());
        if resp.clicked() {
            outcome.header_clicked = Some(date);
        }
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let height = TimeGridLayout::content_height(window);
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
            let grid_rect = Rect::from_min_max(
                Pos2::new(rect.left() + GUTTER_WIDTH, rect.top()),
                rect.max,
            );
            let layout =
                TimeGridLayout::new(grid_rect, days.to_vec(), window, settings.slot_minutes);
            let painter = ui.painter_at(rect);

            // Wash behind today's column
            if let Some(col) = layout.column_index(today) {
                let left = grid_rect.left() + col as f32 * layout.column_width();
                let col_rect = Rect::from_min_size(
                    Pos2::new(left, grid_rect.top()),
                    egui::vec2(layout.column_width(), grid_rect.height()),
                );
                painter.rect_filled(col_rect, Rounding::ZERO, palette::today_highlight(is_dark));
            }

            let line = Stroke::new(1.0, palette::grid_line(is_dark));
            for hour in window.start_hour..=window.end_hour {
                let Some(time) = NaiveTime::from_hms_opt(hour.min(23), 0, 0) else {
                    continue;
                };
                let y = if hour == 24 {
                    grid_rect.bottom()
                } else {
                    layout.y_for_time(time)
                };
                painter.line_segment(
                    [Pos2::new(grid_rect.left(), y), Pos2::new(grid_rect.right(), y)],
                    line,
                );
                if hour < window.end_hour {
                    painter.text(
                        Pos2::new(grid_rect.left() - 6.0, y + 2.0),
                        Align2::RIGHT_TOP,
                        format!("{hour:02}:00"),
                        FontId::proportional(11.0),
                        palette::muted_text(is_dark),
                    );
                }
            }
            for i in 0..=days.len() {
                let x = grid_rect.left() + i as f32 * layout.column_width();
                painter.line_segment(
                    [Pos2::new(x, grid_rect.top()), Pos2::new(x, grid_rect.bottom())],
                    line,
                );
            }

            // Hover tracking while a class is being dragged
            if session.phase() == DragPhase::Dragging {
                if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
                    if let Some((date, slot)) = layout.slot_at(pos) {
                        session.update_drop_zone(events, date, Some(slot), window);
                        outcome.drop_target_hovered = true;
                    }
                }
            }

            for &date in days {
                for event in events_for_date(events, date) {
                    let Some(card_rect) = layout.event_rect(event) else {
                        continue;
                    };
                    let dragging_this =
                        event.id.is_some() && session.dragged().map(|d| d.id) == Some(event.id);
                    let in_flight = event.id.is_some_and(|id| pending.is_pending(id));

                    let mut fill = palette::event_fill(event);
                    if dragging_this || in_flight {
                        fill = fill.gamma_multiply(0.35);
                    }
                    painter.rect_filled(card_rect, Rounding::same(4.0), fill);

                    let text = palette::event_text(fill);
                    let card_painter = painter.with_clip_rect(card_rect);
                    card_painter.text(
                        card_rect.left_top() + egui::vec2(6.0, 3.0),
                        Align2::LEFT_TOP,
                        &event.title,
                        FontId::proportional(12.0),
                        text,
                    );
                    if card_rect.height() > 34.0 {
                        card_painter.text(
                            card_rect.left_top() + egui::vec2(6.0, 19.0),
                            Align2::LEFT_TOP,
                            format!(
                                "{} - {}",
                                event.start.format("%H:%M"),
                                event.end.format("%H:%M")
                            ),
                            FontId::proportional(10.0),
                            text.gamma_multiply(0.85),
                        );
                    }
                    if card_rect.height() > 50.0 {
                        card_painter.text(
                            card_rect.left_top() + egui::vec2(6.0, 33.0),
                            Align2::LEFT_TOP,
                            &event.court.name,
                            FontId::proportional(10.0),
                            text.gamma_multiply(0.85),
                        );
                    }

                    let id = ui.id().with(("class-card", event.id, date));
                    let resp = ui
                        .interact(card_rect, id, Sense::click_and_drag())
                        .on_hover_text(format!(
                            "{} · {} · {}",
                            event.court.name,
                            event.instructor.name,
                            event.status.label()
                        ));
                    if resp.drag_started() && !in_flight {
                        session.start_drag(event);
                    }
                }
            }

            // Ghost preview at the candidate slot
            if session.phase() == DragPhase::Dragging {
                if let (Some(candidate), Some((start, end))) =
                    (session.candidate().copied(), session.proposed_span())
                {
                    let minutes = (end - start).num_minutes();
                    if let Some(ghost_rect) =
                        layout.span_rect(candidate.date, start.time(), minutes)
                    {
                        if let Some(dragged) = session.dragged() {
                            ghost::paint_ghost(&painter, ghost_rect, dragged, candidate.is_valid);
                        }
                    }
                }
            }
        });

    outcome
}
