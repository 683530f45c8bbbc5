//! Month view: a fixed 42-cell grid with class chips.
//!
//! Dropping a chip on a day cell moves the class to that date keeping its
//! time-of-day, so targets outside the week view's visible window are still
//! reachable here. Wheel scrolling pages between months with a short slide
//! transition; paging, dragging and the transition are mutually exclusive.

use chrono::{Datelike, NaiveDate};
use egui::{Align2, FontId, Pos2, Rect, Rounding, Sense, Stroke};

use crate::models::event::ClassEvent;
use crate::models::settings::Settings;
use crate::scheduling::commit::PendingMoves;
use crate::scheduling::drag::{DragPhase, DragSession, VisibleHours};
use crate::scheduling::grid::month_grid;
use crate::scheduling::index::events_for_date;
use crate::ui_egui::views::time_grid::HEADER_HEIGHT;
use crate::ui_egui::views::{ghost, palette, ViewResponse};

const CHIP_HEIGHT: f32 = 16.0;
const CHIP_SPACING: f32 = 2.0;
const DAY_NUMBER_BAND: f32 = 22.0;
const WHEEL_THRESHOLD: f32 = 24.0;

pub struct MonthView;

impl MonthView {
    /// `slide` is an in-progress month transition: direction (+1 next, -1
    /// previous) and eased progress in `0..=1`. Interaction is suspended
    /// while it runs.
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        ui: &mut egui::Ui,
        current_date: NaiveDate,
        today: NaiveDate,
        events: &[ClassEvent],
        session: &mut DragSession,
        pending: &PendingMoves,
        settings: &Settings,
        slide: Option<(i32, f32)>,
    ) -> ViewResponse {
        let mut response = ViewResponse::default();
        let is_dark = settings.dark_theme;
        let window = VisibleHours::from_settings(settings);
        let grid = month_grid(current_date, settings.first_day_of_week);

        let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        if rect.width() <= 0.0 || rect.height() <= HEADER_HEIGHT {
            return response;
        }

        let offset = slide
            .map(|(direction, progress)| {
                let eased = 1.0 - (1.0 - progress.clamp(0.0, 1.0)).powi(3);
                direction as f32 * rect.width() * (1.0 - eased)
            })
            .unwrap_or(0.0);
        let interactive = offset == 0.0;
        if !interactive {
            ui.ctx().request_repaint();
        }
        let draw_rect = rect.translate(egui::vec2(offset, 0.0));
        let painter = ui.painter_at(rect);

        // Weekday header
        let cell_width = draw_rect.width() / 7.0;
        for (i, date) in grid.iter().take(7).enumerate() {
            painter.text(
                Pos2::new(
                    draw_rect.left() + (i as f32 + 0.5) * cell_width,
                    draw_rect.top() + HEADER_HEIGHT / 2.0,
                ),
                Align2::CENTER_CENTER,
                date.format("%a").to_string(),
                FontId::proportional(13.0),
                ui.visuals().text_color(),
            );
        }

        let cells_top = draw_rect.top() + HEADER_HEIGHT;
        let cell_height = (draw_rect.bottom() - cells_top) / 6.0;
        let line = Stroke::new(1.0, palette::grid_line(is_dark));
        let pointer = ui.input(|i| i.pointer.hover_pos());
        let dragging = session.phase() == DragPhase::Dragging;

        for (i, &date) in grid.iter().enumerate() {
            let (row, col) = (i / 7, i % 7);
            let cell_rect = Rect::from_min_size(
                Pos2::new(
                    draw_rect.left() + col as f32 * cell_width,
                    cells_top + row as f32 * cell_height,
                ),
                egui::vec2(cell_width, cell_height),
            );
            painter.rect_stroke(cell_rect, Rounding::ZERO, line);

            let in_month = date.month() == current_date.month();
            if date == today {
                painter.circle_filled(
                    cell_rect.left_top() + egui::vec2(13.0, 12.0),
                    9.0,
                    palette::today_highlight(is_dark),
                );
            }
            painter.text(
                cell_rect.left_top() + egui::vec2(13.0, 12.0),
                Align2::CENTER_CENTER,
                date.day().to_string(),
                FontId::proportional(12.0),
                if in_month {
                    ui.visuals().text_color()
                } else {
                    palette::muted_text(is_dark)
                },
            );

            // Drop tracking for the dragged chip
            let is_drop_target = interactive
                && dragging
                && pointer.is_some_and(|pos| cell_rect.contains(pos));
            if is_drop_target {
                session.update_drop_zone(events, date, None, window);
                response.drop_target_hovered = true;
            }

            let day_events = events_for_date(events, date);
            let capacity = (((cell_rect.height() - DAY_NUMBER_BAND - 4.0)
                / (CHIP_HEIGHT + CHIP_SPACING)) as usize)
                .max(1);
            let shown = if day_events.len() > capacity {
                capacity.saturating_sub(1)
            } else {
                day_events.len()
            };

            for (slot, event) in day_events.iter().take(shown).enumerate() {
                let chip_rect = Rect::from_min_size(
                    Pos2::new(
                        cell_rect.left() + 3.0,
                        cell_rect.top()
                            + DAY_NUMBER_BAND
                            + slot as f32 * (CHIP_HEIGHT + CHIP_SPACING),
                    ),
                    egui::vec2(cell_rect.width() - 6.0, CHIP_HEIGHT),
                );

                let dragging_this =
                    event.id.is_some() && session.dragged().map(|d| d.id) == Some(event.id);
                let in_flight = event.id.is_some_and(|id| pending.is_pending(id));
                let mut fill = palette::event_fill(event);
                if dragging_this || in_flight {
                    fill = fill.gamma_multiply(0.35);
                }
                painter.rect_filled(chip_rect, Rounding::same(3.0), fill);
                painter.with_clip_rect(chip_rect).text(
                    chip_rect.left_center() + egui::vec2(4.0, 0.0),
                    Align2::LEFT_CENTER,
                    format!("{} {}", event.start.format("%H:%M"), event.title),
                    FontId::proportional(10.0),
                    palette::event_text(fill),
                );

                if interactive {
                    let id = ui.id().with(("month-chip", event.id, date, slot));
                    let resp = ui.interact(chip_rect, id, Sense::click_and_drag());
                    if resp.drag_started() && !in_flight {
                        session.start_drag(event);
                    }
                }
            }
            if day_events.len() > shown {
                painter.text(
                    Pos2::new(
                        cell_rect.left() + 5.0,
                        cell_rect.top()
                            + DAY_NUMBER_BAND
                            + shown as f32 * (CHIP_HEIGHT + CHIP_SPACING)
                            + 2.0,
                    ),
                    Align2::LEFT_TOP,
                    format!("+{} more", day_events.len() - shown),
                    FontId::proportional(10.0),
                    palette::muted_text(is_dark),
                );
            }

            // Ghost chip on the hovered target cell
            if is_drop_target {
                if let (Some(candidate), Some(dragged)) =
                    (session.candidate().copied(), session.dragged())
                {
                    let ghost_rect = Rect::from_min_size(
                        cell_rect.left_top() + egui::vec2(3.0, DAY_NUMBER_BAND),
                        egui::vec2(cell_rect.width() - 6.0, CHIP_HEIGHT),
                    );
                    ghost::paint_ghost(&painter, ghost_rect, dragged, candidate.is_valid);
                    let outline = if candidate.is_valid {
                        palette::GHOST_VALID_STROKE
                    } else {
                        palette::GHOST_INVALID_STROKE
                    };
                    painter.rect_stroke(cell_rect, Rounding::ZERO, Stroke::new(1.5, outline));
                }
            }

            if interactive {
                let resp = ui.interact(
                    cell_rect,
                    ui.id().with(("month-cell", date)),
                    Sense::click(),
                );
                if resp.double_clicked() {
                    response.open_day = Some(date);
                }
            }
        }

        // Wheel paging, suspended during drags and transitions
        if interactive && !session.is_active() && ui.rect_contains_pointer(rect) {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll < -WHEEL_THRESHOLD {
                response.page_months = 1;
            } else if scroll > WHEEL_THRESHOLD {
                response.page_months = -1;
            }
        }

        response
    }
}
