//! Day view: a single column of the time grid.

use chrono::NaiveDate;

use crate::models::event::ClassEvent;
use crate::models::settings::Settings;
use crate::scheduling::commit::PendingMoves;
use crate::scheduling::drag::DragSession;
use crate::ui_egui::views::time_grid::show_time_grid;
use crate::ui_egui::views::ViewResponse;

pub struct DayView;

impl DayView {
    #[allow(clippy::too_many_arguments)]
    pub fn show(
        ui: &mut egui::Ui,
        current_date: NaiveDate,
        today: NaiveDate,
        events: &[ClassEvent],
        session: &mut DragSession,
        pending: &PendingMoves,
        settings: &Settings,
    ) -> ViewResponse {
        let days = [current_date];
        let outcome = show_time_grid(ui, &days, today, events, session, pending, settings);

        ViewResponse {
            page_months: 0,
            open_day: None,
            drop_target_hovered: outcome.drop_target_hovered,
        }
    }
}
