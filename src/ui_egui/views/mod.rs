// Calendar view components

pub mod day_view;
pub mod ghost;
pub mod month_view;
pub mod palette;
pub mod time_grid;
pub mod week_view;

pub use day_view::DayView;
pub use month_view::MonthView;
pub use week_view::WeekView;

use chrono::NaiveDate;

/// What a view wants the app shell to do after this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ViewResponse {
    /// Page the month view by this many months (mouse wheel).
    pub page_months: i32,
    /// A day was activated; switch to the day view there.
    pub open_day: Option<NaiveDate>,
    /// The pointer is over a droppable cell this frame. A release elsewhere
    /// ends the drag without committing.
    pub drop_target_hovered: bool,
}
