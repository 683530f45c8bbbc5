//! Ghost preview for the dragged class.
//!
//! The ghost is painted at the candidate drop target, green when the drop
//! would commit and red when it is blocked. The original card stays in place
//! (dimmed) until the move is confirmed.

use egui::{Align2, FontId, Painter, Rect, Rounding, Stroke};

use crate::models::event::ClassEvent;
use crate::ui_egui::views::palette;

pub fn paint_ghost(painter: &Painter, rect: Rect, event: &ClassEvent, is_valid: bool) {
    let (fill, stroke) = if is_valid {
        (palette::GHOST_VALID, palette::GHOST_VALID_STROKE)
    } else {
        (palette::GHOST_INVALID, palette::GHOST_INVALID_STROKE)
    };

    painter.rect_filled(rect, Rounding::same(4.0), fill);
    painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.5, stroke));

    if rect.height() >= 14.0 {
        painter.text(
            rect.left_top() + egui::vec2(6.0, 3.0),
            Align2::LEFT_TOP,
            &event.title,
            FontId::proportional(12.0),
            stroke,
        );
    }
}
