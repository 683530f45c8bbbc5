//! Color helpers shared by the calendar views.

use egui::Color32;

use crate::models::event::{ClassEvent, ClassStatus};

/// Parse a `#RRGGBB` hex string. Falls back to grey on malformed input so a
/// bad color never breaks rendering.
pub fn parse_hex_color(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color32::GRAY;
    }
    let parse = |range| u8::from_str_radix(&hex[range], 16).ok();
    match (parse(0..2), parse(2..4), parse(4..6)) {
        (Some(r), Some(g), Some(b)) => Color32::from_rgb(r, g, b),
        _ => Color32::GRAY,
    }
}

/// Card fill color for a class, dimmed for cancelled/completed statuses.
pub fn event_fill(event: &ClassEvent) -> Color32 {
    let base = parse_hex_color(event.class_type.color());
    match event.status {
        ClassStatus::Cancelled => base.gamma_multiply(0.35),
        ClassStatus::Completed => base.gamma_multiply(0.6),
        _ => base,
    }
}

/// Readable text color against the card fill.
pub fn event_text(fill: Color32) -> Color32 {
    // Perceived luminance, sRGB weights
    let luminance =
        0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luminance > 150.0 {
        Color32::from_rgb(20, 20, 20)
    } else {
        Color32::from_rgb(240, 240, 240)
    }
}

pub fn grid_line(is_dark_theme: bool) -> Color32 {
    if is_dark_theme {
        Color32::from_gray(55)
    } else {
        Color32::from_gray(210)
    }
}

pub fn today_highlight(is_dark_theme: bool) -> Color32 {
    if is_dark_theme {
        Color32::from_rgb(40, 60, 90)
    } else {
        Color32::from_rgb(220, 235, 255)
    }
}

pub fn muted_text(is_dark_theme: bool) -> Color32 {
    if is_dark_theme {
        Color32::from_gray(120)
    } else {
        Color32::from_gray(150)
    }
}

pub const GHOST_VALID: Color32 = Color32::from_rgba_premultiplied(60, 140, 70, 90);
pub const GHOST_INVALID: Color32 = Color32::from_rgba_premultiplied(160, 50, 50, 90);
pub const GHOST_VALID_STROKE: Color32 = Color32::from_rgb(90, 200, 110);
pub const GHOST_INVALID_STROKE: Color32 = Color32::from_rgb(230, 90, 90);
