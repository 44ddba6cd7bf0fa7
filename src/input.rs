// Browser event values mapped into motion-core terms.

use folio_core::ScrollKey;
use glam::Vec2;

/// `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Wheel delta in CSS pixels regardless of the event's delta mode.
#[inline]
pub fn wheel_delta_px(delta: f64, mode: u32, line_height: f64, page_height: f64) -> f64 {
    match mode {
        DOM_DELTA_LINE => delta * line_height,
        DOM_DELTA_PAGE => delta * page_height,
        _ => delta,
    }
}

/// Scroll keys the integrator handles; everything else keeps its native meaning.
pub fn scroll_key(key: &str, shift: bool) -> Option<ScrollKey> {
    match key {
        "ArrowDown" => Some(ScrollKey::LineDown),
        "ArrowUp" => Some(ScrollKey::LineUp),
        "PageDown" => Some(ScrollKey::PageDown),
        "PageUp" => Some(ScrollKey::PageUp),
        " " | "Spacebar" if shift => Some(ScrollKey::PageUp),
        " " | "Spacebar" => Some(ScrollKey::PageDown),
        "Home" => Some(ScrollKey::Home),
        "End" => Some(ScrollKey::End),
        _ => None,
    }
}

/// Focused elements whose own key handling wins: text entry plus controls
/// that Space or Enter activates.
pub fn keeps_native_keys(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "TEXTAREA" | "SELECT" | "BUTTON" | "A" | "SUMMARY"
        )
}

/// Selector for an in-page anchor `href`; `None` for bare `#` links.
pub fn anchor_selector(href: &str) -> Option<&str> {
    let trimmed = href.trim();
    if trimmed.starts_with('#') && trimmed.len() > 1 {
        Some(trimmed)
    } else {
        None
    }
}

/// Pointer offset from the centre of a `(left, top, width, height)` box.
#[inline]
pub fn offset_from_center(client: Vec2, left: f32, top: f32, width: f32, height: f32) -> Vec2 {
    client - Vec2::new(left + width * 0.5, top + height * 0.5)
}

/// Horizontal scroll position while drag-scrolling the projects strip.
#[inline]
pub fn drag_scroll_left(start_scroll: f64, start_x: f64, x: f64, multiplier: f64) -> f64 {
    start_scroll - (x - start_x) * multiplier
}

/// Largest page scroll offset for a document of `scroll_height`.
#[inline]
pub fn max_scroll_extent(scroll_height: f64, viewport_height: f64) -> f64 {
    (scroll_height - viewport_height).max(0.0)
}
