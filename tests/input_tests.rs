// Host-side tests for browser event mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use folio_core::ScrollKey;
use glam::Vec2;
use input::*;

#[test]
fn wheel_delta_is_normalised_to_pixels() {
    assert_eq!(wheel_delta_px(120.0, DOM_DELTA_PIXEL, 16.0, 800.0), 120.0);
    assert_eq!(wheel_delta_px(3.0, DOM_DELTA_LINE, 16.0, 800.0), 48.0);
    assert_eq!(wheel_delta_px(-1.0, DOM_DELTA_PAGE, 16.0, 800.0), -800.0);
    // Unknown modes pass through untouched
    assert_eq!(wheel_delta_px(5.0, 7, 16.0, 800.0), 5.0);
}

#[test]
fn scroll_keys_map_to_integrator_keys() {
    assert_eq!(scroll_key("ArrowDown", false), Some(ScrollKey::LineDown));
    assert_eq!(scroll_key("ArrowUp", false), Some(ScrollKey::LineUp));
    assert_eq!(scroll_key("PageDown", false), Some(ScrollKey::PageDown));
    assert_eq!(scroll_key("PageUp", true), Some(ScrollKey::PageUp));
    assert_eq!(scroll_key("Home", false), Some(ScrollKey::Home));
    assert_eq!(scroll_key("End", false), Some(ScrollKey::End));
}

#[test]
fn space_pages_down_and_shift_space_pages_up() {
    assert_eq!(scroll_key(" ", false), Some(ScrollKey::PageDown));
    assert_eq!(scroll_key(" ", true), Some(ScrollKey::PageUp));
}

#[test]
fn other_keys_keep_native_behaviour() {
    for key in ["a", "Enter", "Tab", "ArrowLeft", "Escape", ""] {
        assert_eq!(scroll_key(key, false), None, "{key:?}");
    }
}

#[test]
fn form_fields_and_controls_keep_native_keys() {
    assert!(keeps_native_keys("INPUT", false));
    assert!(keeps_native_keys("textarea", false));
    assert!(keeps_native_keys("SELECT", false));
    assert!(keeps_native_keys("DIV", true));
    // Space on a focused submit button must press it, not scroll
    assert!(keeps_native_keys("BUTTON", false));
    assert!(keeps_native_keys("a", false));
    assert!(keeps_native_keys("SUMMARY", false));
    assert!(!keeps_native_keys("BODY", false));
    assert!(!keeps_native_keys("SECTION", false));
}

#[test]
fn anchor_selector_requires_a_fragment() {
    assert_eq!(anchor_selector("#about"), Some("#about"));
    assert_eq!(anchor_selector("  #contact "), Some("#contact"));
    assert_eq!(anchor_selector("#"), None);
    assert_eq!(anchor_selector("/work#about"), None);
    assert_eq!(anchor_selector(""), None);
}

#[test]
fn pointer_offset_is_measured_from_box_centre() {
    let offset = offset_from_center(Vec2::new(150.0, 90.0), 100.0, 50.0, 80.0, 40.0);
    assert_eq!(offset, Vec2::new(10.0, 20.0));
    let centre = offset_from_center(Vec2::new(140.0, 70.0), 100.0, 50.0, 80.0, 40.0);
    assert_eq!(centre, Vec2::ZERO);
}

#[test]
fn dragging_left_scrolls_the_strip_right() {
    // Pointer moved 30px left from where the drag started
    assert_eq!(drag_scroll_left(200.0, 500.0, 470.0, 2.0), 260.0);
    assert_eq!(drag_scroll_left(200.0, 500.0, 530.0, 2.0), 140.0);
    assert_eq!(drag_scroll_left(200.0, 500.0, 500.0, 2.0), 200.0);
}

#[test]
fn max_scroll_extent_never_negative() {
    assert_eq!(max_scroll_extent(5000.0, 1000.0), 4000.0);
    assert_eq!(max_scroll_extent(600.0, 1000.0), 0.0);
}
