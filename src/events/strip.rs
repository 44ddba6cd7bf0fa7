use crate::constants::{
    STRIP_CURSOR_DRAGGING, STRIP_CURSOR_IDLE, STRIP_DRAG_MULTIPLIER, STRIP_WHEEL_MULTIPLIER,
};
use crate::dom;
use crate::input::drag_scroll_left;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy)]
struct Drag {
    start_x: f64,
    start_scroll: f64,
}

fn set_cursor(el: &web::HtmlElement, cursor: &str) {
    let _ = el.style().set_property("cursor", cursor);
}

/// The horizontal projects strip scrolls sideways on wheel and drag; the
/// page scroll is left alone while the pointer is over it.
pub fn wire_projects_strip(strip: &web::HtmlElement) {
    set_cursor(strip, STRIP_CURSOR_IDLE);

    let el = strip.clone();
    dom::add_active_listener(strip, "wheel", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        ev.stop_propagation();
        let next = el.scroll_left() as f64 + ev.delta_y() * STRIP_WHEEL_MULTIPLIER;
        el.set_scroll_left(next as i32);
    });

    let drag: Rc<Cell<Option<Drag>>> = Rc::new(Cell::new(None));

    let (el, state) = (strip.clone(), drag.clone());
    dom::add_event_listener(strip, "mousedown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        state.set(Some(Drag {
            start_x: ev.page_x() as f64 - el.offset_left() as f64,
            start_scroll: el.scroll_left() as f64,
        }));
        set_cursor(&el, STRIP_CURSOR_DRAGGING);
    });

    for event in ["mouseup", "mouseleave"] {
        let (el, state) = (strip.clone(), drag.clone());
        dom::add_event_listener(strip, event, move |_| {
            state.set(None);
            set_cursor(&el, STRIP_CURSOR_IDLE);
        });
    }

    let el = strip.clone();
    dom::add_event_listener(strip, "mousemove", move |ev: web::Event| {
        let (Some(ev), Some(d)) = (ev.dyn_ref::<web::MouseEvent>(), drag.get()) else {
            return;
        };
        ev.prevent_default();
        let x = ev.page_x() as f64 - el.offset_left() as f64;
        el.set_scroll_left(drag_scroll_left(d.start_scroll, d.start_x, x, STRIP_DRAG_MULTIPLIER) as i32);
    });
}
