use super::SharedLatch;
use crate::constants::{ANCHOR_SELECTOR, WHEEL_LINE_HEIGHT_PX};
use crate::dom::{self, DomScene};
use crate::input::{anchor_selector, wheel_delta_px};
use folio_core::constants::{SCROLL_TO_DURATION_SEC, SCROLL_TO_OFFSET_PX};
use folio_core::{ScrollRequest, ScrollTarget};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wheel input replaces native scrolling; the integrator applies it.
pub fn wire_wheel(window: &web::Window, latch: SharedLatch) {
    let win = window.clone();
    dom::add_active_listener(window, "wheel", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        if ev.ctrl_key() {
            return; // pinch-zoom
        }
        ev.prevent_default();
        let page = dom::viewport(&win).height as f64;
        latch.borrow_mut().wheel(wheel_delta_px(
            ev.delta_y(),
            ev.delta_mode(),
            WHEEL_LINE_HEIGHT_PX,
            page,
        ));
    });
}

/// Offsets the browser applies itself; the core adopts them when idle.
pub fn wire_native_scroll(window: &web::Window, latch: SharedLatch) {
    let win = window.clone();
    dom::add_event_listener(window, "scroll", move |_| {
        if let Ok(y) = win.scroll_y() {
            latch.borrow_mut().page_scrolled(y);
        }
    });
}

pub fn wire_touch(window: &web::Window, latch: SharedLatch) {
    let last_y: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));
    let first_touch_y = |ev: &web::TouchEvent| ev.touches().get(0).map(|t| t.client_y() as f64);

    let start = last_y.clone();
    dom::add_event_listener(window, "touchstart", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::TouchEvent>() {
            start.set(first_touch_y(ev));
        }
    });
    let moving = last_y.clone();
    dom::add_active_listener(window, "touchmove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        let (Some(prev), Some(y)) = (moving.get(), first_touch_y(ev)) else {
            return;
        };
        ev.prevent_default();
        moving.set(Some(y));
        latch.borrow_mut().touch(prev - y);
    });
    dom::add_event_listener(window, "touchend", move |_| last_y.set(None));
}

/// Canvas backing size, viewport and scrollable extent all follow the window.
pub fn wire_resize(window: &web::Window, canvas: &web::HtmlCanvasElement, latch: SharedLatch) {
    let publish = {
        let win = window.clone();
        let canvas = canvas.clone();
        move || {
            dom::sync_canvas_backing_size(&canvas);
            let viewport = dom::viewport(&win);
            let extent = win
                .document()
                .map(|d| dom::document_max_scroll(&d, viewport.height as f64))
                .unwrap_or(0.0);
            latch.borrow_mut().resize(viewport, extent);
        }
    };
    publish();
    let on_resize = publish.clone();
    dom::add_event_listener(window, "resize", move |_| on_resize());
    // Fonts and images change the document height after startup.
    dom::add_event_listener(window, "load", move |_| publish());
}

/// In-page links scroll smoothly to their section, just under the nav bar.
pub fn wire_anchor_links(scene: &mut DomScene, document: &web::Document, latch: SharedLatch) {
    for link in dom::elements(document, ANCHOR_SELECTOR) {
        let href = link.get_attribute("href").unwrap_or_default();
        let target = anchor_selector(&href)
            .and_then(|sel| scene.select(sel))
            .map(ScrollTarget::Element);
        let latch = latch.clone();
        dom::add_event_listener(&link, "click", move |ev: web::Event| {
            ev.prevent_default();
            if let Some(target) = target {
                latch.borrow_mut().scroll_to(ScrollRequest {
                    target,
                    offset: SCROLL_TO_OFFSET_PX,
                    duration_sec: Some(SCROLL_TO_DURATION_SEC),
                });
            }
        });
    }
}

pub fn wire_contact_submit(form: &web::Element, latch: SharedLatch) {
    dom::add_event_listener(form, "submit", move |ev: web::Event| {
        ev.prevent_default();
        latch.borrow_mut().submit();
    });
}
