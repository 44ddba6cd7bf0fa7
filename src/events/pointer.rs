use super::SharedLatch;
use crate::constants::{HOVER_CLASS, HOVER_SELECTOR, MAGNETIC_SELECTOR};
use crate::dom::{self, DomScene};
use crate::input::offset_from_center;
use folio_core::{client_to_ndc, MagneticSample};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointermove(window: &web::Window, latch: SharedLatch) {
    let win = window.clone();
    dom::add_event_listener(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let viewport = dom::viewport(&win);
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        let ndc = client_to_ndc(x, y, viewport.width, viewport.height);
        latch.borrow_mut().pointer(ndc, Vec2::new(x, y));
    });
}

/// Enlarge the custom cursor over interactive elements.
pub fn wire_hover(document: &web::Document, cursors: Vec<web::Element>) {
    for el in dom::elements(document, HOVER_SELECTOR) {
        for (event, on) in [("mouseenter", true), ("mouseleave", false)] {
            let cursors = cursors.clone();
            dom::add_event_listener(&el, event, move |_| {
                for cursor in &cursors {
                    let _ = cursor.class_list().toggle_with_force(HOVER_CLASS, on);
                }
            });
        }
    }
}

/// Buttons that lean toward the pointer while it is over them.
pub fn wire_magnetic(scene: &mut DomScene, latch: SharedLatch) {
    for target in scene.select_all(MAGNETIC_SELECTOR) {
        let Some(el) = scene.element(target).cloned() else {
            continue;
        };
        let button = el.clone();
        let pull_latch = latch.clone();
        dom::add_event_listener(&el, "mousemove", move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let r = button.get_bounding_client_rect();
            let offset = offset_from_center(
                Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
                r.left() as f32,
                r.top() as f32,
                r.width() as f32,
                r.height() as f32,
            );
            pull_latch
                .borrow_mut()
                .magnetic(MagneticSample::Pull { target, offset });
        });
        let release_latch = latch.clone();
        dom::add_event_listener(&el, "mouseleave", move |_| {
            release_latch
                .borrow_mut()
                .magnetic(MagneticSample::Release { target });
        });
    }
}
