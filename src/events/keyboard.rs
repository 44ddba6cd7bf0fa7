use super::SharedLatch;
use crate::dom;
use crate::input::{keeps_native_keys, scroll_key};
use wasm_bindgen::JsCast;
use web_sys as web;

fn focus_keeps_native_keys(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
        .map(|el| keeps_native_keys(&el.tag_name(), el.is_content_editable()))
        .unwrap_or(false)
}

/// Arrow/page/space/home/end keys drive the smoothed scroll instead of the native one.
pub fn wire_scroll_keys(window: &web::Window, latch: SharedLatch) {
    dom::add_event_listener(window, "keydown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || focus_keeps_native_keys(ev) {
            return;
        }
        if let Some(key) = scroll_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            latch.borrow_mut().key(key);
        }
    });
}
