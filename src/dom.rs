use crate::constants::{SPLIT_CHAR_CLASS, SPLIT_WORD_CLASS, TARGET_ID_ATTR};
use crate::input::max_scroll_extent;
use crate::style::{counter_text, parse_number, split_words, Transform};
use folio_core::{Property, Rect, Scene, TargetId, Viewport};
use fnv::FnvHashMap;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_event_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Listener that may call `preventDefault` (wheel, touchmove).
pub fn add_active_listener(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(web::Event) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(false);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn viewport(window: &web::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(width as f32, height as f32, window.device_pixel_ratio() as f32)
}

pub fn document_max_scroll(document: &web::Document, viewport_height: f64) -> f64 {
    let scroll_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    max_scroll_extent(scroll_height, viewport_height)
}

pub fn elements(root: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("[dom] invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect()
}

struct Node {
    el: web::HtmlElement,
    transform: Transform,
    values: FnvHashMap<Property, f32>,
}

/// Arena of page elements addressed by `TargetId`.
///
/// Transform channels are composed into one inline `transform`; the first
/// write replaces whatever the stylesheet had, so nodes are seeded from the
/// computed transform when registered.
pub struct DomScene {
    window: web::Window,
    document: web::Document,
    nodes: Vec<Node>,
    page_scroll: f64,
}

impl DomScene {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self {
            window,
            document,
            nodes: Vec::new(),
            page_scroll: 0.0,
        }
    }

    /// Register an element; an element already in the arena keeps its id.
    pub fn insert(&mut self, el: web::Element) -> Option<TargetId> {
        if let Some(id) = el
            .get_attribute(TARGET_ID_ATTR)
            .and_then(|v| v.parse::<u32>().ok())
        {
            if (id as usize) < self.nodes.len() {
                return Some(TargetId(id));
            }
        }
        let el = el.dyn_into::<web::HtmlElement>().ok()?;
        let transform = self
            .computed(&el)
            .and_then(|style| style.get_property_value("transform").ok())
            .map(|css| Transform::from_computed(&css))
            .unwrap_or_default();
        let id = TargetId(self.nodes.len() as u32);
        let _ = el.set_attribute(TARGET_ID_ATTR, &id.0.to_string());
        self.nodes.push(Node {
            el,
            transform,
            values: FnvHashMap::default(),
        });
        Some(id)
    }

    pub fn by_id(&mut self, id: &str) -> Option<TargetId> {
        let el = self.document.get_element_by_id(id)?;
        self.insert(el)
    }

    pub fn select(&mut self, selector: &str) -> Option<TargetId> {
        let el = self.document.query_selector(selector).ok().flatten()?;
        self.insert(el)
    }

    pub fn select_all(&mut self, selector: &str) -> Vec<TargetId> {
        elements(&self.document, selector)
            .into_iter()
            .filter_map(|el| self.insert(el))
            .collect()
    }

    /// First match of `selector` inside a registered element.
    pub fn select_within(&mut self, parent: TargetId, selector: &str) -> Option<TargetId> {
        let el = self
            .element(parent)?
            .query_selector(selector)
            .ok()
            .flatten()?;
        self.insert(el)
    }

    pub fn element(&self, target: TargetId) -> Option<&web::HtmlElement> {
        self.nodes.get(target.index()).map(|n| &n.el)
    }

    pub fn body(&mut self) -> Option<TargetId> {
        let body = self.document.body()?;
        self.insert(body.into())
    }

    /// Replace the element's text with one inline span per character,
    /// grouped in per-word spans, and register the character spans.
    pub fn split_chars(&mut self, host: TargetId) -> Vec<TargetId> {
        let Some(el) = self.element(host).cloned() else {
            return Vec::new();
        };
        let text = el.text_content().unwrap_or_default();
        el.set_text_content(None);
        let mut chars = Vec::new();
        for (i, word) in split_words(&text).into_iter().enumerate() {
            if i > 0 {
                let _ = el.append_with_str_1(" ");
            }
            let Ok(word_el) = self.document.create_element("span") else {
                continue;
            };
            word_el.set_class_name(SPLIT_WORD_CLASS);
            for ch in word {
                let Ok(char_el) = self.document.create_element("span") else {
                    continue;
                };
                char_el.set_class_name(SPLIT_CHAR_CLASS);
                char_el.set_text_content(Some(&ch));
                let _ = word_el.append_child(&char_el);
                if let Some(id) = self.insert(char_el) {
                    chars.push(id);
                }
            }
            let _ = el.append_child(&word_el);
        }
        chars
    }

    fn computed(&self, el: &web::Element) -> Option<web::CssStyleDeclaration> {
        self.window.get_computed_style(el).ok().flatten()
    }

    fn write_property(node: &mut Node, property: Property, value: f32) {
        let style = node.el.style();
        match property {
            Property::Opacity => {
                let _ = style.set_property("opacity", &value.to_string());
            }
            Property::X | Property::Y | Property::YPercent | Property::Scale | Property::RotateX => {
                match property {
                    Property::X => node.transform.x = value,
                    Property::Y => node.transform.y = value,
                    Property::YPercent => {
                        // A stylesheet offset was read back in px; it now lives in the percentage.
                        if !node.values.contains_key(&Property::YPercent) {
                            node.transform.y = node.values.get(&Property::Y).copied().unwrap_or(0.0);
                        }
                        node.transform.y_percent = value;
                    }
                    Property::Scale => node.transform.scale = value,
                    _ => node.transform.rotate_x = value,
                }
                let _ = style.set_property("transform", &node.transform.css());
            }
            Property::WidthPercent => {
                let _ = style.set_property("width", &format!("{value}%"));
            }
            Property::Counter => node.el.set_text_content(Some(&counter_text(value))),
            Property::Custom(name) => {
                let _ = style.set_property(&format!("--{name}"), &value.to_string());
            }
        }
        node.values.insert(property, value);
    }
}

impl Scene for DomScene {
    fn bounding_box(&self, target: TargetId) -> Option<Rect> {
        let node = self.nodes.get(target.index())?;
        if !node.el.is_connected() {
            return None;
        }
        let r = node.el.get_bounding_client_rect();
        let scroll_x = self.window.scroll_x().unwrap_or(0.0);
        let scroll_y = self.window.scroll_y().unwrap_or(self.page_scroll);
        Some(Rect::new(
            r.top() + scroll_y,
            r.left() + scroll_x,
            r.width(),
            r.height(),
        ))
    }

    fn property(&self, target: TargetId, property: Property) -> Option<f32> {
        let node = self.nodes.get(target.index())?;
        if let Some(v) = node.values.get(&property) {
            return Some(*v);
        }
        match property {
            Property::Opacity => self
                .computed(&node.el)
                .and_then(|s| s.get_property_value("opacity").ok())
                .and_then(|v| parse_number(&v)),
            Property::X => Some(node.transform.x),
            Property::Y => Some(node.transform.y),
            Property::YPercent => {
                let height = node.el.offset_height() as f32;
                (height > 0.0).then(|| node.transform.y / height * 100.0)
            }
            Property::Scale => Some(node.transform.scale),
            Property::RotateX => Some(node.transform.rotate_x),
            Property::WidthPercent => None,
            Property::Counter => node.el.text_content().and_then(|t| parse_number(&t)),
            Property::Custom(name) => self
                .computed(&node.el)
                .and_then(|s| s.get_property_value(&format!("--{name}")).ok())
                .and_then(|v| parse_number(&v)),
        }
    }

    fn set_property(&mut self, target: TargetId, property: Property, value: f32) -> bool {
        match self.nodes.get_mut(target.index()) {
            Some(node) => {
                Self::write_property(node, property, value);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, target: TargetId, text: &str) -> bool {
        match self.nodes.get(target.index()) {
            Some(node) => {
                node.el.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_class(&mut self, target: TargetId, class: &str, on: bool) -> bool {
        match self.nodes.get(target.index()) {
            Some(node) => {
                let _ = node.el.class_list().toggle_with_force(class, on);
                true
            }
            None => false,
        }
    }

    fn set_style(&mut self, target: TargetId, name: &str, value: &str) -> bool {
        match self.nodes.get(target.index()) {
            Some(node) => {
                let _ = node.el.style().set_property(name, value);
                true
            }
            None => false,
        }
    }

    fn set_page_scroll(&mut self, y: f64) {
        self.page_scroll = y;
        self.window.scroll_to_with_x_and_y(0.0, y);
    }
}
