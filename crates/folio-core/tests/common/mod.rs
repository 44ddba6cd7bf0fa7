// In-memory scene used by the core integration tests.

#![allow(dead_code)]

use folio_core::{Property, Rect, Scene, TargetId};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryScene {
    pub rects: HashMap<TargetId, Rect>,
    pub values: HashMap<(TargetId, Property), f32>,
    pub text: HashMap<TargetId, String>,
    pub classes: HashMap<(TargetId, String), bool>,
    pub styles: HashMap<(TargetId, String), String>,
    pub page_scroll: f64,
    /// Every property write, in order.
    pub writes: Vec<(TargetId, Property, f32)>,
    pub geometry_reads: Cell<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, id: u32, rect: Rect) -> Self {
        self.rects.insert(TargetId(id), rect);
        self
    }

    pub fn add(&mut self, id: u32, top: f64, height: f64) -> TargetId {
        let target = TargetId(id);
        self.rects.insert(target, Rect::new(top, 0.0, 100.0, height));
        target
    }

    pub fn value(&self, target: TargetId, property: Property) -> Option<f32> {
        self.values.get(&(target, property)).copied()
    }

    pub fn writes_to(&self, target: TargetId, property: Property) -> Vec<f32> {
        self.writes
            .iter()
            .filter(|(t, p, _)| *t == target && *p == property)
            .map(|(_, _, v)| *v)
            .collect()
    }

    pub fn has_class(&self, target: TargetId, class: &str) -> bool {
        self.classes
            .get(&(target, class.to_string()))
            .copied()
            .unwrap_or(false)
    }
}

impl Scene for MemoryScene {
    fn bounding_box(&self, target: TargetId) -> Option<Rect> {
        self.geometry_reads.set(self.geometry_reads.get() + 1);
        self.rects.get(&target).copied()
    }

    fn property(&self, target: TargetId, property: Property) -> Option<f32> {
        self.values.get(&(target, property)).copied()
    }

    fn set_property(&mut self, target: TargetId, property: Property, value: f32) -> bool {
        if !self.rects.contains_key(&target) {
            return false;
        }
        self.values.insert((target, property), value);
        self.writes.push((target, property, value));
        true
    }

    fn set_text(&mut self, target: TargetId, text: &str) -> bool {
        if !self.rects.contains_key(&target) {
            return false;
        }
        self.text.insert(target, text.to_string());
        true
    }

    fn set_class(&mut self, target: TargetId, class: &str, on: bool) -> bool {
        if !self.rects.contains_key(&target) {
            return false;
        }
        self.classes.insert((target, class.to_string()), on);
        true
    }

    fn set_style(&mut self, target: TargetId, name: &str, value: &str) -> bool {
        if !self.rects.contains_key(&target) {
            return false;
        }
        self.styles
            .insert((target, name.to_string()), value.to_string());
        true
    }

    fn set_page_scroll(&mut self, y: f64) {
        self.page_scroll = y;
    }
}
