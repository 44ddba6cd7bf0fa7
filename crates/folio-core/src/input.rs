//! Input captured between frames.
//!
//! Event handlers write here; the frame driver drains it once per tick. Most
//! fields keep only the latest sample. Wheel and touch deltas are summed so
//! no scroll distance is lost between ticks.

use crate::scene::TargetId;
use crate::scroll::ScrollKey;
use crate::state::Viewport;
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollTarget {
    Position(f64),
    Element(TargetId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub target: ScrollTarget,
    pub offset: f64,
    pub duration_sec: Option<f64>,
}

/// Pointer interaction with a magnetic button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MagneticSample {
    /// Pointer offset from the button centre, in px.
    Pull { target: TargetId, offset: Vec2 },
    Release { target: TargetId },
}

impl MagneticSample {
    pub fn target(&self) -> TargetId {
        match *self {
            MagneticSample::Pull { target, .. } | MagneticSample::Release { target } => target,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputLatch {
    pub pointer_ndc: Option<Vec2>,
    pub pointer_px: Option<Vec2>,
    pub wheel_delta: f64,
    pub touch_delta: f64,
    pub keys: SmallVec<[ScrollKey; 4]>,
    pub viewport: Option<Viewport>,
    pub max_extent: Option<f64>,
    /// Latest page offset reported by the browser.
    pub page_scroll: Option<f64>,
    pub scroll_to: Option<ScrollRequest>,
    pub submit: bool,
    pub magnetic: SmallVec<[MagneticSample; 2]>,
}

impl InputLatch {
    pub fn pointer(&mut self, ndc: Vec2, px: Vec2) {
        self.pointer_ndc = Some(ndc);
        self.pointer_px = Some(px);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y.is_finite() {
            self.wheel_delta += delta_y;
        }
    }

    pub fn touch(&mut self, delta_y: f64) {
        if delta_y.is_finite() {
            self.touch_delta += delta_y;
        }
    }

    pub fn key(&mut self, key: ScrollKey) {
        self.keys.push(key);
    }

    pub fn resize(&mut self, viewport: Viewport, max_extent: f64) {
        self.viewport = Some(viewport);
        self.max_extent = Some(max_extent);
    }

    pub fn page_scrolled(&mut self, y: f64) {
        if y.is_finite() {
            self.page_scroll = Some(y);
        }
    }

    /// A later request replaces an earlier one that has not been applied yet.
    pub fn scroll_to(&mut self, request: ScrollRequest) {
        self.scroll_to = Some(request);
    }

    pub fn submit(&mut self) {
        self.submit = true;
    }

    /// Keeps only the newest sample per button.
    pub fn magnetic(&mut self, sample: MagneticSample) {
        let target = sample.target();
        self.magnetic.retain(|s| s.target() != target);
        self.magnetic.push(sample);
    }

    /// Hand the captured input to the frame and start a fresh latch.
    pub fn take(&mut self) -> InputLatch {
        std::mem::take(self)
    }
}
