//! Smooth-scroll integrator.
//!
//! Raw input moves a target; each tick the smoothed position eases from where
//! it was when the target last changed toward that target over a fixed
//! window. Programmatic scroll-to motions use their own duration and curve and
//! are cancelled by any later user input.

use crate::constants::{
    KEY_LINE_STEP_PX, KEY_PAGE_FRACTION, SCROLL_DURATION_SEC, SCROLL_SETTLE_EPSILON_PX,
    SCROLL_TO_DURATION_SEC,
};
use crate::easing::Ease;
use crate::error::MotionError;

#[derive(Clone, Debug)]
pub struct ScrollConfig {
    /// Smoothing window for wheel/touch/keyboard input.
    pub duration_sec: f64,
    /// Default window for programmatic scroll-to.
    pub scroll_to_duration_sec: f64,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
    /// Largest reachable scroll offset (document height minus viewport).
    pub max_extent: f64,
    pub easing: Ease,
    pub scroll_to_easing: Ease,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_sec: SCROLL_DURATION_SEC,
            scroll_to_duration_sec: SCROLL_TO_DURATION_SEC,
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
            max_extent: 0.0,
            easing: Ease::ExpoOut,
            scroll_to_easing: Ease::SineInOut,
        }
    }
}

/// Snapshot of the integrator. `velocity` is derived from consecutive ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub raw_target: f64,
    pub smoothed: f64,
    pub velocity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MotionKind {
    Input,
    ScrollTo,
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    easing: Ease,
    kind: MotionKind,
}

impl Motion {
    fn sample(&self) -> (f64, bool) {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = (self.elapsed / self.duration) as f32;
        let eased = self.easing.apply(t) as f64;
        (self.from + (self.to - self.from) * eased, false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollKey {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
}

pub struct ScrollPhysics {
    config: ScrollConfig,
    state: ScrollState,
    motion: Option<Motion>,
}

impl ScrollPhysics {
    pub fn new(mut config: ScrollConfig) -> Self {
        config.max_extent = config.max_extent.max(0.0);
        Self {
            config,
            state: ScrollState::default(),
            motion: None,
        }
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn current_position(&self) -> f64 {
        self.state.smoothed
    }

    pub fn target(&self) -> f64 {
        self.state.raw_target
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn max_extent(&self) -> f64 {
        self.config.max_extent
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// True while a programmatic scroll-to is in flight.
    pub fn is_scrolling_to(&self) -> bool {
        matches!(self.motion, Some(m) if m.kind == MotionKind::ScrollTo)
    }

    /// Update the reachable range, e.g. after a layout change.
    pub fn set_max_extent(&mut self, extent: f64) {
        self.config.max_extent = extent.max(0.0);
        let max = self.config.max_extent;
        if self.state.smoothed > max {
            self.state.smoothed = max;
        }
        if self.state.raw_target > max {
            self.state.raw_target = max;
            if let Some(m) = &mut self.motion {
                m.to = max;
                m.from = m.from.min(max);
            }
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.scroll_by(delta_y * self.config.wheel_multiplier);
    }

    pub fn on_touch(&mut self, delta_y: f64) {
        self.scroll_by(delta_y * self.config.touch_multiplier);
    }

    pub fn on_key(&mut self, key: ScrollKey, viewport_height: f64) {
        let page = viewport_height * KEY_PAGE_FRACTION;
        match key {
            ScrollKey::LineUp => self.scroll_by(-KEY_LINE_STEP_PX),
            ScrollKey::LineDown => self.scroll_by(KEY_LINE_STEP_PX),
            ScrollKey::PageUp => self.scroll_by(-page),
            ScrollKey::PageDown => self.scroll_by(page),
            ScrollKey::Home => self.start_input_motion(0.0),
            ScrollKey::End => self.start_input_motion(self.config.max_extent),
        }
    }

    /// Move the target by a user-input delta. Cancels an in-flight scroll-to.
    pub fn scroll_by(&mut self, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let base = if self.is_scrolling_to() {
            self.state.smoothed
        } else {
            self.state.raw_target
        };
        self.start_input_motion(base + delta);
    }

    /// Animate to `position + offset` over `duration_sec` (or the configured
    /// scroll-to window). Replaces any motion in flight.
    pub fn scroll_to(&mut self, position: f64, offset: f64, duration_sec: Option<f64>) {
        let to = self.clamp_target(position + offset);
        let duration = duration_sec.unwrap_or(self.config.scroll_to_duration_sec);
        self.state.raw_target = to;
        self.motion = Some(Motion {
            from: self.state.smoothed,
            to,
            elapsed: 0.0,
            duration,
            easing: self.config.scroll_to_easing,
            kind: MotionKind::ScrollTo,
        });
    }

    /// Jump without animating.
    pub fn scroll_immediate(&mut self, position: f64) {
        let to = self.clamp_target(position);
        self.motion = None;
        self.state.raw_target = to;
        self.state.smoothed = to;
        self.state.velocity = 0.0;
    }

    /// Adopt an offset the page reached without the integrator (scrollbar
    /// drag, focus scrolling, find-in-page). Ignored while a motion is in
    /// flight, when offsets reported back are the integrator's own writes.
    /// Returns whether the position changed.
    pub fn sync_external(&mut self, position: f64) -> bool {
        if self.motion.is_some()
            || !position.is_finite()
            || (position - self.state.smoothed).abs() <= SCROLL_SETTLE_EPSILON_PX
        {
            return false;
        }
        self.scroll_immediate(position);
        true
    }

    /// Advance the smoothed position by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        let dt_sec = dt_ms.max(0.0) / 1000.0;
        let prev = self.state.smoothed;
        if let Some(m) = &mut self.motion {
            m.elapsed += dt_sec;
            let (pos, done) = m.sample();
            self.state.smoothed = pos;
            if done {
                self.motion = None;
            }
        }
        self.state.velocity = if dt_sec > 0.0 {
            (self.state.smoothed - prev) / dt_sec
        } else {
            0.0
        };
    }

    fn start_input_motion(&mut self, requested: f64) {
        let to = self.clamp_target(requested);
        if to == self.state.raw_target && self.motion.is_some() {
            return;
        }
        self.state.raw_target = to;
        self.motion = Some(Motion {
            from: self.state.smoothed,
            to,
            elapsed: 0.0,
            duration: self.config.duration_sec,
            easing: self.config.easing,
            kind: MotionKind::Input,
        });
    }

    fn clamp_target(&self, requested: f64) -> f64 {
        let max = self.config.max_extent;
        if !(0.0..=max).contains(&requested) {
            log::debug!(
                "[scroll] {}",
                MotionError::InvalidRange {
                    requested,
                    max
                }
            );
        }
        if requested.is_nan() {
            return self.state.raw_target;
        }
        requested.clamp(0.0, max)
    }
}
