//! Per-frame coordinator.
//!
//! The driver owns no domain state; it runs a fixed list of stages over
//! `MotionState` once per display refresh. Components never schedule
//! themselves.

use crate::error::MotionError;
use crate::input::{InputLatch, MagneticSample, ScrollTarget};
use crate::page::{self, PageHandles, PageTargets};
use crate::particles::{FieldUniforms, ParticleConfig, ParticleField};
use crate::scene::{Property, Scene};
use crate::scroll::{ScrollConfig, ScrollPhysics};
use crate::state::{Camera, CursorFollower, PointerState, Viewport};
use crate::timeline::{Scheduler, TimelineOptions};
use crate::trigger::{TriggerFrame, TriggerRegistry};
use rand::Rng;

/// GPU side of the particle field.
pub trait FieldRenderer {
    fn resize(&mut self, viewport: Viewport);
    /// Submit one frame. `ShaderCompile` disables the field for good; other
    /// errors only drop the current frame.
    fn draw(&mut self, uniforms: &FieldUniforms) -> Result<(), MotionError>;
}

#[derive(Clone, Debug, Default)]
pub struct MotionConfig {
    pub scroll: ScrollConfig,
    pub particles: ParticleConfig,
}

pub struct MotionState {
    pub scroll: ScrollPhysics,
    pub triggers: TriggerRegistry,
    pub timelines: Scheduler,
    pub field: ParticleField,
    pub pointer: PointerState,
    pub cursor: CursorFollower,
    pub camera: Camera,
    pub viewport: Viewport,
    pub targets: PageTargets,
    pub handles: PageHandles,
    last_ms: Option<f64>,
    elapsed_sec: f64,
}

impl MotionState {
    pub fn new<R: Rng>(config: MotionConfig, viewport: Viewport, rng: &mut R) -> Self {
        let mut camera = Camera::default();
        camera.set_viewport(&viewport);
        Self {
            scroll: ScrollPhysics::new(config.scroll),
            triggers: TriggerRegistry::new(),
            timelines: Scheduler::new(),
            field: ParticleField::from_config(&config.particles, rng),
            pointer: PointerState::default(),
            cursor: CursorFollower::default(),
            camera,
            viewport,
            targets: PageTargets::default(),
            handles: PageHandles::default(),
            last_ms: None,
            elapsed_sec: 0.0,
        }
    }

    /// Register the page's triggers and load-time timelines.
    pub fn install_page(&mut self, targets: PageTargets, scene: &mut dyn Scene) {
        self.handles = page::register(
            &targets,
            &mut self.triggers,
            &mut self.timelines,
            scene,
            self.elapsed_sec,
        );
        self.targets = targets;
    }

    /// Stop the endless loops; one-shot work is left to finish.
    pub fn teardown(&mut self) {
        for handle in self.handles.ambient_loops.drain(..) {
            self.timelines.cancel(handle);
        }
    }

    /// Seconds since the first tick.
    pub fn elapsed(&self) -> f64 {
        self.elapsed_sec
    }
}

/// Everything one stage can touch.
pub struct Frame<'a> {
    pub state: &'a mut MotionState,
    pub scene: &'a mut dyn Scene,
    pub renderer: Option<&'a mut dyn FieldRenderer>,
    pub input: InputLatch,
    pub dt_ms: f64,
    pub now: f64,
}

pub type Stage = fn(&mut Frame<'_>);

pub struct FrameDriver {
    stages: Vec<(&'static str, Stage)>,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self {
            stages: vec![
                ("input", apply_input),
                ("scroll", integrate_scroll),
                ("triggers", evaluate_triggers),
                ("timelines", advance_timelines),
                ("pointer", smooth_pointer),
                ("field", update_field),
                ("render", render_field),
            ],
        }
    }
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(name, _)| *name).collect()
    }

    /// Run every stage once for a frame stamped `now_ms` (monotonic clock).
    pub fn tick<'a>(
        &self,
        state: &'a mut MotionState,
        scene: &'a mut dyn Scene,
        renderer: Option<&'a mut dyn FieldRenderer>,
        input: InputLatch,
        now_ms: f64,
    ) {
        let dt_ms = match state.last_ms {
            Some(last) if now_ms > last => now_ms - last,
            _ => 0.0,
        };
        state.last_ms = Some(state.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        state.elapsed_sec += dt_ms / 1000.0;
        let now = state.elapsed_sec;
        let mut frame = Frame {
            state,
            scene,
            renderer,
            input,
            dt_ms,
            now,
        };
        for (_, stage) in &self.stages {
            stage(&mut frame);
        }
    }
}

fn apply_input(f: &mut Frame<'_>) {
    let state = &mut *f.state;
    let input = &mut f.input;

    if let Some(viewport) = input.viewport.take() {
        state.viewport = viewport;
        state.camera.set_viewport(&viewport);
        state.triggers.invalidate_geometry();
        if let Some(r) = f.renderer.as_deref_mut() {
            r.resize(viewport);
        }
        log::debug!(
            "[frame] resized to {}x{} @{}",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );
    }
    if let Some(extent) = input.max_extent.take() {
        state.scroll.set_max_extent(extent);
    }
    if let Some(y) = input.page_scroll.take() {
        if state.scroll.sync_external(y) {
            log::debug!("[frame] adopted native scroll offset {}", y);
        }
    }

    if input.wheel_delta != 0.0 {
        state.scroll.on_wheel(input.wheel_delta);
    }
    if input.touch_delta != 0.0 {
        state.scroll.on_touch(input.touch_delta);
    }
    let vh = state.viewport.height as f64;
    for key in input.keys.drain(..) {
        state.scroll.on_key(key, vh);
    }

    if let Some(request) = input.scroll_to.take() {
        let position = match request.target {
            ScrollTarget::Position(y) => Some(y),
            ScrollTarget::Element(target) => match f.scene.bounding_box(target) {
                Some(rect) => Some(rect.top),
                None => {
                    log::warn!("[frame] {}; ignoring scroll-to", MotionError::MissingTarget(target));
                    None
                }
            },
        };
        if let Some(y) = position {
            state.scroll.scroll_to(y, request.offset, request.duration_sec);
        }
    }

    if let Some(ndc) = input.pointer_ndc {
        state.pointer.set_raw(ndc);
    }
    if let Some(px) = input.pointer_px {
        state.cursor.pointer_px = px;
    }

    if std::mem::take(&mut input.submit) {
        if let Some(button) = state.targets.submit_button {
            state.timelines.create(
                page::submit_feedback(button),
                TimelineOptions::default(),
                f.now,
                f.scene,
            );
        }
    }

    for sample in input.magnetic.drain(..) {
        let steps = match sample {
            MagneticSample::Pull { target, offset } => page::magnetic_pull(target, offset),
            MagneticSample::Release { target } => page::magnetic_release(target),
        };
        state.timelines.create(
            steps,
            TimelineOptions {
                overwrite: true,
                ..TimelineOptions::default()
            },
            f.now,
            f.scene,
        );
    }
}

fn integrate_scroll(f: &mut Frame<'_>) {
    let before = f.state.scroll.current_position();
    f.state.scroll.tick(f.dt_ms);
    let after = f.state.scroll.current_position();
    if after != before {
        f.scene.set_page_scroll(after);
    }
}

fn evaluate_triggers(f: &mut Frame<'_>) {
    let state = &mut *f.state;
    let frame = TriggerFrame {
        scroll: state.scroll.current_position(),
        viewport_height: state.viewport.height as f64,
        now: f.now,
        dt_sec: f.dt_ms / 1000.0,
    };
    state.triggers.evaluate(frame, f.scene, &mut state.timelines);
}

fn advance_timelines(f: &mut Frame<'_>) {
    f.state.timelines.advance(f.now, f.scene);
}

fn smooth_pointer(f: &mut Frame<'_>) {
    let state = &mut *f.state;
    state.pointer.smooth();
    state.cursor.step();
    if let Some(cursor) = state.targets.cursor {
        f.scene.set_property(cursor, Property::X, state.cursor.pointer_px.x);
        f.scene.set_property(cursor, Property::Y, state.cursor.pointer_px.y);
    }
    if let Some(follower) = state.targets.cursor_follower {
        f.scene.set_property(follower, Property::X, state.cursor.follower_px.x);
        f.scene.set_property(follower, Property::Y, state.cursor.follower_px.y);
    }
}

fn update_field(f: &mut Frame<'_>) {
    let state = &mut *f.state;
    state.field.tick(f.now as f32, state.pointer.smoothed);
}

fn render_field(f: &mut Frame<'_>) {
    let state = &mut *f.state;
    if !state.field.is_enabled() {
        return;
    }
    let Some(renderer) = f.renderer.as_deref_mut() else {
        return;
    };
    let uniforms = state.field.uniforms(&state.camera, &state.viewport);
    match renderer.draw(&uniforms) {
        Ok(()) => {}
        Err(err @ MotionError::ShaderCompile(_)) => state.field.disable(&err),
        Err(err) => log::error!("[frame] draw skipped: {}", err),
    }
}
