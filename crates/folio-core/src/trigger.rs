//! Viewport trigger registry.
//!
//! Maps the page scroll offset to animation effects. Geometry is read from the
//! scene at most once per target until `invalidate_geometry` is called (on
//! resize), so evaluating every frame at high refresh rates stays cheap.

use crate::easing::lerp;
use crate::error::MotionError;
use crate::scene::{Property, Rect, Scene, TargetId};
use crate::timeline::Scheduler;
use fnv::FnvHashMap;

/// A horizontal line in the viewport: `fraction` of its height plus a pixel
/// offset, measured down from the viewport top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivationPoint {
    pub fraction: f64,
    pub offset_px: f64,
}

impl ActivationPoint {
    pub const fn fraction(fraction: f64) -> Self {
        Self {
            fraction,
            offset_px: 0.0,
        }
    }

    pub const fn px(offset_px: f64) -> Self {
        Self {
            fraction: 0.0,
            offset_px,
        }
    }

    #[inline]
    pub fn line(&self, viewport_height: f64) -> f64 {
        self.fraction * viewport_height + self.offset_px
    }
}

/// What a trigger measures against: a target element or the document itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Page,
    Element(TargetId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// "Anchor `edge` meets viewport `line`".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub edge: Edge,
    pub line: ActivationPoint,
}

impl Boundary {
    pub const fn new(edge: Edge, line: ActivationPoint) -> Self {
        Self { edge, line }
    }

    /// Scroll offset at which the boundary is met.
    fn scroll_offset(&self, rect: &Rect, viewport_height: f64) -> f64 {
        let edge = match self.edge {
            Edge::Top => rect.top,
            Edge::Bottom => rect.bottom(),
        };
        edge - self.line.line(viewport_height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubTrack {
    pub target: TargetId,
    pub property: Property,
    pub from: f32,
    pub to: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scrub {
    pub start: Boundary,
    pub end: Boundary,
    pub tracks: Vec<ScrubTrack>,
    /// Seconds for the applied progress to catch up with the scroll position.
    pub lag_sec: Option<f64>,
}

impl Scrub {
    /// Anchor top at viewport top → anchor bottom at viewport top.
    pub fn new(tracks: Vec<ScrubTrack>) -> Self {
        Self {
            start: Boundary::new(Edge::Top, ActivationPoint::fraction(0.0)),
            end: Boundary::new(Edge::Bottom, ActivationPoint::fraction(0.0)),
            tracks,
            lag_sec: None,
        }
    }

    pub fn between(mut self, start: Boundary, end: Boundary) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn lag(mut self, seconds: f64) -> Self {
        self.lag_sec = (seconds > 0.0).then_some(seconds);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TriggerMode {
    /// Fires once when the anchor's top reaches the activation line.
    OneShot,
    /// Fires whenever the anchor moves across the activation line, either way.
    Continuous,
    /// Drives property tracks from scroll progress between two boundaries.
    Scrubbed(Scrub),
}

/// What a callback sees when it runs.
pub struct TriggerContext<'a> {
    pub scene: &'a mut dyn Scene,
    pub timelines: &'a mut Scheduler,
    pub now: f64,
    pub scroll: f64,
    /// Whether the anchor is past the activation line.
    pub active: bool,
}

pub type TriggerCallback = Box<dyn FnMut(&mut TriggerContext<'_>)>;

pub struct TriggerSpec {
    pub anchor: Anchor,
    pub activation: ActivationPoint,
    pub mode: TriggerMode,
    pub callback: Option<TriggerCallback>,
}

impl TriggerSpec {
    pub fn one_shot(
        anchor: Anchor,
        activation: ActivationPoint,
        callback: impl FnMut(&mut TriggerContext<'_>) + 'static,
    ) -> Self {
        Self {
            anchor,
            activation,
            mode: TriggerMode::OneShot,
            callback: Some(Box::new(callback)),
        }
    }

    pub fn continuous(
        anchor: Anchor,
        activation: ActivationPoint,
        callback: impl FnMut(&mut TriggerContext<'_>) + 'static,
    ) -> Self {
        Self {
            anchor,
            activation,
            mode: TriggerMode::Continuous,
            callback: Some(Box::new(callback)),
        }
    }

    pub fn scrubbed(anchor: Anchor, scrub: Scrub) -> Self {
        Self {
            anchor,
            activation: scrub.start.line,
            mode: TriggerMode::Scrubbed(scrub),
            callback: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerHandle(usize);

struct TriggerEntry {
    anchor: Anchor,
    activation: ActivationPoint,
    mode: TriggerMode,
    callback: Option<TriggerCallback>,
    fired: bool,
    active: Option<bool>,
    progress: Option<f32>,
    track_last: Vec<Option<f32>>,
    missing_logged: bool,
}

/// Per-frame inputs to `TriggerRegistry::evaluate`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriggerFrame {
    pub scroll: f64,
    pub viewport_height: f64,
    pub now: f64,
    pub dt_sec: f64,
}

/// Normalized progress of `scroll` between two scroll offsets, clamped to
/// \[0, 1\]; exactly 0 at `start` and exactly 1 at `end`.
pub fn scrub_progress(scroll: f64, start: f64, end: f64) -> f32 {
    if end <= start {
        return if scroll >= start { 1.0 } else { 0.0 };
    }
    ((scroll - start) / (end - start)).clamp(0.0, 1.0) as f32
}

#[derive(Default)]
pub struct TriggerRegistry {
    entries: Vec<TriggerEntry>,
    geometry: FnvHashMap<TargetId, Option<Rect>>,
    geometry_reads: usize,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: TriggerSpec) -> TriggerHandle {
        let tracks = match &spec.mode {
            TriggerMode::Scrubbed(scrub) => scrub.tracks.len(),
            _ => 0,
        };
        self.entries.push(TriggerEntry {
            anchor: spec.anchor,
            activation: spec.activation,
            mode: spec.mode,
            callback: spec.callback,
            fired: false,
            active: None,
            progress: None,
            track_last: vec![None; tracks],
            missing_logged: false,
        });
        TriggerHandle(self.entries.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a one-shot trigger has run its callback.
    pub fn fired(&self, handle: TriggerHandle) -> bool {
        self.entries.get(handle.0).map(|e| e.fired).unwrap_or(false)
    }

    /// Applied progress of a scrubbed trigger (after lag smoothing).
    pub fn progress(&self, handle: TriggerHandle) -> Option<f32> {
        self.entries.get(handle.0).and_then(|e| e.progress)
    }

    /// Drop cached geometry; call after layout changes.
    pub fn invalidate_geometry(&mut self) {
        self.geometry.clear();
    }

    /// Number of bounding-box reads issued to the scene so far.
    pub fn geometry_reads(&self) -> usize {
        self.geometry_reads
    }

    pub fn evaluate(
        &mut self,
        frame: TriggerFrame,
        scene: &mut dyn Scene,
        timelines: &mut Scheduler,
    ) {
        let Self {
            entries,
            geometry,
            geometry_reads,
        } = self;
        for entry in entries.iter_mut() {
            if entry.fired {
                continue;
            }
            let rect = match entry.anchor {
                Anchor::Page => Rect::default(),
                Anchor::Element(target) => {
                    let cached = *geometry.entry(target).or_insert_with(|| {
                        *geometry_reads += 1;
                        scene.bounding_box(target)
                    });
                    match cached {
                        Some(r) => r,
                        None => {
                            if !entry.missing_logged {
                                log::warn!("[trigger] {}; skipping", MotionError::MissingTarget(target));
                                entry.missing_logged = true;
                            }
                            continue;
                        }
                    }
                }
            };
            let threshold = rect.top - entry.activation.line(frame.viewport_height);
            let active = frame.scroll >= threshold;
            match &entry.mode {
                TriggerMode::OneShot => {
                    if active {
                        entry.fired = true;
                        run_callback(&mut entry.callback, scene, timelines, frame, true);
                    }
                }
                TriggerMode::Continuous => {
                    if entry.active != Some(active) {
                        entry.active = Some(active);
                        run_callback(&mut entry.callback, scene, timelines, frame, active);
                    }
                }
                TriggerMode::Scrubbed(scrub) => {
                    let start = scrub.start.scroll_offset(&rect, frame.viewport_height);
                    let end = scrub.end.scroll_offset(&rect, frame.viewport_height);
                    let raw = scrub_progress(frame.scroll, start, end);
                    let applied = match (entry.progress, scrub.lag_sec) {
                        (Some(prev), Some(lag)) => {
                            let alpha = 1.0 - (-frame.dt_sec.max(0.0) / lag).exp();
                            let next = prev + (raw - prev) * alpha as f32;
                            if (raw - next).abs() < 1e-4 {
                                raw
                            } else {
                                next
                            }
                        }
                        _ => raw,
                    };
                    entry.progress = Some(applied);
                    let mut missing = None;
                    for (track, last) in scrub.tracks.iter().zip(entry.track_last.iter_mut()) {
                        let value = lerp(track.from, track.to, applied);
                        if *last == Some(value) {
                            continue;
                        }
                        if !scene.set_property(track.target, track.property, value) {
                            missing = Some(track.target);
                        }
                        *last = Some(value);
                    }
                    if let Some(target) = missing {
                        if !entry.missing_logged {
                            log::warn!("[trigger] {}; skipping", MotionError::MissingTarget(target));
                            entry.missing_logged = true;
                        }
                    }
                }
            }
        }
    }
}

fn run_callback(
    callback: &mut Option<TriggerCallback>,
    scene: &mut dyn Scene,
    timelines: &mut Scheduler,
    frame: TriggerFrame,
    active: bool,
) {
    if let Some(cb) = callback.as_mut() {
        let mut ctx = TriggerContext {
            scene,
            timelines,
            now: frame.now,
            scroll: frame.scroll,
            active,
        };
        cb(&mut ctx);
    }
}
