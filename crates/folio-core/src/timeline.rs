//! Timeline scheduler.
//!
//! A timeline is an ordered list of steps whose absolute start times are fixed
//! when the timeline is created. Each tween step animates one or more
//! properties on a homogeneous set of targets, optionally staggered, repeated
//! and yoyo'd. `advance` samples every live timeline at the given clock time
//! and writes the resulting values into the scene.

use crate::easing::{lerp, Ease};
use crate::error::MotionError;
use crate::scene::{Mutation, Property, Scene, TargetId};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Extra passes after the first one.
    Times(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Times(0)
    }
}

/// Where a step starts relative to the rest of the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepPosition {
    /// Right after the previous step ends.
    Sequential,
    /// Offset from the previous step's end; negative values overlap.
    Relative(f64),
    /// Absolute offset from the timeline start.
    At(f64),
}

/// One animated property. A missing `from` is read from the scene when the
/// element starts; a missing `to` is read from the scene when the timeline is
/// created and `from` is applied immediately ("from" tweens).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub property: Property,
    pub from: Option<f32>,
    pub to: Option<f32>,
}

impl Tween {
    pub fn to(property: Property, to: f32) -> Self {
        Self {
            property,
            from: None,
            to: Some(to),
        }
    }

    pub fn from(property: Property, from: f32) -> Self {
        Self {
            property,
            from: Some(from),
            to: None,
        }
    }

    pub fn from_to(property: Property, from: f32, to: f32) -> Self {
        Self {
            property,
            from: Some(from),
            to: Some(to),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepKind {
    Tween {
        tweens: SmallVec<[Tween; 4]>,
        duration: f64,
        easing: Ease,
        stagger: f64,
        repeat: Repeat,
        yoyo: bool,
        /// Round every sampled value to the nearest whole number.
        snap: bool,
    },
    Set(Vec<Mutation>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineStep {
    pub targets: Vec<TargetId>,
    pub position: StepPosition,
    pub kind: StepKind,
}

impl TimelineStep {
    pub fn tween(targets: impl Into<Vec<TargetId>>, duration: f64) -> Self {
        Self {
            targets: targets.into(),
            position: StepPosition::Sequential,
            kind: StepKind::Tween {
                tweens: SmallVec::new(),
                duration,
                easing: Ease::default(),
                stagger: 0.0,
                repeat: Repeat::default(),
                yoyo: false,
                snap: false,
            },
        }
    }

    pub fn set(targets: impl Into<Vec<TargetId>>, mutations: Vec<Mutation>) -> Self {
        Self {
            targets: targets.into(),
            position: StepPosition::Sequential,
            kind: StepKind::Set(mutations),
        }
    }

    pub fn with(mut self, tween: Tween) -> Self {
        if let StepKind::Tween { tweens, .. } = &mut self.kind {
            tweens.push(tween);
        }
        self
    }

    pub fn to(self, property: Property, value: f32) -> Self {
        self.with(Tween::to(property, value))
    }

    pub fn from(self, property: Property, value: f32) -> Self {
        self.with(Tween::from(property, value))
    }

    pub fn from_to(self, property: Property, from: f32, to: f32) -> Self {
        self.with(Tween::from_to(property, from, to))
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        if let StepKind::Tween { easing, .. } = &mut self.kind {
            *easing = ease;
        }
        self
    }

    pub fn stagger(mut self, interval: f64) -> Self {
        if let StepKind::Tween { stagger, .. } = &mut self.kind {
            *stagger = interval.max(0.0);
        }
        self
    }

    pub fn repeat(mut self, count: Repeat) -> Self {
        if let StepKind::Tween { repeat, .. } = &mut self.kind {
            *repeat = count;
        }
        self
    }

    pub fn yoyo(mut self, on: bool) -> Self {
        if let StepKind::Tween { yoyo, .. } = &mut self.kind {
            *yoyo = on;
        }
        self
    }

    pub fn snap(mut self) -> Self {
        if let StepKind::Tween { snap, .. } = &mut self.kind {
            *snap = true;
        }
        self
    }

    pub fn at(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    /// Shorthand for `StepPosition::Relative`.
    pub fn offset(self, seconds: f64) -> Self {
        self.at(StepPosition::Relative(seconds))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimelineOptions {
    pub delay: f64,
    /// Cancel earlier live timelines that animate any of the same
    /// (target, property) pairs.
    pub overwrite: bool,
}

impl TimelineOptions {
    pub fn delay(delay: f64) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineHandle(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineState {
    Pending,
    Running,
    Complete,
}

#[derive(Clone, Copy, Debug)]
struct Channel {
    property: Property,
    from: Option<f32>,
    to: Option<f32>,
    last: Option<f32>,
}

#[derive(Clone, Debug)]
struct ElementTrack {
    target: TargetId,
    start: f64,
    started: bool,
    done: bool,
    channels: SmallVec<[Channel; 4]>,
}

#[derive(Clone, Debug)]
enum Scheduled {
    Tween {
        duration: f64,
        easing: Ease,
        repeat: Repeat,
        yoyo: bool,
        snap: bool,
        elements: Vec<ElementTrack>,
    },
    Set {
        at: f64,
        targets: Vec<TargetId>,
        mutations: Vec<Mutation>,
        done: bool,
    },
}

impl Scheduled {
    fn is_done(&self) -> bool {
        match self {
            Scheduled::Tween { elements, .. } => elements.iter().all(|e| e.done),
            Scheduled::Set { done, .. } => *done,
        }
    }

    fn touches(&self, target: TargetId, property: Property) -> bool {
        match self {
            Scheduled::Tween { elements, .. } => elements
                .iter()
                .any(|e| e.target == target && e.channels.iter().any(|c| c.property == property)),
            Scheduled::Set { .. } => false,
        }
    }
}

struct Timeline {
    handle: TimelineHandle,
    start: f64,
    steps: Vec<Scheduled>,
    state: TimelineState,
    missing_logged: bool,
}

impl Timeline {
    fn touches(&self, target: TargetId, property: Property) -> bool {
        self.steps.iter().any(|s| s.touches(target, property))
    }
}

/// Progress within the current pass and whether every pass has finished.
///
/// With yoyo, odd passes run backwards; a finite yoyo timeline with an odd
/// repeat count therefore settles back at its start value.
pub fn pass_progress(local: f64, duration: f64, repeat: Repeat, yoyo: bool) -> (f32, bool) {
    let passes = match repeat {
        Repeat::Times(n) => Some(n as f64 + 1.0),
        Repeat::Infinite => None,
    };
    let settled = |passes: f64| {
        let last_reversed = yoyo && (passes as u64 - 1) % 2 == 1;
        (if last_reversed { 0.0 } else { 1.0 }, true)
    };
    if duration <= 0.0 {
        return settled(passes.unwrap_or(1.0));
    }
    if let Some(passes) = passes {
        if local >= duration * passes {
            return settled(passes);
        }
    }
    let cycle = (local / duration).floor();
    let t = ((local - cycle * duration) / duration).clamp(0.0, 1.0) as f32;
    if yoyo && (cycle as u64) % 2 == 1 {
        (1.0 - t, false)
    } else {
        (t, false)
    }
}

#[derive(Default)]
pub struct Scheduler {
    timelines: Vec<Timeline>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `steps` to start at `now + options.delay`.
    ///
    /// Step start times are resolved here once. "From" tweens capture their
    /// end value and apply their start value immediately so the target does
    /// not flash its final state before the step begins.
    pub fn create(
        &mut self,
        steps: Vec<TimelineStep>,
        options: TimelineOptions,
        now: f64,
        scene: &mut dyn Scene,
    ) -> TimelineHandle {
        let handle = TimelineHandle(self.next_id);
        self.next_id += 1;
        let t0 = now + options.delay.max(0.0);

        let mut scheduled = Vec::with_capacity(steps.len());
        let mut prev_end = t0;
        for step in steps {
            let start = match step.position {
                StepPosition::Sequential => prev_end,
                StepPosition::Relative(offset) => prev_end + offset,
                StepPosition::At(at) => t0 + at,
            }
            .max(t0);
            let (item, end) = match step.kind {
                StepKind::Tween {
                    tweens,
                    duration,
                    easing,
                    stagger,
                    repeat,
                    yoyo,
                    snap,
                } => {
                    let duration = duration.max(0.0);
                    let elements: Vec<ElementTrack> = step
                        .targets
                        .iter()
                        .enumerate()
                        .map(|(i, &target)| ElementTrack {
                            target,
                            start: start + i as f64 * stagger,
                            started: false,
                            done: false,
                            channels: tweens
                                .iter()
                                .map(|tw| Channel {
                                    property: tw.property,
                                    from: tw.from,
                                    to: tw.to,
                                    last: None,
                                })
                                .collect(),
                        })
                        .collect();
                    let pass_span = match repeat {
                        Repeat::Times(n) => duration * (n as f64 + 1.0),
                        Repeat::Infinite => f64::INFINITY,
                    };
                    let last_start = elements.last().map(|e| e.start).unwrap_or(start);
                    let item = Scheduled::Tween {
                        duration,
                        easing,
                        repeat,
                        yoyo,
                        snap,
                        elements,
                    };
                    (item, last_start + pass_span)
                }
                StepKind::Set(mutations) => (
                    Scheduled::Set {
                        at: start,
                        targets: step.targets,
                        mutations,
                        done: false,
                    },
                    start,
                ),
            };
            scheduled.push(item);
            prev_end = end;
        }

        let mut timeline = Timeline {
            handle,
            start: t0,
            steps: scheduled,
            state: TimelineState::Pending,
            missing_logged: false,
        };
        Self::render_from_tweens(&mut timeline, scene);

        if options.overwrite {
            let overlaps: Vec<TimelineHandle> = self
                .timelines
                .iter()
                .filter(|other| {
                    timeline.steps.iter().any(|s| match s {
                        Scheduled::Tween { elements, .. } => elements.iter().any(|e| {
                            e.channels
                                .iter()
                                .any(|c| other.touches(e.target, c.property))
                        }),
                        Scheduled::Set { .. } => false,
                    })
                })
                .map(|other| other.handle)
                .collect();
            for h in overlaps {
                self.cancel(h);
            }
        }

        self.timelines.push(timeline);
        handle
    }

    /// Stop a timeline. Steps it has not reached never run.
    pub fn cancel(&mut self, handle: TimelineHandle) -> bool {
        let before = self.timelines.len();
        self.timelines.retain(|t| t.handle != handle);
        before != self.timelines.len()
    }

    /// Ended timelines (finished or cancelled) are dropped, not remembered:
    /// handles are issued in order, so any issued handle that is no longer
    /// held reports `Complete`. `None` for handles this scheduler never issued.
    pub fn state(&self, handle: TimelineHandle) -> Option<TimelineState> {
        if let Some(t) = self.timelines.iter().find(|t| t.handle == handle) {
            return Some(t.state);
        }
        (handle.0 < self.next_id).then_some(TimelineState::Complete)
    }

    pub fn is_live(&self, handle: TimelineHandle) -> bool {
        self.timelines.iter().any(|t| t.handle == handle)
    }

    /// Number of timelines that are pending or running.
    pub fn running(&self) -> usize {
        self.timelines.len()
    }

    /// Sample every live timeline at clock time `now` (seconds).
    pub fn advance(&mut self, now: f64, scene: &mut dyn Scene) {
        for timeline in &mut self.timelines {
            if now < timeline.start {
                continue;
            }
            timeline.state = TimelineState::Running;
            let mut missing: Option<TargetId> = None;
            for step in &mut timeline.steps {
                match step {
                    Scheduled::Tween {
                        duration,
                        easing,
                        repeat,
                        yoyo,
                        snap,
                        elements,
                    } => {
                        for el in elements.iter_mut() {
                            if el.done || now < el.start {
                                continue;
                            }
                            if !el.started {
                                for ch in el.channels.iter_mut() {
                                    let current = scene
                                        .property(el.target, ch.property)
                                        .unwrap_or_else(|| ch.property.neutral());
                                    ch.from.get_or_insert(current);
                                    ch.to.get_or_insert(current);
                                }
                                el.started = true;
                            }
                            let (p, finished) =
                                pass_progress(now - el.start, *duration, *repeat, *yoyo);
                            let eased = easing.apply(p);
                            for ch in el.channels.iter_mut() {
                                let from = ch.from.unwrap_or_else(|| ch.property.neutral());
                                let to = ch.to.unwrap_or(from);
                                let mut value = if p >= 1.0 {
                                    to
                                } else if p <= 0.0 {
                                    from
                                } else {
                                    lerp(from, to, eased)
                                };
                                if *snap {
                                    value = value.round();
                                }
                                if ch.last != Some(value) {
                                    if !scene.set_property(el.target, ch.property, value) {
                                        missing = Some(el.target);
                                    }
                                    ch.last = Some(value);
                                }
                            }
                            if finished {
                                el.done = true;
                            }
                        }
                    }
                    Scheduled::Set {
                        at,
                        targets,
                        mutations,
                        done,
                    } => {
                        if *done || now < *at {
                            continue;
                        }
                        for &target in targets.iter() {
                            for m in mutations.iter() {
                                if !scene.apply(target, m) {
                                    missing = Some(target);
                                }
                            }
                        }
                        *done = true;
                    }
                }
            }
            if let Some(target) = missing {
                if !timeline.missing_logged {
                    log::warn!(
                        "[timeline {:?}] {}; skipping",
                        timeline.handle,
                        MotionError::MissingTarget(target)
                    );
                    timeline.missing_logged = true;
                }
            }
        }

        self.timelines
            .retain(|t| !t.steps.iter().all(Scheduled::is_done));
    }

    fn render_from_tweens(timeline: &mut Timeline, scene: &mut dyn Scene) {
        for step in &mut timeline.steps {
            let Scheduled::Tween { elements, .. } = step else {
                continue;
            };
            for el in elements.iter_mut() {
                for ch in el.channels.iter_mut() {
                    if let (Some(from), None) = (ch.from, ch.to) {
                        let natural = scene
                            .property(el.target, ch.property)
                            .unwrap_or_else(|| ch.property.neutral());
                        ch.to = Some(natural);
                        scene.set_property(el.target, ch.property, from);
                        ch.last = Some(from);
                    }
                }
            }
        }
    }
}
