//! The page's fixed set of scroll triggers and timelines.
//!
//! The frontend resolves its elements into `TargetId`s and hands them over as
//! a `PageTargets` table; anything it could not find is simply absent and the
//! corresponding behaviour is skipped.

use crate::constants::MAGNETIC_STRENGTH;
use crate::easing::Ease;
use crate::scene::{Mutation, Property, Scene, TargetId};
use crate::timeline::{Repeat, Scheduler, TimelineHandle, TimelineOptions, TimelineStep};
use crate::trigger::{
    ActivationPoint, Anchor, Boundary, Edge, Scrub, ScrubTrack, TriggerContext, TriggerRegistry,
    TriggerSpec,
};
use glam::Vec2;

pub const NAV_SCROLLED_CLASS: &str = "scrolled";
pub const NAV_SCROLLED_AFTER_PX: f64 = 80.0;
pub const SUBMIT_SENT_LABEL: &str = "Message Sent! ✓";
pub const SUBMIT_SENT_BACKGROUND: &str = "linear-gradient(135deg,#22c55e,#15803d)";

#[derive(Clone, Debug, PartialEq)]
pub struct SplitText {
    pub host: TargetId,
    pub chars: Vec<TargetId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillCard {
    pub card: TargetId,
    pub fill: Option<TargetId>,
    pub width_percent: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageTargets {
    pub body: Option<TargetId>,
    pub nav: Option<TargetId>,
    pub cursor: Option<TargetId>,
    pub cursor_follower: Option<TargetId>,

    pub hero: Option<TargetId>,
    pub hero_content: Option<TargetId>,
    pub hero_label: Option<TargetId>,
    pub hero_lines: Vec<TargetId>,
    pub hero_sub: Option<TargetId>,
    pub hero_actions: Option<TargetId>,
    pub hero_stats: Option<TargetId>,
    pub hero_scroll_hint: Option<TargetId>,
    /// Counter element and its whole-number target.
    pub stat_counters: Vec<(TargetId, f32)>,

    pub split_texts: Vec<SplitText>,
    pub reveal_up: Vec<TargetId>,
    pub reveal_scale: Vec<TargetId>,

    pub about_image: Option<TargetId>,
    pub about_image_bg: Option<TargetId>,

    pub skills: Option<TargetId>,
    pub skill_cards: Vec<SkillCard>,
    pub project_cards: Vec<TargetId>,
    pub section_tags: Vec<TargetId>,

    pub contact: Option<TargetId>,
    pub contact_children: Vec<TargetId>,
    pub submit_button: Option<TargetId>,
}

/// Handles the page keeps so its endless loops can be stopped at teardown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageHandles {
    pub ambient_loops: Vec<TimelineHandle>,
}

fn opt(target: Option<TargetId>) -> Vec<TargetId> {
    target.into_iter().collect()
}

/// Register every trigger and start every load-time timeline.
pub fn register(
    targets: &PageTargets,
    triggers: &mut TriggerRegistry,
    timelines: &mut Scheduler,
    scene: &mut dyn Scene,
    now: f64,
) -> PageHandles {
    let mut handles = PageHandles::default();

    // Page fade-in
    if let Some(body) = targets.body {
        timelines.create(
            vec![TimelineStep::tween(vec![body], 0.5).from(Property::Opacity, 0.0)],
            TimelineOptions::default(),
            now,
            scene,
        );
    }

    // Nav background once the page has scrolled
    if let Some(nav) = targets.nav {
        triggers.register(TriggerSpec::continuous(
            Anchor::Page,
            ActivationPoint::px(-NAV_SCROLLED_AFTER_PX),
            move |ctx: &mut TriggerContext<'_>| {
                ctx.scene.set_class(nav, NAV_SCROLLED_CLASS, ctx.active);
            },
        ));
    }

    timelines.create(hero_entrance(targets), TimelineOptions::delay(0.3), now, scene);

    for &(counter, value) in &targets.stat_counters {
        timelines.create(
            vec![TimelineStep::tween(vec![counter], 2.0)
                .from_to(Property::Counter, 0.0, value.round())
                .ease(Ease::Power2Out)
                .snap()],
            TimelineOptions::delay(1.5),
            now,
            scene,
        );
    }

    for split in &targets.split_texts {
        for &c in &split.chars {
            scene.set_property(c, Property::Opacity, 0.0);
            scene.set_property(c, Property::Y, 30.0);
            scene.set_property(c, Property::RotateX, -40.0);
        }
        let chars = split.chars.clone();
        triggers.register(TriggerSpec::one_shot(
            Anchor::Element(split.host),
            ActivationPoint::fraction(0.85),
            move |ctx: &mut TriggerContext<'_>| {
                ctx.timelines.create(
                    vec![TimelineStep::tween(chars.clone(), 0.7)
                        .to(Property::Opacity, 1.0)
                        .to(Property::Y, 0.0)
                        .to(Property::RotateX, 0.0)
                        .ease(Ease::BackOut(1.4))
                        .stagger(0.025)],
                    TimelineOptions::default(),
                    ctx.now,
                    ctx.scene,
                );
            },
        ));
    }

    for &el in &targets.reveal_up {
        reveal_on_enter(
            triggers,
            el,
            0.88,
            TimelineStep::tween(vec![el], 1.0)
                .to(Property::Opacity, 1.0)
                .to(Property::Y, 0.0)
                .ease(Ease::Power3Out),
            0.0,
        );
    }
    for &el in &targets.reveal_scale {
        reveal_on_enter(
            triggers,
            el,
            0.82,
            TimelineStep::tween(vec![el], 1.2)
                .to(Property::Opacity, 1.0)
                .to(Property::Scale, 1.0)
                .ease(Ease::Power3Out),
            0.0,
        );
    }

    for (i, card) in targets.skill_cards.iter().enumerate() {
        scene.set_property(card.card, Property::Opacity, 0.0);
        scene.set_property(card.card, Property::Y, 50.0);
        let card = card.clone();
        let delay = i as f64 * 0.1;
        triggers.register(TriggerSpec::one_shot(
            Anchor::Element(card.card),
            ActivationPoint::fraction(0.88),
            move |ctx: &mut TriggerContext<'_>| {
                ctx.timelines.create(
                    vec![TimelineStep::tween(vec![card.card], 0.7)
                        .to(Property::Opacity, 1.0)
                        .to(Property::Y, 0.0)
                        .ease(Ease::Power3Out)],
                    TimelineOptions::delay(delay),
                    ctx.now,
                    ctx.scene,
                );
                if let Some(fill) = card.fill {
                    ctx.timelines.create(
                        vec![TimelineStep::tween(vec![fill], 1.4)
                            .to(Property::WidthPercent, card.width_percent)
                            .ease(Ease::Power2Out)],
                        TimelineOptions::delay(delay + 0.3),
                        ctx.now,
                        ctx.scene,
                    );
                }
            },
        ));
    }

    for (i, &card) in targets.project_cards.iter().enumerate() {
        scene.set_property(card, Property::Opacity, 0.0);
        scene.set_property(card, Property::X, 60.0);
        reveal_on_enter(
            triggers,
            card,
            0.90,
            TimelineStep::tween(vec![card], 0.9)
                .to(Property::Opacity, 1.0)
                .to(Property::X, 0.0)
                .ease(Ease::Power3Out),
            i as f64 * 0.1,
        );
    }

    if let (Some(hero), Some(content)) = (targets.hero, targets.hero_content) {
        triggers.register(TriggerSpec::scrubbed(
            Anchor::Element(hero),
            Scrub::new(vec![ScrubTrack {
                target: content,
                property: Property::Y,
                from: 0.0,
                to: -120.0,
            }]),
        ));
    }

    for &tag in &targets.section_tags {
        scene.set_property(tag, Property::Opacity, 0.0);
        scene.set_property(tag, Property::X, -30.0);
        reveal_on_enter(
            triggers,
            tag,
            0.90,
            TimelineStep::tween(vec![tag], 0.8)
                .to(Property::Opacity, 1.0)
                .to(Property::X, 0.0)
                .ease(Ease::Power3Out),
            0.0,
        );
    }

    if let Some(image) = targets.about_image {
        handles.ambient_loops.push(timelines.create(
            vec![ambient_loop(image, Property::Y, -15.0, 3.0)],
            TimelineOptions::default(),
            now,
            scene,
        ));
    }
    if let Some(bg) = targets.about_image_bg {
        handles.ambient_loops.push(timelines.create(
            vec![ambient_loop(bg, Property::Scale, 1.15, 4.0)],
            TimelineOptions::default(),
            now,
            scene,
        ));
    }

    if let Some(skills) = targets.skills {
        // nth-child(odd) is 1-based
        let tracks: Vec<ScrubTrack> = targets
            .skill_cards
            .iter()
            .step_by(2)
            .map(|c| ScrubTrack {
                target: c.card,
                property: Property::Y,
                from: 0.0,
                to: -20.0,
            })
            .collect();
        if !tracks.is_empty() {
            triggers.register(TriggerSpec::scrubbed(
                Anchor::Element(skills),
                Scrub::new(tracks)
                    .between(
                        Boundary::new(Edge::Top, ActivationPoint::fraction(1.0)),
                        Boundary::new(Edge::Bottom, ActivationPoint::fraction(0.0)),
                    )
                    .lag(1.5),
            ));
        }
    }

    if let Some(contact) = targets.contact {
        let children = targets.contact_children.clone();
        triggers.register(TriggerSpec::one_shot(
            Anchor::Element(contact),
            ActivationPoint::fraction(0.6),
            move |ctx: &mut TriggerContext<'_>| {
                ctx.timelines.create(
                    vec![TimelineStep::tween(children.clone(), 1.0)
                        .from(Property::Opacity, 0.0)
                        .from(Property::Y, 60.0)
                        .stagger(0.2)
                        .ease(Ease::Power3Out)],
                    TimelineOptions::default(),
                    ctx.now,
                    ctx.scene,
                );
            },
        ));
    }

    log::info!(
        "[page] registered {} triggers, {} timelines live",
        triggers.len(),
        timelines.running()
    );
    handles
}

fn hero_entrance(t: &PageTargets) -> Vec<TimelineStep> {
    let rise = |target: Option<TargetId>, offset: f64| {
        TimelineStep::tween(opt(target), 0.9)
            .to(Property::Opacity, 1.0)
            .to(Property::Y, 0.0)
            .ease(Ease::Power2Out)
            .offset(offset)
    };
    vec![
        TimelineStep::tween(opt(t.hero_label), 1.0)
            .to(Property::Opacity, 1.0)
            .ease(Ease::Power2Out),
        TimelineStep::tween(t.hero_lines.clone(), 1.1)
            .to(Property::YPercent, 0.0)
            .ease(Ease::Power4Out)
            .stagger(0.12)
            .offset(-0.7),
        rise(t.hero_sub, -0.6),
        rise(t.hero_actions, -0.7),
        rise(t.hero_stats, -0.7),
        TimelineStep::tween(opt(t.hero_scroll_hint), 0.8)
            .to(Property::Opacity, 1.0)
            .offset(-0.4),
    ]
}

fn ambient_loop(target: TargetId, property: Property, to: f32, duration: f64) -> TimelineStep {
    TimelineStep::tween(vec![target], duration)
        .to(property, to)
        .ease(Ease::SineInOut)
        .yoyo(true)
        .repeat(Repeat::Infinite)
}

fn reveal_on_enter(
    triggers: &mut TriggerRegistry,
    anchor: TargetId,
    fraction: f64,
    step: TimelineStep,
    delay: f64,
) {
    triggers.register(TriggerSpec::one_shot(
        Anchor::Element(anchor),
        ActivationPoint::fraction(fraction),
        move |ctx: &mut TriggerContext<'_>| {
            ctx.timelines.create(
                vec![step.clone()],
                TimelineOptions::delay(delay),
                ctx.now,
                ctx.scene,
            );
        },
    ));
}

/// Two-phase submit feedback: press, swap label and colour, pop back in.
pub fn submit_feedback(button: TargetId) -> Vec<TimelineStep> {
    vec![
        TimelineStep::tween(vec![button], 0.1)
            .to(Property::Scale, 0.95)
            .ease(Ease::Power2In)
            .yoyo(true)
            .repeat(Repeat::Times(1)),
        TimelineStep::set(
            vec![button],
            vec![
                Mutation::Text(SUBMIT_SENT_LABEL.to_string()),
                Mutation::Style {
                    name: "background".to_string(),
                    value: SUBMIT_SENT_BACKGROUND.to_string(),
                },
            ],
        ),
        TimelineStep::tween(vec![button], 0.5)
            .from_to(Property::Scale, 0.9, 1.0)
            .ease(Ease::BackOut(1.7)),
    ]
}

/// Ease a magnetic button toward a fraction of the pointer offset.
pub fn magnetic_pull(button: TargetId, offset: Vec2) -> Vec<TimelineStep> {
    let pull = offset * MAGNETIC_STRENGTH;
    vec![TimelineStep::tween(vec![button], 0.4)
        .to(Property::X, pull.x)
        .to(Property::Y, pull.y)
        .ease(Ease::Power2Out)]
}

/// Spring a magnetic button back to rest.
pub fn magnetic_release(button: TargetId) -> Vec<TimelineStep> {
    vec![TimelineStep::tween(vec![button], 0.7)
        .to(Property::X, 0.0)
        .to(Property::Y, 0.0)
        .ease(Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.4,
        })]
}
