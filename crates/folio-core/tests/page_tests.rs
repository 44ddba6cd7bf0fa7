mod common;

use common::MemoryScene;
use folio_core::page::{SkillCard, SplitText, NAV_SCROLLED_CLASS};
use folio_core::{
    FrameDriver, InputLatch, MotionConfig, MotionState, PageTargets, ParticleConfig, Property,
    ScrollConfig, TargetId, TimelineState, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Page {
    driver: FrameDriver,
    state: MotionState,
    scene: MemoryScene,
    clock_ms: f64,
}

impl Page {
    fn new(build: impl FnOnce(&mut MemoryScene) -> PageTargets) -> Self {
        let config = MotionConfig {
            scroll: ScrollConfig {
                max_extent: 10_000.0,
                ..ScrollConfig::default()
            },
            particles: ParticleConfig {
                count: 8,
                ..ParticleConfig::default()
            },
        };
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = MotionState::new(config, Viewport::new(1200.0, 800.0, 1.0), &mut rng);
        let mut scene = MemoryScene::new();
        let targets = build(&mut scene);
        state.install_page(targets, &mut scene);
        Self {
            driver: FrameDriver::new(),
            state,
            scene,
            clock_ms: 0.0,
        }
    }

    fn run_for(&mut self, seconds: f64) {
        let end = self.clock_ms + seconds * 1000.0;
        while self.clock_ms <= end {
            self.driver.tick(
                &mut self.state,
                &mut self.scene,
                None,
                InputLatch::default(),
                self.clock_ms,
            );
            self.clock_ms += 16.0;
        }
    }

    fn jump_to(&mut self, y: f64) {
        self.state.scroll.scroll_immediate(y);
        self.run_for(0.0);
    }

    fn value(&self, target: TargetId, property: Property) -> Option<f32> {
        self.scene.value(target, property)
    }
}

#[test]
fn body_fades_in_on_load() {
    let mut page = Page::new(|scene| PageTargets {
        body: Some(scene.add(1, 0.0, 5000.0)),
        ..PageTargets::default()
    });
    let body = TargetId(1);
    assert_eq!(page.value(body, Property::Opacity), Some(0.0));
    page.run_for(0.6);
    assert_eq!(page.value(body, Property::Opacity), Some(1.0));
}

#[test]
fn nav_gets_scrolled_class_past_80px() {
    let mut page = Page::new(|scene| PageTargets {
        nav: Some(scene.add(1, 0.0, 60.0)),
        ..PageTargets::default()
    });
    let nav = TargetId(1);
    page.run_for(0.0);
    assert!(!page.scene.has_class(nav, NAV_SCROLLED_CLASS));
    page.jump_to(200.0);
    assert!(page.scene.has_class(nav, NAV_SCROLLED_CLASS));
    page.jump_to(10.0);
    assert!(!page.scene.has_class(nav, NAV_SCROLLED_CLASS));
}

#[test]
fn hero_entrance_runs_after_delay() {
    let mut page = Page::new(|scene| {
        let label = scene.add(1, 100.0, 20.0);
        let lines: Vec<TargetId> = (2..5).map(|i| scene.add(i, 150.0, 80.0)).collect();
        let sub = scene.add(5, 400.0, 40.0);
        scene.values.insert((label, Property::Opacity), 0.0);
        for &line in &lines {
            scene.values.insert((line, Property::YPercent), 100.0);
        }
        scene.values.insert((sub, Property::Opacity), 0.0);
        scene.values.insert((sub, Property::Y), 30.0);
        PageTargets {
            hero_label: Some(label),
            hero_lines: lines,
            hero_sub: Some(sub),
            ..PageTargets::default()
        }
    });
    let label = TargetId(1);
    page.run_for(0.25);
    assert_eq!(page.value(label, Property::Opacity), Some(0.0));
    assert!(page.scene.writes.is_empty());

    page.run_for(3.0);
    assert_eq!(page.value(label, Property::Opacity), Some(1.0));
    for line in 2..5 {
        assert_eq!(page.value(TargetId(line), Property::YPercent), Some(0.0));
    }
    assert_eq!(page.value(TargetId(5), Property::Y), Some(0.0));
    assert_eq!(page.value(TargetId(5), Property::Opacity), Some(1.0));
}

#[test]
fn stat_counters_count_up_in_whole_numbers() {
    let mut page = Page::new(|scene| PageTargets {
        stat_counters: vec![(scene.add(1, 500.0, 40.0), 48.0), (scene.add(2, 500.0, 40.0), 12.0)],
        ..PageTargets::default()
    });
    page.run_for(1.4);
    assert!(page.scene.writes_to(TargetId(1), Property::Counter).is_empty());
    page.run_for(3.0);
    for (id, target) in [(1, 48.0), (2, 12.0)] {
        let written = page.scene.writes_to(TargetId(id), Property::Counter);
        assert!(written.iter().all(|v| v.fract() == 0.0));
        assert_eq!(written.last().copied(), Some(target));
    }
}

#[test]
fn split_text_chars_start_hidden_and_reveal_at_85_percent() {
    let mut page = Page::new(|scene| {
        let host = scene.add(1, 1500.0, 100.0);
        let chars = (10..20).map(|i| scene.add(i, 1500.0, 100.0)).collect();
        PageTargets {
            split_texts: vec![SplitText { host, chars }],
            ..PageTargets::default()
        }
    });
    for c in 10..20 {
        assert_eq!(page.value(TargetId(c), Property::Opacity), Some(0.0));
        assert_eq!(page.value(TargetId(c), Property::Y), Some(30.0));
        assert_eq!(page.value(TargetId(c), Property::RotateX), Some(-40.0));
    }
    // threshold = 1500 - 0.85 * 800 = 820
    page.jump_to(810.0);
    page.run_for(2.0);
    assert_eq!(page.value(TargetId(10), Property::Opacity), Some(0.0));
    page.jump_to(830.0);
    page.run_for(2.0);
    for c in 10..20 {
        assert_eq!(page.value(TargetId(c), Property::Opacity), Some(1.0));
        assert_eq!(page.value(TargetId(c), Property::RotateX), Some(0.0));
    }
}

#[test]
fn skill_cards_reveal_and_fill() {
    let mut page = Page::new(|scene| {
        let skills = scene.add(1, 2000.0, 600.0);
        let cards = (0..3)
            .map(|i| SkillCard {
                card: scene.add(10 + i, 2050.0 + i as f64 * 100.0, 80.0),
                fill: Some(scene.add(20 + i, 2100.0, 4.0)),
                width_percent: 50.0 + i as f32 * 10.0,
            })
            .collect();
        PageTargets {
            skills: Some(skills),
            skill_cards: cards,
            ..PageTargets::default()
        }
    });
    assert_eq!(page.value(TargetId(10), Property::Opacity), Some(0.0));
    page.jump_to(2400.0);
    page.run_for(3.0);
    for i in 0..3u32 {
        assert_eq!(page.value(TargetId(10 + i), Property::Opacity), Some(1.0));
        assert_eq!(
            page.value(TargetId(20 + i), Property::WidthPercent),
            Some(50.0 + i as f32 * 10.0)
        );
    }
}

#[test]
fn odd_skill_cards_get_lagged_parallax() {
    let mut page = Page::new(|scene| {
        let skills = scene.add(1, 2000.0, 600.0);
        let cards = (0..4)
            .map(|i| SkillCard {
                card: scene.add(10 + i, 2050.0, 80.0),
                fill: None,
                width_percent: 0.0,
            })
            .collect();
        PageTargets {
            skills: Some(skills),
            skill_cards: cards,
            ..PageTargets::default()
        }
    });
    // scrub runs from 1200 (top at viewport bottom) to 2600 (bottom at top)
    page.run_for(0.1);
    page.jump_to(2600.0);
    // the reveal tween owns y for its first 0.7 s
    page.run_for(1.0);
    let early = page.value(TargetId(10), Property::Y).unwrap_or_default();
    assert!(early < 0.0 && early > -20.0, "{}", early);
    page.run_for(30.0);
    assert_eq!(page.value(TargetId(10), Property::Y), Some(-20.0));
    assert_eq!(page.value(TargetId(12), Property::Y), Some(-20.0));
    // even cards only move with the reveal
    assert_eq!(page.value(TargetId(11), Property::Y), Some(0.0));
}

#[test]
fn project_cards_slide_in_from_the_right() {
    let mut page = Page::new(|scene| PageTargets {
        project_cards: vec![scene.add(1, 3000.0, 400.0), scene.add(2, 3000.0, 400.0)],
        ..PageTargets::default()
    });
    assert_eq!(page.value(TargetId(1), Property::X), Some(60.0));
    page.jump_to(3000.0 - 720.0 + 1.0);
    page.run_for(2.0);
    for id in [1, 2] {
        assert_eq!(page.value(TargetId(id), Property::X), Some(0.0));
        assert_eq!(page.value(TargetId(id), Property::Opacity), Some(1.0));
    }
}

#[test]
fn hero_content_parallax_follows_scroll() {
    let mut page = Page::new(|scene| PageTargets {
        hero: Some(scene.add(1, 0.0, 800.0)),
        hero_content: Some(scene.add(2, 200.0, 300.0)),
        ..PageTargets::default()
    });
    page.jump_to(0.0);
    assert_eq!(page.value(TargetId(2), Property::Y), Some(0.0));
    page.jump_to(400.0);
    assert_eq!(page.value(TargetId(2), Property::Y), Some(-60.0));
    page.jump_to(2000.0);
    assert_eq!(page.value(TargetId(2), Property::Y), Some(-120.0));
}

#[test]
fn about_loops_run_until_teardown() {
    let mut page = Page::new(|scene| PageTargets {
        about_image: Some(scene.add(1, 1000.0, 400.0)),
        about_image_bg: Some(scene.add(2, 1000.0, 400.0)),
        ..PageTargets::default()
    });
    let loops = page.state.handles.ambient_loops.clone();
    assert_eq!(loops.len(), 2);
    page.run_for(20.0);
    for h in &loops {
        assert_eq!(page.state.timelines.state(*h), Some(TimelineState::Running));
    }
    page.state.teardown();
    for h in &loops {
        assert!(!page.state.timelines.is_live(*h));
        assert_eq!(page.state.timelines.state(*h), Some(TimelineState::Complete));
    }
}

#[test]
fn contact_children_stagger_in() {
    let mut page = Page::new(|scene| PageTargets {
        contact: Some(scene.add(1, 4000.0, 600.0)),
        contact_children: vec![scene.add(2, 4050.0, 200.0), scene.add(3, 4050.0, 200.0)],
        ..PageTargets::default()
    });
    assert_eq!(page.value(TargetId(2), Property::Opacity), None);
    // threshold = 4000 - 0.6 * 800 = 3520
    page.jump_to(3530.0);
    assert_eq!(page.value(TargetId(2), Property::Opacity), Some(0.0));
    assert_eq!(page.value(TargetId(3), Property::Y), Some(60.0));
    page.run_for(1.5);
    assert_eq!(page.value(TargetId(2), Property::Opacity), Some(1.0));
    assert_eq!(page.value(TargetId(3), Property::Y), Some(0.0));
}

#[test]
fn missing_targets_are_skipped() {
    let mut page = Page::new(|scene| PageTargets {
        reveal_up: vec![TargetId(77), scene.add(1, 600.0, 100.0)],
        ..PageTargets::default()
    });
    page.jump_to(0.0);
    page.run_for(2.0);
    assert_eq!(page.value(TargetId(1), Property::Y), Some(0.0));
}
