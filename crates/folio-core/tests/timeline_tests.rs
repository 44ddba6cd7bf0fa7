mod common;

use common::MemoryScene;
use folio_core::page::{submit_feedback, SUBMIT_SENT_LABEL};
use folio_core::{
    pass_progress, Ease, Property, Repeat, Scheduler, TargetId, TimelineOptions, TimelineState,
    TimelineStep,
};

fn staggered(targets: Vec<TargetId>) -> Vec<TimelineStep> {
    vec![TimelineStep::tween(targets, 0.7)
        .from_to(Property::X, 0.0, 100.0)
        .ease(Ease::Linear)
        .stagger(0.1)]
}

fn four_targets(scene: &mut MemoryScene) -> Vec<TargetId> {
    (0..4).map(|i| scene.add(i, 0.0, 10.0)).collect()
}

#[test]
fn stagger_starts_and_completes_each_element_on_time() {
    for i in 0..4usize {
        let mut scene = MemoryScene::new();
        let targets = four_targets(&mut scene);
        let mut timelines = Scheduler::new();
        timelines.create(staggered(targets.clone()), TimelineOptions::default(), 0.0, &mut scene);
        let el = targets[i];
        let start = i as f64 * 0.1;

        if i > 0 {
            timelines.advance(start - 0.01, &mut scene);
            assert_eq!(scene.value(el, Property::X), None, "element {} started early", i);
        }

        timelines.advance(start, &mut scene);
        assert_eq!(scene.value(el, Property::X), Some(0.0));

        timelines.advance(start + 0.35, &mut scene);
        let mid = scene.value(el, Property::X).unwrap_or_default();
        assert!((mid - 50.0).abs() < 1e-3, "element {} midpoint {}", i, mid);

        timelines.advance(start + 0.7, &mut scene);
        let end = scene.value(el, Property::X).unwrap_or_default();
        assert!((end - 100.0).abs() < 1e-4, "element {} end {}", i, end);

        timelines.advance(start + 0.7 + 1e-9, &mut scene);
        assert_eq!(scene.value(el, Property::X), Some(100.0));
    }
}

#[test]
fn stagger_timeline_completes_after_last_element() {
    let mut scene = MemoryScene::new();
    let targets = four_targets(&mut scene);
    let mut timelines = Scheduler::new();
    let h = timelines.create(staggered(targets.clone()), TimelineOptions::default(), 0.0, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Pending));
    timelines.advance(0.5, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Running));
    timelines.advance(1.0 + 1e-9, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Complete));
    assert_eq!(timelines.running(), 0);
    for t in targets {
        assert_eq!(scene.value(t, Property::X), Some(100.0));
    }
}

#[test]
fn counter_shows_only_whole_numbers_and_lands_exactly() {
    let mut scene = MemoryScene::new();
    let counter = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    timelines.create(
        vec![TimelineStep::tween(vec![counter], 2.0)
            .from_to(Property::Counter, 0.0, 87.0)
            .ease(Ease::Power2Out)
            .snap()],
        TimelineOptions::delay(1.5),
        0.0,
        &mut scene,
    );
    let mut t = 0.0;
    while t < 4.0 {
        timelines.advance(t, &mut scene);
        t += 1.0 / 60.0;
    }
    let written = scene.writes_to(counter, Property::Counter);
    assert!(!written.is_empty());
    for v in &written {
        assert_eq!(v.fract(), 0.0, "non-integer counter value {}", v);
    }
    assert_eq!(written.last().copied(), Some(87.0));
    // each distinct value written once
    let mut sorted = written.clone();
    sorted.dedup();
    assert_eq!(sorted.len(), written.len());
}

#[test]
fn delay_postpones_start() {
    let mut scene = MemoryScene::new();
    let el = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    let h = timelines.create(
        vec![TimelineStep::tween(vec![el], 1.0).to(Property::Opacity, 0.0)],
        TimelineOptions::delay(0.3),
        10.0,
        &mut scene,
    );
    timelines.advance(10.29, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Pending));
    assert!(scene.writes.is_empty());
    timelines.advance(10.0 + 0.3, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Running));
    assert_eq!(scene.value(el, Property::Opacity), Some(1.0));
}

#[test]
fn negative_relative_offset_overlaps_previous_step() {
    let mut scene = MemoryScene::new();
    let a = scene.add(1, 0.0, 10.0);
    let b = scene.add(2, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    timelines.create(
        vec![
            TimelineStep::tween(vec![a], 1.0).from_to(Property::Y, 40.0, 0.0),
            TimelineStep::tween(vec![b], 0.9)
                .from_to(Property::Y, 40.0, 0.0)
                .offset(-0.7),
        ],
        TimelineOptions::default(),
        0.0,
        &mut scene,
    );
    timelines.advance(0.29, &mut scene);
    assert_eq!(scene.value(b, Property::Y), None);
    timelines.advance(1.0 - 0.7, &mut scene);
    assert_eq!(scene.value(b, Property::Y), Some(40.0));
    assert!(scene.value(a, Property::Y).unwrap_or_default() < 40.0);
}

#[test]
fn offsets_never_reorder_before_timeline_start() {
    let mut scene = MemoryScene::new();
    let a = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    timelines.create(
        vec![TimelineStep::tween(vec![a], 0.5)
            .from_to(Property::Y, 10.0, 0.0)
            .offset(-2.0)],
        TimelineOptions::delay(1.0),
        0.0,
        &mut scene,
    );
    timelines.advance(0.5, &mut scene);
    assert_eq!(scene.value(a, Property::Y), None);
    timelines.advance(1.0, &mut scene);
    assert_eq!(scene.value(a, Property::Y), Some(10.0));
}

#[test]
fn from_tween_applies_start_value_immediately() {
    let mut scene = MemoryScene::new();
    let el = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    timelines.create(
        vec![TimelineStep::tween(vec![el], 0.5).from(Property::Opacity, 0.0)],
        TimelineOptions::delay(2.0),
        0.0,
        &mut scene,
    );
    assert_eq!(scene.value(el, Property::Opacity), Some(0.0));
    timelines.advance(2.6, &mut scene);
    assert_eq!(scene.value(el, Property::Opacity), Some(1.0));
}

#[test]
fn to_tween_captures_start_value_when_it_begins() {
    let mut scene = MemoryScene::new();
    let el = scene.add(1, 0.0, 10.0);
    scene.values.insert((el, Property::Y), 50.0);
    let mut timelines = Scheduler::new();
    timelines.create(
        vec![TimelineStep::tween(vec![el], 1.0)
            .to(Property::Y, 0.0)
            .ease(Ease::Linear)],
        TimelineOptions::delay(1.0),
        0.0,
        &mut scene,
    );
    scene.values.insert((el, Property::Y), 80.0);
    timelines.advance(1.5, &mut scene);
    let v = scene.value(el, Property::Y).unwrap_or_default();
    assert!((v - 40.0).abs() < 1e-4, "{}", v);
}

#[test]
fn infinite_yoyo_runs_until_cancelled() {
    let mut scene = MemoryScene::new();
    let el = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    let h = timelines.create(
        vec![TimelineStep::tween(vec![el], 3.0)
            .to(Property::Y, -15.0)
            .ease(Ease::SineInOut)
            .yoyo(true)
            .repeat(Repeat::Infinite)],
        TimelineOptions::default(),
        0.0,
        &mut scene,
    );
    timelines.advance(0.0, &mut scene);
    timelines.advance(3.0, &mut scene);
    assert_eq!(scene.value(el, Property::Y), Some(-15.0));
    timelines.advance(6.0, &mut scene);
    assert_eq!(scene.value(el, Property::Y), Some(0.0));
    timelines.advance(3000.0, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Running));

    assert!(timelines.cancel(h));
    assert_eq!(timelines.state(h), Some(TimelineState::Complete));
    let writes = scene.writes.len();
    timelines.advance(3001.5, &mut scene);
    assert_eq!(scene.writes.len(), writes);
}

#[test]
fn pass_progress_handles_repeats() {
    let (p, done) = pass_progress(0.05, 0.1, Repeat::Times(1), true);
    assert!((p - 0.5).abs() < 1e-5);
    assert!(!done);
    let (p, done) = pass_progress(0.15, 0.1, Repeat::Times(1), true);
    assert!((p - 0.5).abs() < 1e-5);
    assert!(!done);
    assert_eq!(pass_progress(0.2, 0.1, Repeat::Times(1), true), (0.0, true));
    assert_eq!(pass_progress(0.2, 0.1, Repeat::Times(1), false), (1.0, true));
    assert_eq!(pass_progress(5.0, 0.0, Repeat::Times(0), false), (1.0, true));
    assert!(!pass_progress(1e6, 1.0, Repeat::Infinite, true).1);
}

#[test]
fn overwrite_cancels_earlier_timelines_on_same_property() {
    let mut scene = MemoryScene::new();
    let button = scene.add(1, 0.0, 10.0);
    let other = scene.add(2, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    let pull = timelines.create(
        vec![TimelineStep::tween(vec![button], 0.4).to(Property::X, 12.0)],
        TimelineOptions::default(),
        0.0,
        &mut scene,
    );
    let unrelated = timelines.create(
        vec![TimelineStep::tween(vec![other], 0.4).to(Property::X, 12.0)],
        TimelineOptions::default(),
        0.0,
        &mut scene,
    );
    let release = timelines.create(
        vec![TimelineStep::tween(vec![button], 0.7).to(Property::X, 0.0)],
        TimelineOptions {
            overwrite: true,
            ..TimelineOptions::default()
        },
        0.1,
        &mut scene,
    );
    assert_eq!(timelines.state(pull), Some(TimelineState::Complete));
    assert_eq!(timelines.state(unrelated), Some(TimelineState::Pending));
    assert_eq!(timelines.state(release), Some(TimelineState::Pending));
}

#[test]
fn submit_feedback_presses_swaps_label_and_settles() {
    let mut scene = MemoryScene::new();
    let button = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    let h = timelines.create(submit_feedback(button), TimelineOptions::default(), 0.0, &mut scene);

    timelines.advance(0.0, &mut scene);
    timelines.advance(0.1, &mut scene);
    let pressed = scene.value(button, Property::Scale).unwrap_or_default();
    assert!((pressed - 0.95).abs() < 1e-4);
    assert!(scene.text.get(&button).is_none());

    timelines.advance(0.2, &mut scene);
    assert_eq!(scene.text.get(&button).map(String::as_str), Some(SUBMIT_SENT_LABEL));
    assert!(scene
        .styles
        .contains_key(&(button, "background".to_string())));

    timelines.advance(0.8, &mut scene);
    assert_eq!(scene.value(button, Property::Scale), Some(1.0));
    assert_eq!(timelines.state(h), Some(TimelineState::Complete));
}

#[test]
fn missing_targets_do_not_stall_timelines() {
    let mut scene = MemoryScene::new();
    let present = scene.add(1, 0.0, 10.0);
    let mut timelines = Scheduler::new();
    let h = timelines.create(
        vec![TimelineStep::tween(vec![TargetId(42), present], 0.5).from_to(Property::Opacity, 0.0, 1.0)],
        TimelineOptions::default(),
        0.0,
        &mut scene,
    );
    timelines.advance(1.0, &mut scene);
    assert_eq!(timelines.state(h), Some(TimelineState::Complete));
    assert_eq!(scene.value(present, Property::Opacity), Some(1.0));
}

#[test]
fn finished_timelines_leave_nothing_behind() {
    let mut scene = MemoryScene::new();
    let button = scene.add(1, 0.0, 40.0);
    let mut timelines = Scheduler::new();
    let mut handles = Vec::new();
    for i in 0..500 {
        let now = i as f64 * 0.01;
        handles.push(timelines.create(
            vec![TimelineStep::tween(vec![button], 0.005).to(Property::X, i as f32)],
            TimelineOptions::default(),
            now,
            &mut scene,
        ));
        timelines.advance(now + 0.006, &mut scene);
    }
    assert_eq!(timelines.running(), 0);
    assert!(handles.iter().all(|h| !timelines.is_live(*h)));
    assert!(handles
        .iter()
        .all(|h| timelines.state(*h) == Some(TimelineState::Complete)));
    assert_eq!(scene.value(button, Property::X), Some(499.0));
}
