use folio_core::easing::{expo_out, lerp};
use folio_core::Ease;

const ALL: [Ease; 11] = [
    Ease::Linear,
    Ease::Power1Out,
    Ease::Power2In,
    Ease::Power2Out,
    Ease::Power3Out,
    Ease::Power4Out,
    Ease::Power2InOut,
    Ease::SineInOut,
    Ease::ExpoOut,
    Ease::BackOut(1.4),
    Ease::ElasticOut {
        amplitude: 1.0,
        period: 0.4,
    },
];

#[test]
fn every_curve_hits_its_endpoints_exactly() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
        assert_eq!(ease.apply(1.0), 1.0, "{:?}", ease);
        assert_eq!(ease.apply(-0.5), 0.0, "{:?}", ease);
        assert_eq!(ease.apply(1.5), 1.0, "{:?}", ease);
    }
}

#[test]
fn monotonic_curves_do_not_decrease() {
    let monotonic = [
        Ease::Linear,
        Ease::Power1Out,
        Ease::Power2In,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::Power4Out,
        Ease::Power2InOut,
        Ease::SineInOut,
        Ease::ExpoOut,
    ];
    for ease in monotonic {
        let mut prev = 0.0;
        for i in 0..=200 {
            let v = ease.apply(i as f32 / 200.0);
            assert!(v >= prev, "{:?} decreased at step {}", ease, i);
            prev = v;
        }
    }
}

#[test]
fn back_out_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::BackOut(1.4).apply(i as f32 / 100.0))
        .fold(0.0f32, f32::max);
    assert!(peak > 1.0);
}

#[test]
fn sine_in_out_is_symmetric_about_midpoint() {
    assert!((Ease::SineInOut.apply(0.5) - 0.5).abs() < 1e-6);
    for i in 1..50 {
        let t = i as f32 / 100.0;
        let a = Ease::SineInOut.apply(t);
        let b = Ease::SineInOut.apply(1.0 - t);
        assert!((a + b - 1.0).abs() < 1e-5);
    }
}

#[test]
fn expo_out_saturates_before_the_end() {
    assert_eq!(expo_out(1.0), 1.0);
    assert!(expo_out(0.999) <= 1.0);
    assert!(expo_out(0.5) > 0.96);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
    assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
    assert_eq!(lerp(3.0, 7.0, 0.5), 5.0);
}
