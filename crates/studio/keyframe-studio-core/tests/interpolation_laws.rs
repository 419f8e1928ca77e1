use keyframe_studio_core::{
    data::{Animation, Channel, Keyframe, PropertySet},
    sampling::{evaluate, segment_at, Segment},
};
use keyframe_studio_fixtures::animations;

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn props(tx: f64, scale_x: f64, rotation: f64, color: &str) -> PropertySet {
    PropertySet {
        translate_x: tx,
        scale_x,
        rotation,
        color: color.to_string(),
        ..PropertySet::default()
    }
}

fn two_frames() -> Vec<Keyframe> {
    vec![
        Keyframe::new(20.0, props(-40.0, 80.0, 0.0, "#111111")),
        Keyframe::new(70.0, props(60.0, 240.0, 90.0, "#999999")),
    ]
}

#[test]
fn boundary_exactness() {
    let frames = vec![
        Keyframe::new(0.0, props(0.0, 100.0, 0.0, "#000000")),
        Keyframe::new(33.3, props(17.0, 133.0, 7.0, "#111111")),
        Keyframe::new(66.6, props(-3.0, 71.0, 45.0, "#222222")),
        Keyframe::new(100.0, props(9.0, 250.0, 360.0, "#333333")),
    ];
    for kf in &frames {
        assert_eq!(evaluate(&frames, kf.time), kf.properties, "at {}", kf.time);
    }
}

#[test]
fn clamp_law() {
    let frames = two_frames();
    for t in [-50.0, 0.0, 19.999] {
        assert_eq!(evaluate(&frames, t), frames[0].properties);
    }
    for t in [70.0, 70.001, 100.0, 150.0] {
        assert_eq!(evaluate(&frames, t), frames[1].properties);
    }
}

#[test]
fn midpoint_is_channel_average() {
    let a = PropertySet {
        translate_x: 10.0,
        translate_y: -8.0,
        scale_x: 50.0,
        scale_y: 300.0,
        rotation: 30.0,
        skew_x: 4.0,
        skew_y: -12.0,
        x: 1.0,
        y: 2.0,
        opacity: 0.2,
        color: "#abcdef".into(),
    };
    let b = PropertySet {
        translate_x: 110.0,
        translate_y: 8.0,
        scale_x: 150.0,
        scale_y: 100.0,
        rotation: -90.0,
        skew_x: 0.0,
        skew_y: 12.0,
        x: 3.0,
        y: 6.0,
        opacity: 1.0,
        color: "#000000".into(),
    };
    let frames = vec![Keyframe::new(10.0, a.clone()), Keyframe::new(30.0, b.clone())];
    let mid = evaluate(&frames, 20.0);
    for ch in Channel::ALL {
        approx(mid.get(ch), (a.get(ch) + b.get(ch)) / 2.0, 1e-9);
    }
    assert_eq!(mid.color, "#abcdef");
}

#[test]
fn scale_round_trip() {
    let frames = vec![
        Keyframe::new(0.0, PropertySet::default().with(Channel::ScaleX, 100.0)),
        Keyframe::new(100.0, PropertySet::default().with(Channel::ScaleX, 200.0)),
    ];
    assert_eq!(evaluate(&frames, 50.0).scale_x, 150.0);
}

#[test]
fn color_steps_at_segment_boundary() {
    let frames = two_frames();
    for t in [20.5, 30.0, 45.0, 69.999] {
        assert_eq!(evaluate(&frames, t).color, "#111111", "at {t}");
    }
    assert_eq!(evaluate(&frames, 70.0).color, "#999999");
}

#[test]
fn easing_does_not_change_live_values() {
    let mut frames = two_frames();
    let linear = evaluate(&frames, 32.5);
    frames[1].easing = Some("cubic-bezier(0.68, -0.55, 0.265, 1.55)".into());
    assert_eq!(evaluate(&frames, 32.5), linear);
    approx(linear.translate_x, -15.0, 1e-9);
}

#[test]
fn scenario_slide_right() -> anyhow::Result<()> {
    let anim: Animation = animations::load("slide-right")?;
    anim.validate_basic()?;
    assert_eq!(evaluate(&anim.keyframes, 25.0).translate_x, 25.0);
    assert_eq!(evaluate(&anim.keyframes, 0.0).translate_x, 0.0);
    assert_eq!(evaluate(&anim.keyframes, 150.0).translate_x, 100.0);
    Ok(())
}

#[test]
fn pulse_fixture_blends_every_channel() {
    let anim: Animation = animations::load("pulse").unwrap();
    let p = evaluate(&anim.keyframes, 25.0);
    approx(p.translate_x, 20.0, 1e-9);
    approx(p.translate_y, 0.0, 1e-9);
    approx(p.scale_x, 150.0, 1e-9);
    approx(p.scale_y, 125.0, 1e-9);
    approx(p.rotation, 90.0, 1e-9);
    approx(p.opacity, 0.5, 1e-9);
    assert_eq!(p.color, "#ff0000");

    match segment_at(&anim.keyframes, 75.0) {
        Some(seg @ Segment::Between { progress, .. }) => {
            approx(progress, 0.5, 1e-12);
            assert_eq!(seg.easing(), Some("ease-out"));
        }
        other => panic!("unexpected segment {other:?}"),
    }
}

#[test]
fn unsorted_fixture_with_ties() {
    let anim: Animation = animations::load("unsorted-ties").unwrap();
    let at = |t: f64| evaluate(&anim.keyframes, t);

    // The later stored of the two 50% keyframes holds at 50%.
    assert_eq!(at(50.0).translate_x, 40.0);
    assert_eq!(at(50.0).color, "#444444");
    approx(at(25.0).translate_x, 5.0, 1e-9);
    // The earlier stored 50% keyframe only bounds the segment from the left.
    approx(at(49.999).translate_x, 9.9998, 1e-9);
    approx(at(75.0).translate_x, 60.0, 1e-9);
    assert_eq!(at(75.0).color, "#444444");
}

#[test]
fn evaluate_is_pure() {
    let frames = two_frames();
    let snapshot = frames.clone();
    let a = evaluate(&frames, 41.0);
    let b = evaluate(&frames, 41.0);
    assert_eq!(a, b);
    assert_eq!(frames, snapshot);
}
