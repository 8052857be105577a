use blockmap_wasm::config::ViewportConfig;
use blockmap_wasm::view_state::{ViewState, ViewportTransform};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn bounded(raw: f64, lo: f64, hi: f64) -> Option<f64> {
    raw.is_finite().then(|| lo + (raw.abs() % (hi - lo)))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

#[quickcheck]
fn screen_world_roundtrip(scale: f64, ox: f64, oy: f64, sx: f64, sy: f64) -> TestResult {
    let (Some(scale), Some(ox), Some(oy), Some(sx), Some(sy)) = (
        bounded(scale, 1.0, 50.0),
        bounded(ox, -5_000.0, 5_000.0),
        bounded(oy, -5_000.0, 5_000.0),
        bounded(sx, 0.0, 2_000.0),
        bounded(sy, 0.0, 2_000.0),
    ) else {
        return TestResult::discard();
    };
    let view = ViewState::new(scale, ox, oy);
    let (wx, wy) = view.screen_to_world(sx, sy);
    let (bx, by) = view.world_to_screen(wx, wy);
    TestResult::from_bool(close(bx, sx) && close(by, sy))
}

#[quickcheck]
fn zoom_keeps_point_under_cursor(sx: f64, sy: f64, steps: Vec<bool>) -> TestResult {
    let (Some(sx), Some(sy)) = (bounded(sx, 0.0, 1_200.0), bounded(sy, 0.0, 800.0)) else {
        return TestResult::discard();
    };
    let mut viewport = ViewportTransform::from_config(&ViewportConfig::default());
    viewport.pan_by(-137.0, 42.0);
    let before = viewport.screen_to_world(sx, sy);
    for zoom_in in steps {
        viewport.zoom_at(sx, sy, if zoom_in { 1.1 } else { 0.9 });
        let after = viewport.screen_to_world(sx, sy);
        if !(close(after.0, before.0) && close(after.1, before.1)) {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[quickcheck]
fn scale_stays_in_limits(factors: Vec<f64>) -> bool {
    let mut viewport = ViewportTransform::new(1.1, 1.0, 50.0);
    factors.into_iter().all(|factor| {
        viewport.zoom_at(300.0, 200.0, factor);
        (1.0..=50.0).contains(&viewport.scale())
    })
}

#[test]
fn zoom_clamps_at_both_ends() {
    let mut viewport = ViewportTransform::new(1.1, 1.0, 50.0);
    for _ in 0..200 {
        viewport.zoom_at(10.0, 10.0, 1.1);
    }
    assert_eq!(viewport.scale(), 50.0);
    for _ in 0..200 {
        viewport.zoom_at(10.0, 10.0, 0.9);
    }
    assert_eq!(viewport.scale(), 1.0);
}

#[test]
fn degenerate_factors_are_ignored() {
    let mut viewport = ViewportTransform::new(2.0, 1.0, 50.0);
    let before = *viewport.state();
    for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        viewport.zoom_at(100.0, 100.0, factor);
    }
    assert_eq!(*viewport.state(), before);
}

#[test]
fn pan_moves_content_with_pointer() {
    let mut viewport = ViewportTransform::new(3.0, 1.0, 50.0);
    let world = viewport.screen_to_world(100.0, 100.0);
    viewport.pan_by(25.0, -10.0);
    let (sx, sy) = viewport.world_to_screen(world.0, world.1);
    assert!(close(sx, 125.0));
    assert!(close(sy, 90.0));
}
