use std::rc::Rc;

use blockmap_wasm::application::{HeatmapCoordinator, HeatmapHandle, PanState, QueuedFrames};
use blockmap_wasm::config::HeatmapConfig;
use blockmap_wasm::domain::chain_data::{Dataset, DayRecord};
use blockmap_wasm::domain::heatmap::{CalendarDate, ColorField, ColorScaleKind};
use blockmap_wasm::infrastructure::rendering::{CanvasSize, RecordingSurface};

fn dataset() -> Rc<Dataset> {
    let days = (3..=20)
        .map(|d| DayRecord {
            date: CalendarDate::new(2009, 0, d).unwrap(),
            transaction_count: d as u64,
            byte_size: 300,
            minted_value: 5_000_000_000,
            output_value: 0,
            difficulty: 1.0,
            price_usd: None,
        })
        .collect();
    Rc::new(Dataset::from_records(days, vec![]))
}

fn handle() -> (HeatmapHandle<RecordingSurface>, QueuedFrames) {
    let frames = QueuedFrames::new();
    let coordinator =
        HeatmapCoordinator::new(RecordingSurface::new(), HeatmapConfig::default(), CanvasSize::new(640.0, 480.0), 2009);
    (HeatmapHandle::new(coordinator, Box::new(frames.clone())), frames)
}

#[test]
fn drag_cycle_pans_and_renders_once_per_frame() {
    let (handle, frames) = handle();
    handle.update(|c| c.set_dataset(dataset()));
    frames.run_pending();

    handle.update(|c| c.pointer_down(100.0, 100.0));
    assert_eq!(handle.read(|c| c.input().state()), PanState::Panning { last_x: 100.0, last_y: 100.0 });
    for x in [110.0, 120.0, 130.0] {
        handle.update(|c| c.pointer_move(x, 100.0));
    }
    assert_eq!(frames.pending(), 1);
    assert_eq!(frames.run_pending(), 1);
    assert_eq!(handle.read(|c| c.view_state().offset_x), -30.0);

    handle.update(|c| c.pointer_up());
    assert!(!handle.update(|c| c.pointer_move(200.0, 200.0)));
    assert_eq!(frames.pending(), 0);
}

#[test]
fn release_outside_canvas_stops_panning() {
    let (handle, _frames) = handle();
    handle.update(|c| c.pointer_down(0.0, 0.0));
    handle.update(|c| c.global_pointer_up());
    assert_eq!(handle.read(|c| c.input().state()), PanState::Idle);

    handle.update(|c| c.pointer_down(0.0, 0.0));
    handle.update(|c| c.pointer_leave());
    assert_eq!(handle.read(|c| c.input().state()), PanState::Idle);
}

#[test]
fn wheel_zooms_in_any_pan_state() {
    let (handle, frames) = handle();
    let start = handle.read(|c| c.scale());
    assert!(handle.update(|c| c.wheel(50.0, 50.0, -100.0)));
    handle.update(|c| c.pointer_down(0.0, 0.0));
    assert!(handle.update(|c| c.wheel(50.0, 50.0, -100.0)));
    assert!((handle.read(|c| c.scale()) - start * 1.1 * 1.1).abs() < 1e-9);
    assert_eq!(frames.run_pending(), 1);
}

#[test]
fn option_changes_schedule_a_frame_with_guarded_scale() {
    let (handle, frames) = handle();
    handle.update(|c| c.set_dataset(dataset()));
    handle.update(|c| c.set_scale_kind(ColorScaleKind::Log2));
    handle.update(|c| c.set_color_field(ColorField::OutputValue));
    assert_eq!(frames.run_pending(), 1);
    assert_eq!(handle.read(|c| c.effective_scale_kind()), ColorScaleKind::Linear);

    handle.update(|c| c.set_color_field(ColorField::TransactionCount));
    assert_eq!(handle.read(|c| c.effective_scale_kind()), ColorScaleKind::Log2);
    frames.run_pending();
    let stats = handle.read(|c| c.last_stats()).unwrap();
    assert!(stats.days_drawn > 0);
}

#[test]
fn resize_changes_visible_area() {
    let (handle, frames) = handle();
    handle.update(|c| c.set_dataset(dataset()));
    frames.run_pending();
    let wide = handle.read(|c| c.last_stats()).unwrap();

    handle.update(|c| c.resize(60.0, 60.0));
    frames.run_pending();
    let narrow = handle.read(|c| c.last_stats()).unwrap();
    assert!(narrow.days_drawn < wide.days_drawn);
    assert_eq!(narrow.days_drawn + narrow.days_culled, wide.days_drawn + wide.days_culled);
}
