#![cfg(target_arch = "wasm32")]
use blockmap_wasm::domain::heatmap::{Color, WorldRect};
use blockmap_wasm::infrastructure::rendering::{CanvasRenderer, CanvasSize, DrawSurface};
use blockmap_wasm::view_state::ViewState;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn pixel(canvas: &web_sys::HtmlCanvasElement, x: f64, y: f64) -> Vec<u8> {
    let ctx = canvas.get_context("2d").unwrap().unwrap().dyn_into::<web_sys::CanvasRenderingContext2d>().unwrap();
    ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data().to_vec()
}

#[wasm_bindgen_test]
fn world_rect_lands_scaled_on_canvas() {
    let canvas = canvas(20, 20);
    let mut surface = CanvasRenderer::from_canvas(&canvas).unwrap();
    surface.clear(CanvasSize::new(20.0, 20.0)).unwrap();
    surface.apply_view(&ViewState::new(2.0, 0.0, 0.0)).unwrap();
    surface.fill_rect(WorldRect::new(1.0, 1.0, 4.0, 4.0), Color::LOW_ANCHOR).unwrap();

    assert_eq!(pixel(&canvas, 4.0, 4.0), vec![16, 185, 129, 255]);
    assert_eq!(pixel(&canvas, 12.0, 12.0)[3], 0);
}

#[wasm_bindgen_test]
fn clear_resets_previous_frame() {
    let canvas = canvas(10, 10);
    let mut surface = CanvasRenderer::from_canvas(&canvas).unwrap();
    surface.apply_view(&ViewState::new(1.0, 0.0, 0.0)).unwrap();
    surface.fill_rect(WorldRect::new(0.0, 0.0, 10.0, 10.0), Color::HIGH_ANCHOR).unwrap();
    surface.clear(CanvasSize::new(10.0, 10.0)).unwrap();
    assert_eq!(pixel(&canvas, 5.0, 5.0)[3], 0);
}
