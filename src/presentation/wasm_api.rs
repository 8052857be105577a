use std::rc::Rc;
use std::str::FromStr;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{AnimationFrameRequester, HeatmapCoordinator, HeatmapHandle};
use crate::config::HeatmapConfig;
use crate::domain::{
    errors::AppError,
    heatmap::{ColorField, ColorScaleKind},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::{
    ChainDataClient,
    http::dataset_from_json,
    rendering::{CanvasRenderer, CanvasSize},
};
use crate::time_utils::current_year;

/// Heatmap bound to an existing `<canvas>`, for hosts that do not use the
/// Leptos app. The host forwards pointer and wheel events and owns resizing.
#[wasm_bindgen]
pub struct BlockMapApi {
    handle: HeatmapHandle<CanvasRenderer>,
    api_base_url: String,
}

#[wasm_bindgen]
impl BlockMapApi {
    /// `config_json` may override any subset of the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_json: Option<String>) -> Result<BlockMapApi, JsValue> {
        let config = match config_json {
            Some(json) => HeatmapConfig::from_json(&json)?,
            None => HeatmapConfig::default(),
        };
        let (canvas, surface) = CanvasRenderer::from_canvas_id(canvas_id)?;
        let size = CanvasSize::new(canvas.width() as f64, canvas.height() as f64);
        let api_base_url = config.api_base_url.clone();
        let coordinator = HeatmapCoordinator::new(surface, config, size, current_year());

        get_logger().info(
            LogComponent::Presentation("BlockMapApi"),
            &format!("Attached to #{} ({}x{})", canvas_id, size.width, size.height),
        );
        Ok(Self { handle: HeatmapHandle::new(coordinator, Box::new(AnimationFrameRequester::new())), api_base_url })
    }

    /// Fetch both feeds and schedule a render. Resolves to the number of days loaded.
    #[wasm_bindgen(js_name = load)]
    pub fn load(&self) -> Promise {
        let handle = self.handle.clone();
        let client = ChainDataClient::new(self.api_base_url.clone());
        future_to_promise(async move {
            let dataset = client.load_dataset().await?;
            let days = dataset.day_count();
            handle.update(|c| c.set_dataset(Rc::new(dataset)));
            Ok(JsValue::from(days as u32))
        })
    }

    /// Use feed bodies the host already has instead of fetching them.
    #[wasm_bindgen(js_name = loadFromJson)]
    pub fn load_from_json(&self, days_json: &str, blocks_json: Option<String>) -> Result<usize, JsValue> {
        let dataset = dataset_from_json(days_json, blocks_json.as_deref())?;
        let days = dataset.day_count();
        self.handle.update(|c| c.set_dataset(Rc::new(dataset)));
        Ok(days)
    }

    /// Draw immediately instead of waiting for the next frame.
    #[wasm_bindgen(js_name = render)]
    pub fn render(&self) -> Result<(), JsValue> {
        // The handle borrows the coordinator internally; render through it.
        let mut result = Ok(());
        self.handle.update(|c| {
            result = c.render_now().map(|_| ());
            false
        });
        result.map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64) {
        self.handle.update(|c| c.pointer_down(x, y));
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) {
        self.handle.update(|c| c.pointer_move(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) {
        self.handle.update(|c| c.pointer_up());
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) {
        self.handle.update(|c| c.pointer_leave());
    }

    /// Release seen on `window`, outside the canvas.
    #[wasm_bindgen(js_name = globalPointerUp)]
    pub fn global_pointer_up(&self) {
        self.handle.update(|c| c.global_pointer_up());
    }

    /// The host must call `preventDefault` on the wheel event itself.
    #[wasm_bindgen(js_name = wheel)]
    pub fn wheel(&self, x: f64, y: f64, delta_y: f64) {
        self.handle.update(|c| c.wheel(x, y, delta_y));
    }

    /// Accepts `numTrans`, `BlockSize`, `minted`, `value` or `priceUSD`.
    #[wasm_bindgen(js_name = setColorField)]
    pub fn set_color_field(&self, field: &str) -> Result<(), JsValue> {
        let field = ColorField::from_str(field)
            .map_err(|_| AppError::DataError(format!("unknown color field '{}'", field)))?;
        self.handle.update(|c| c.set_color_field(field));
        Ok(())
    }

    /// Accepts `linear`, `log2`, `log10` or `logN`.
    #[wasm_bindgen(js_name = setScaleKind)]
    pub fn set_scale_kind(&self, kind: &str) -> Result<(), JsValue> {
        let kind =
            ColorScaleKind::from_str(kind).map_err(|_| AppError::DataError(format!("unknown scale kind '{}'", kind)))?;
        self.handle.update(|c| c.set_scale_kind(kind));
        Ok(())
    }

    /// Scale kind actually used after the log guard.
    #[wasm_bindgen(js_name = effectiveScaleKind)]
    pub fn effective_scale_kind(&self) -> String {
        self.handle.read(|c| c.effective_scale_kind().as_ref().to_string())
    }

    /// Call after changing the canvas' pixel size.
    #[wasm_bindgen(js_name = resize)]
    pub fn resize(&self, width: f64, height: f64) {
        self.handle.update(|c| c.resize(width, height));
    }

    #[wasm_bindgen(js_name = scale)]
    pub fn scale(&self) -> f64 {
        self.handle.read(|c| c.scale())
    }
}
