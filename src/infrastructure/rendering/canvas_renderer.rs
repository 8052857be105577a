use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{CanvasSize, DrawSurface, Label};
use crate::domain::{
    errors::{AppError, RenderingResult},
    heatmap::{Color, WorldRect},
    logging::{LogComponent, get_logger},
};
use crate::view_state::ViewState;

/// Canvas 2D drawing surface. Owns the context for its whole lifetime.
pub struct CanvasRenderer {
    context: CanvasRenderingContext2d,
    last_fill: Option<Color>,
    last_font_px: Option<f64>,
}

impl CanvasRenderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context, last_fill: None, last_font_px: None }
    }

    /// Look the canvas up by element id and take its 2D context.
    pub fn from_canvas_id(canvas_id: &str) -> RenderingResult<(HtmlCanvasElement, Self)> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| AppError::RenderingError("Document not available".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::RenderingError(format!("Canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError(format!("Element '{}' is not a canvas", canvas_id)))?;
        let renderer = Self::from_canvas(&canvas)?;
        Ok((canvas, renderer))
    }

    pub fn from_canvas(canvas: &HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| AppError::RenderingError("Failed to get 2D context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;

        get_logger().debug(LogComponent::Infrastructure("CanvasRenderer"), "Acquired 2D context");
        Ok(Self::new(context))
    }

    fn set_fill(&mut self, color: Color) {
        if self.last_fill != Some(color) {
            self.context.set_fill_style_str(&color.to_css());
            self.last_fill = Some(color);
        }
    }
}

impl DrawSurface for CanvasRenderer {
    fn clear(&mut self, size: CanvasSize) -> RenderingResult<()> {
        self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        self.last_fill = None;
        self.last_font_px = None;
        Ok(())
    }

    fn apply_view(&mut self, view: &ViewState) -> RenderingResult<()> {
        self.context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.context.translate(-view.offset_x, -view.offset_y)?;
        self.context.scale(view.scale, view.scale)?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: WorldRect, color: Color) -> RenderingResult<()> {
        self.set_fill(color);
        self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_text(&mut self, label: &Label) -> RenderingResult<()> {
        self.set_fill(label.color);
        if self.last_font_px != Some(label.font_px) {
            self.context.set_font(&format!("{}px sans-serif", label.font_px));
            self.last_font_px = Some(label.font_px);
        }
        self.context.set_text_baseline("bottom");
        self.context.set_text_align(label.align.as_css());
        self.context.fill_text(&label.text, label.x, label.y)?;
        Ok(())
    }
}
