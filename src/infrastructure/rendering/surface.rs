use serde::Serialize;

use crate::domain::errors::RenderingResult;
use crate::domain::heatmap::{Color, WorldRect};
use crate::view_state::ViewState;

/// Pixel size of the target canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Text drawn with its baseline at the bottom of the glyphs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
    pub color: Color,
    pub align: TextAlign,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f64, y: f64, font_px: f64, color: Color) -> Self {
        Self { text: text.into(), x, y, font_px, color, align: TextAlign::Left }
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// 2D drawing target the heatmap renders into.
///
/// After [`DrawSurface::apply_view`] every coordinate is in world units.
pub trait DrawSurface {
    /// Reset any transform and clear the whole canvas.
    fn clear(&mut self, size: CanvasSize) -> RenderingResult<()>;

    /// Install `translate(-offset) · scale(scale)` as the current transform.
    fn apply_view(&mut self, view: &ViewState) -> RenderingResult<()>;

    fn fill_rect(&mut self, rect: WorldRect, color: Color) -> RenderingResult<()>;

    fn fill_text(&mut self, label: &Label) -> RenderingResult<()>;
}
