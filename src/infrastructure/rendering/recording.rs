use serde::Serialize;

use super::surface::{CanvasSize, DrawSurface, Label};
use crate::domain::errors::RenderingResult;
use crate::domain::heatmap::{Color, WorldRect};
use crate::view_state::ViewState;

/// One call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { size: CanvasSize },
    ApplyView { scale: f64, offset_x: f64, offset_y: f64 },
    FillRect { rect: WorldRect, color: Color },
    FillText { label: Label },
}

/// Headless surface that records draw calls instead of rasterizing them.
/// Used for tests, benches and offline inspection of a frame.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = (&WorldRect, &Color)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { label } => Some(label),
            _ => None,
        })
    }

    pub fn fill_rect_count(&self) -> usize {
        self.fill_rects().count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, size: CanvasSize) -> RenderingResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
        Ok(())
    }

    fn apply_view(&mut self, view: &ViewState) -> RenderingResult<()> {
        self.commands.push(DrawCommand::ApplyView {
            scale: view.scale,
            offset_x: view.offset_x,
            offset_y: view.offset_y,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: WorldRect, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn fill_text(&mut self, label: &Label) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillText { label: label.clone() });
        Ok(())
    }
}
