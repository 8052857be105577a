//! Drawing: surfaces, the per-day LOD renderer and the frame loop.

pub mod canvas_renderer;
pub mod legend;
pub mod lod_renderer;
pub mod recording;
pub mod render_loop;
pub mod surface;

pub use canvas_renderer::CanvasRenderer;
pub use legend::render_legend;
pub use lod_renderer::{CellDetail, LodRenderer, SubGridMetrics};
pub use recording::{DrawCommand, RecordingSurface};
pub use render_loop::{RenderLoop, RenderStats};
pub use surface::{CanvasSize, DrawSurface, Label, TextAlign};
