pub mod coordinator;
pub mod input_controller;
pub mod render_scheduler;

pub use coordinator::{FrameReport, HeatmapCoordinator, HeatmapHandle};
pub use input_controller::{InputController, PanState};
pub use render_scheduler::{AnimationFrameRequester, FrameRequester, QueuedFrames, RenderScheduler};
