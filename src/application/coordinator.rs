use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::input_controller::InputController;
use super::render_scheduler::{FrameRequester, RenderScheduler};
use crate::config::HeatmapConfig;
use crate::domain::{
    chain_data::{Dataset, MetricDomain},
    errors::RenderingResult,
    heatmap::{ColorField, ColorScaleKind},
    logging::{LogComponent, get_logger},
};
use crate::infrastructure::rendering::{CanvasSize, DrawSurface, RenderLoop, RenderStats};
use crate::log_error;
use crate::view_state::{ViewState, ViewportTransform};

/// Owns everything one heatmap canvas needs between frames.
///
/// Setters and input handlers only mutate state and report whether a redraw
/// is needed; drawing happens in [`HeatmapCoordinator::render_now`].
pub struct HeatmapCoordinator<S: DrawSurface> {
    surface: S,
    config: HeatmapConfig,
    viewport: ViewportTransform,
    input: InputController,
    render_loop: RenderLoop,
    dataset: Option<Rc<Dataset>>,
    field: ColorField,
    scale_kind: ColorScaleKind,
    canvas: CanvasSize,
    last_stats: Option<RenderStats>,
}

impl<S: DrawSurface> HeatmapCoordinator<S> {
    pub fn new(surface: S, config: HeatmapConfig, canvas: CanvasSize, through_year: i32) -> Self {
        get_logger().info(
            LogComponent::Application("HeatmapCoordinator"),
            &format!("Creating heatmap coordinator {}x{} through {}", canvas.width, canvas.height, through_year),
        );
        Self {
            surface,
            viewport: ViewportTransform::from_config(&config.viewport),
            input: InputController::from_config(&config.viewport),
            render_loop: RenderLoop::new(&config, through_year),
            config,
            dataset: None,
            field: ColorField::default(),
            scale_kind: ColorScaleKind::default(),
            canvas,
            last_stats: None,
        }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn dataset(&self) -> Option<&Rc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn view_state(&self) -> &ViewState {
        self.viewport.state()
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale()
    }

    pub fn color_field(&self) -> ColorField {
        self.field
    }

    /// The scale kind as selected, before the log guard.
    pub fn scale_kind(&self) -> ColorScaleKind {
        self.scale_kind
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    pub fn set_dataset(&mut self, dataset: Rc<Dataset>) -> bool {
        get_logger().info(
            LogComponent::Application("HeatmapCoordinator"),
            &format!("Dataset set: {} days, {} blocks", dataset.day_count(), dataset.block_count()),
        );
        self.dataset = Some(dataset);
        self.warn_on_fallback();
        true
    }

    pub fn set_color_field(&mut self, field: ColorField) -> bool {
        if self.field == field {
            return false;
        }
        self.field = field;
        self.warn_on_fallback();
        true
    }

    pub fn set_scale_kind(&mut self, kind: ColorScaleKind) -> bool {
        if self.scale_kind == kind {
            return false;
        }
        self.scale_kind = kind;
        self.warn_on_fallback();
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let size = CanvasSize::new(width.max(0.0), height.max(0.0));
        if size == self.canvas {
            return false;
        }
        self.canvas = size;
        true
    }

    /// Domain of the selected metric over the day aggregates.
    pub fn legend_domain(&self) -> Option<MetricDomain> {
        self.dataset.as_ref().and_then(|dataset| dataset.day_domain(self.field))
    }

    /// Whether `kind` can color the selected metric. Log scales need a
    /// strictly positive domain.
    pub fn supports_scale_kind(&self, kind: ColorScaleKind) -> bool {
        self.legend_domain().is_none_or(|domain| domain.supports(kind))
    }

    /// Selected scale kind, or `Linear` when a log scale is undefined for the
    /// current metric's domain.
    pub fn effective_scale_kind(&self) -> ColorScaleKind {
        if self.supports_scale_kind(self.scale_kind) { self.scale_kind } else { ColorScaleKind::Linear }
    }

    fn warn_on_fallback(&self) {
        if self.effective_scale_kind() != self.scale_kind {
            get_logger().warn(
                LogComponent::Application("HeatmapCoordinator"),
                &format!("{} has non-positive values; {} falls back to linear", self.field, self.scale_kind),
            );
        }
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.input.pointer_down(x, y);
        false
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.input.pointer_move(x, y, &mut self.viewport)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.input.pointer_up();
        false
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.input.pointer_leave();
        false
    }

    pub fn global_pointer_up(&mut self) -> bool {
        self.input.global_pointer_up();
        false
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.input.wheel(x, y, delta_y, &mut self.viewport)
    }

    /// Draw one full frame synchronously.
    pub fn render_now(&mut self) -> RenderingResult<RenderStats> {
        let empty;
        let dataset: &Dataset = match self.dataset.as_deref() {
            Some(dataset) => dataset,
            None => {
                empty = Dataset::empty();
                &empty
            }
        };
        let kind = self.effective_scale_kind();
        let view = *self.viewport.state();
        let stats = self.render_loop.render(&mut self.surface, self.canvas, dataset, &view, self.field, kind)?;
        self.last_stats = Some(stats);
        Ok(stats)
    }
}

/// What a scheduled frame reports back to the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub scale: f64,
    pub stats: RenderStats,
}

/// Shared handle pairing a coordinator with its frame scheduler, for hosts
/// whose event callbacks each need their own clone.
pub struct HeatmapHandle<S: DrawSurface + 'static> {
    coordinator: Rc<RefCell<HeatmapCoordinator<S>>>,
    scheduler: Rc<RefCell<RenderScheduler>>,
    on_frame: Rc<RefCell<Option<Box<dyn FnMut(FrameReport)>>>>,
}

impl<S: DrawSurface + 'static> Clone for HeatmapHandle<S> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Rc::clone(&self.coordinator),
            scheduler: Rc::clone(&self.scheduler),
            on_frame: Rc::clone(&self.on_frame),
        }
    }
}

impl<S: DrawSurface + 'static> HeatmapHandle<S> {
    pub fn new(coordinator: HeatmapCoordinator<S>, requester: Box<dyn FrameRequester>) -> Self {
        Self {
            coordinator: Rc::new(RefCell::new(coordinator)),
            scheduler: Rc::new(RefCell::new(RenderScheduler::new(requester))),
            on_frame: Rc::new(RefCell::new(None)),
        }
    }

    /// Called after every scheduled frame, e.g. to publish the scale to the UI.
    pub fn set_on_frame(&self, callback: impl FnMut(FrameReport) + 'static) {
        *self.on_frame.borrow_mut() = Some(Box::new(callback));
    }

    pub fn read<R>(&self, f: impl FnOnce(&HeatmapCoordinator<S>) -> R) -> R {
        f(&self.coordinator.borrow())
    }

    /// Apply `f` and schedule a frame if it reports a change.
    pub fn update(&self, f: impl FnOnce(&mut HeatmapCoordinator<S>) -> bool) -> bool {
        let dirty = f(&mut self.coordinator.borrow_mut());
        if dirty {
            self.request_render();
        }
        dirty
    }

    pub fn request_render(&self) {
        let coordinator: Weak<RefCell<HeatmapCoordinator<S>>> = Rc::downgrade(&self.coordinator);
        let on_frame = Rc::downgrade(&self.on_frame);
        self.scheduler.borrow_mut().schedule(move || {
            let Some(coordinator) = coordinator.upgrade() else {
                return;
            };
            let result = {
                let mut coordinator = coordinator.borrow_mut();
                coordinator.render_now().map(|stats| FrameReport { scale: coordinator.scale(), stats })
            };
            let report = match result {
                Ok(report) => report,
                Err(e) => {
                    log_error!(LogComponent::Application("HeatmapHandle"), "Frame failed: {}", e);
                    return;
                }
            };
            if let Some(on_frame) = on_frame.upgrade() {
                if let Some(callback) = on_frame.borrow_mut().as_mut() {
                    callback(report);
                }
            }
        });
    }

    pub fn is_render_pending(&self) -> bool {
        self.scheduler.borrow().is_pending()
    }

    pub fn frames_requested(&self) -> usize {
        self.scheduler.borrow().frames_requested()
    }
}
