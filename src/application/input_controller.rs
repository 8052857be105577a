//! Pointer and wheel handling for the heatmap canvas.
//!
//! Every handler returns whether the view changed, so the caller decides when
//! to schedule a render.

use crate::config::ViewportConfig;
use crate::domain::logging::LogComponent;
use crate::log_trace;
use crate::view_state::ViewportTransform;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    Panning { last_x: f64, last_y: f64 },
}

#[derive(Debug, Clone)]
pub struct InputController {
    state: PanState,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Default for InputController {
    fn default() -> Self {
        Self::from_config(&ViewportConfig::default())
    }
}

impl InputController {
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self { state: PanState::Idle, zoom_in_factor: config.zoom_in_factor, zoom_out_factor: config.zoom_out_factor }
    }

    pub fn state(&self) -> PanState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, PanState::Panning { .. })
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.state = PanState::Panning { last_x: x, last_y: y };
    }

    /// Pan by the delta since the last recorded position. Ignored while idle.
    pub fn pointer_move(&mut self, x: f64, y: f64, viewport: &mut ViewportTransform) -> bool {
        let PanState::Panning { last_x, last_y } = self.state else {
            return false;
        };
        viewport.pan_by(x - last_x, y - last_y);
        self.state = PanState::Panning { last_x: x, last_y: y };
        true
    }

    pub fn pointer_up(&mut self) {
        self.release();
    }

    pub fn pointer_leave(&mut self) {
        self.release();
    }

    /// Release seen outside the canvas.
    pub fn global_pointer_up(&mut self) {
        self.release();
    }

    /// Zoom about the pointer. Applies in any pan state.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64, viewport: &mut ViewportTransform) -> bool {
        let factor = self.wheel_factor(delta_y);
        viewport.zoom_at(x, y, factor);
        log_trace!(
            LogComponent::Application("InputController"),
            "wheel {:.1} at ({:.0}, {:.0}): scale {:.3}",
            delta_y,
            x,
            y,
            viewport.scale()
        );
        true
    }

    pub fn wheel_factor(&self, delta_y: f64) -> f64 {
        if delta_y < 0.0 { self.zoom_in_factor } else { self.zoom_out_factor }
    }

    fn release(&mut self) {
        self.state = PanState::Idle;
    }
}
