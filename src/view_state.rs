use crate::config::ViewportConfig;
use crate::domain::heatmap::WorldRect;

/// Pan and zoom of the calendar canvas.
///
/// Offsets are in screen pixels, so `screen = world * scale - offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewState {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { scale, offset_x, offset_y }
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        (wx * self.scale - self.offset_x, wy * self.scale - self.offset_y)
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx + self.offset_x) / self.scale, (sy + self.offset_y) / self.scale)
    }

    /// World-space rectangle covered by a canvas of the given pixel size.
    pub fn visible_world_rect(&self, canvas_width: f64, canvas_height: f64) -> WorldRect {
        WorldRect::new(
            self.offset_x / self.scale,
            self.offset_y / self.scale,
            canvas_width / self.scale,
            canvas_height / self.scale,
        )
    }
}

/// Owner of the [`ViewState`]; the only place the view is mutated.
#[derive(Clone, Debug)]
pub struct ViewportTransform {
    state: ViewState,
    min_scale: f64,
    max_scale: f64,
}

impl ViewportTransform {
    /// `initial_scale` is clamped into `[min_scale, max_scale]`.
    pub fn new(initial_scale: f64, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale { (min_scale, max_scale) } else { (max_scale, min_scale) };
        Self { state: ViewState::new(initial_scale.clamp(min_scale, max_scale), 0.0, 0.0), min_scale, max_scale }
    }

    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.initial_scale, config.min_scale, config.max_scale)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
        self.state.world_to_screen(wx, wy)
    }

    pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        self.state.screen_to_world(sx, sy)
    }

    pub fn visible_world_rect(&self, canvas_width: f64, canvas_height: f64) -> WorldRect {
        self.state.visible_world_rect(canvas_width, canvas_height)
    }

    /// Zoom keeping the world point under the cursor stable. Out-of-range
    /// scales are clamped; non-finite or non-positive factors are ignored.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let (world_x, world_y) = self.state.screen_to_world(screen_x, screen_y);
        let new_scale = (self.state.scale * factor).clamp(self.min_scale, self.max_scale);
        self.state.scale = new_scale;
        self.state.offset_x = world_x * new_scale - screen_x;
        self.state.offset_y = world_y * new_scale - screen_y;
    }

    /// Pan by screen-space deltas.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.state.offset_x -= dx;
        self.state.offset_y -= dy;
    }

    /// Place a world point at the canvas origin without touching the scale.
    pub fn look_at(&mut self, world_x: f64, world_y: f64) {
        self.state.offset_x = world_x * self.state.scale;
        self.state.offset_y = world_y * self.state.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_scale_is_clamped() {
        let view = ViewportTransform::new(0.2, 1.0, 50.0);
        assert_eq!(view.scale(), 1.0);
        let swapped = ViewportTransform::new(10.0, 50.0, 1.0);
        assert_eq!(swapped.scale_limits(), (1.0, 50.0));
    }

    #[test]
    fn pan_ignores_scale() {
        let mut view = ViewportTransform::new(4.0, 1.0, 50.0);
        view.pan_by(10.0, -5.0);
        assert_eq!(view.state().offset_x, -10.0);
        assert_eq!(view.state().offset_y, 5.0);
    }

    #[test]
    fn visible_rect_tracks_offset_and_scale() {
        let view = ViewState::new(2.0, 100.0, 50.0);
        assert_eq!(view.visible_world_rect(800.0, 600.0), WorldRect::new(50.0, 25.0, 400.0, 300.0));
    }

    #[test]
    fn degenerate_factor_is_ignored() {
        let mut view = ViewportTransform::new(2.0, 1.0, 50.0);
        view.zoom_at(10.0, 10.0, f64::NAN);
        view.zoom_at(10.0, 10.0, 0.0);
        assert_eq!(view.scale(), 2.0);
    }
}
