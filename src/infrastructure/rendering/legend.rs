use super::surface::{CanvasSize, DrawSurface, Label, TextAlign};
use crate::domain::{
    chain_data::MetricDomain,
    errors::RenderingResult,
    heatmap::{Color, ColorRamp, ColorScaleKind, WorldRect},
};
use crate::view_state::ViewState;

const LEGEND_STEPS: usize = 25;
const LEGEND_LABEL_SPACE: f64 = 12.0;
const LEGEND_FONT_PX: f64 = 10.0;

/// Draw the color ramp as a horizontal strip with domain labels underneath.
pub fn render_legend<S: DrawSurface + ?Sized>(
    surface: &mut S,
    canvas: CanvasSize,
    palette: &ColorRamp,
    domain: Option<MetricDomain>,
    scale_kind: ColorScaleKind,
) -> RenderingResult<()> {
    surface.clear(canvas)?;
    surface.apply_view(&ViewState::new(1.0, 0.0, 0.0))?;

    let strip_height = (canvas.height - LEGEND_LABEL_SPACE).max(1.0);
    let step_width = canvas.width / LEGEND_STEPS as f64;
    for step in 0..LEGEND_STEPS {
        let t = step as f64 / (LEGEND_STEPS - 1) as f64;
        let rect = WorldRect::new(step as f64 * step_width, 0.0, step_width, strip_height);
        surface.fill_rect(rect, palette.at(t))?;
    }

    let Some(domain) = domain else {
        return Ok(());
    };
    let baseline = canvas.height;
    let labels = [
        (format_metric(domain.min), 0.0, TextAlign::Left),
        (format_metric(midpoint(domain, scale_kind)), canvas.width / 2.0, TextAlign::Center),
        (format_metric(domain.max), canvas.width, TextAlign::Right),
    ];
    for (text, x, align) in labels {
        surface.fill_text(&Label::new(text, x, baseline, LEGEND_FONT_PX, Color::rgb(0, 0, 0)).aligned(align))?;
    }
    Ok(())
}

/// Value that lands in the middle of the ramp under `scale_kind`.
pub fn midpoint(domain: MetricDomain, scale_kind: ColorScaleKind) -> f64 {
    if scale_kind.is_logarithmic() && domain.min > 0.0 {
        (domain.min * domain.max).sqrt()
    } else {
        (domain.min + domain.max) / 2.0
    }
}

/// Compact metric label: `950`, `12.5k`, `3.2M`, `2.1G`.
pub fn format_metric(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.1}G", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e4 {
        format!("{:.1}k", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        format!("{:.2}", value)
    }
}
