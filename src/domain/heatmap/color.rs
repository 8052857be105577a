//! Metric value → cell color.
//!
//! Values are clamped into the metric's domain, normalized under the chosen
//! [`ColorScaleKind`] and interpolated channel-wise between two anchors.
//! Non-positive and non-finite values are "no data" and get a sentinel color
//! that is never produced by the interpolation itself.

use serde::{Deserialize, Serialize};

use super::value_objects::{Color, ColorScaleKind};

/// Two-anchor color ramp with a separate no-value sentinel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    pub low: Color,
    pub high: Color,
    pub no_value: Color,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self { low: Color::LOW_ANCHOR, high: Color::HIGH_ANCHOR, no_value: Color::NO_VALUE }
    }
}

impl ColorRamp {
    /// Map `value` against `[domain_min, domain_max]`.
    ///
    /// Log scales require `domain_min > 0`; callers filter out log scales for
    /// metrics that cannot satisfy this.
    pub fn map(&self, value: f64, domain_min: f64, domain_max: f64, kind: ColorScaleKind) -> Color {
        if !value.is_finite() || value <= 0.0 {
            return self.no_value;
        }
        let clamped = value.max(domain_min).min(domain_max);
        let lo = kind.apply(domain_min);
        let hi = kind.apply(domain_max);
        let range = hi - lo;
        let t = if range == 0.0 { 0.0 } else { (kind.apply(clamped) - lo) / range };
        self.at(t)
    }

    /// Interpolated color at normalized position `t`.
    pub fn at(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        Color::rgb(
            lerp_channel(self.low.r, self.high.r, t),
            lerp_channel(self.low.g, self.high.g, t),
            lerp_channel(self.low.b, self.high.b, t),
        )
    }
}

fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    let start = start as f64;
    let end = end as f64;
    (start + (end - start) * t).round().clamp(0.0, 255.0) as u8
}

/// [`ColorRamp::map`] on the default palette.
pub fn map_color(value: f64, domain_min: f64, domain_max: f64, kind: ColorScaleKind) -> Color {
    ColorRamp::default().map(value, domain_min, domain_max, kind)
}
