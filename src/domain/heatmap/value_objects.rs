use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Metric a cell is colored by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum ColorField {
    #[default]
    #[display(fmt = "Transactions")]
    #[strum(serialize = "numTrans")]
    #[serde(rename = "numTrans")]
    TransactionCount,
    #[display(fmt = "Size")]
    #[strum(serialize = "BlockSize")]
    #[serde(rename = "BlockSize")]
    ByteSize,
    #[display(fmt = "Minted")]
    #[strum(serialize = "minted")]
    #[serde(rename = "minted")]
    MintedValue,
    #[display(fmt = "Output value")]
    #[strum(serialize = "value")]
    #[serde(rename = "value")]
    OutputValue,
    #[display(fmt = "Price USD")]
    #[strum(serialize = "priceUSD")]
    #[serde(rename = "priceUSD")]
    PriceUsd,
}

/// Scale law used to normalize a metric before interpolation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum ColorScaleKind {
    #[default]
    #[display(fmt = "Linear")]
    #[strum(serialize = "linear")]
    #[serde(rename = "linear")]
    Linear,
    #[display(fmt = "Log2")]
    #[strum(serialize = "log2")]
    #[serde(rename = "log2")]
    Log2,
    #[display(fmt = "Log10")]
    #[strum(serialize = "log10")]
    #[serde(rename = "log10")]
    Log10,
    #[display(fmt = "LogN")]
    #[strum(serialize = "logN")]
    #[serde(rename = "logN")]
    LogN,
}

impl ColorScaleKind {
    pub fn is_logarithmic(&self) -> bool {
        !matches!(self, ColorScaleKind::Linear)
    }

    /// Transform a positive value into the space the scale interpolates in.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            ColorScaleKind::Linear => value,
            ColorScaleKind::Log2 => value.log2(),
            ColorScaleKind::Log10 => value.log10(),
            ColorScaleKind::LogN => value.ln(),
        }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "rgb({}, {}, {})", r, g, b)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
    }

    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// CSS string understood by the 2D canvas
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    pub const NO_VALUE: Color = Color::from_hex(0x9b9da0);
    pub const LOW_ANCHOR: Color = Color::rgb(16, 185, 129);
    pub const HIGH_ANCHOR: Color = Color::rgb(239, 68, 68);
    pub const LABEL: Color = Color::from_hex(0x94a3b8);
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WorldRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Overlap test; rectangles sharing only an edge count as intersecting.
    pub fn intersects(&self, other: &WorldRect) -> bool {
        !(self.right() < other.x || self.x > other.right() || self.bottom() < other.y || self.y > other.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn selector_strings_parse() {
        assert_eq!(ColorField::from_str("BlockSize").unwrap(), ColorField::ByteSize);
        assert_eq!(ColorField::from_str("priceUSD").unwrap(), ColorField::PriceUsd);
        assert_eq!(ColorScaleKind::from_str("logN").unwrap(), ColorScaleKind::LogN);
        assert!(ColorScaleKind::from_str("sqrt").is_err());
        assert_eq!(ColorField::iter().count(), 5);
    }

    #[test]
    fn color_formats_for_canvas() {
        assert_eq!(Color::NO_VALUE.to_css(), "rgb(155, 157, 160)");
        assert_eq!(Color::from(0x10b981), Color::LOW_ANCHOR);
        assert_eq!(Color::LOW_ANCHOR.to_hex(), 0x10b981);
    }

    #[test]
    fn edge_contact_intersects() {
        let a = WorldRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&WorldRect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&WorldRect::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&WorldRect::new(0.0, -6.0, 5.0, 5.0)));
    }
}
