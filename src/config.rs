//! Tunables for layout, level of detail, viewport limits and palette.
//!
//! Every section is `#[serde(default)]`, so a host may pass a partial JSON
//! object and get the stock values for everything it leaves out.

use serde::{Deserialize, Serialize};

use crate::domain::{errors::AppError, heatmap::ColorRamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub layout: LayoutConfig,
    pub lod: LodConfig,
    pub viewport: ViewportConfig,
    pub palette: ColorRamp,
    pub api_base_url: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            lod: LodConfig::default(),
            viewport: ViewportConfig::default(),
            palette: ColorRamp::default(),
            api_base_url: "http://localhost:3001".to_string(),
        }
    }
}

impl HeatmapConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::DataError(format!("invalid config: {}", e)))
    }
}

/// Calendar grid geometry in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub epoch_year: i32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub day_gap: f64,
    pub month_gap: f64,
    pub year_gap: f64,
    pub left_margin: f64,
    pub top_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            epoch_year: 2009,
            cell_width: 6.0,
            cell_height: 6.0,
            day_gap: 2.0,
            month_gap: 20.0,
            year_gap: 30.0,
            left_margin: 80.0,
            top_margin: 50.0,
        }
    }
}

/// Scale thresholds for sub-grids and labels. The knobs are independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    /// At or above: one sub-cell per block
    pub detail_threshold: f64,
    /// Strictly above: `YYYY-MM` header over each month
    pub month_label_threshold: f64,
    /// Strictly above: `YYYY-MM-DD` over each visible day
    pub day_label_threshold: f64,
    pub blocks_per_row: usize,
    /// Rows of sub-cells drawn per day at most
    pub max_block_rows: usize,
    /// Sub-grid gets smaller cells with gaps from here on; gaps are narrow
    /// strictly between this and `wide_spaced_threshold`
    pub spaced_threshold: f64,
    /// Gap is wide from here on and exactly at `spaced_threshold`
    pub wide_spaced_threshold: f64,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            detail_threshold: 4.0,
            month_label_threshold: 3.0,
            day_label_threshold: 20.0,
            blocks_per_row: 13,
            max_block_rows: 23,
            spaced_threshold: 8.0,
            wide_spaced_threshold: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub initial_scale: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { min_scale: 1.0, max_scale: 50.0, initial_scale: 1.1, zoom_in_factor: 1.1, zoom_out_factor: 0.9 }
    }
}
