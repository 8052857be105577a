//! Per-day drawing with zoom-dependent level of detail.
//!
//! Below the detail threshold a day is one flat cell colored by its aggregate.
//! At or above it the cell becomes a row-major sub-grid with one sub-cell per
//! block of that day, up to a fixed number of rows. Sub-cell size and spacing
//! come from three scale bands. Sub-cells share the day-level color domain.

use super::surface::{DrawSurface, Label};
use crate::config::{HeatmapConfig, LodConfig};
use crate::domain::{
    chain_data::{BlockRecord, Dataset, DayRecord, MetricDomain},
    errors::RenderingResult,
    heatmap::{CalendarDate, Color, ColorField, ColorRamp, ColorScaleKind, WorldRect},
};
use crate::view_state::ViewState;

const DAY_LABEL_FONT_PX: f64 = 0.5;
const DAY_LABEL_LIFT: f64 = 0.2;

/// Size and spacing of block sub-cells at a given scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubGridMetrics {
    pub size: f64,
    pub gap: f64,
    pub columns: usize,
}

/// What a single `render_cell` call produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDetail {
    NoData,
    Aggregate,
    Blocks(usize),
}

/// Cell renderer with the color field, scale law and domains resolved once per frame.
#[derive(Debug, Clone)]
pub struct LodRenderer {
    lod: LodConfig,
    cell_width: f64,
    palette: ColorRamp,
    field: ColorField,
    scale_kind: ColorScaleKind,
    day_domain: Option<MetricDomain>,
}

impl LodRenderer {
    pub fn new(config: &HeatmapConfig, dataset: &Dataset, field: ColorField, scale_kind: ColorScaleKind) -> Self {
        Self {
            lod: config.lod,
            cell_width: config.layout.cell_width,
            palette: config.palette,
            field,
            scale_kind,
            day_domain: dataset.day_domain(field),
        }
    }

    /// Whether a frame at `scale` expands days into block sub-grids.
    pub fn shows_blocks(&self, scale: f64) -> bool {
        scale >= self.lod.detail_threshold
    }

    pub fn shows_day_labels(&self, scale: f64) -> bool {
        scale > self.lod.day_label_threshold
    }

    /// Most blocks a single day can show; the rest are not drawn.
    pub fn max_visible_blocks(&self) -> usize {
        self.lod.blocks_per_row.max(1) * self.lod.max_block_rows
    }

    pub fn sub_grid_metrics(&self, scale: f64) -> SubGridMetrics {
        let columns = self.lod.blocks_per_row.max(1);
        if scale < self.lod.spaced_threshold {
            SubGridMetrics { size: self.cell_width / columns as f64, gap: 0.0, columns }
        } else {
            let size = self.cell_width / (columns + 4) as f64;
            // exactly at the spaced threshold the wide gap applies
            let narrow = scale > self.lod.spaced_threshold && scale < self.lod.wide_spaced_threshold;
            let gap = if narrow { size / 5.0 } else { size / 3.5 };
            SubGridMetrics { size, gap, columns }
        }
    }

    pub fn render_cell<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        date: CalendarDate,
        cell: WorldRect,
        day: Option<&DayRecord>,
        blocks: &[BlockRecord],
        view: &ViewState,
    ) -> RenderingResult<CellDetail> {
        if self.shows_day_labels(view.scale) {
            let label = Label::new(date.label(), cell.x, cell.y - DAY_LABEL_LIFT, DAY_LABEL_FONT_PX, Color::LABEL);
            surface.fill_text(&label)?;
        }

        let Some(day) = day else {
            surface.fill_rect(cell, self.palette.no_value)?;
            return Ok(CellDetail::NoData);
        };

        if !self.shows_blocks(view.scale) || blocks.is_empty() {
            let color = self.color(day.metric(self.field), self.day_domain);
            surface.fill_rect(cell, color)?;
            return Ok(CellDetail::Aggregate);
        }

        let grid = self.sub_grid_metrics(view.scale);
        let pitch = grid.size + grid.gap;
        let shown = blocks.len().min(self.max_visible_blocks());
        for (index, block) in blocks[..shown].iter().enumerate() {
            let column = index % grid.columns;
            let row = index / grid.columns;
            let value = match self.field {
                ColorField::PriceUsd => day.price_usd,
                field => block.metric(field),
            };
            let rect = WorldRect::new(cell.x + column as f64 * pitch, cell.y + row as f64 * pitch, grid.size, grid.size);
            surface.fill_rect(rect, self.color(value, self.day_domain))?;
        }
        Ok(CellDetail::Blocks(shown))
    }

    fn color(&self, value: Option<f64>, domain: Option<MetricDomain>) -> Color {
        match (value, domain) {
            (Some(value), Some(domain)) => self.palette.map(value, domain.min, domain.max, self.scale_kind),
            _ => self.palette.no_value,
        }
    }
}
