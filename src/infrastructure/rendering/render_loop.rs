//! One full redraw of the calendar heatmap.
//!
//! The view transform is installed once, so everything below draws in world
//! units. Months and days outside the visible world rectangle are skipped
//! before any color lookup or sub-grid expansion happens.

use super::lod_renderer::{CellDetail, LodRenderer};
use super::surface::{CanvasSize, DrawSurface, Label};
use crate::config::{HeatmapConfig, LodConfig};
use crate::domain::{
    chain_data::Dataset,
    errors::RenderingResult,
    heatmap::{
        CalendarDate, CalendarLayout, Color, ColorField, ColorScaleKind,
        calendar::{MONTH_NAMES, MONTHS_IN_YEAR, days_in_month},
    },
    logging::LogComponent,
};
use crate::log_debug;
use crate::time_utils::format_month_label;
use crate::view_state::ViewState;

const HEADER_FONT_PX: f64 = 12.0;
const MONTH_LABEL_FONT_PX: f64 = 6.0;
const YEAR_LABEL_X: f64 = 10.0;
const MONTH_NAME_LIFT: f64 = 14.0;
const MONTH_LABEL_LIFT: f64 = 10.0;

/// Counters for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub days_drawn: usize,
    pub days_culled: usize,
    pub block_cells: usize,
}

#[derive(Debug, Clone)]
pub struct RenderLoop {
    config: HeatmapConfig,
    layout: CalendarLayout,
    through_year: i32,
}

impl RenderLoop {
    /// `through_year` is the last year band drawn, normally the current year.
    pub fn new(config: &HeatmapConfig, through_year: i32) -> Self {
        Self { config: config.clone(), layout: CalendarLayout::new(config.layout), through_year }
    }

    pub fn layout(&self) -> &CalendarLayout {
        &self.layout
    }

    pub fn lod(&self) -> &LodConfig {
        &self.config.lod
    }

    pub fn through_year(&self) -> i32 {
        self.through_year
    }

    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        canvas: CanvasSize,
        dataset: &Dataset,
        view: &ViewState,
        field: ColorField,
        scale_kind: ColorScaleKind,
    ) -> RenderingResult<RenderStats> {
        surface.clear(canvas)?;
        surface.apply_view(view)?;

        let mut stats = RenderStats::default();
        let Some(first_year) = dataset.min_year() else {
            return Ok(stats);
        };

        let visible = view.visible_world_rect(canvas.width, canvas.height);
        let cells = LodRenderer::new(&self.config, dataset, field, scale_kind);
        let header_font = HEADER_FONT_PX / view.scale;
        let layout_config = self.layout.config();

        for (month, name) in MONTH_NAMES.iter().enumerate() {
            let (x, _) = self.layout.month_origin(first_year, month as u32);
            let label = Label::new(*name, x, layout_config.top_margin - MONTH_NAME_LIFT, header_font, Color::LABEL);
            surface.fill_text(&label)?;
        }

        for year in first_year..=self.through_year {
            let (_, year_y) = self.layout.month_origin(year, 0);
            let label = Label::new(
                year.to_string(),
                YEAR_LABEL_X,
                year_y + self.layout.month_height() / 2.0,
                header_font,
                Color::LABEL,
            );
            surface.fill_text(&label)?;

            for month in 0..MONTHS_IN_YEAR {
                let bounds = self.layout.month_rect(year, month);
                if view.scale > self.config.lod.month_label_threshold {
                    let label = Label::new(
                        format_month_label(year, month),
                        bounds.x,
                        bounds.y - MONTH_LABEL_LIFT,
                        MONTH_LABEL_FONT_PX,
                        Color::LABEL,
                    );
                    surface.fill_text(&label)?;
                }

                let day_total = days_in_month(year, month);
                if !bounds.intersects(&visible) {
                    stats.days_culled += day_total as usize;
                    continue;
                }

                let slots = dataset.month(year, month);
                for day in 1..=day_total {
                    let Some(date) = CalendarDate::new(year, month, day) else {
                        continue;
                    };
                    let cell = self.layout.cell_rect(date);
                    if !cell.intersects(&visible) {
                        stats.days_culled += 1;
                        continue;
                    }

                    let record = slots.and_then(|slots| slots.get((day - 1) as usize)).and_then(Option::as_ref);
                    let blocks = if record.is_some() && cells.shows_blocks(view.scale) {
                        dataset.blocks_for(date)
                    } else {
                        &[]
                    };
                    if let CellDetail::Blocks(count) = cells.render_cell(surface, date, cell, record, blocks, view)? {
                        stats.block_cells += count;
                    }
                    stats.days_drawn += 1;
                }
            }
        }

        log_debug!(
            LogComponent::Infrastructure("RenderLoop"),
            "frame at scale {:.2}: {} days drawn, {} culled, {} block cells",
            view.scale,
            stats.days_drawn,
            stats.days_culled,
            stats.block_cells
        );

        Ok(stats)
    }
}
