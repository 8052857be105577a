//! Calendar grid geometry.
//!
//! Each month is a 7-column block (Monday first) with one row per week.
//! Months run left to right inside a year band; year bands stack downwards
//! from the epoch year. Positions depend only on the date and the
//! [`LayoutConfig`], never on data.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::value_objects::WorldRect;
use crate::config::LayoutConfig;

pub const DAYS_IN_WEEK: u32 = 7;
pub const MAX_WEEKS: u32 = 6;
pub const MONTHS_IN_YEAR: u32 = 12;

pub const MONTH_NAMES: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// A valid calendar day. `month` is zero-based, `day` is one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month + 1, day).map(Self::from_naive)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month0(), day: date.day() }
    }

    /// Parse the integer `YYYYMMDD` form used by the day feed.
    pub fn from_yyyymmdd(value: u32) -> Option<Self> {
        Self::new((value / 10_000) as i32, (value / 100 % 100).checked_sub(1)?, value % 100)
    }

    /// UTC calendar day of a unix timestamp in seconds.
    pub fn from_unix_seconds(timestamp: i64) -> Option<Self> {
        DateTime::from_timestamp(timestamp, 0).map(|dt| Self::from_naive(dt.date_naive()))
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// Number of days in a zero-based month, 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return 0;
    };
    let next = if month + 1 == MONTHS_IN_YEAR {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    next.map(|next| (next - first).num_days() as u32).unwrap_or(31)
}

/// Column of the 1st of the month, Monday = 0.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|first| (first.weekday().num_days_from_sunday() + 6) % DAYS_IN_WEEK)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalendarLayout {
    config: LayoutConfig,
}

impl CalendarLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn month_width(&self) -> f64 {
        let c = &self.config;
        DAYS_IN_WEEK as f64 * c.cell_width + (DAYS_IN_WEEK - 1) as f64 * c.day_gap
    }

    pub fn month_height(&self) -> f64 {
        let c = &self.config;
        MAX_WEEKS as f64 * c.cell_height + (MAX_WEEKS - 1) as f64 * c.day_gap
    }

    /// Vertical distance between two consecutive year bands.
    pub fn year_row_height(&self) -> f64 {
        self.month_height() + self.config.year_gap
    }

    /// Top-left corner of a month block.
    pub fn month_origin(&self, year: i32, month: u32) -> (f64, f64) {
        let c = &self.config;
        let x = c.left_margin + month as f64 * (self.month_width() + c.month_gap);
        let y = c.top_margin + (year - c.epoch_year) as f64 * self.year_row_height();
        (x, y)
    }

    /// Full 7×6 block reserved for a month.
    pub fn month_rect(&self, year: i32, month: u32) -> WorldRect {
        let (x, y) = self.month_origin(year, month);
        WorldRect::new(x, y, self.month_width(), self.month_height())
    }

    pub fn cell_rect(&self, date: CalendarDate) -> WorldRect {
        let c = &self.config;
        let (origin_x, origin_y) = self.month_origin(date.year, date.month);
        let slot = date.day - 1 + first_weekday_offset(date.year, date.month);
        let week_index = slot / DAYS_IN_WEEK;
        let weekday_index = slot % DAYS_IN_WEEK;
        WorldRect::new(
            origin_x + weekday_index as f64 * (c.cell_width + c.day_gap),
            origin_y + week_index as f64 * (c.cell_height + c.day_gap),
            c.cell_width,
            c.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn weekday_offset_is_monday_first() {
        // 2009-01-01 was a Thursday, 2024-01-01 a Monday, 2023-01-01 a Sunday
        assert_eq!(first_weekday_offset(2009, 0), 3);
        assert_eq!(first_weekday_offset(2024, 0), 0);
        assert_eq!(first_weekday_offset(2023, 0), 6);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2009, 0), 31);
        assert_eq!(days_in_month(2012, 1), 29);
        assert_eq!(days_in_month(2013, 1), 28);
        assert_eq!(days_in_month(2013, 11), 31);
        assert_eq!(days_in_month(2013, 12), 0);
    }

    #[test]
    fn cell_positions_follow_weeks() {
        let layout = CalendarLayout::default();
        assert_eq!(layout.cell_rect(date(2009, 0, 1)), WorldRect::new(104.0, 50.0, 6.0, 6.0));
        assert_eq!(layout.cell_rect(date(2009, 0, 3)), WorldRect::new(120.0, 50.0, 6.0, 6.0));
        // Monday 2009-01-05 wraps to the second row
        assert_eq!(layout.cell_rect(date(2009, 0, 5)), WorldRect::new(80.0, 58.0, 6.0, 6.0));
    }

    #[test]
    fn months_and_years_are_spaced() {
        let layout = CalendarLayout::default();
        assert_eq!(layout.month_width(), 54.0);
        assert_eq!(layout.month_height(), 46.0);
        assert_eq!(layout.year_row_height(), 76.0);
        assert_eq!(layout.month_origin(2010, 2), (80.0 + 2.0 * 74.0, 126.0));
    }

    #[test]
    fn every_cell_stays_inside_its_month() {
        let layout = CalendarLayout::default();
        for year in 2009..2030 {
            for month in 0..MONTHS_IN_YEAR {
                let bounds = layout.month_rect(year, month);
                for day in 1..=days_in_month(year, month) {
                    let cell = layout.cell_rect(date(year, month, day));
                    assert!(cell.x >= bounds.x && cell.right() <= bounds.right());
                    assert!(cell.y >= bounds.y && cell.bottom() <= bounds.bottom());
                }
            }
        }
    }

    #[test]
    fn feed_dates_parse() {
        assert_eq!(CalendarDate::from_yyyymmdd(20090103), Some(date(2009, 0, 3)));
        assert_eq!(CalendarDate::from_yyyymmdd(20090230), None);
        assert_eq!(CalendarDate::from_yyyymmdd(20090003), None);
        assert_eq!(CalendarDate::from_unix_seconds(1_231_006_505), Some(date(2009, 0, 3)));
        assert_eq!(date(2009, 0, 3).label(), "2009-01-03");
    }
}
