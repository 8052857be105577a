//! Date-indexed, read-only view over the loaded day and block feeds.

use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::entities::{BlockRecord, DayRecord};
use crate::domain::heatmap::{
    CalendarDate, ColorField, ColorScaleKind,
    calendar::days_in_month,
};
use crate::domain::logging::LogComponent;
use crate::{log_info, log_warn};

/// `[min, max]` of one metric over the loaded range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDomain {
    pub min: f64,
    pub max: f64,
}

impl MetricDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Log scales are only defined for strictly positive domains.
    pub fn supports(&self, kind: ColorScaleKind) -> bool {
        !kind.is_logarithmic() || self.min > 0.0
    }

    fn merge(self, other: MetricDomain) -> MetricDomain {
        MetricDomain::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// One optional domain per [`ColorField`]; `None` when no record has the metric.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricDomains {
    transaction_count: Option<MetricDomain>,
    byte_size: Option<MetricDomain>,
    minted_value: Option<MetricDomain>,
    output_value: Option<MetricDomain>,
    price_usd: Option<MetricDomain>,
}

impl MetricDomains {
    pub fn get(&self, field: ColorField) -> Option<MetricDomain> {
        match field {
            ColorField::TransactionCount => self.transaction_count,
            ColorField::ByteSize => self.byte_size,
            ColorField::MintedValue => self.minted_value,
            ColorField::OutputValue => self.output_value,
            ColorField::PriceUsd => self.price_usd,
        }
    }

    fn set(&mut self, field: ColorField, domain: Option<MetricDomain>) {
        let slot = match field {
            ColorField::TransactionCount => &mut self.transaction_count,
            ColorField::ByteSize => &mut self.byte_size,
            ColorField::MintedValue => &mut self.minted_value,
            ColorField::OutputValue => &mut self.output_value,
            ColorField::PriceUsd => &mut self.price_usd,
        };
        *slot = domain;
    }

    /// Scan `records` once per metric.
    pub fn compute<T, F>(records: &[T], metric: F) -> Self
    where
        T: Sync,
        F: Fn(&T, ColorField) -> Option<f64> + Sync,
    {
        use strum::IntoEnumIterator;

        let mut domains = MetricDomains::default();
        for field in ColorField::iter() {
            domains.set(field, domain_of(records, |r| metric(r, field)));
        }
        domains
    }
}

#[cfg(not(feature = "parallel"))]
fn domain_of<T, F>(records: &[T], metric: F) -> Option<MetricDomain>
where
    F: Fn(&T) -> Option<f64>,
{
    records
        .iter()
        .filter_map(metric)
        .filter(|v| v.is_finite())
        .map(|v| MetricDomain::new(v, v))
        .reduce(MetricDomain::merge)
}

#[cfg(feature = "parallel")]
fn domain_of<T, F>(records: &[T], metric: F) -> Option<MetricDomain>
where
    T: Sync,
    F: Fn(&T) -> Option<f64> + Sync + Send,
{
    records
        .par_iter()
        .filter_map(metric)
        .filter(|v| v.is_finite())
        .map(|v| MetricDomain::new(v, v))
        .reduce_with(MetricDomain::merge)
}

/// Loaded chain data reshaped for the calendar renderer.
///
/// Each `(year, month)` holds exactly one slot per calendar day. A slot is
/// `None` when no record exists for that day, which is distinct from a
/// record whose metrics are zero. Days before the first recorded day are
/// never filled, so they render as "no data" without any special casing.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    months: BTreeMap<(i32, u32), Vec<Option<DayRecord>>>,
    blocks: HashMap<CalendarDate, Vec<BlockRecord>>,
    day_domains: MetricDomains,
    first_day: Option<CalendarDate>,
    min_year: Option<i32>,
    day_count: usize,
    block_count: usize,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Reshape flat feeds. Blocks keep their feed order within a day.
    pub fn from_records(days: Vec<DayRecord>, blocks: Vec<BlockRecord>) -> Self {
        let day_domains = MetricDomains::compute(&days, |d: &DayRecord, f| d.metric(f));

        let mut months: BTreeMap<(i32, u32), Vec<Option<DayRecord>>> = BTreeMap::new();
        let mut day_count = 0;
        for record in days {
            let date = record.date;
            let slots = months
                .entry((date.year, date.month))
                .or_insert_with(|| vec![None; days_in_month(date.year, date.month) as usize]);
            let slot = &mut slots[(date.day - 1) as usize];
            if slot.is_some() {
                log_warn!(LogComponent::Domain("Dataset"), "duplicate day record for {}, keeping the later one", date.label());
            } else {
                day_count += 1;
            }
            *slot = Some(record);
        }

        let mut grouped: HashMap<CalendarDate, Vec<BlockRecord>> = HashMap::new();
        let mut block_count = 0;
        for block in blocks {
            match block.date() {
                Some(date) => {
                    grouped.entry(date).or_default().push(block);
                    block_count += 1;
                }
                None => {
                    log_warn!(LogComponent::Domain("Dataset"), "block {} has an unrepresentable timestamp {}", block.height, block.timestamp);
                }
            }
        }

        let first_day = months
            .iter()
            .flat_map(|(_, slots)| slots.iter().flatten())
            .map(|record| record.date)
            .next();
        let min_year = months.keys().map(|(year, _)| *year).chain(grouped.keys().map(|d| d.year)).min();

        log_info!(
            LogComponent::Domain("Dataset"),
            "reshaped {} days over {} months and {} blocks over {} days",
            day_count,
            months.len(),
            block_count,
            grouped.len()
        );

        Self { months, blocks: grouped, day_domains, first_day, min_year, day_count, block_count }
    }

    /// Dense per-day slots of a month, `None` when the month has no records at all.
    pub fn month(&self, year: i32, month: u32) -> Option<&[Option<DayRecord>]> {
        self.months.get(&(year, month)).map(Vec::as_slice)
    }

    pub fn day(&self, date: CalendarDate) -> Option<&DayRecord> {
        self.month(date.year, date.month)?.get((date.day - 1) as usize)?.as_ref()
    }

    /// Blocks of a day in feed order; empty when none were recorded.
    pub fn blocks_for(&self, date: CalendarDate) -> &[BlockRecord] {
        self.blocks.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Domain for both day cells and block sub-cells of `field`.
    pub fn day_domain(&self, field: ColorField) -> Option<MetricDomain> {
        self.day_domains.get(field)
    }

    pub fn first_recorded_day(&self) -> Option<CalendarDate> {
        self.first_day
    }

    pub fn min_year(&self) -> Option<i32> {
        self.min_year
    }

    pub fn day_count(&self) -> usize {
        self.day_count
    }

    pub fn block_count(&self) -> usize {
        self.block_count
    }

    pub fn is_empty(&self) -> bool {
        self.day_count == 0 && self.block_count == 0
    }
}
