use serde::{Deserialize, Serialize};

use crate::domain::heatmap::{CalendarDate, ColorField};

/// Per-day aggregate over all blocks mined that day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: CalendarDate,
    pub transaction_count: u64,
    pub byte_size: u64,
    pub minted_value: u64,
    pub output_value: u64,
    pub difficulty: f64,
    pub price_usd: Option<f64>,
}

impl DayRecord {
    /// Value of the selected metric, `None` when the day has no such value.
    pub fn metric(&self, field: ColorField) -> Option<f64> {
        match field {
            ColorField::TransactionCount => Some(self.transaction_count as f64),
            ColorField::ByteSize => Some(self.byte_size as f64),
            ColorField::MintedValue => Some(self.minted_value as f64),
            ColorField::OutputValue => Some(self.output_value as f64),
            ColorField::PriceUsd => self.price_usd,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub height: u64,
    /// Unix seconds
    pub timestamp: i64,
    pub transaction_count: u64,
    pub byte_size: u64,
    pub minted_value: u64,
    pub output_value: u64,
    pub difficulty: f64,
}

impl BlockRecord {
    pub fn date(&self) -> Option<CalendarDate> {
        CalendarDate::from_unix_seconds(self.timestamp)
    }

    /// Blocks carry no price; price-colored sub-cells use the day's value.
    pub fn metric(&self, field: ColorField) -> Option<f64> {
        match field {
            ColorField::TransactionCount => Some(self.transaction_count as f64),
            ColorField::ByteSize => Some(self.byte_size as f64),
            ColorField::MintedValue => Some(self.minted_value as f64),
            ColorField::OutputValue => Some(self.output_value as f64),
            ColorField::PriceUsd => None,
        }
    }
}
