use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    chain_data::{BlockRecord, DayRecord},
    errors::AppError,
    heatmap::CalendarDate,
    logging::{LogComponent, LogLevel, get_logger},
};
use crate::log_warn;

/// Row of the `/api/days` feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRecordDto {
    /// `YYYYMMDD`
    pub date: Option<u32>,
    pub num_transactions: Option<f64>,
    pub size: Option<f64>,
    pub minted_value: Option<f64>,
    pub output_value: Option<f64>,
    pub difficulty: Option<f64>,
    pub priceusd: Option<f64>,
}

/// Row of the `/api/blocks` feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecordDto {
    pub height: Option<u64>,
    pub timestamp: Option<i64>,
    pub num_transactions: Option<f64>,
    pub size: Option<f64>,
    pub minted_value: Option<f64>,
    pub output_value: Option<f64>,
    pub difficulty: Option<f64>,
}

/// Envelope of the `/api/days` feed. Rows stay untyped until conversion so a
/// single bad row cannot fail the whole feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DaysResponse {
    pub days: Vec<Value>,
}

impl DaysResponse {
    pub fn into_records(self) -> Vec<DayRecord> {
        into_records::<DayRecordDto, DayRecord>(self.days, "day")
    }
}

/// Envelope of the `/api/blocks` feed
#[derive(Debug, Clone, Deserialize)]
pub struct BlocksResponse {
    pub blocks: Vec<Value>,
}

impl BlocksResponse {
    pub fn into_records(self) -> Vec<BlockRecord> {
        into_records::<BlockRecordDto, BlockRecord>(self.blocks, "block")
    }
}

fn required<T>(name: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::DataError(format!("{} missing", name)))
}

fn count(name: &str, value: Option<f64>) -> Result<u64, AppError> {
    match required(name, value)? {
        v if v.is_finite() && v >= 0.0 => Ok(v.round() as u64),
        v => Err(AppError::DataError(format!("{} out of range: {}", name, v))),
    }
}

fn optional_non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

impl TryFrom<DayRecordDto> for DayRecord {
    type Error = AppError;

    fn try_from(dto: DayRecordDto) -> Result<Self, Self::Error> {
        let raw = required("date", dto.date)?;
        let date = CalendarDate::from_yyyymmdd(raw).ok_or_else(|| AppError::DataError(format!("invalid date {}", raw)))?;
        Ok(DayRecord {
            date,
            transaction_count: count("num_transactions", dto.num_transactions)?,
            byte_size: count("size", dto.size)?,
            minted_value: count("minted_value", dto.minted_value)?,
            output_value: count("output_value", dto.output_value)?,
            difficulty: dto.difficulty.unwrap_or(0.0),
            price_usd: optional_non_negative(dto.priceusd),
        })
    }
}

impl TryFrom<BlockRecordDto> for BlockRecord {
    type Error = AppError;

    fn try_from(dto: BlockRecordDto) -> Result<Self, Self::Error> {
        Ok(BlockRecord {
            height: required("height", dto.height)?,
            timestamp: required("timestamp", dto.timestamp)?,
            transaction_count: count("num_transactions", dto.num_transactions)?,
            byte_size: count("size", dto.size)?,
            minted_value: count("minted_value", dto.minted_value)?,
            output_value: count("output_value", dto.output_value)?,
            difficulty: dto.difficulty.unwrap_or(0.0),
        })
    }
}

fn convert_row<D, R>(row: Value) -> Result<R, AppError>
where
    D: DeserializeOwned,
    R: TryFrom<D, Error = AppError>,
{
    let dto: D = serde_json::from_value(row).map_err(|e| AppError::DataError(e.to_string()))?;
    R::try_from(dto)
}

/// Convert feed rows, dropping malformed ones. Dropped rows render as absent.
pub fn into_records<D, R>(rows: Vec<Value>, feed: &'static str) -> Vec<R>
where
    D: DeserializeOwned,
    R: TryFrom<D, Error = AppError>,
{
    let total = rows.len();
    let records: Vec<R> = rows
        .into_iter()
        .filter_map(|row| match convert_row::<D, R>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                log_warn!(LogComponent::Infrastructure("ChainData"), "skipping {} row: {}", feed, e);
                None
            }
        })
        .collect();
    if records.len() < total {
        get_logger().log_with_metadata(
            LogLevel::Warn,
            LogComponent::Infrastructure("ChainData"),
            &format!("{} feed had malformed rows", feed),
            &format!("skipped={} total={}", total - records.len(), total),
        );
    }
    records
}
