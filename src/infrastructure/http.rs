pub mod dto;

use gloo::net::http::Request;
use serde::de::DeserializeOwned;

use self::dto::{BlocksResponse, DaysResponse};
use crate::domain::{
    chain_data::{BlockRecord, Dataset, DayRecord},
    errors::{AppError, NetworkResult},
    logging::{LogComponent, get_logger},
};

/// Client for the two read-only chain data endpoints
#[derive(Clone, Debug)]
pub struct ChainDataClient {
    base_url: String,
}

impl ChainDataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> NetworkResult<T> {
        let url = format!("{}{}", self.base_url, path);
        get_logger().debug(LogComponent::Infrastructure("ChainDataClient"), &format!("GET {}", url));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to send request: {:?}", e)))?;

        if !response.ok() {
            return Err(AppError::NetworkError(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to parse JSON from {}: {:?}", path, e)))
    }

    pub async fn fetch_days(&self) -> NetworkResult<Vec<DayRecord>> {
        let response: DaysResponse = self.get_json("/api/days").await?;
        Ok(response.into_records())
    }

    pub async fn fetch_blocks(&self) -> NetworkResult<Vec<BlockRecord>> {
        let response: BlocksResponse = self.get_json("/api/blocks").await?;
        Ok(response.into_records())
    }

    /// Fetch both feeds concurrently. Missing days are fatal; missing blocks
    /// only cost the per-block detail.
    pub async fn load_dataset(&self) -> NetworkResult<Dataset> {
        let (days, blocks) = futures::join!(self.fetch_days(), self.fetch_blocks());
        let days = days?;
        let blocks = blocks.unwrap_or_else(|e| {
            get_logger().warn(
                LogComponent::Infrastructure("ChainDataClient"),
                &format!("Blocks unavailable, rendering day aggregates only: {}", e),
            );
            Vec::new()
        });

        get_logger().info(
            LogComponent::Infrastructure("ChainDataClient"),
            &format!("Loaded {} days and {} blocks", days.len(), blocks.len()),
        );
        Ok(Dataset::from_records(days, blocks))
    }
}

/// Build a dataset from feed bodies already in hand (same shapes as the endpoints).
pub fn dataset_from_json(days_json: &str, blocks_json: Option<&str>) -> Result<Dataset, AppError> {
    let days: DaysResponse =
        serde_json::from_str(days_json).map_err(|e| AppError::DataError(format!("invalid days feed: {}", e)))?;
    let blocks = match blocks_json {
        Some(json) => {
            let blocks: BlocksResponse =
                serde_json::from_str(json).map_err(|e| AppError::DataError(format!("invalid blocks feed: {}", e)))?;
            blocks.into_records()
        }
        None => Vec::new(),
    };
    Ok(Dataset::from_records(days.into_records(), blocks))
}
