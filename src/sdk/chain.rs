// SPDX-License-Identifier: MIT

//! Chain access - block headers and smart contract queries
//!
//! The evaluator only needs two reads from the chain. They are behind the
//! [`ChainClient`] trait so tests and alternative transports can stand in
//! for the LCD implementation.

use super::config::WarpConfig;
use super::error::ChainError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// The fields of the latest block header the evaluator uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    pub time: DateTime<Utc>,
}

impl BlockHeader {
    /// Block time as whole Unix seconds (sub-second part truncated)
    pub fn unix_seconds(&self) -> i64 {
        self.time.timestamp()
    }
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the header of the latest committed block
    async fn latest_block_header(&self) -> Result<BlockHeader, ChainError>;

    /// Run a smart query against a contract and return its JSON answer
    async fn query_contract(&self, contract: &str, msg: &Value) -> Result<Value, ChainError>;
}

/// [`ChainClient`] backed by a Cosmos SDK LCD endpoint
pub struct LcdClient {
    client: Client,
    base_url: Url,
    chain_id: String,
}

impl LcdClient {
    pub fn new(lcd_url: &str, chain_id: impl Into<String>) -> Result<Self, ChainError> {
        let base_url = Url::parse(lcd_url)
            .map_err(|e| ChainError::InvalidResponse(format!("invalid LCD url: {}", e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
            chain_id: chain_id.into(),
        })
    }

    pub fn from_config(config: &WarpConfig) -> Result<Self, ChainError> {
        Self::new(&config.lcd_url, config.chain_id.clone())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ChainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChainError::InvalidResponse("LCD url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ChainError> {
        log::debug!("LCD GET {}", url);
        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChainError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl ChainClient for LcdClient {
    async fn latest_block_header(&self) -> Result<BlockHeader, ChainError> {
        let url = self.endpoint(&[
            "cosmos", "base", "tendermint", "v1beta1", "blocks", "latest",
        ])?;
        let body = self.get_json(url).await?;
        let header = parse_block_header(&body)?;

        if let Some(chain_id) = body
            .pointer("/block/header/chain_id")
            .and_then(Value::as_str)
        {
            if chain_id != self.chain_id {
                return Err(ChainError::InvalidResponse(format!(
                    "LCD serves chain '{}', expected '{}'",
                    chain_id, self.chain_id
                )));
            }
        }

        Ok(header)
    }

    async fn query_contract(&self, contract: &str, msg: &Value) -> Result<Value, ChainError> {
        let encoded = STANDARD.encode(serde_json::to_vec(msg).map_err(|e| {
            ChainError::InvalidResponse(format!("cannot encode query message: {}", e))
        })?);
        let url = self.endpoint(&["cosmwasm", "wasm", "v1", "contract", contract, "smart", &encoded])?;
        let mut body = self.get_json(url).await?;

        body.get_mut("data")
            .map(Value::take)
            .ok_or_else(|| ChainError::InvalidResponse("missing data in smart query".to_string()))
    }
}

/// Extract height and time from a `blocks/latest` response
pub fn parse_block_header(body: &Value) -> Result<BlockHeader, ChainError> {
    let header = body
        .pointer("/block/header")
        .or_else(|| body.pointer("/sdk_block/header"))
        .ok_or_else(|| ChainError::InvalidResponse("missing block.header".to_string()))?;

    let height = match header.get("height") {
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    }
    .ok_or_else(|| ChainError::InvalidResponse("invalid block height".to_string()))?;

    let time = header
        .get("time")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainError::InvalidResponse("missing block time".to_string()))?;
    let time = DateTime::parse_from_rfc3339(time)
        .map_err(|e| ChainError::InvalidResponse(format!("invalid block time '{}': {}", time, e)))?
        .with_timezone(&Utc);

    Ok(BlockHeader { height, time })
}
