// SPDX-License-Identifier: MIT

//! SDK configuration
//!
//! Values come from the environment (after `.env` is loaded by the binary)
//! or from a YAML file with the same field names.

use super::error::WarpError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Connection settings for a Warp deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarpConfig {
    /// Base URL of the chain's LCD (REST) endpoint
    pub lcd_url: String,
    pub chain_id: String,
    /// Warp controller contract (job storage)
    #[serde(default)]
    pub controller_address: Option<String>,
    /// Warp resolver contract (simulate_query and on-chain condition checks)
    #[serde(default)]
    pub resolver_address: Option<String>,
}

impl WarpConfig {
    /// Build the config from `WARP_*` environment variables
    pub fn from_env() -> Result<Self, WarpError> {
        let lcd_url =
            env::var("WARP_LCD_URL").map_err(|_| WarpError::config("WARP_LCD_URL must be set"))?;
        let chain_id = env::var("WARP_CHAIN_ID")
            .map_err(|_| WarpError::config("WARP_CHAIN_ID must be set"))?;

        Ok(Self {
            lcd_url,
            chain_id,
            controller_address: env::var("WARP_CONTROLLER_ADDRESS").ok(),
            resolver_address: env::var("WARP_RESOLVER_ADDRESS").ok(),
        })
    }

    /// Load the config from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WarpError> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    pub fn parse_yaml(content: &str) -> Result<Self, WarpError> {
        let config: WarpConfig = serde_yaml::from_str(content)?;
        if config.lcd_url.trim().is_empty() {
            return Err(WarpError::config("lcd_url must not be empty"));
        }
        Ok(config)
    }

    pub fn controller_address(&self) -> Result<&str, WarpError> {
        self.controller_address
            .as_deref()
            .ok_or_else(|| WarpError::config("controller_address is not configured"))
    }

    pub fn resolver_address(&self) -> Result<&str, WarpError> {
        self.resolver_address
            .as_deref()
            .ok_or_else(|| WarpError::config("resolver_address is not configured"))
    }
}
