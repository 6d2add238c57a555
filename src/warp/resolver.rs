// SPDX-License-Identifier: MIT

//! Evaluation context shared by the condition and variable resolvers

use crate::sdk::chain::{ChainClient, LcdClient};
use crate::sdk::config::WarpConfig;
use crate::sdk::error::WarpError;
use crate::sdk::http::{HttpClient, ReqwestHttpClient};
use std::sync::Arc;

/// Resolves conditions and variables against live chain and HTTP state.
///
/// Holds no mutable state; one instance can evaluate many jobs concurrently.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) chain: Arc<dyn ChainClient>,
    pub(crate) http: Arc<dyn HttpClient>,
    pub(crate) resolver_address: Option<String>,
}

impl Resolver {
    pub fn new(chain: Arc<dyn ChainClient>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            chain,
            http,
            resolver_address: None,
        }
    }

    /// Resolver contract used to run `simulate_query` for query variables
    pub fn with_resolver_address(mut self, address: impl Into<String>) -> Self {
        self.resolver_address = Some(address.into());
        self
    }

    /// Build a resolver talking to the LCD and network described by `config`
    pub fn from_config(config: &WarpConfig) -> Result<Self, WarpError> {
        let chain: Arc<dyn ChainClient> = Arc::new(LcdClient::from_config(config)?);
        let mut resolver = Self::new(chain, Arc::new(ReqwestHttpClient::new()));
        resolver.resolver_address = config.resolver_address.clone();
        Ok(resolver)
    }

    pub fn chain(&self) -> &Arc<dyn ChainClient> {
        &self.chain
    }
}
