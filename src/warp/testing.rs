// SPDX-License-Identifier: MIT

//! Mock collaborators for unit tests

use crate::sdk::chain::{BlockHeader, ChainClient};
use crate::sdk::error::{ChainError, ExternalError};
use crate::sdk::http::{HttpClient, HttpRequest};
use crate::warp::variable::{
    ExternalExpr, ExternalVariable, StaticVariable, Variable, VariableKind,
};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Chain with a fixed latest block and an optional canned query answer
pub struct MockChain {
    block_time: i64,
    height: u64,
    query_response: Option<Value>,
    query_status: Option<(u16, String)>,
    last_query: Mutex<Option<(String, Value)>>,
}

impl MockChain {
    pub fn new(block_time: i64, height: u64) -> Self {
        Self {
            block_time,
            height,
            query_response: None,
            query_status: None,
            last_query: Mutex::new(None),
        }
    }

    pub fn with_query_response(mut self, response: Value) -> Self {
        self.query_response = Some(response);
        self
    }

    /// Fail every contract query with this LCD status and body
    pub fn with_query_status(mut self, status: u16, body: &str) -> Self {
        self.query_status = Some((status, body.to_string()));
        self
    }

    pub fn last_query(&self) -> Option<(String, Value)> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn latest_block_header(&self) -> Result<BlockHeader, ChainError> {
        let time = DateTime::from_timestamp(self.block_time, 0)
            .ok_or_else(|| ChainError::InvalidResponse("bad mock time".to_string()))?;
        Ok(BlockHeader {
            height: self.height,
            time,
        })
    }

    async fn query_contract(&self, contract: &str, msg: &Value) -> Result<Value, ChainError> {
        *self.last_query.lock().unwrap() = Some((contract.to_string(), msg.clone()));
        if let Some((status, body)) = &self.query_status {
            return Err(ChainError::Status {
                status: *status,
                body: body.clone(),
            });
        }
        self.query_response
            .clone()
            .ok_or_else(|| ChainError::InvalidResponse("no mock query response".to_string()))
    }
}

/// HTTP client answering every request with the same body, or failing
pub struct MockHttp {
    response: Option<Value>,
    calls: AtomicUsize,
    last_request: Mutex<Option<HttpRequest>>,
}

impl MockHttp {
    pub fn with_response(response: Value) -> Self {
        Self {
            response: Some(response),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn request(&self, request: HttpRequest) -> Result<Value, ExternalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = request.url.clone();
        *self.last_request.lock().unwrap() = Some(request);
        self.response
            .clone()
            .ok_or(ExternalError::Status { url, status: 503 })
    }
}

pub fn static_var(name: &str, value: &str) -> Variable {
    Variable::Static(StaticVariable {
        kind: VariableKind::String,
        name: name.to_string(),
        value: value.to_string(),
        update_fn: None,
    })
}

pub fn external_var(name: &str, url: &str, selector: &str) -> Variable {
    Variable::External(ExternalVariable {
        kind: VariableKind::Decimal,
        name: name.to_string(),
        reinitialize: false,
        init_fn: ExternalExpr {
            url: url.to_string(),
            method: None,
            headers: None,
            body: None,
            selector: selector.to_string(),
        },
        update_fn: None,
    })
}
