// SPDX-License-Identifier: MIT

//! Outbound HTTP for external variables

use super::error::ExternalError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::BTreeMap;

/// A fully prepared outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Upper-case HTTP method
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request and decode the response body as JSON
    async fn request(&self, request: HttpRequest) -> Result<Value, ExternalError>;
}

pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn request(&self, request: HttpRequest) -> Result<Value, ExternalError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ExternalError::InvalidMethod(request.method.clone()))?;

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ExternalError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ExternalError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(method, &request.url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExternalError::Status {
                url: request.url,
                status: status.as_u16(),
            });
        }

        Ok(resp.json().await?)
    }
}
