// SPDX-License-Identifier: MIT

//! External (HTTP) variable resolution
//!
//! Failures are logged and the variable resolves to `None`; one flaky API
//! must not abort the evaluation of a whole job.

use super::selector::select_first;
use super::types::ExternalExpr;
use crate::sdk::error::ExternalError;
use crate::sdk::http::HttpRequest;
use crate::warp::resolver::Resolver;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;

/// Headers sent with every external call; identity encoding keeps the
/// response body plain text
static DEFAULT_HEADERS: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    BTreeMap::from([
        ("Accept".to_string(), "application/json".to_string()),
        ("Accept-Encoding".to_string(), "identity".to_string()),
    ])
});

impl Resolver {
    pub async fn resolve_external(&self, expr: &ExternalExpr) -> Option<String> {
        match self.fetch_external(expr).await {
            Ok(value) => {
                log::debug!("External {} {} -> {:?}", method_of(expr), expr.url, value);
                value
            }
            Err(e) => {
                log::warn!(
                    "External variable request {} {} failed: {}",
                    method_of(expr),
                    expr.url,
                    e
                );
                None
            }
        }
    }

    async fn fetch_external(&self, expr: &ExternalExpr) -> Result<Option<String>, ExternalError> {
        let request = build_request(expr)?;
        let body = self.http.request(request).await?;
        select_first(&expr.selector, &body)
    }
}

fn method_of(expr: &ExternalExpr) -> &'static str {
    expr.method.unwrap_or_default().as_str()
}

/// Turn an external variable's init function into an HTTP request
pub fn build_request(expr: &ExternalExpr) -> Result<HttpRequest, ExternalError> {
    let mut headers = DEFAULT_HEADERS.clone();
    if let Some(custom) = &expr.headers {
        for (name, value) in custom {
            headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
            headers.insert(name.clone(), value.clone());
        }
    }

    let body = expr
        .body
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()?;

    Ok(HttpRequest {
        method: method_of(expr).to_string(),
        url: expr.url.clone(),
        headers,
        body,
    })
}
