// SPDX-License-Identifier: MIT

//! Query variable resolution through the resolver's `simulate_query`

use super::selector::select_first;
use super::types::QueryExpr;
use crate::sdk::error::WarpError;
use crate::warp::resolver::Resolver;
use serde_json::{json, Value};

impl Resolver {
    /// Run the variable's query via the resolver contract and extract the
    /// selected value. Failures are logged and yield `None`.
    pub async fn resolve_query(&self, expr: &QueryExpr) -> Option<String> {
        match self.fetch_query(expr).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Query variable '{}' failed: {}", expr.selector, e);
                None
            }
        }
    }

    async fn fetch_query(&self, expr: &QueryExpr) -> Result<Option<String>, WarpError> {
        let resolver_address = self
            .resolver_address
            .as_deref()
            .ok_or_else(|| WarpError::config("resolver_address is required for query variables"))?;

        let msg = json!({ "simulate_query": { "query": expr.query } });
        let answer = self.chain.query_contract(resolver_address, &msg).await?;

        // The resolver answers {"response": "<json string>"}
        let response = answer
            .get("response")
            .and_then(Value::as_str)
            .ok_or_else(|| WarpError::other("simulate_query answer has no response"))?;
        let document: Value = serde_json::from_str(response)?;

        log::debug!("simulate_query -> {}", document);
        Ok(select_first(&expr.selector, &document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warp::testing::{MockChain, MockHttp};
    use std::sync::Arc;

    fn balance_query() -> QueryExpr {
        QueryExpr {
            query: json!({"bank": {"balance": {"address": "terra1xyz", "denom": "uluna"}}}),
            selector: "$.amount.amount".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolve_query() {
        let chain = Arc::new(MockChain::new(0, 0).with_query_response(json!({
            "response": "{\"amount\":{\"denom\":\"uluna\",\"amount\":\"1500\"}}"
        })));
        let resolver = Resolver::new(chain.clone(), Arc::new(MockHttp::failing()))
            .with_resolver_address("terra1resolver");

        assert_eq!(
            resolver.resolve_query(&balance_query()).await,
            Some("1500".to_string())
        );

        let (contract, msg) = chain.last_query().unwrap();
        assert_eq!(contract, "terra1resolver");
        assert_eq!(
            msg,
            json!({"simulate_query": {"query": {"bank": {"balance": {"address": "terra1xyz", "denom": "uluna"}}}}})
        );
    }

    #[tokio::test]
    async fn test_query_without_resolver_address_is_none() {
        let chain = Arc::new(MockChain::new(0, 0));
        let resolver = Resolver::new(chain.clone(), Arc::new(MockHttp::failing()));
        assert_eq!(resolver.resolve_query(&balance_query()).await, None);
        assert!(chain.last_query().is_none());
    }

    #[tokio::test]
    async fn test_query_failure_is_none() {
        let resolver = Resolver::new(Arc::new(MockChain::new(0, 0)), Arc::new(MockHttp::failing()))
            .with_resolver_address("terra1resolver");
        assert_eq!(resolver.resolve_query(&balance_query()).await, None);
    }
}
