// SPDX-License-Identifier: MIT

//! Job variables as declared by job authors

use super::reference::VariableRef;
use crate::warp::condition::value::{Decimal256, Int128, NumValue, Uint256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A named job variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Static(StaticVariable),
    External(ExternalVariable),
    Query(QueryVariable),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    String,
    Uint,
    Int,
    Decimal,
    Timestamp,
    Bool,
    Amount,
    Asset,
    Json,
}

/// Value fixed at creation, updated on-chain after each execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticVariable {
    pub kind: VariableKind,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_fn: Option<UpdateFn>,
}

/// Value fetched over HTTP and extracted with a JSONPath selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalVariable {
    pub kind: VariableKind,
    pub name: String,
    #[serde(default)]
    pub reinitialize: bool,
    pub init_fn: ExternalExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_fn: Option<UpdateFn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalExpr {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON document encoded as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub selector: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Value read from a smart contract query and extracted with a JSONPath selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryVariable {
    pub kind: VariableKind,
    pub name: String,
    #[serde(default)]
    pub reinitialize: bool,
    pub init_fn: QueryExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_fn: Option<UpdateFn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryExpr {
    /// A cosmwasm `QueryRequest`, passed through to the resolver's simulate_query
    pub query: Value,
    pub selector: String,
}

/// Post-execution update of a variable; applied by the on-chain resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateFn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<UpdateFnValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<UpdateFnValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateFnValue {
    Uint(NumValue<Uint256>),
    Int(NumValue<Int128>),
    Decimal(NumValue<Decimal256>),
    Timestamp(NumValue<Int128>),
    BlockHeight(NumValue<Int128>),
    Bool(VariableRef),
}

/// A pre-resolved external variable submitted with an execute transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalInput {
    pub name: String,
    pub input: String,
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Variable::Static(v) => &v.name,
            Variable::External(v) => &v.name,
            Variable::Query(v) => &v.name,
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Static(v) => v.kind,
            Variable::External(v) => v.kind,
            Variable::Query(v) => v.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_static_variable() {
        let var: Variable = serde_json::from_value(json!({
            "static": {
                "kind": "uint",
                "name": "next_execution",
                "value": "1000",
                "update_fn": {
                    "on_success": {"uint": {"expr": {
                        "left": {"simple": "1000"},
                        "op": "add",
                        "right": {"env": "time"}
                    }}}
                }
            }
        }))
        .unwrap();

        assert_eq!(var.name(), "next_execution");
        assert_eq!(var.kind(), VariableKind::Uint);
        let Variable::Static(stat) = var else {
            panic!("Expected static variable");
        };
        assert_eq!(stat.value, "1000");
        assert!(matches!(
            stat.update_fn.and_then(|f| f.on_success),
            Some(UpdateFnValue::Uint(NumValue::Expr(_)))
        ));
    }

    #[test]
    fn test_decode_external_variable_defaults() {
        let var: Variable = serde_json::from_value(json!({
            "external": {
                "kind": "decimal",
                "name": "btc_price",
                "init_fn": {
                    "url": "https://api.example.com/price",
                    "selector": "$.bitcoin.usd"
                }
            }
        }))
        .unwrap();

        let Variable::External(ext) = var else {
            panic!("Expected external variable");
        };
        assert!(!ext.reinitialize);
        assert_eq!(ext.init_fn.method.unwrap_or_default().as_str(), "GET");
        assert!(ext.init_fn.headers.is_none());
    }

    #[test]
    fn test_decode_query_variable() {
        let var: Variable = serde_json::from_value(json!({
            "query": {
                "kind": "amount",
                "name": "balance",
                "reinitialize": true,
                "init_fn": {
                    "query": {"bank": {"balance": {"address": "terra1xyz", "denom": "uluna"}}},
                    "selector": "$.amount.amount"
                }
            }
        }))
        .unwrap();

        assert_eq!(var.kind(), VariableKind::Amount);
        let Variable::Query(query) = var else {
            panic!("Expected query variable");
        };
        assert!(query.reinitialize);
        assert_eq!(query.init_fn.selector, "$.amount.amount");
    }

    #[test]
    fn test_method_wire_names() {
        let method: Method = serde_json::from_value(json!("patch")).unwrap();
        assert_eq!(method, Method::Patch);
        assert_eq!(method.as_str(), "PATCH");
    }
}
