// SPDX-License-Identifier: MIT

//! Condition trees as stored in job records
//!
//! Every enum is externally tagged in snake_case so the JSON matches what
//! the controller and resolver contracts store.

use super::value::{Decimal256, Int128, NumValue, Uint256, Uint64};
use crate::warp::variable::VariableRef;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A boolean condition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    Expr(Box<Expr>),
}

/// A typed comparison at the leaves of a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    String(GenExpr<StringValue, StringOp>),
    Uint(GenExpr<NumValue<Uint256>, NumOp>),
    Int(GenExpr<NumValue<Int128>, NumOp>),
    Decimal(GenExpr<NumValue<Decimal256>, NumOp>),
    Timestamp(TimeExpr),
    BlockHeight(BlockExpr),
    Bool(VariableRef),
    /// Any expression tag this SDK does not know; evaluates to false
    #[serde(untagged)]
    Unrecognized(UnrecognizedExpr),
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenExpr<V, Op> {
    pub left: V,
    pub op: Op,
    pub right: V,
}

/// Current block time compared against a fixed Unix timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeExpr {
    pub comparator: Uint64,
    pub op: TimeOp,
}

/// Current block height compared against a fixed height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockExpr {
    pub comparator: Uint64,
    pub op: NumOp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringValue {
    Simple(String),
    Ref(VariableRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringOp {
    StartsWith,
    EndsWith,
    Contains,
    Eq,
    Neq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Gte,
    Lte,
}

/// Timestamps only support strict comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOp {
    Lt,
    Gt,
}

const KNOWN_EXPR_TAGS: [&str; 7] = [
    "string",
    "uint",
    "int",
    "decimal",
    "timestamp",
    "block_height",
    "bool",
];

/// An expression object whose single key is not a known expression tag.
///
/// Known tags with a malformed payload do not land here; they fail to
/// deserialize.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedExpr {
    raw: Value,
}

impl UnrecognizedExpr {
    pub fn tag(&self) -> Option<&str> {
        self.raw
            .as_object()
            .and_then(|obj| obj.keys().next())
            .map(String::as_str)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl<'de> Deserialize<'de> for UnrecognizedExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let obj = Map::<String, Value>::deserialize(deserializer)?;
        if obj.len() != 1 {
            return Err(D::Error::custom(
                "expression must be an object with exactly one tag",
            ));
        }
        if let Some(tag) = obj.keys().find(|k| KNOWN_EXPR_TAGS.contains(&k.as_str())) {
            return Err(D::Error::custom(format!("malformed '{}' expression", tag)));
        }
        Ok(Self {
            raw: Value::Object(obj),
        })
    }
}

impl Serialize for UnrecognizedExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl fmt::Display for StringOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOp::StartsWith => write!(f, "starts_with"),
            StringOp::EndsWith => write!(f, "ends_with"),
            StringOp::Contains => write!(f, "contains"),
            StringOp::Eq => write!(f, "eq"),
            StringOp::Neq => write!(f, "neq"),
        }
    }
}

impl fmt::Display for NumOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumOp::Eq => write!(f, "=="),
            NumOp::Neq => write!(f, "!="),
            NumOp::Lt => write!(f, "<"),
            NumOp::Gt => write!(f, ">"),
            NumOp::Gte => write!(f, ">="),
            NumOp::Lte => write!(f, "<="),
        }
    }
}

impl From<TimeOp> for NumOp {
    fn from(op: TimeOp) -> Self {
        match op {
            TimeOp::Lt => NumOp::Lt,
            TimeOp::Gt => NumOp::Gt,
        }
    }
}
