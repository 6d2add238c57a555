// SPDX-License-Identifier: MIT

//! Encoding of the JSON-in-a-string fields of job records
//!
//! Conditions, variables and messages travel as JSON documents stored in
//! string fields. These helpers are the only place that double encoding
//! happens; everything past them works on decoded structures.

use crate::sdk::error::WarpError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, WarpError> {
    Ok(serde_json::to_string(value)?)
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, WarpError> {
    Ok(serde_json::from_str(raw)?)
}
