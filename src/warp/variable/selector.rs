// SPDX-License-Identifier: MIT

//! JSONPath extraction for external and query variables

use crate::sdk::error::ExternalError;
use serde_json::Value;
use serde_json_path::JsonPath;

/// Apply `selector` and stringify the first match.
///
/// Strings come back verbatim, other scalars in their JSON form, objects and
/// arrays as compact JSON. No match, or a `null` match, yields `None`.
pub fn select_first(selector: &str, document: &Value) -> Result<Option<String>, ExternalError> {
    let path = JsonPath::parse(selector)
        .map_err(|e| ExternalError::InvalidSelector(format!("{}: {}", selector, e)))?;
    let nodes = path.query(document);

    let selected = match nodes.first() {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    };
    Ok(selected)
}
