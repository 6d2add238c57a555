// SPDX-License-Identifier: MIT

//! Typed variable references
//!
//! On the wire a reference is the string `$warp.variable.<name>`. In memory
//! it is a [`VariableRef`] holding only the name; the prefix is parsed on
//! read and written back on serialization.

use crate::sdk::error::ResolveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const VARIABLE_REF_PREFIX: &str = "$warp.variable.";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariableRef {
    name: String,
}

impl VariableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for VariableRef {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(VARIABLE_REF_PREFIX) {
            Some(name) if !name.is_empty() => Ok(Self::new(name)),
            _ => Err(ResolveError::InvalidVariableRef(s.to_string())),
        }
    }
}

impl TryFrom<String> for VariableRef {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VariableRef> for String {
    fn from(reference: VariableRef) -> Self {
        reference.to_string()
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", VARIABLE_REF_PREFIX, self.name)
    }
}
