// SPDX-License-Identifier: MIT

//! Typed error handling for warp-sdk
//!
//! Structural errors (unknown variables, numeric domain violations) are
//! fatal for a whole condition evaluation. External errors never leave the
//! external/query adapters; they degrade the variable to unresolved.

use thiserror::Error;

/// Top-level error type for warp-sdk
#[derive(Debug, Error)]
pub enum WarpError {
    /// Configuration errors (missing env vars, invalid config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Condition or variable resolution failed
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Chain (LCD) access failed
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// External HTTP call failed
    #[error("External call error: {0}")]
    External(#[from] ExternalError),

    /// Job does not exist on the controller contract
    #[error("Job '{id}' not found")]
    JobNotFound { id: String },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper for compatibility
    #[error("{0}")]
    Other(String),
}

/// Errors raised while evaluating a condition tree
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A variable reference names no declared variable
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },

    /// A reference string lacks the `$warp.variable.` prefix
    #[error("Invalid variable reference: {0}")]
    InvalidVariableRef(String),

    /// A `bool` expression could not obtain a value for its variable
    #[error("Variable '{name}' could not be resolved to a boolean")]
    UnresolvedBool { name: String },

    /// Function not available in the numeric domain of the expression
    #[error("Function '{op}' is not supported for {domain} values")]
    UnsupportedFunction { op: String, domain: &'static str },

    /// Arithmetic or literal parsing failure
    #[error(transparent)]
    NumericDomain(#[from] NumericDomainError),

    /// Block header lookup failed
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Numeric failures that must never become silent NaN/infinity
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericDomainError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Square root of negative value {0}")]
    NegativeSqrt(String),

    #[error("Invalid numeric literal '{0}'")]
    InvalidLiteral(String),

    #[error("Value {value} out of bounds for {domain}")]
    OutOfBounds { value: String, domain: &'static str },
}

/// Chain access errors
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("LCD returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid LCD response: {0}")]
    InvalidResponse(String),
}

/// Errors of the external HTTP adapter
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Invalid JSONPath selector {0}")]
    InvalidSelector(String),
}

impl WarpError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for WarpError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for WarpError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<NumericDomainError> for WarpError {
    fn from(err: NumericDomainError) -> Self {
        Self::Resolve(err.into())
    }
}
