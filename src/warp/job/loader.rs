// SPDX-License-Identifier: MIT

//! Job definition loader - YAML/JSON file loading and parsing

use super::types::JobDefinition;
use crate::sdk::error::WarpError;
use std::fs;
use std::path::Path;

/// Loads job definitions from YAML or JSON files
pub struct JobLoader;

impl JobLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a job definition; `.json` files are parsed as JSON, anything else as YAML
    pub fn load_job<P: AsRef<Path>>(&self, path: P) -> Result<JobDefinition, WarpError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    pub fn parse_yaml(content: &str) -> Result<JobDefinition, WarpError> {
        let def: JobDefinition = serde_yaml::from_str(content)?;
        Ok(def)
    }

    pub fn parse_json(content: &str) -> Result<JobDefinition, WarpError> {
        let def: JobDefinition = serde_json::from_str(content)?;
        Ok(def)
    }
}

impl Default for JobLoader {
    fn default() -> Self {
        Self::new()
    }
}
