// SPDX-License-Identifier: MIT

//! High-level access to Warp jobs on chain

use crate::sdk::config::WarpConfig;
use crate::sdk::error::{ChainError, WarpError};
use crate::warp::condition::Condition;
use crate::warp::job::{codec, Job, JobResponse};
use crate::warp::resolver::Resolver;
use crate::warp::variable::{ExternalInput, Variable};
use serde_json::{json, Value};

/// Queries jobs from the controller and evaluates them off-chain
pub struct WarpClient {
    resolver: Resolver,
    controller_address: String,
    resolver_address: String,
}

impl WarpClient {
    pub fn new(
        resolver: Resolver,
        controller_address: impl Into<String>,
        resolver_address: impl Into<String>,
    ) -> Self {
        let resolver_address = resolver_address.into();
        Self {
            resolver: resolver.with_resolver_address(resolver_address.clone()),
            controller_address: controller_address.into(),
            resolver_address,
        }
    }

    pub fn from_config(config: &WarpConfig) -> Result<Self, WarpError> {
        let resolver = Resolver::from_config(config)?;
        Ok(Self::new(
            resolver,
            config.controller_address()?,
            config.resolver_address()?,
        ))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Fetch a job record from the controller
    pub async fn job(&self, id: u64) -> Result<Job, WarpError> {
        let msg = json!({ "query_job": { "id": id.to_string() } });
        let answer = self
            .resolver
            .chain()
            .query_contract(&self.controller_address, &msg)
            .await
            .map_err(|e| {
                log::debug!("query_job {} failed: {}", id, e);
                if is_not_found(&e) {
                    WarpError::JobNotFound { id: id.to_string() }
                } else {
                    WarpError::Chain(e)
                }
            })?;

        let response: JobResponse = serde_json::from_value(answer)?;
        Ok(response.job)
    }

    /// Whether a pending job's condition currently holds
    pub async fn is_job_active(&self, id: u64) -> Result<bool, WarpError> {
        let job = self.job(id).await?;
        if !job.is_pending() {
            log::info!("Job {} is {:?}, not pending", id, job.status);
            return Ok(false);
        }

        let condition = job.condition()?;
        let vars = job.vars()?;
        let active = self.resolver.resolve_condition(&condition, &vars).await?;
        log::info!("Job {} condition evaluated to {}", id, active);
        Ok(active)
    }

    /// External inputs to attach to an execute transaction for the job
    pub async fn external_inputs(&self, id: u64) -> Result<Vec<ExternalInput>, WarpError> {
        let job = self.job(id).await?;
        let vars = job.vars()?;
        Ok(self.resolver.resolve_external_inputs(&vars).await)
    }

    /// Ask the resolver contract for its own verdict on a condition
    pub async fn resolve_condition_on_chain(
        &self,
        condition: &Condition,
        vars: &[Variable],
    ) -> Result<bool, WarpError> {
        let msg = json!({
            "query_resolve_condition": {
                "condition": codec::encode(condition)?,
                "vars": codec::encode(vars)?,
            }
        });
        let answer = self
            .resolver
            .chain()
            .query_contract(&self.resolver_address, &msg)
            .await?;

        match answer {
            Value::Bool(b) => Ok(b),
            other => Err(WarpError::other(format!(
                "unexpected query_resolve_condition answer: {}",
                other
            ))),
        }
    }
}

/// A missing job surfaces as a 404, or as a failed contract query whose
/// message says "not found"; anything else is a chain problem
fn is_not_found(err: &ChainError) -> bool {
    match err {
        ChainError::Status { status: 404, .. } => true,
        ChainError::Status { body, .. } => body.to_ascii_lowercase().contains("not found"),
        _ => false,
    }
}
