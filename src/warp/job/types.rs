// SPDX-License-Identifier: MIT

//! Job records and job definitions

use super::codec::{decode, encode};
use crate::sdk::error::WarpError;
use crate::warp::condition::{Condition, Uint64};
use crate::warp::variable::Variable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Executed,
    Failed,
    Cancelled,
    Evicted,
}

/// A job as stored by the controller contract.
///
/// `condition`, `terminate_condition`, `msgs` and `vars` are JSON documents
/// encoded as strings; use the accessors to decode them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uint64,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub status: JobStatus,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminate_condition: Option<String>,
    pub msgs: String,
    pub vars: String,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub requeue_on_evict: bool,
    #[serde(default)]
    pub reward: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_time: Option<Uint64>,
}

impl Job {
    pub fn condition(&self) -> Result<Condition, WarpError> {
        decode(&self.condition)
    }

    pub fn terminate_condition(&self) -> Result<Option<Condition>, WarpError> {
        self.terminate_condition
            .as_deref()
            .map(decode)
            .transpose()
    }

    pub fn vars(&self) -> Result<Vec<Variable>, WarpError> {
        decode(&self.vars)
    }

    pub fn msgs(&self) -> Result<Vec<Value>, WarpError> {
        decode(&self.msgs)
    }

    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Pending
    }
}

/// Answer of the controller's `query_job`
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    pub job: Job,
}

/// A job as authored locally, with every field already decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminate_condition: Option<Condition>,
    #[serde(default)]
    pub msgs: Vec<Value>,
    #[serde(default)]
    pub vars: Vec<Variable>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub requeue_on_evict: bool,
    #[serde(default)]
    pub reward: String,
}

/// Payload of the controller's `create_job` execute message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJobMsg {
    pub name: String,
    pub description: String,
    pub labels: Vec<String>,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_condition: Option<String>,
    pub msgs: String,
    pub vars: String,
    pub recurring: bool,
    pub requeue_on_evict: bool,
    pub reward: String,
}

impl JobDefinition {
    /// Encode into the string-field wire form expected by the controller
    pub fn to_create_job_msg(&self) -> Result<CreateJobMsg, WarpError> {
        Ok(CreateJobMsg {
            name: self.name.clone(),
            description: self.description.clone(),
            labels: self.labels.clone(),
            condition: encode(&self.condition)?,
            terminate_condition: self
                .terminate_condition
                .as_ref()
                .map(encode)
                .transpose()?,
            msgs: encode(&self.msgs)?,
            vars: encode(&self.vars)?,
            recurring: self.recurring,
            requeue_on_evict: self.requeue_on_evict,
            reward: self.reward.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warp::condition::Expr;
    use serde_json::json;

    fn job_json() -> Value {
        json!({
            "id": "17",
            "owner": "terra1owner",
            "name": "daily-swap",
            "status": "pending",
            "condition": "{\"expr\":{\"timestamp\":{\"comparator\":\"1700000000\",\"op\":\"gt\"}}}",
            "msgs": "[{\"wasm\":{\"execute\":{\"contract_addr\":\"terra1pool\",\"msg\":\"e30=\",\"funds\":[]}}}]",
            "vars": "[{\"static\":{\"kind\":\"uint\",\"name\":\"n\",\"value\":\"3\"}}]",
            "recurring": true,
            "reward": "1000",
            "assets_to_withdraw": []
        })
    }

    #[test]
    fn test_decode_job_record() {
        let job: Job = serde_json::from_value(job_json()).unwrap();
        assert_eq!(job.id, Uint64(17));
        assert!(job.is_pending());
        assert!(matches!(
            job.condition().unwrap(),
            Condition::Expr(e) if matches!(*e, Expr::Timestamp(_))
        ));
        assert_eq!(job.vars().unwrap()[0].name(), "n");
        assert_eq!(job.msgs().unwrap().len(), 1);
        assert_eq!(job.terminate_condition().unwrap(), None);
    }

    #[test]
    fn test_invalid_embedded_condition() {
        let mut raw = job_json();
        raw["condition"] = json!("{\"expr\":");
        let job: Job = serde_json::from_value(raw).unwrap();
        assert!(job.condition().is_err());
    }

    #[test]
    fn test_definition_to_create_job_msg() {
        let def: JobDefinition = serde_json::from_value(json!({
            "name": "limit-order",
            "condition": {"expr": {"bool": "$warp.variable.ready"}},
            "vars": [{"static": {"kind": "bool", "name": "ready", "value": "false"}}],
            "msgs": [{"bank": {"send": {"to_address": "terra1x", "amount": []}}}]
        }))
        .unwrap();

        let msg = def.to_create_job_msg().unwrap();
        assert_eq!(msg.condition, r#"{"expr":{"bool":"$warp.variable.ready"}}"#);
        assert_eq!(
            msg.vars,
            r#"[{"static":{"kind":"bool","name":"ready","value":"false"}}]"#
        );
        assert!(msg.terminate_condition.is_none());

        let back: Vec<Variable> = decode(&msg.vars).unwrap();
        assert_eq!(back, def.vars);
    }
}
