// SPDX-License-Identifier: MIT

//! Jobs: on-chain records and locally authored definitions

pub mod codec;
mod loader;
mod types;

pub use loader::JobLoader;
pub use types::{CreateJobMsg, Job, JobDefinition, JobResponse, JobStatus};
