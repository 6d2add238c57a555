// SPDX-License-Identifier: MIT

//! Warp job automation: conditions, variables, jobs

pub mod client;
pub mod condition;
pub mod job;
pub mod resolver;
pub mod server;
pub mod variable;

#[cfg(test)]
pub(crate) mod testing;
