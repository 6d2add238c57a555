// SPDX-License-Identifier: MIT

//! SDK plumbing shared by the Warp evaluator
//!
//! - [chain] - block headers and contract queries over the LCD
//! - [http] - outbound calls for external variables
//! - [config] - deployment settings
//! - [error] - error hierarchy

pub mod chain;
pub mod config;
pub mod error;
pub mod http;
