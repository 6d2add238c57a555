// SPDX-License-Identifier: MIT

//! Client-side SDK for Warp programmable jobs
//!
//! - [sdk] - chain/HTTP collaborators, configuration, errors
//! - [warp] - condition evaluation, variable resolution, job records

pub mod sdk;
pub mod warp;
