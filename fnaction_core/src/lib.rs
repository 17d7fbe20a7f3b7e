// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
pub mod archive;
pub mod artifact_store;
pub mod config;
pub mod cron;
pub mod error;
pub mod function_lifecycle;
pub mod orchestrator;
pub mod retry;
pub mod schedule_reconciler;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{DeploymentConfig, FunctionOptions, ScheduleSpec};
pub use error::DeployError;
pub use orchestrator::{DeployOrchestrator, DeployOutcome};
