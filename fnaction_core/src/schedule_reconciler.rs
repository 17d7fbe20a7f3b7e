// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_api::schedule::{CreateScheduleRequest, FunctionSchedule};

use crate::DeployError;

/// Replaces the whole set of schedules bound to a function identity.
pub struct ScheduleReconciler {
    schedules: Box<dyn fnaction_api::schedule::SchedulesAPI>,
}

impl ScheduleReconciler {
    pub fn new(schedules: Box<dyn fnaction_api::schedule::SchedulesAPI>) -> Self {
        Self { schedules }
    }

    /// Delete every schedule bound to `identity`, including those left
    /// behind by functions that no longer exist.
    ///
    /// Returns the number of schedules deleted.
    pub async fn delete_all(&mut self, identity: &str) -> Result<usize, DeployError> {
        let existing = self.schedules.list(identity).await.map_err(DeployError::remote)?;
        for schedule in &existing {
            log::info!("Deleting schedule '{}' (id: {}) of function '{}'", schedule.name, schedule.id, identity);
            self.schedules.delete(schedule.id).await.map_err(DeployError::remote)?;
        }
        if existing.is_empty() {
            log::info!("No schedules to delete for function '{}'", identity);
        }
        Ok(existing.len())
    }

    /// Make the remote schedules of `identity` exactly `desired`.
    ///
    /// There is no rollback: a failure half way leaves a partial set, which
    /// the next run replaces anyway.
    pub async fn reconcile(&mut self, identity: &str, desired: &[crate::ScheduleSpec]) -> Result<Vec<FunctionSchedule>, DeployError> {
        self.delete_all(identity).await?;

        let mut created = Vec::with_capacity(desired.len());
        for spec in desired {
            let schedule = self
                .schedules
                .create(CreateScheduleRequest {
                    name: spec.name.clone(),
                    function_external_id: identity.to_string(),
                    cron_expression: spec.cron.clone(),
                    data: if spec.data.is_empty() { None } else { Some(spec.data.clone()) },
                })
                .await
                .map_err(DeployError::remote)?;
            log::info!("Successfully deployed schedule {} with cron expression {}.", spec.name, spec.cron);
            created.push(schedule);
        }
        Ok(created)
    }
}
