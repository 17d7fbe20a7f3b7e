// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use fnaction_api::function::Function;
use fnaction_api::schedule::FunctionSchedule;

use crate::archive::ArchiveBuilder;
use crate::artifact_store::{artifact_name, ArtifactStore};
use crate::function_lifecycle::FunctionLifecycle;
use crate::retry::RetryPolicy;
use crate::schedule_reconciler::ScheduleReconciler;
use crate::{DeployError, DeploymentConfig};


/// Result of a successful deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOutcome {
    pub function: Function,
    pub schedules: Vec<FunctionSchedule>,
}

/// Drives one full deployment: teardown of the previous version, upload of
/// the code, registration and schedule reconciliation.
pub struct DeployOrchestrator {
    archive: ArchiveBuilder,
    artifacts: ArtifactStore,
    lifecycle: FunctionLifecycle,
    reconciler: ScheduleReconciler,
    retry_policy: RetryPolicy,
}

impl DeployOrchestrator {
    pub fn new(platform: &mut dyn fnaction_api::platform::PlatformAPI) -> Self {
        Self {
            archive: ArchiveBuilder::default(),
            artifacts: ArtifactStore::new(platform.files_api(), platform.data_sets_api()),
            lifecycle: FunctionLifecycle::new(platform.functions_api()),
            reconciler: ScheduleReconciler::new(platform.schedules_api()),
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: std::time::Duration) -> Self {
        self.lifecycle = self.lifecycle.with_poll_interval(poll_interval);
        self
    }

    /// Deploy the function described by `config`.
    ///
    /// Returns `None` in remove-only mode, after the teardown.
    pub async fn deploy(&mut self, config: &DeploymentConfig) -> Result<Option<DeployOutcome>, DeployError> {
        config.check()?;
        log::info!("Handling function '{}'", config.identity);

        self.teardown(&config.identity).await?;
        if config.remove_only {
            log::info!("Function '{}' removed, skipping deployment", config.identity);
            return Ok(None);
        }

        let function = self.create_with_retry(config).await?;
        log::info!("Successfully created and deployed function '{}' with id {}", config.identity, function.id);

        let schedules = self.reconciler.reconcile(&config.identity, &config.schedules).await?;
        Ok(Some(DeployOutcome { function, schedules }))
    }

    /// Remove the function, its artifact and every schedule bound to its
    /// identity. Removing what does not exist is not an error.
    pub async fn teardown(&mut self, identity: &str) -> Result<(), DeployError> {
        self.lifecycle.delete(identity).await?;
        self.artifacts.delete_if_exists(&artifact_name(identity)).await?;
        // Schedules can outlive their function.
        self.reconciler.delete_all(identity).await?;
        Ok(())
    }

    async fn create_with_retry(&mut self, config: &DeploymentConfig) -> Result<Function, DeployError> {
        let mut attempt = 1;
        loop {
            match self.create_once(config).await {
                Ok(function) => return Ok(function),
                Err(err) if err.is_retryable() && self.retry_policy.allows_retry_after(attempt) => {
                    let delay = self.retry_policy.delay();
                    log::warn!(
                        "Attempt {}/{} to deploy function '{}' failed: {}. Retrying in {:.2} seconds",
                        attempt,
                        self.retry_policy.max_attempts,
                        config.identity,
                        err,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    log::error!("Deployment of function '{}' failed after {} attempt(s): {}", config.identity, attempt, err);
                    return Err(err);
                }
            }
        }
    }

    async fn create_once(&mut self, config: &DeploymentConfig) -> Result<Function, DeployError> {
        let name = artifact_name(&config.identity);
        log::info!("Uploading code from '{}' to '{}'", config.source_folder.display(), name);
        let content = self.archive.build(&config.source_folder, config.common_folder.as_deref())?;
        // The upload may fail after the artifact was created remotely.
        let result = match self.artifacts.upload(content, &name, config.dataset_scope_id.as_deref()).await {
            Ok(artifact_id) => self
                .register_and_wait(config, artifact_id)
                .await
                .map_err(|err| classify(&config.identity, err)),
            Err(err) => Err(err),
        };
        let err = match result {
            Ok(function) => return Ok(function),
            Err(err) => err,
        };

        match self.remove_leftovers(&config.identity, &name).await {
            Ok(()) => Err(err),
            Err(cleanup_err) => {
                log::error!("Cleanup after failed deployment of '{}' failed: {}", config.identity, cleanup_err);
                Err(DeployError::Cleanup {
                    error: Box::new(err),
                    cleanup: cleanup_err.to_string(),
                })
            }
        }
    }

    async fn register_and_wait(&mut self, config: &DeploymentConfig, artifact_id: i64) -> Result<Function, DeployError> {
        self.lifecycle
            .create(
                &config.identity,
                artifact_id,
                config.runtime_credential.as_deref(),
                &config.entry_path,
                &config.options,
            )
            .await?;
        self.lifecycle.await_ready(&config.identity, config.deploy_timeout).await
    }

    async fn remove_leftovers(&mut self, identity: &str, artifact: &str) -> Result<(), DeployError> {
        log::info!("Removing leftovers of the failed attempt for '{}'", identity);
        self.lifecycle.delete(identity).await?;
        self.artifacts.delete_if_exists(artifact).await?;
        Ok(())
    }
}

/// A duplicate identity means an earlier attempt registered the function
/// but its confirmation got lost, which is worth another attempt.
fn classify(identity: &str, err: DeployError) -> DeployError {
    if err.is_duplicated() {
        log::warn!("Function '{}' was already registered: {}", identity, err);
        DeployError::Conflict(err.to_string())
    } else {
        err
    }
}
