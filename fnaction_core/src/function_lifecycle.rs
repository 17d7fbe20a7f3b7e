// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use fnaction_api::function::{CreateFunctionRequest, Function, FunctionStatus};

use crate::DeployError;

pub const DEFAULT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

/// Registers functions and follows their deployment until a terminal state.
pub struct FunctionLifecycle {
    functions: Box<dyn fnaction_api::function::FunctionsAPI>,
    poll_interval: std::time::Duration,
}

impl FunctionLifecycle {
    pub fn new(functions: Box<dyn fnaction_api::function::FunctionsAPI>) -> Self {
        Self {
            functions,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: std::time::Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Delete the function with the given identity, if it exists.
    ///
    /// Returns whether a function was found.
    pub async fn delete(&mut self, identity: &str) -> Result<bool, DeployError> {
        match self.functions.retrieve(identity).await.map_err(DeployError::remote)? {
            Some(_) => {
                log::info!("Found existing function '{}'. Deleting...", identity);
                self.functions.delete(identity).await.map_err(DeployError::remote)?;
                log::info!("- Delete of function '{}' successful!", identity);
                Ok(true)
            }
            None => {
                log::info!("Unable to delete function! External ID: '{}' NOT found!", identity);
                Ok(false)
            }
        }
    }

    /// Register the function without waiting for it to be deployed.
    pub async fn create(
        &mut self,
        identity: &str,
        artifact_id: i64,
        runtime_credential: Option<&str>,
        entry_path: &str,
        options: &crate::FunctionOptions,
    ) -> Result<Function, DeployError> {
        log::info!("Trying to create function '{}'...", identity);
        match &options.secrets {
            Some(secrets) if !secrets.is_empty() => {
                log::info!("- Adding {} extra secret(s) to the function '{}'", secrets.len(), identity)
            }
            _ => log::info!("- No extra secrets added to function '{}'", identity),
        }

        let request = CreateFunctionRequest {
            name: identity.to_string(),
            external_id: identity.to_string(),
            file_id: artifact_id,
            function_path: entry_path.to_string(),
            api_key: runtime_credential.map(|key| key.to_string()),
            secrets: options.secrets.clone().filter(|secrets| !secrets.is_empty()),
            owner: options.owner.clone(),
            cpu: options.cpu,
            memory: options.memory,
        };
        log::debug!("{:?}", request);
        let function = self.functions.create(request).await.map_err(DeployError::remote)?;
        log::info!("Function '{}' created. Waiting for deployment...", identity);
        Ok(function)
    }

    /// Poll the deployment status until it is terminal or `timeout` elapses.
    ///
    /// A status that is still not terminal when the time is up is a
    /// [`DeployError::Timeout`], never a success.
    pub async fn await_ready(&mut self, identity: &str, timeout: std::time::Duration) -> Result<Function, DeployError> {
        let started = tokio::time::Instant::now();
        loop {
            let function = match self.functions.retrieve(identity).await.map_err(DeployError::remote)? {
                Some(function) => function,
                None => {
                    let message = format!("No function with external_id={} exists!", identity);
                    log::warn!("{}", message);
                    return Err(DeployError::NotFound(message));
                }
            };
            match function.status {
                FunctionStatus::Ready => {
                    log::info!(
                        "Function deployment successful! Deployment took {:.2} seconds",
                        started.elapsed().as_secs_f64()
                    );
                    return Ok(function);
                }
                FunctionStatus::Failed => {
                    let trace = function.failure_trace();
                    log::warn!(
                        "Deployment failed after {:.2} seconds! Error: {}",
                        started.elapsed().as_secs_f64(),
                        trace
                    );
                    return Err(DeployError::Failed {
                        identity: identity.to_string(),
                        trace,
                    });
                }
                ref status => log::debug!("Function '{}' is {}", identity, status),
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                break;
            }
            tokio::time::sleep(std::cmp::min(self.poll_interval, timeout - elapsed)).await;
        }

        Err(DeployError::Timeout {
            identity: identity.to_string(),
            timeout,
        })
    }
}
