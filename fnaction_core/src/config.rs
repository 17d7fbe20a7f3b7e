// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_api::schedule::ScheduleData;

pub const DEFAULT_DEPLOY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(1200);
pub const DEFAULT_FUNCTION_FILE: &str = "handler.py";

/// A cron-triggered invocation of the function.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSpec {
    pub name: String,
    pub cron: String,
    pub data: ScheduleData,
}

impl ScheduleSpec {
    /// Create a schedule, rejecting empty names and invalid cron expressions.
    pub fn new(name: &str, cron: &str, data: ScheduleData) -> Result<Self, crate::DeployError> {
        let cron = cron.trim();
        if name.trim().is_empty() {
            return Err(crate::DeployError::Validation(String::from("schedule name must not be empty")));
        }
        crate::cron::validate(cron).map_err(|err| crate::DeployError::Validation(format!("Invalid cron expression: '{}': {:#}", cron, err)))?;
        Ok(Self {
            name: name.to_string(),
            cron: cron.to_string(),
            data,
        })
    }
}

/// Optional settings of the function registration.
#[derive(Clone, Default, PartialEq)]
pub struct FunctionOptions {
    pub secrets: Option<std::collections::BTreeMap<String, String>>,
    pub owner: Option<String>,
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
}

impl std::fmt::Debug for FunctionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionOptions")
            .field("secrets", &self.secrets.as_ref().map(|s| s.keys().collect::<Vec<_>>()))
            .field("owner", &self.owner)
            .field("cpu", &self.cpu)
            .field("memory", &self.memory)
            .finish()
    }
}

/// Everything needed to deploy one function, validated at the process boundary.
#[derive(Clone)]
pub struct DeploymentConfig {
    pub identity: String,
    pub source_folder: std::path::PathBuf,
    /// Path of the entry point, relative to the source folder.
    pub entry_path: String,
    pub common_folder: Option<std::path::PathBuf>,
    pub dataset_scope_id: Option<String>,
    pub runtime_credential: Option<String>,
    pub options: FunctionOptions,
    pub remove_only: bool,
    pub schedules: Vec<ScheduleSpec>,
    pub deploy_timeout: std::time::Duration,
}

impl DeploymentConfig {
    pub fn new(identity: &str, source_folder: &std::path::Path) -> Self {
        Self {
            identity: identity.to_string(),
            source_folder: source_folder.to_path_buf(),
            entry_path: DEFAULT_FUNCTION_FILE.to_string(),
            common_folder: None,
            dataset_scope_id: None,
            runtime_credential: None,
            options: FunctionOptions::default(),
            remove_only: false,
            schedules: vec![],
            deploy_timeout: DEFAULT_DEPLOY_TIMEOUT,
        }
    }

    /// The checks that do not need the file system or the network.
    pub fn check(&self) -> Result<(), crate::DeployError> {
        if self.identity.trim().is_empty() {
            return Err(crate::DeployError::Validation(String::from("function identity must not be empty")));
        }
        if !self.remove_only && self.entry_path.trim().is_empty() {
            return Err(crate::DeployError::Validation(String::from("function entry path must not be empty")));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DeploymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentConfig")
            .field("identity", &self.identity)
            .field("source_folder", &self.source_folder)
            .field("entry_path", &self.entry_path)
            .field("common_folder", &self.common_folder)
            .field("dataset_scope_id", &self.dataset_scope_id)
            .field("runtime_credential", &self.runtime_credential.as_ref().map(|_| "***"))
            .field("options", &self.options)
            .field("remove_only", &self.remove_only)
            .field("schedules", &self.schedules)
            .field("deploy_timeout", &self.deploy_timeout)
            .finish()
    }
}
