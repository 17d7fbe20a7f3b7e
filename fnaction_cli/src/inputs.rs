// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use fnaction_core::config::{DEFAULT_DEPLOY_TIMEOUT, DEFAULT_FUNCTION_FILE};
use fnaction_core::{DeployError, DeploymentConfig};

/// Inputs of the action, from flags, `INPUT_*` variables or a TOML file.
///
/// Empty values count as absent.
#[derive(Clone, Default, clap::Args, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionInputs {
    /// External ID of the function, also naming its artifact and schedules
    #[arg(long, env = "INPUT_FUNCTION_NAME")]
    pub function_name: Option<String>,
    /// Folder with the code of the function
    #[arg(long, env = "INPUT_FUNCTION_FOLDER")]
    pub function_folder: Option<String>,
    /// Entry point, relative to the function folder
    #[arg(long, env = "INPUT_FUNCTION_FILE")]
    pub function_file: Option<String>,
    /// Folder shipped along with the function code
    #[arg(long, env = "INPUT_COMMON_FOLDER")]
    pub common_folder: Option<String>,
    /// Data set governing the code artifact
    #[arg(long, env = "INPUT_DATA_SET_EXTERNAL_ID")]
    pub data_set_external_id: Option<String>,
    #[arg(long, env = "INPUT_CDF_PROJECT")]
    pub cdf_project: Option<String>,
    #[arg(long, env = "INPUT_CDF_DEPLOYMENT_CREDENTIALS", hide_env_values = true)]
    pub cdf_deployment_credentials: Option<String>,
    #[arg(long, env = "INPUT_CDF_RUNTIME_CREDENTIALS", hide_env_values = true)]
    pub cdf_runtime_credentials: Option<String>,
    #[arg(long, env = "INPUT_CDF_BASE_URL")]
    pub cdf_base_url: Option<String>,
    /// Base64-encoded JSON object of secrets
    #[arg(long, env = "INPUT_FUNCTION_SECRETS", hide_env_values = true)]
    pub function_secrets: Option<String>,
    /// YAML file with the schedules, relative to the function folder
    #[arg(long, env = "INPUT_SCHEDULE_FILE")]
    pub schedule_file: Option<String>,
    /// Only remove the function, its artifact and its schedules
    #[arg(long, env = "INPUT_REMOVE_ONLY", value_parser = clap::builder::BoolishValueParser::new())]
    pub remove_only: Option<bool>,
    #[arg(long, env = "INPUT_CPU")]
    pub cpu: Option<f64>,
    #[arg(long, env = "INPUT_MEMORY")]
    pub memory: Option<f64>,
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,
    /// Seconds to wait for the function to be deployed
    #[arg(long, env = "INPUT_DEPLOY_TIMEOUT")]
    pub deploy_timeout: Option<u64>,
}

/// Where and with which keys to deploy.
#[derive(Clone, PartialEq)]
pub struct TenantSettings {
    pub project: String,
    pub base_url: String,
    pub deployment_key: String,
    pub runtime_key: String,
}

impl std::fmt::Debug for TenantSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantSettings")
            .field("project", &self.project)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ValidatedInputs {
    pub config: DeploymentConfig,
    pub tenant: TenantSettings,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: Option<String>, what: &str) -> Result<String, DeployError> {
    present(value).ok_or_else(|| DeployError::Validation(format!("Missing {}.", what)))
}

fn positive(value: Option<f64>, what: &str) -> Result<Option<f64>, DeployError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(DeployError::Validation(format!("{} must be a positive number, got {}", what, v))),
        other => Ok(other),
    }
}

impl ActionInputs {
    /// Fill the values missing in `self` from `fallback`.
    pub fn or(self, fallback: ActionInputs) -> Self {
        Self {
            function_name: present(self.function_name).or(fallback.function_name),
            function_folder: present(self.function_folder).or(fallback.function_folder),
            function_file: present(self.function_file).or(fallback.function_file),
            common_folder: present(self.common_folder).or(fallback.common_folder),
            data_set_external_id: present(self.data_set_external_id).or(fallback.data_set_external_id),
            cdf_project: present(self.cdf_project).or(fallback.cdf_project),
            cdf_deployment_credentials: present(self.cdf_deployment_credentials).or(fallback.cdf_deployment_credentials),
            cdf_runtime_credentials: present(self.cdf_runtime_credentials).or(fallback.cdf_runtime_credentials),
            cdf_base_url: present(self.cdf_base_url).or(fallback.cdf_base_url),
            function_secrets: present(self.function_secrets).or(fallback.function_secrets),
            schedule_file: present(self.schedule_file).or(fallback.schedule_file),
            remove_only: self.remove_only.or(fallback.remove_only),
            cpu: self.cpu.or(fallback.cpu),
            memory: self.memory.or(fallback.memory),
            owner: present(self.owner).or(fallback.owner),
            deploy_timeout: self.deploy_timeout.or(fallback.deploy_timeout),
        }
    }

    /// Check everything that can be checked without the network.
    pub fn validate(self) -> Result<ValidatedInputs, DeployError> {
        let identity = required(self.function_name, "function name")?;
        let tenant = TenantSettings {
            project: required(self.cdf_project, "CDF project")?,
            base_url: present(self.cdf_base_url).unwrap_or_else(|| fnaction_api::http_impl::DEFAULT_BASE_URL.to_string()),
            deployment_key: required(self.cdf_deployment_credentials, "deployment key")?,
            runtime_key: required(self.cdf_runtime_credentials, "runtime key")?,
        };

        let folder = std::path::PathBuf::from(required(self.function_folder, "function folder")?);
        if !folder.is_dir() {
            return Err(DeployError::Validation(format!("Function folder doesn't exist: {}", folder.display())));
        }

        let file = present(self.function_file).unwrap_or_else(|| DEFAULT_FUNCTION_FILE.to_string());
        if !file.ends_with(".py") {
            return Err(DeployError::Validation(format!(
                "Invalid file name, must end with '.py', but got '{}'",
                file
            )));
        }
        let entry = folder.join(&file);
        if !entry.is_file() {
            return Err(DeployError::Validation(format!("Function file doesn't exist at path: {}", entry.display())));
        }
        crate::handler_check::check_handle_args(&entry)?;

        let common_folder = match present(self.common_folder) {
            Some(common_folder) => {
                let common_folder = std::path::PathBuf::from(common_folder);
                if !common_folder.is_dir() {
                    return Err(DeployError::Validation(format!(
                        "Common folder doesn't exist: {}",
                        common_folder.display()
                    )));
                }
                Some(common_folder)
            }
            None => None,
        };

        let schedules = match present(self.schedule_file) {
            Some(schedule_file) => {
                if !(schedule_file.ends_with(".yml") || schedule_file.ends_with(".yaml")) {
                    return Err(DeployError::Validation(format!(
                        "Invalid file name, must end with '.yml' or '.yaml', but got '{}'",
                        schedule_file
                    )));
                }
                let path = folder.join(&schedule_file);
                if !path.is_file() {
                    return Err(DeployError::Validation(format!("Schedules file doesn't exist at path: {}", path.display())));
                }
                crate::schedule_file::load_schedules(&path, &identity)?
            }
            None => vec![],
        };

        let deploy_timeout = match self.deploy_timeout {
            Some(0) => return Err(DeployError::Validation(String::from("deploy timeout must be positive"))),
            Some(seconds) => std::time::Duration::from_secs(seconds),
            None => DEFAULT_DEPLOY_TIMEOUT,
        };

        let mut config = DeploymentConfig::new(&identity, &folder);
        config.entry_path = file;
        config.common_folder = common_folder;
        config.dataset_scope_id = present(self.data_set_external_id);
        config.runtime_credential = Some(tenant.runtime_key.clone());
        config.options.secrets = present(self.function_secrets)
            .map(|encoded| crate::secrets::decode_secrets(&encoded))
            .transpose()?;
        config.options.owner = present(self.owner);
        config.options.cpu = positive(self.cpu, "cpu")?;
        config.options.memory = positive(self.memory, "memory")?;
        config.remove_only = self.remove_only.unwrap_or(false);
        config.schedules = schedules;
        config.deploy_timeout = deploy_timeout;
        config.check()?;

        Ok(ValidatedInputs { config, tenant })
    }
}
