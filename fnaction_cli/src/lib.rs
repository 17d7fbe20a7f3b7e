// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
pub mod ci_log;
pub mod credentials;
pub mod handler_check;
pub mod inputs;
pub mod output;
pub mod schedule_file;
pub mod secrets;

use fnaction_api::http_impl::{ClientSettings, PlatformClient};
use fnaction_api::platform::PlatformAPI;

pub use inputs::ActionInputs;

pub fn fnaction_cli_default_conf() -> String {
    String::from(
        r##"function_name = "my-project/my-function"
function_folder = "functions/my-function"
function_file = "handler.py"
#common_folder = "common"
#data_set_external_id = "<data set external ID>"
cdf_project = "<project>"
cdf_deployment_credentials = "<deployment API key>"
cdf_runtime_credentials = "<runtime API key>"
cdf_base_url = "https://api.cognitedata.com"
#function_secrets = "<base64-encoded JSON object>"
#schedule_file = "schedules.yaml"
remove_only = false
#cpu = 0.25
#memory = 1.0
#owner = "<owner>"
deploy_timeout = 1200
"##,
    )
}

pub fn read_conf_from_file(filename: &str) -> anyhow::Result<ActionInputs> {
    if std::fs::metadata(filename).is_err() {
        anyhow::bail!("configuration file does not exist or cannot be accessed: {}", filename);
    }
    Ok(toml::from_str::<ActionInputs>(&std::fs::read_to_string(filename)?)?)
}

pub fn create_template(path: &str, content: &str) -> anyhow::Result<()> {
    anyhow::ensure!(!path.is_empty(), "empty template path");
    match std::path::Path::new(&path).exists() {
        true => anyhow::bail!("cannot overwrite configuration file: {}", path),
        false => {
            std::fs::write(path, content)?;
            Ok(())
        }
    }
}

/// Validate the inputs, verify the credentials and deploy.
///
/// Returns the external ID of the deployed function, `None` in remove-only mode.
pub async fn run(inputs: ActionInputs) -> anyhow::Result<Option<String>> {
    let inputs::ValidatedInputs { config, tenant } = inputs.validate()?;
    log::info!("Configuration: {:?}", config);

    let mut deployment = PlatformClient::new(&ClientSettings::new(&tenant.base_url, &tenant.project, &tenant.deployment_key))?;
    let mut runtime = PlatformClient::new(&ClientSettings::new(&tenant.base_url, &tenant.project, &tenant.runtime_key))?;
    credentials::verify_credentials(&tenant.project, deployment.login_api(), runtime.login_api()).await?;

    deploy(&mut deployment, &config).await
}

pub async fn deploy(platform: &mut dyn PlatformAPI, config: &fnaction_core::DeploymentConfig) -> anyhow::Result<Option<String>> {
    let outcome = fnaction_core::DeployOrchestrator::new(platform).deploy(config).await?;
    Ok(outcome.map(|outcome| outcome.function.external_id.unwrap_or_else(|| config.identity.clone())))
}
