// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_core::DeployError;

/// Check that both keys are valid and bound to `project`.
pub async fn verify_credentials(
    project: &str,
    mut deployment: Box<dyn fnaction_api::login::LoginAPI>,
    mut runtime: Box<dyn fnaction_api::login::LoginAPI>,
) -> Result<(), DeployError> {
    let status = deployment.status().await.map_err(DeployError::remote)?;
    if !status.logged_in {
        return Err(DeployError::Validation(String::from("Can't login with deployment credentials")));
    }
    if status.project != project {
        return Err(DeployError::Validation(format!(
            "Inferred project, {}, from the provided deployment credentials does not match the project defined: {}",
            status.project, project
        )));
    }

    let status = runtime.status().await.map_err(DeployError::remote)?;
    if !status.logged_in {
        return Err(DeployError::Validation(String::from("Can't login with runtime credentials")));
    }
    if status.project != project {
        return Err(DeployError::Validation(format!(
            "Provided runtime credentials doesn't match the project defined: {}",
            project
        )));
    }

    log::info!("Deployment and runtime credentials verified for project '{}'", project);
    Ok(())
}
