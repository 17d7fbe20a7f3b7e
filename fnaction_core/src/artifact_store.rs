// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_api::data_set::DataSet;
use fnaction_api::file::UploadFileRequest;

use crate::DeployError;

const ARTIFACT_MIME_TYPE: &str = "application/zip";

/// Name (and external ID) of the code artifact of a function.
///
/// Forward slashes are not allowed in file names, so they become dashes.
pub fn artifact_name(identity: &str) -> String {
    format!("{}.zip", identity.replace('/', "-"))
}

/// Stores and removes the zipped code of functions.
pub struct ArtifactStore {
    files: Box<dyn fnaction_api::file::FilesAPI>,
    data_sets: Box<dyn fnaction_api::data_set::DataSetsAPI>,
}

impl ArtifactStore {
    pub fn new(files: Box<dyn fnaction_api::file::FilesAPI>, data_sets: Box<dyn fnaction_api::data_set::DataSetsAPI>) -> Self {
        Self { files, data_sets }
    }

    /// Delete the artifact with the given name, if any.
    ///
    /// Returns whether an artifact was found. A rejected delete of an
    /// artifact governed by a data set is only logged, since the next upload
    /// overwrites it anyway.
    pub async fn delete_if_exists(&mut self, name: &str) -> Result<bool, DeployError> {
        let metadata = match self.files.retrieve(name).await.map_err(DeployError::remote)? {
            Some(metadata) => metadata,
            None => {
                log::info!("Unable to delete file! External ID: '{}' NOT found!", name);
                return Ok(false);
            }
        };
        log::info!("Found existing file {}. Deleting...", name);
        match self.files.delete(name).await {
            Ok(_) => {
                log::info!("- Delete of file '{}' successful!", name);
                Ok(true)
            }
            Err(err) => match metadata.data_set_id {
                Some(data_set_id) => {
                    log::error!(
                        "Unable to delete file! File is governed by data set with ID: {}. \
                         Make sure your deployment credentials have write/owner access. \
                         Trying to ignore and continue as this workflow will overwrite the file later. Error: {}",
                        data_set_id,
                        err
                    );
                    Ok(true)
                }
                None => Err(DeployError::remote(err)),
            },
        }
    }

    /// Look up the internal reference of a data set from its external ID.
    pub async fn resolve_scope(&mut self, external_id: &str) -> Result<DataSet, DeployError> {
        match self.data_sets.retrieve(external_id).await {
            Ok(Some(data_set)) => Ok(data_set),
            Ok(None) => Err(DeployError::NotFound(format!("No dataset exists with external ID: '{}'", external_id))),
            Err(err) => {
                let message = format!(
                    "Unable to retrieve dataset: Deployment key is missing capability 'dataset:READ'. ({})",
                    err
                );
                log::error!("{}", message);
                Err(DeployError::Permission {
                    capability: String::from("dataset:READ"),
                    message,
                })
            }
        }
    }

    /// Upload the archive, replacing any artifact with the same name, and
    /// return its ID.
    pub async fn upload(&mut self, content: Vec<u8>, name: &str, dataset_scope_id: Option<&str>) -> Result<i64, DeployError> {
        let data_set = match dataset_scope_id {
            Some(external_id) => {
                let data_set = self.resolve_scope(external_id).await?;
                log::info!(
                    "- Using dataset '{}' to govern the file (has write protection: {}).",
                    external_id,
                    data_set.write_protected
                );
                Some(data_set)
            }
            None => {
                log::info!("- No dataset will be used to govern the file!");
                None
            }
        };

        let request = UploadFileRequest {
            name: name.to_string(),
            external_id: name.to_string(),
            data_set_id: data_set.as_ref().map(|ds| ds.id),
            mime_type: ARTIFACT_MIME_TYPE.to_string(),
        };
        let metadata = match self.files.upload_bytes(request, content).await {
            Ok(metadata) => metadata,
            Err(err) => return Err(upload_error(err, data_set.as_ref())),
        };

        match metadata.id {
            Some(id) => {
                log::info!("- File uploaded successfully ({})!", name);
                Ok(id)
            }
            None => Err(DeployError::Api(anyhow::anyhow!("Failed to upload file ({}): no ID returned", name))),
        }
    }
}

fn upload_error(err: anyhow::Error, data_set: Option<&DataSet>) -> DeployError {
    let remote = DeployError::remote(err);
    let data_set = match (data_set, &remote) {
        (Some(data_set), DeployError::Api(_)) => data_set,
        // Not related to the data set.
        _ => return remote,
    };
    let (capability, message) = if data_set.write_protected {
        (
            "dataset:OWNER",
            "Unable to upload file to WRITE-PROTECTED dataset: Deployment key MUST have capability \
             'dataset:OWNER' (and have 'files:WRITE' scoped to the same dataset OR all files).",
        )
    } else {
        (
            "files:WRITE",
            "Unable to upload file to dataset: Deployment key must have capability \
             'files:WRITE' scoped to the same dataset OR all files.",
        )
    };
    log::error!("{}", message);
    DeployError::Permission {
        capability: capability.to_string(),
        message: format!("{} ({})", message, remote),
    }
}
