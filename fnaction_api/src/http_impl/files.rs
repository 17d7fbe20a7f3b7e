// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::common::{ByIds, ExternalIdRef, HttpClient, Items};
use crate::file::{FileMetadata, UploadFileRequest};

#[derive(Clone)]
pub struct FilesClient {
    client: HttpClient,
}

impl FilesClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl crate::file::FilesAPI for FilesClient {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<FileMetadata>> {
        let request = ByIds {
            items: vec![ExternalIdRef {
                external_id: external_id.to_string(),
            }],
            ignore_unknown_ids: true,
        };
        let res: Items<FileMetadata> = self.client.post(&self.client.project_url("files/byids"), &request).await?;
        Ok(res.items.into_iter().next())
    }

    async fn upload_bytes(&mut self, request: UploadFileRequest, content: Vec<u8>) -> anyhow::Result<FileMetadata> {
        let mime_type = request.mime_type.clone();
        let metadata: FileMetadata = self.client.post(&self.client.project_url("files?overwrite=true"), &request).await?;
        let upload_url = match &metadata.upload_url {
            Some(url) => url.clone(),
            None => anyhow::bail!("no upload URL returned for file {}", request.external_id),
        };
        self.client.put_bytes(&upload_url, content, &mime_type).await?;
        Ok(metadata)
    }

    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()> {
        let request = Items::single(ExternalIdRef {
            external_id: external_id.to_string(),
        });
        self.client.post_ignore(&self.client.project_url("files/delete"), &request).await
    }
}
