// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub data_set_id: Option<i64>,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub uploaded: bool,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub name: String,
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_set_id: Option<i64>,
    pub mime_type: String,
}

#[async_trait::async_trait]
pub trait FilesAPI: FilesAPIClone + Send + Sync {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<FileMetadata>>;
    /// Upload the content, replacing any file with the same external ID.
    async fn upload_bytes(&mut self, request: UploadFileRequest, content: Vec<u8>) -> anyhow::Result<FileMetadata>;
    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()>;
}

pub trait FilesAPIClone {
    fn clone_box(&self) -> Box<dyn FilesAPI>;
}
impl<T> FilesAPIClone for T
where
    T: 'static + FilesAPI + Clone,
{
    fn clone_box(&self) -> Box<dyn FilesAPI> {
        Box::new(self.clone())
    }
}
impl Clone for Box<dyn FilesAPI> {
    fn clone(&self) -> Box<dyn FilesAPI> {
        self.clone_box()
    }
}
