// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    #[serde(default)]
    pub user: String,
    pub logged_in: bool,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub project_id: Option<i64>,
}

#[async_trait::async_trait]
pub trait LoginAPI: Send + Sync {
    async fn status(&mut self) -> anyhow::Result<LoginStatus>;
}
