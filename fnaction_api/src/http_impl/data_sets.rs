// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::common::{ByIds, ExternalIdRef, HttpClient, Items};
use crate::data_set::DataSet;

#[derive(Clone)]
pub struct DataSetsClient {
    client: HttpClient,
}

impl DataSetsClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl crate::data_set::DataSetsAPI for DataSetsClient {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<DataSet>> {
        let request = ByIds {
            items: vec![ExternalIdRef {
                external_id: external_id.to_string(),
            }],
            ignore_unknown_ids: true,
        };
        let res: Items<DataSet> = self.client.post(&self.client.project_url("datasets/byids"), &request).await?;
        Ok(res.items.into_iter().next())
    }
}
