// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::common::{ByIds, ExternalIdRef, HttpClient, Items};
use crate::function::{CreateFunctionRequest, Function};

#[derive(Clone)]
pub struct FunctionsClient {
    client: HttpClient,
}

impl FunctionsClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl crate::function::FunctionsAPI for FunctionsClient {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<Function>> {
        let request = ByIds {
            items: vec![ExternalIdRef {
                external_id: external_id.to_string(),
            }],
            ignore_unknown_ids: true,
        };
        let res: Items<Function> = self.client.post(&self.client.project_url("functions/byids"), &request).await?;
        Ok(res.items.into_iter().next())
    }

    async fn create(&mut self, request: CreateFunctionRequest) -> anyhow::Result<Function> {
        let external_id = request.external_id.clone();
        let res: Items<Function> = self.client.post(&self.client.project_url("functions"), &Items::single(request)).await?;
        match res.items.into_iter().next() {
            Some(function) => Ok(function),
            None => Err(anyhow::anyhow!("empty response when creating function {}", external_id)),
        }
    }

    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()> {
        let request = Items::single(ExternalIdRef {
            external_id: external_id.to_string(),
        });
        self.client.post_ignore(&self.client.project_url("functions/delete"), &request).await
    }
}
