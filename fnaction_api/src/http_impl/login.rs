// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::common::HttpClient;
use crate::login::LoginStatus;

#[derive(serde::Deserialize)]
struct LoginStatusResponse {
    data: LoginStatus,
}

#[derive(Clone)]
pub struct LoginClient {
    client: HttpClient,
}

impl LoginClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl crate::login::LoginAPI for LoginClient {
    async fn status(&mut self) -> anyhow::Result<LoginStatus> {
        let res: LoginStatusResponse = self.client.get(&self.client.base_url("login/status")).await?;
        Ok(res.data)
    }
}
