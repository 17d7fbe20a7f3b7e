// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
pub mod common;
pub mod data_sets;
pub mod files;
pub mod functions;
pub mod login;
pub mod schedules;


pub const DEFAULT_BASE_URL: &str = "https://api.cognitedata.com";

#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub project: String,
    pub api_key: String,
    pub client_name: String,
    pub timeout: std::time::Duration,
}

impl ClientSettings {
    pub fn new(base_url: &str, project: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            project: project.to_string(),
            api_key: api_key.to_string(),
            client_name: String::from("fnaction"),
            timeout: std::time::Duration::from_secs(60),
        }
    }
}

impl std::fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("project", &self.project)
            .field("client_name", &self.client_name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// HTTP client of the platform, authenticated with a single API key.
#[derive(Clone)]
pub struct PlatformClient {
    client: common::HttpClient,
}

impl PlatformClient {
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        Ok(Self {
            client: common::HttpClient::new(settings)?,
        })
    }
}

impl crate::platform::PlatformAPI for PlatformClient {
    fn functions_api(&mut self) -> Box<dyn crate::function::FunctionsAPI> {
        Box::new(functions::FunctionsClient::new(self.client.clone()))
    }

    fn files_api(&mut self) -> Box<dyn crate::file::FilesAPI> {
        Box::new(files::FilesClient::new(self.client.clone()))
    }

    fn data_sets_api(&mut self) -> Box<dyn crate::data_set::DataSetsAPI> {
        Box::new(data_sets::DataSetsClient::new(self.client.clone()))
    }

    fn schedules_api(&mut self) -> Box<dyn crate::schedule::SchedulesAPI> {
        Box::new(schedules::SchedulesClient::new(self.client.clone()))
    }

    fn login_api(&mut self) -> Box<dyn crate::login::LoginAPI> {
        Box::new(login::LoginClient::new(self.client.clone()))
    }
}
