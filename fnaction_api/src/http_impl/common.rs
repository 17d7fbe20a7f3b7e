// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use crate::common::ApiError;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

impl<T> Items<T> {
    pub fn single(item: T) -> Self {
        Self { items: vec![item] }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ByIds<T> {
    pub items: Vec<T>,
    pub ignore_unknown_ids: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdRef {
    pub external_id: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct IdRef {
    pub id: i64,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    project: String,
    api_key: String,
    client_name: String,
}

impl HttpClient {
    pub fn new(settings: &super::ClientSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.client_name.clone())
            .build()
            .map_err(|err| anyhow::anyhow!("cannot create the HTTP client: {}", err))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            project: settings.project.clone(),
            api_key: settings.api_key.clone(),
            client_name: settings.client_name.clone(),
        })
    }

    pub fn project_url(&self, path: &str) -> String {
        format!("{}/api/v1/projects/{}/{}", self.base_url, self.project, path)
    }

    pub fn base_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authenticated(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("api-key", &self.api_key)
            .header("x-cdp-app", &self.client_name)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub async fn post<B, R>(&self, url: &str, body: &B) -> anyhow::Result<R>
    where
        B: serde::Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        log::debug!("POST {}", url);
        let response = self.authenticated(self.client.post(url)).json(body).send().await.map_err(transport)?;
        let response = check(response).await?;
        response.json::<R>().await.map_err(transport)
    }

    /// POST whose response body carries nothing of interest.
    pub async fn post_ignore<B>(&self, url: &str, body: &B) -> anyhow::Result<()>
    where
        B: serde::Serialize + ?Sized,
    {
        log::debug!("POST {}", url);
        let response = self.authenticated(self.client.post(url)).json(body).send().await.map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    pub async fn get<R>(&self, url: &str) -> anyhow::Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        log::debug!("GET {}", url);
        let response = self.authenticated(self.client.get(url)).send().await.map_err(transport)?;
        let response = check(response).await?;
        response.json::<R>().await.map_err(transport)
    }

    /// PUT raw bytes to a pre-signed upload URL, which takes no credentials.
    pub async fn put_bytes(&self, url: &str, content: Vec<u8>, mime_type: &str) -> anyhow::Result<()> {
        log::debug!("PUT {} ({} bytes)", url, content.len());
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(content)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> anyhow::Error {
    anyhow::Error::new(ApiError::Transport(err.to_string()))
}

async fn check(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .map(|val| val.to_string());
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => body,
    };
    Err(anyhow::Error::new(ApiError::Remote {
        code: status.as_u16(),
        message,
        request_id,
    }))
}
