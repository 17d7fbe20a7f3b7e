// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

/// Deployment status of a function as reported by the platform.
///
/// `Queued` and `Deploying` are the non-terminal (creating) states, while
/// `Ready` and `Failed` are terminal. Anything else the platform may start
/// reporting in the future is kept verbatim and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FunctionStatus {
    Queued,
    Deploying,
    Ready,
    Failed,
    Other(String),
}

impl FunctionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FunctionStatus::Ready | FunctionStatus::Failed)
    }
}

impl From<String> for FunctionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Queued" => FunctionStatus::Queued,
            "Deploying" => FunctionStatus::Deploying,
            "Ready" => FunctionStatus::Ready,
            "Failed" => FunctionStatus::Failed,
            _ => FunctionStatus::Other(value),
        }
    }
}

impl From<FunctionStatus> for String {
    fn from(value: FunctionStatus) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for FunctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            FunctionStatus::Queued => write!(f, "Queued"),
            FunctionStatus::Deploying => write!(f, "Deploying"),
            FunctionStatus::Ready => write!(f, "Ready"),
            FunctionStatus::Failed => write!(f, "Failed"),
            FunctionStatus::Other(val) => write!(f, "{}", val),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub trace: Option<String>,
}

/// A function registered on the platform.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub id: i64,
    pub name: String,
    pub external_id: Option<String>,
    pub file_id: i64,
    #[serde(default)]
    pub function_path: Option<String>,
    pub status: FunctionStatus,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub cpu: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default)]
    pub error: Option<FunctionError>,
}

impl Function {
    /// The failure trace reported for a failed deployment, falling back to
    /// the error message when no trace is attached.
    pub fn failure_trace(&self) -> String {
        match &self.error {
            Some(FunctionError { trace: Some(trace), .. }) => trace.clone(),
            Some(FunctionError { message: Some(message), .. }) => message.clone(),
            _ => String::from("no error trace reported"),
        }
    }
}

#[derive(Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFunctionRequest {
    pub name: String,
    pub external_id: String,
    pub file_id: i64,
    pub function_path: String,
    /// Credential the function runs with once invoked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<std::collections::BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
}

// Credentials and secret values never make it into the logs.
impl std::fmt::Debug for CreateFunctionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateFunctionRequest")
            .field("name", &self.name)
            .field("external_id", &self.external_id)
            .field("file_id", &self.file_id)
            .field("function_path", &self.function_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("secrets", &self.secrets.as_ref().map(|s| s.keys().collect::<Vec<_>>()))
            .field("owner", &self.owner)
            .field("cpu", &self.cpu)
            .field("memory", &self.memory)
            .finish()
    }
}

#[async_trait::async_trait]
pub trait FunctionsAPI: FunctionsAPIClone + Send + Sync {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<Function>>;
    async fn create(&mut self, request: CreateFunctionRequest) -> anyhow::Result<Function>;
    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()>;
}

// https://stackoverflow.com/a/30353928
pub trait FunctionsAPIClone {
    fn clone_box(&self) -> Box<dyn FunctionsAPI>;
}
impl<T> FunctionsAPIClone for T
where
    T: 'static + FunctionsAPI + Clone,
{
    fn clone_box(&self) -> Box<dyn FunctionsAPI> {
        Box::new(self.clone())
    }
}
impl Clone for Box<dyn FunctionsAPI> {
    fn clone(&self) -> Box<dyn FunctionsAPI> {
        self.clone_box()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(FunctionStatus::Ready.is_terminal());
        assert!(FunctionStatus::Failed.is_terminal());
        assert!(!FunctionStatus::Queued.is_terminal());
        assert!(!FunctionStatus::Deploying.is_terminal());
        assert!(!FunctionStatus::Other("Suspended".to_string()).is_terminal());
    }

    #[test]
    fn test_function_from_json() {
        let function: Function = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "proj/fn1",
            "externalId": "proj/fn1",
            "fileId": 7,
            "functionPath": "handler.py",
            "status": "Failed",
            "error": {"message": "build failed", "trace": "Traceback: boom"}
        }))
        .unwrap();
        assert_eq!(function.status, FunctionStatus::Failed);
        assert_eq!(function.failure_trace(), "Traceback: boom");
        assert_eq!(function.cpu, None);

        let function: Function = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "proj/fn1",
            "fileId": 7,
            "status": "Hibernating"
        }))
        .unwrap();
        assert_eq!(function.status, FunctionStatus::Other("Hibernating".to_string()));
        assert_eq!(function.failure_trace(), "no error trace reported");
    }

    #[test]
    fn test_create_request_omits_unset_fields() {
        let request = CreateFunctionRequest {
            name: "fn".to_string(),
            external_id: "fn".to_string(),
            file_id: 1,
            function_path: "handler.py".to_string(),
            api_key: Some("runtime-key".to_string()),
            secrets: None,
            owner: None,
            cpu: Some(0.5),
            memory: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "fn",
                "externalId": "fn",
                "fileId": 1,
                "functionPath": "handler.py",
                "apiKey": "runtime-key",
                "cpu": 0.5
            })
        );
        assert!(!format!("{:?}", request).contains("runtime-key"));
    }
}
