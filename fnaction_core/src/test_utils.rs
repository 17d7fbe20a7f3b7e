// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! In-memory platform recording every call it receives.

use std::collections::{HashMap, VecDeque};

use fnaction_api::common::ApiError;
use fnaction_api::data_set::DataSet;
use fnaction_api::file::{FileMetadata, UploadFileRequest};
use fnaction_api::function::{CreateFunctionRequest, Function, FunctionError, FunctionStatus};
use fnaction_api::login::LoginStatus;
use fnaction_api::schedule::{CreateScheduleRequest, FunctionSchedule};

pub const FAILURE_TRACE: &str = "Traceback (most recent call last):\nModuleNotFoundError: No module named 'numpyy'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RetrieveFunction(String),
    CreateFunction(String),
    DeleteFunction(String),
    RetrieveFile(String),
    UploadFile(String),
    DeleteFile(String),
    RetrieveDataSet(String),
    ListSchedules(String),
    CreateSchedule(String),
    DeleteSchedule(i64),
}

#[derive(Default)]
pub struct MockState {
    pub calls: Vec<Call>,
    pub functions: HashMap<String, Function>,
    pub files: HashMap<String, FileMetadata>,
    pub file_contents: HashMap<String, Vec<u8>>,
    pub data_sets: HashMap<String, DataSet>,
    pub schedules: Vec<FunctionSchedule>,
    pub create_requests: Vec<CreateFunctionRequest>,
    /// Statuses reported by successive retrieves of an existing function;
    /// the last one sticks.
    pub status_script: VecDeque<FunctionStatus>,
    /// Errors returned by successive function creates.
    pub create_errors: VecDeque<ApiError>,
    /// If set, a create that fails still registers the function, as when
    /// the confirmation is lost on the way back.
    pub register_on_create_error: bool,
    pub upload_errors: VecDeque<ApiError>,
    /// If set, an upload that fails still leaves the file metadata behind,
    /// as when the bytes cannot be sent after the file was created.
    pub store_on_upload_error: bool,
    pub upload_without_id: bool,
    pub file_delete_error: Option<ApiError>,
    pub data_set_error: Option<ApiError>,
    pub schedule_create_error: Option<ApiError>,
    /// Number of successful schedule creates before `schedule_create_error` fires.
    pub schedule_create_error_after: Option<usize>,
    schedule_creates: usize,
    next_id: i64,
}

impl MockState {
    fn new_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn new_function(id: i64, external_id: &str, file_id: i64, status: FunctionStatus) -> Function {
    Function {
        id,
        name: external_id.to_string(),
        external_id: Some(external_id.to_string()),
        file_id,
        function_path: Some(String::from("handler.py")),
        status,
        owner: None,
        cpu: None,
        memory: None,
        error: None,
    }
}

#[derive(Clone, Default)]
pub struct MockPlatform {
    state: std::sync::Arc<std::sync::Mutex<MockState>>,
}

impl MockPlatform {
    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn add_function(&self, external_id: &str, status: FunctionStatus) {
        let mut state = self.state();
        let id = state.new_id();
        state.functions.insert(external_id.to_string(), new_function(id, external_id, 0, status));
    }

    pub fn script_statuses(&self, statuses: Vec<FunctionStatus>) {
        self.state().status_script = statuses.into();
    }

    pub fn functions(&self) -> HashMap<String, Function> {
        self.state().functions.clone()
    }

    pub fn add_file(&self, external_id: &str, data_set_id: Option<i64>) {
        let mut state = self.state();
        let id = state.new_id();
        state.files.insert(
            external_id.to_string(),
            FileMetadata {
                id: Some(id),
                name: external_id.to_string(),
                external_id: Some(external_id.to_string()),
                data_set_id,
                upload_url: None,
                uploaded: true,
            },
        );
    }

    pub fn files(&self) -> HashMap<String, FileMetadata> {
        self.state().files.clone()
    }

    pub fn file_content(&self, external_id: &str) -> Option<Vec<u8>> {
        self.state().file_contents.get(external_id).cloned()
    }

    pub fn add_data_set(&self, external_id: &str, id: i64, write_protected: bool) {
        self.state().data_sets.insert(
            external_id.to_string(),
            DataSet {
                id,
                external_id: Some(external_id.to_string()),
                write_protected,
            },
        );
    }

    pub fn add_schedule(&self, function_external_id: &str, name: &str, cron: &str) -> i64 {
        let mut state = self.state();
        let id = state.new_id();
        state.schedules.push(FunctionSchedule {
            id,
            name: name.to_string(),
            function_external_id: Some(function_external_id.to_string()),
            cron_expression: cron.to_string(),
            data: None,
        });
        id
    }

    pub fn schedules_of(&self, function_external_id: &str) -> Vec<FunctionSchedule> {
        self.state()
            .schedules
            .iter()
            .filter(|s| s.function_external_id.as_deref() == Some(function_external_id))
            .cloned()
            .collect()
    }

    pub fn artifact_store(&self) -> crate::artifact_store::ArtifactStore {
        crate::artifact_store::ArtifactStore::new(Box::new(MockFiles { platform: self.clone() }), Box::new(MockDataSets { platform: self.clone() }))
    }

    pub fn function_lifecycle(&self) -> crate::function_lifecycle::FunctionLifecycle {
        crate::function_lifecycle::FunctionLifecycle::new(Box::new(MockFunctions { platform: self.clone() }))
    }

    pub fn schedule_reconciler(&self) -> crate::schedule_reconciler::ScheduleReconciler {
        crate::schedule_reconciler::ScheduleReconciler::new(Box::new(MockSchedules { platform: self.clone() }))
    }
}

impl fnaction_api::platform::PlatformAPI for MockPlatform {
    fn functions_api(&mut self) -> Box<dyn fnaction_api::function::FunctionsAPI> {
        Box::new(MockFunctions { platform: self.clone() })
    }

    fn files_api(&mut self) -> Box<dyn fnaction_api::file::FilesAPI> {
        Box::new(MockFiles { platform: self.clone() })
    }

    fn data_sets_api(&mut self) -> Box<dyn fnaction_api::data_set::DataSetsAPI> {
        Box::new(MockDataSets { platform: self.clone() })
    }

    fn schedules_api(&mut self) -> Box<dyn fnaction_api::schedule::SchedulesAPI> {
        Box::new(MockSchedules { platform: self.clone() })
    }

    fn login_api(&mut self) -> Box<dyn fnaction_api::login::LoginAPI> {
        Box::new(MockLogin {})
    }
}

#[derive(Clone)]
struct MockFunctions {
    platform: MockPlatform,
}

#[async_trait::async_trait]
impl fnaction_api::function::FunctionsAPI for MockFunctions {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<Function>> {
        let mut guard = self.platform.state();
        let state = &mut *guard;
        state.calls.push(Call::RetrieveFunction(external_id.to_string()));
        let function = match state.functions.get_mut(external_id) {
            Some(function) => function,
            None => return Ok(None),
        };
        if let Some(status) = state.status_script.pop_front() {
            if state.status_script.is_empty() {
                state.status_script.push_back(status.clone());
            }
            if status == FunctionStatus::Failed {
                function.error = Some(FunctionError {
                    code: Some(500),
                    message: Some(String::from("deployment failed")),
                    trace: Some(FAILURE_TRACE.to_string()),
                });
            }
            function.status = status;
        }
        Ok(Some(function.clone()))
    }

    async fn create(&mut self, request: CreateFunctionRequest) -> anyhow::Result<Function> {
        let mut state = self.platform.state();
        state.calls.push(Call::CreateFunction(request.external_id.clone()));
        state.create_requests.push(request.clone());
        let id = state.new_id();
        let function = new_function(id, &request.external_id, request.file_id, FunctionStatus::Queued);
        if let Some(err) = state.create_errors.pop_front() {
            if state.register_on_create_error {
                state.functions.insert(request.external_id.clone(), function);
            }
            return Err(err.into());
        }
        if state.functions.contains_key(&request.external_id) {
            return Err(ApiError::remote(409, "Function externalId duplicated").into());
        }
        state.functions.insert(request.external_id.clone(), function.clone());
        Ok(function)
    }

    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()> {
        let mut state = self.platform.state();
        state.calls.push(Call::DeleteFunction(external_id.to_string()));
        state.functions.remove(external_id);
        Ok(())
    }
}

#[derive(Clone)]
struct MockFiles {
    platform: MockPlatform,
}

#[async_trait::async_trait]
impl fnaction_api::file::FilesAPI for MockFiles {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<FileMetadata>> {
        let mut state = self.platform.state();
        state.calls.push(Call::RetrieveFile(external_id.to_string()));
        Ok(state.files.get(external_id).cloned())
    }

    async fn upload_bytes(&mut self, request: UploadFileRequest, content: Vec<u8>) -> anyhow::Result<FileMetadata> {
        let mut state = self.platform.state();
        state.calls.push(Call::UploadFile(request.external_id.clone()));
        let upload_error = match (state.upload_errors.pop_front(), state.store_on_upload_error) {
            (Some(err), false) => return Err(err.into()),
            (upload_error, _) => upload_error,
        };
        let id = state.new_id();
        let metadata = FileMetadata {
            id: if state.upload_without_id { None } else { Some(id) },
            name: request.name.clone(),
            external_id: Some(request.external_id.clone()),
            data_set_id: request.data_set_id,
            upload_url: None,
            uploaded: true,
        };
        state.files.insert(request.external_id.clone(), metadata.clone());
        state.file_contents.insert(request.external_id, content);
        match upload_error {
            Some(err) => Err(err.into()),
            None => Ok(metadata),
        }
    }

    async fn delete(&mut self, external_id: &str) -> anyhow::Result<()> {
        let mut state = self.platform.state();
        state.calls.push(Call::DeleteFile(external_id.to_string()));
        if let Some(err) = state.file_delete_error.take() {
            return Err(err.into());
        }
        state.files.remove(external_id);
        state.file_contents.remove(external_id);
        Ok(())
    }
}

#[derive(Clone)]
struct MockDataSets {
    platform: MockPlatform,
}

#[async_trait::async_trait]
impl fnaction_api::data_set::DataSetsAPI for MockDataSets {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<DataSet>> {
        let mut state = self.platform.state();
        state.calls.push(Call::RetrieveDataSet(external_id.to_string()));
        if let Some(err) = state.data_set_error.take() {
            return Err(err.into());
        }
        Ok(state.data_sets.get(external_id).cloned())
    }
}

#[derive(Clone)]
struct MockSchedules {
    platform: MockPlatform,
}

#[async_trait::async_trait]
impl fnaction_api::schedule::SchedulesAPI for MockSchedules {
    async fn list(&mut self, function_external_id: &str) -> anyhow::Result<Vec<FunctionSchedule>> {
        self.platform.state().calls.push(Call::ListSchedules(function_external_id.to_string()));
        Ok(self.platform.schedules_of(function_external_id))
    }

    async fn create(&mut self, request: CreateScheduleRequest) -> anyhow::Result<FunctionSchedule> {
        let mut state = self.platform.state();
        state.calls.push(Call::CreateSchedule(request.name.clone()));
        let fail = match state.schedule_create_error_after {
            Some(after) => state.schedule_creates >= after,
            None => true,
        };
        if fail {
            if let Some(err) = state.schedule_create_error.take() {
                state.schedule_create_error_after = None;
                return Err(err.into());
            }
        }
        state.schedule_creates += 1;
        let id = state.new_id();
        let schedule = FunctionSchedule {
            id,
            name: request.name,
            function_external_id: Some(request.function_external_id),
            cron_expression: request.cron_expression,
            data: request.data,
        };
        state.schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn delete(&mut self, id: i64) -> anyhow::Result<()> {
        let mut state = self.platform.state();
        state.calls.push(Call::DeleteSchedule(id));
        state.schedules.retain(|s| s.id != id);
        Ok(())
    }
}

struct MockLogin {}

#[async_trait::async_trait]
impl fnaction_api::login::LoginAPI for MockLogin {
    async fn status(&mut self) -> anyhow::Result<LoginStatus> {
        Ok(LoginStatus {
            user: String::from("ci"),
            logged_in: true,
            project: String::from("proj"),
            project_id: Some(1),
        })
    }
}
