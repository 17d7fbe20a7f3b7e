// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

pub type ScheduleData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSchedule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub function_external_id: Option<String>,
    pub cron_expression: String,
    #[serde(default)]
    pub data: Option<ScheduleData>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub name: String,
    pub function_external_id: String,
    pub cron_expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScheduleData>,
}

#[async_trait::async_trait]
pub trait SchedulesAPI: SchedulesAPIClone + Send + Sync {
    /// List every schedule bound to the given function external ID,
    /// whether or not the function itself still exists.
    async fn list(&mut self, function_external_id: &str) -> anyhow::Result<Vec<FunctionSchedule>>;
    async fn create(&mut self, request: CreateScheduleRequest) -> anyhow::Result<FunctionSchedule>;
    async fn delete(&mut self, id: i64) -> anyhow::Result<()>;
}

pub trait SchedulesAPIClone {
    fn clone_box(&self) -> Box<dyn SchedulesAPI>;
}
impl<T> SchedulesAPIClone for T
where
    T: 'static + SchedulesAPI + Clone,
{
    fn clone_box(&self) -> Box<dyn SchedulesAPI> {
        Box::new(self.clone())
    }
}
impl Clone for Box<dyn SchedulesAPI> {
    fn clone(&self) -> Box<dyn SchedulesAPI> {
        self.clone_box()
    }
}
