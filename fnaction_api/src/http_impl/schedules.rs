// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use super::common::{HttpClient, IdRef, Items};
use crate::schedule::{CreateScheduleRequest, FunctionSchedule};

const LIST_LIMIT: i64 = 10_000;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleFilter {
    function_external_id: String,
}

#[derive(serde::Serialize)]
struct ListSchedulesRequest {
    filter: ScheduleFilter,
    limit: i64,
}

#[derive(Clone)]
pub struct SchedulesClient {
    client: HttpClient,
}

impl SchedulesClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl crate::schedule::SchedulesAPI for SchedulesClient {
    async fn list(&mut self, function_external_id: &str) -> anyhow::Result<Vec<FunctionSchedule>> {
        let request = ListSchedulesRequest {
            filter: ScheduleFilter {
                function_external_id: function_external_id.to_string(),
            },
            limit: LIST_LIMIT,
        };
        let res: Items<FunctionSchedule> = self.client.post(&self.client.project_url("functions/schedules/list"), &request).await?;
        Ok(res.items)
    }

    async fn create(&mut self, request: CreateScheduleRequest) -> anyhow::Result<FunctionSchedule> {
        let name = request.name.clone();
        let res: Items<FunctionSchedule> = self
            .client
            .post(&self.client.project_url("functions/schedules"), &Items::single(request))
            .await?;
        match res.items.into_iter().next() {
            Some(schedule) => Ok(schedule),
            None => Err(anyhow::anyhow!("empty response when creating schedule {}", name)),
        }
    }

    async fn delete(&mut self, id: i64) -> anyhow::Result<()> {
        self.client
            .post_ignore(&self.client.project_url("functions/schedules/delete"), &Items::single(IdRef { id }))
            .await
    }
}
