// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Governance scope that files can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSet {
    pub id: i64,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub write_protected: bool,
}

#[async_trait::async_trait]
pub trait DataSetsAPI: DataSetsAPIClone + Send + Sync {
    async fn retrieve(&mut self, external_id: &str) -> anyhow::Result<Option<DataSet>>;
}

pub trait DataSetsAPIClone {
    fn clone_box(&self) -> Box<dyn DataSetsAPI>;
}
impl<T> DataSetsAPIClone for T
where
    T: 'static + DataSetsAPI + Clone,
{
    fn clone_box(&self) -> Box<dyn DataSetsAPI> {
        Box::new(self.clone())
    }
}
impl Clone for Box<dyn DataSetsAPI> {
    fn clone(&self) -> Box<dyn DataSetsAPI> {
        self.clone_box()
    }
}
