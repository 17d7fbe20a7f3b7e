// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Entry point to the remote platform, handing out one client per resource type.
pub trait PlatformAPI: Send + Sync {
    fn functions_api(&mut self) -> Box<dyn crate::function::FunctionsAPI>;
    fn files_api(&mut self) -> Box<dyn crate::file::FilesAPI>;
    fn data_sets_api(&mut self) -> Box<dyn crate::data_set::DataSetsAPI>;
    fn schedules_api(&mut self) -> Box<dyn crate::schedule::SchedulesAPI>;
    fn login_api(&mut self) -> Box<dyn crate::login::LoginAPI>;
}
