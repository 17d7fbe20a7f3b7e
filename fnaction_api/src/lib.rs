// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

pub mod common;
pub mod data_set;
pub mod file;
pub mod function;
#[cfg(feature = "http_impl")]
pub mod http_impl;
pub mod login;
pub mod platform;
pub mod schedule;
