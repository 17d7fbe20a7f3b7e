// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! Log backend turning records into GitHub Actions workflow commands.

use std::io::Write;

/// Install the logger. The filter defaults to `info` and follows `RUST_LOG`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", workflow_command(record.level(), &record.args().to_string())))
        .init();
}

pub fn workflow_command(level: log::Level, message: &str) -> String {
    match level {
        log::Level::Error => format!("::error::{}", escape(message)),
        log::Level::Warn => format!("::warning::{}", escape(message)),
        log::Level::Info => message.to_string(),
        log::Level::Debug | log::Level::Trace => format!("::debug::{}", escape(message)),
    }
}

// Workflow commands end at the first newline.
fn escape(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}
