// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use std::io::Write;

pub const FUNCTION_EXTERNAL_ID: &str = "function_external_id";

/// Publish a step output, through the file named by `GITHUB_OUTPUT` if set,
/// otherwise with the legacy `set-output` command on stdout.
pub fn set_output(name: &str, value: &str) -> anyhow::Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) if !path.is_empty() => append_output(std::path::Path::new(&path), name, value),
        _ => {
            println!("{}", legacy_output(name, value));
            Ok(())
        }
    }
}

pub fn append_output(path: &std::path::Path, name: &str, value: &str) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}={}", name, value)?;
    Ok(())
}

pub fn legacy_output(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, value)
}
