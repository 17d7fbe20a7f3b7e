// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use fnaction_core::DeployError;

/// Parameters the platform may pass to the `handle` entry point.
pub const HANDLE_ARGS: [&str; 4] = ["data", "client", "secrets", "function_call_info"];

/// Reject a `handle` definition taking parameters the platform cannot provide.
///
/// A missing file or a file without `handle` passes.
pub fn check_handle_args(path: &std::path::Path) -> Result<(), DeployError> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    log::info!("Running checks on file '{}'", path.display());
    check_source(&source, &path.display().to_string())
}

fn check_source(source: &str, file: &str) -> Result<(), DeployError> {
    if let Some(params) = handle_definitions(source).into_iter().next() {
        let illegal: Vec<&str> = params
            .iter()
            .map(|param| param.as_str())
            .filter(|param| !HANDLE_ARGS.contains(param))
            .collect();
        if !illegal.is_empty() {
            let message = format!(
                "In file '{}', function 'handle' contained illegal args: {:?}. \
                 The function args must be a strict subset of: {:?} (ordering is not important)",
                file, illegal, HANDLE_ARGS
            );
            log::error!("{}", message);
            return Err(DeployError::Validation(message));
        }
    }
    Ok(())
}

/// Parameter names of every `def handle(...)`, whose signature may span lines.
fn handle_definitions(source: &str) -> Vec<Vec<String>> {
    let mut definitions = vec![];
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let trimmed = line.trim_start();
        let signature = trimmed.strip_prefix("async ").map(str::trim_start).unwrap_or(trimmed);
        let Some(rest) = signature.strip_prefix("def handle") else {
            continue;
        };
        let paren = rest.trim_start();
        if !paren.starts_with('(') {
            continue;
        }
        let open = start + line.len() - paren.len();
        if let Some(params) = parameters(&source[open + 1..]) {
            definitions.push(params);
        }
    }
    definitions
}

fn parameters(text: &str) -> Option<Vec<String>> {
    let mut depth = 0usize;
    let mut current = String::new();
    let mut params = vec![];
    for c in text.chars() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' if depth == 0 => {
                params.push(current);
                return Some(params.iter().filter_map(|param| parameter_name(param)).collect());
            }
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => params.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    None
}

// Variadic and positional-only markers are not named parameters.
fn parameter_name(param: &str) -> Option<String> {
    let name = param.split(|c| c == ':' || c == '=').next()?.trim();
    if name.is_empty() || name.starts_with('*') || name == "/" {
        None
    } else {
        Some(name.to_string())
    }
}
