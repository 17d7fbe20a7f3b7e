// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Error returned by the remote platform, or by the transport used to reach it.
///
/// Absence of a resource is never reported through this type: lookups
/// return `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{message} | code: {code} | X-Request-ID: {}", .request_id.as_deref().unwrap_or("n/a"))]
    Remote {
        code: u16,
        message: String,
        request_id: Option<String>,
    },
    #[error("communication error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn remote(code: u16, message: &str) -> Self {
        ApiError::Remote {
            code,
            message: message.to_string(),
            request_id: None,
        }
    }

    /// True if the platform refused a create because the external ID is taken.
    pub fn is_duplicated(&self) -> bool {
        match self {
            ApiError::Remote { message, .. } => message.contains("externalId duplicated"),
            ApiError::Transport(_) => false,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::Remote { code, .. } => Some(*code),
            ApiError::Transport(_) => None,
        }
    }
}

/// Find the [`ApiError`] inside an error chain, if any.
pub fn api_error(err: &anyhow::Error) -> Option<&ApiError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ApiError>())
}
