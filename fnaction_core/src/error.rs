// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Failure of a deployment step.
///
/// Only [`DeployError::Timeout`], [`DeployError::Conflict`] and
/// [`DeployError::TransientIo`] are retried by the orchestrator, along with a
/// [`DeployError::Cleanup`] wrapping one of them. Everything
/// else is fatal.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("invalid configuration: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{message}")]
    Permission { capability: String, message: String },
    #[error("Function {identity} did not deploy within {} seconds.", .timeout.as_secs())]
    Timeout { identity: String, timeout: std::time::Duration },
    #[error("Deployment of function {identity} failed: {trace}")]
    Failed { identity: String, trace: String },
    /// The identity was already registered, most likely by an earlier attempt
    /// whose confirmation got lost.
    #[error("{0}")]
    Conflict(String),
    #[error("I/O failure: {0}")]
    TransientIo(String),
    #[error(transparent)]
    Api(anyhow::Error),
    /// A failed attempt whose leftovers could not be removed. Classified
    /// like the attempt's own error.
    #[error("{error} (cleanup of the failed attempt also failed: {cleanup})")]
    Cleanup { error: Box<DeployError>, cleanup: String },
}

impl DeployError {
    /// Wrap an error returned by a remote call, telling transport failures
    /// apart from rejections by the platform.
    pub fn remote(err: anyhow::Error) -> Self {
        match fnaction_api::common::api_error(&err) {
            Some(api_err) if api_err.is_transport() => DeployError::TransientIo(err.to_string()),
            _ => DeployError::Api(err),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            DeployError::Cleanup { error, .. } => error.is_retryable(),
            _ => matches!(self, DeployError::Timeout { .. } | DeployError::Conflict(_) | DeployError::TransientIo(_)),
        }
    }

    /// The error of the attempt itself, without any cleanup failure.
    pub fn attempt_error(&self) -> &DeployError {
        match self {
            DeployError::Cleanup { error, .. } => error.attempt_error(),
            _ => self,
        }
    }

    /// True if the platform refused to register the function because its
    /// identity is already taken.
    pub fn is_duplicated(&self) -> bool {
        match self {
            DeployError::Api(err) => fnaction_api::common::api_error(err).map_or(false, |api_err| api_err.is_duplicated()),
            _ => false,
        }
    }
}

impl From<std::io::Error> for DeployError {
    fn from(err: std::io::Error) -> Self {
        DeployError::TransientIo(err.to_string())
    }
}

impl From<walkdir::Error> for DeployError {
    fn from(err: walkdir::Error) -> Self {
        DeployError::TransientIo(err.to_string())
    }
}

impl From<zip::result::ZipError> for DeployError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io_err) => DeployError::TransientIo(io_err.to_string()),
            other => DeployError::Validation(format!("cannot build the archive: {}", other)),
        }
    }
}

#[cfg(test)]
mod test {
    use fnaction_api::common::ApiError;

    use super::*;

    #[test]
    fn test_classification() {
        assert!(DeployError::Timeout {
            identity: "fn".to_string(),
            timeout: std::time::Duration::from_secs(1),
        }
        .is_retryable());
        assert!(DeployError::Conflict("dup".to_string()).is_retryable());
        assert!(DeployError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk gone")).is_retryable());

        assert!(!DeployError::Validation("bad".to_string()).is_retryable());
        assert!(!DeployError::NotFound("gone".to_string()).is_retryable());
        assert!(!DeployError::Failed {
            identity: "fn".to_string(),
            trace: "boom".to_string(),
        }
        .is_retryable());
        assert!(!DeployError::remote(anyhow::Error::new(ApiError::remote(400, "bad request"))).is_retryable());
    }

    #[test]
    fn test_remote_transport_is_transient() {
        let err = DeployError::remote(anyhow::Error::new(ApiError::Transport("connection reset".to_string())));
        assert!(matches!(err, DeployError::TransientIo(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_duplicated() {
        let err = DeployError::remote(anyhow::Error::new(ApiError::remote(409, "Function externalId duplicated")));
        assert!(err.is_duplicated());
        assert!(!err.is_retryable());
        assert!(!DeployError::remote(anyhow::anyhow!("Function externalId duplicated")).is_duplicated());
    }

    #[test]
    fn test_messages_are_verbatim() {
        let err = DeployError::remote(anyhow::Error::new(ApiError::remote(400, "Invalid function path")));
        assert_eq!(err.to_string(), "Invalid function path | code: 400 | X-Request-ID: n/a");
        let err = DeployError::Failed {
            identity: "proj/fn1".to_string(),
            trace: "Traceback (most recent call last): boom".to_string(),
        };
        assert!(err.to_string().ends_with("Traceback (most recent call last): boom"));
    }

    #[test]
    fn test_cleanup_keeps_attempt_error() {
        let failed = DeployError::Cleanup {
            error: Box::new(DeployError::Failed {
                identity: "proj/fn1".to_string(),
                trace: "ModuleNotFoundError".to_string(),
            }),
            cleanup: "connection reset".to_string(),
        };
        assert!(!failed.is_retryable());
        assert!(failed.to_string().contains("ModuleNotFoundError"));
        assert!(failed.to_string().contains("connection reset"));
        assert!(matches!(failed.attempt_error(), DeployError::Failed { .. }));

        let timeout = DeployError::Cleanup {
            error: Box::new(DeployError::Timeout {
                identity: "proj/fn1".to_string(),
                timeout: std::time::Duration::from_secs(1),
            }),
            cleanup: "Forbidden | code: 403 | X-Request-ID: n/a".to_string(),
        };
        assert!(timeout.is_retryable());
    }
}
