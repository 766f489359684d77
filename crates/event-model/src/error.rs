//! Errors raised while parsing or validating model records.

use retouch_common::error::RetouchError;

/// Errors that can occur when building model records.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid geometry: {message}")]
    Geometry { message: String },
}

impl ModelError {
    pub(crate) fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry {
            message: msg.into(),
        }
    }
}

impl From<ModelError> for RetouchError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Parse { line, message } => RetouchError::malformed(line, message),
            ModelError::Geometry { message } => RetouchError::geometry(message),
        }
    }
}
