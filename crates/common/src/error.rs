//! Error types shared across retouch crates.

use std::path::PathBuf;

/// Top-level error type for retouch operations.
#[derive(Debug, thiserror::Error)]
pub enum RetouchError {
    #[error("Malformed input at line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    #[error("Calibration error: {message}")]
    Calibration { message: String },

    #[error("Device geometry error: {message}")]
    Geometry { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Device probe error: {message}")]
    Probe { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using RetouchError.
pub type RetouchResult<T> = Result<T, RetouchError>;

impl RetouchError {
    pub fn malformed(line: usize, msg: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: msg.into(),
        }
    }

    pub fn calibration(msg: impl Into<String>) -> Self {
        Self::Calibration {
            message: msg.into(),
        }
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn probe(msg: impl Into<String>) -> Self {
        Self::Probe {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_line() {
        let err = RetouchError::malformed(7, "expected 4 tokens, found 2");
        assert_eq!(
            err.to_string(),
            "Malformed input at line 7: expected 4 tokens, found 2"
        );
    }

    #[test]
    fn test_config_message() {
        let err = RetouchError::config("invalid device profile dev.json: rotated mismatch");
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid device profile dev.json: rotated mismatch"
        );
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RetouchError = io.into();
        assert_eq!(err.to_string(), "gone");
    }
}
