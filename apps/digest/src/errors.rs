use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to turn snapshot text into a `Snapshot`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed snapshot JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Pipeline-level error. Every variant is fatal and aborts the run.
///
/// Generation failures are deliberately absent: the pipeline degrades those
/// into `GenerationOutcome::Failed` instead of propagating them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Snapshot decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Io { .. } => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_converts_into_app_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = DecodeError::from(json_err).into();
        assert_eq!(err.code(), "DECODE_ERROR");
        assert!(err.to_string().starts_with("Snapshot decode error: Malformed snapshot JSON"));
    }

    #[test]
    fn test_io_error_message_names_the_path() {
        let err = AppError::io(
            Path::new("/tmp/missing.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("/tmp/missing.json"));
        assert!(err.to_string().contains("no such file"));
    }
}
