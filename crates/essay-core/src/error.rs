//! Error types for the essay pipeline path registry.
//!
//! Configuration problems are fatal at startup: a registry is either built
//! completely or not at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the essay-core library.
#[derive(Debug, Error)]
pub enum EssayError {
    // Configuration errors
    #[error("Missing configuration field: {field}")]
    MissingConfigField { field: &'static str },

    #[error("Validation error for {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Registry errors
    #[error("Path registry has not been initialized")]
    RegistryUninitialized,

    #[error("Path registry is already initialized with different values")]
    RegistryConflict,

    #[error("Unknown path name: {0}")]
    UnknownPathKey(String),
}

/// Result type alias for essay-core operations.
pub type Result<T> = std::result::Result<T, EssayError>;

impl From<std::io::Error> for EssayError {
    fn from(err: std::io::Error) -> Self {
        EssayError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for EssayError {
    fn from(err: serde_json::Error) -> Self {
        EssayError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl EssayError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        EssayError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Check if this error comes from missing or unusable configuration.
    ///
    /// These abort startup; everything else is an operational failure.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            EssayError::MissingConfigField { .. }
                | EssayError::Validation { .. }
                | EssayError::Config { .. }
                | EssayError::Json { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = EssayError::MissingConfigField {
            field: "data_version",
        };
        assert_eq!(err.to_string(), "Missing configuration field: data_version");
        assert!(err.is_config_error());
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = EssayError::io_with_path(io, "output/model");
        match &err {
            EssayError::Io { path, source, .. } => {
                assert_eq!(path.as_deref(), Some(std::path::Path::new("output/model")));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_registry_errors_are_not_config_errors() {
        assert!(!EssayError::RegistryUninitialized.is_config_error());
        assert!(!EssayError::RegistryConflict.is_config_error());
        assert_eq!(
            EssayError::UnknownPathKey("FOO".into()).to_string(),
            "Unknown path name: FOO"
        );
    }
}
