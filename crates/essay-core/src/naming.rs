//! Optional checks for configuration values that end up inside derived paths.
//!
//! The registry interpolates values as given. Callers that want every derived
//! entry to stay under the project root run [`validate_config`] themselves.

use crate::config::PipelineConfig;
use crate::error::{EssayError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum length for version identifiers.
const MAX_VERSION_LENGTH: usize = 64;

/// Maximum length for model identifiers.
const MAX_MODEL_ID_LENGTH: usize = 256;

/// A single path segment: starts alphanumeric, then alphanumerics, `.`, `_` or `-`.
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());

/// Check a version identifier such as `data_version` or `tokenizer_version`.
///
/// # Examples
///
/// ```
/// use essay_core::naming::validate_version;
///
/// assert!(validate_version("data_version", "3").is_ok());
/// assert!(validate_version("data_version", "2.1-rc1").is_ok());
/// assert!(validate_version("data_version", "../3").is_err());
/// ```
pub fn validate_version(field: &'static str, value: &str) -> Result<()> {
    if value.len() > MAX_VERSION_LENGTH {
        return Err(EssayError::Validation {
            field,
            message: format!("longer than {} characters", MAX_VERSION_LENGTH),
        });
    }
    if !SEGMENT.is_match(value) {
        return Err(EssayError::Validation {
            field,
            message: format!("'{}' is not a plain path segment", value),
        });
    }
    Ok(())
}

/// Check a model identifier such as `microsoft/deberta-v3-base`.
///
/// The identifier may contain `/`-separated namespaces, but every segment must
/// be a plain name. Absolute paths, `.`/`..`, empty segments, backslashes
/// and drive prefixes are rejected.
pub fn validate_model_id(value: &str) -> Result<()> {
    if value.len() > MAX_MODEL_ID_LENGTH {
        return Err(EssayError::Validation {
            field: "model",
            message: format!("longer than {} characters", MAX_MODEL_ID_LENGTH),
        });
    }
    if let Some(bad) = value.split('/').find(|segment| !SEGMENT.is_match(segment)) {
        return Err(EssayError::Validation {
            field: "model",
            message: format!("'{}' contains an invalid segment '{}'", value, bad),
        });
    }
    Ok(())
}

/// Check all three values of a configuration.
///
/// Reports the first failing field, in `data_version`, `model`,
/// `tokenizer_version` order.
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    validate_version("data_version", &config.data_version)?;
    validate_model_id(&config.model)?;
    validate_version("tokenizer_version", &config.tokenizer_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions() {
        for ok in ["1", "3", "v2", "2024.05", "1_a-b"] {
            assert!(validate_version("tokenizer_version", ok).is_ok(), "{ok}");
        }
        for bad in ["", ".", "..", "-1", "1/2", "1\\2", "a b"] {
            assert!(validate_version("tokenizer_version", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_version_length_limit() {
        let long = "1".repeat(MAX_VERSION_LENGTH + 1);
        let err = validate_version("data_version", &long).unwrap_err();
        assert!(matches!(
            err,
            EssayError::Validation {
                field: "data_version",
                ..
            }
        ));
    }

    #[test]
    fn test_model_ids() {
        for ok in [
            "microsoft/deberta-v3-base",
            "deberta-v3-large",
            "org/team/model.v2",
        ] {
            assert!(validate_model_id(ok).is_ok(), "{ok}");
        }
        for bad in [
            "",
            "/abs/model",
            "microsoft//deberta",
            "microsoft/",
            "../escape",
            "microsoft/../../etc",
            "C:\\models\\x",
            "c:model",
        ] {
            assert!(validate_model_id(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_validate_config() {
        let config = PipelineConfig::new("3", "microsoft/deberta-v3-base", "1");
        assert!(validate_config(&config).is_ok());

        let config = PipelineConfig::new("3", "../../etc", "1");
        assert!(matches!(
            validate_config(&config),
            Err(EssayError::Validation { field: "model", .. })
        ));

        let config = PipelineConfig::new("3", "microsoft/deberta-v3-base", "1+cu118");
        assert!(matches!(
            validate_config(&config),
            Err(EssayError::Validation {
                field: "tokenizer_version",
                ..
            })
        ));
    }

    #[test]
    fn test_validation_does_not_gate_construction() {
        let config = PipelineConfig::new("v3 final", "my org/deberta base", "1");
        assert!(validate_config(&config).is_err());
        assert!(crate::registry::Paths::from_config(&config).is_ok());
    }
}
