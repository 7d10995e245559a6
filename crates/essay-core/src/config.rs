//! Pipeline configuration and the fixed registry layout.
//!
//! The registry only needs three run parameters from the training
//! configuration. They can come from a JSON file, from `ESSAY_*` environment
//! variables, or from explicit values; sources are layered with
//! [`ConfigSource::merge`] and then resolved into a [`PipelineConfig`].

use crate::error::{EssayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::env::VarError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed literals and templates the registry is built from.
pub struct RegistryLayout;

impl RegistryLayout {
    pub const ROOT_DATA: &'static str = "data";
    pub const TRAIN_CSV: &'static str = "data/processed/train.csv";
    pub const TEST_CSV: &'static str = "data/processed/test.csv";
    pub const COMPETITION_TRAIN_CSV: &'static str = "data/competition-data/train.csv";
    pub const COMPETITION_TEST_CSV: &'static str = "data/competition-data/test.csv";
    pub const PERSUADE_CSV: &'static str =
        "data/external/persuade_2.0_human_scores_demo_id_github.csv";

    // Templates for derived entries
    pub const DATA_LOADER_PREFIX: &'static str = "data/dataloader";
    pub const OUTPUT_ROOT: &'static str = "output";
    pub const TOKENIZER_PREFIX: &'static str = "tokenizer_v";

    // Pinned checkpoint, independent of the configured model
    pub const BEST_MODEL: &'static str = "output/microsoft/deberta-v3-base/best_model";
}

/// Where configuration is looked up.
pub struct ConfigLocations;

impl ConfigLocations {
    pub const CONFIG_FILENAME: &'static str = "pipeline.json";
    pub const APP_CONFIG_DIR_NAME: &'static str = "essay-pipeline";
    pub const ENV_DATA_VERSION: &'static str = "ESSAY_DATA_VERSION";
    pub const ENV_MODEL: &'static str = "ESSAY_MODEL";
    pub const ENV_TOKENIZER_VERSION: &'static str = "ESSAY_TOKENIZER_VERSION";
}

/// Run parameters the path registry derives its entries from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Dataset preparation version, e.g. `"3"`.
    pub data_version: String,
    /// Model identifier, e.g. `"microsoft/deberta-v3-base"`.
    pub model: String,
    /// Tokenizer version, e.g. `"1"`.
    pub tokenizer_version: String,
}

impl PipelineConfig {
    pub fn new(
        data_version: impl Into<String>,
        model: impl Into<String>,
        tokenizer_version: impl Into<String>,
    ) -> Self {
        Self {
            data_version: data_version.into(),
            model: model.into(),
            tokenizer_version: tokenizer_version.into(),
        }
    }
}

/// A partially specified configuration source.
///
/// Unset fields fall through to lower-precedence sources when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    pub data_version: Option<String>,
    pub model: Option<String>,
    pub tokenizer_version: Option<String>,
}

impl ConfigSource {
    /// Read the three fields from a JSON object on disk.
    ///
    /// Other keys in the file are ignored, so the full training configuration
    /// can be used directly. Integer values are accepted and normalized to
    /// their decimal form.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| EssayError::io_with_path(e, path))?;
        let source = Self::from_json_str(&text).map_err(|e| match e {
            EssayError::Config { message } => EssayError::Config {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(source)
    }

    /// Parse a JSON document into a source.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let object = value.as_object().ok_or_else(|| EssayError::Config {
            message: "expected a JSON object at the top level".to_string(),
        })?;

        Ok(Self {
            data_version: json_field(object, "data_version")?,
            model: json_field(object, "model")?,
            tokenizer_version: json_field(object, "tokenizer_version")?,
        })
    }

    /// Read the `ESSAY_*` environment variables.
    ///
    /// A variable that is set but not valid UTF-8 is a configuration error,
    /// not an unset field.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data_version: env_value(
                ConfigLocations::ENV_DATA_VERSION,
                std::env::var(ConfigLocations::ENV_DATA_VERSION),
            )?,
            model: env_value(
                ConfigLocations::ENV_MODEL,
                std::env::var(ConfigLocations::ENV_MODEL),
            )?,
            tokenizer_version: env_value(
                ConfigLocations::ENV_TOKENIZER_VERSION,
                std::env::var(ConfigLocations::ENV_TOKENIZER_VERSION),
            )?,
        })
    }

    /// Read the `ESSAY_*` variables through a custom lookup.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            data_version: lookup(ConfigLocations::ENV_DATA_VERSION),
            model: lookup(ConfigLocations::ENV_MODEL),
            tokenizer_version: lookup(ConfigLocations::ENV_TOKENIZER_VERSION),
        }
    }

    /// Layer `higher` on top of `self`; fields set in `higher` win.
    pub fn merge(self, higher: ConfigSource) -> ConfigSource {
        ConfigSource {
            data_version: higher.data_version.or(self.data_version),
            model: higher.model.or(self.model),
            tokenizer_version: higher.tokenizer_version.or(self.tokenizer_version),
        }
    }

    /// Turn the source into a complete configuration.
    ///
    /// Values are kept verbatim. An absent or blank field is reported as
    /// [`EssayError::MissingConfigField`], checking `data_version`, `model`
    /// and `tokenizer_version` in that order.
    pub fn resolve(self) -> Result<PipelineConfig> {
        Ok(PipelineConfig {
            data_version: required(self.data_version, "data_version")?,
            model: required(self.model, "model")?,
            tokenizer_version: required(self.tokenizer_version, "tokenizer_version")?,
        })
    }
}

impl From<PipelineConfig> for ConfigSource {
    fn from(config: PipelineConfig) -> Self {
        Self {
            data_version: Some(config.data_version),
            model: Some(config.model),
            tokenizer_version: Some(config.tokenizer_version),
        }
    }
}

/// Find a configuration file when none was given explicitly.
///
/// Checks `<project_root>/pipeline.json`, then
/// `<user config dir>/essay-pipeline/pipeline.json`.
pub fn discover_config_file(project_root: &Path) -> Option<PathBuf> {
    let local = project_root.join(ConfigLocations::CONFIG_FILENAME);
    let user = dirs::config_dir().map(|dir| {
        dir.join(ConfigLocations::APP_CONFIG_DIR_NAME)
            .join(ConfigLocations::CONFIG_FILENAME)
    });

    std::iter::once(local)
        .chain(user)
        .find(|candidate| candidate.is_file())
}

fn json_field(object: &Map<String, Value>, field: &'static str) -> Result<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => Ok(Some(n.to_string())),
        Some(other) => Err(EssayError::Config {
            message: format!("field '{}' must be a string or an integer, got {}", field, other),
        }),
    }
}

fn env_value(
    name: &str,
    value: std::result::Result<String, VarError>,
) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(EssayError::Config {
            message: format!("{} is not valid UTF-8: {:?}", name, raw),
        }),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(EssayError::MissingConfigField { field }),
    }
}
