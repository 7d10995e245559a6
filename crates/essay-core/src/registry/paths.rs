//! The path registry value.
//!
//! [`Paths`] is built once from a [`PipelineConfig`] and never changes
//! afterwards. All entries are relative to the project root; nothing here
//! touches the filesystem.

use crate::config::{ConfigSource, PipelineConfig, RegistryLayout};
use crate::error::Result;
use crate::registry::key::PathKey;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every filesystem location the training pipeline refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paths {
    #[serde(rename = "ROOT_DATA_PATH")]
    root_data: PathBuf,
    #[serde(rename = "TRAIN_CSV_PATH")]
    train_csv: PathBuf,
    #[serde(rename = "TEST_CSV_PATH")]
    test_csv: PathBuf,
    #[serde(rename = "COMPETITION_TRAIN_CSV_PATH")]
    competition_train_csv: PathBuf,
    #[serde(rename = "COMPETITION_TEST_CSV_PATH")]
    competition_test_csv: PathBuf,
    #[serde(rename = "PERSUADE_CSV_PATH")]
    persuade_csv: PathBuf,
    #[serde(rename = "DATA_LOADER_PATH")]
    data_loader: PathBuf,
    #[serde(rename = "MODEL_OUTPUT_PATH")]
    model_output: PathBuf,
    #[serde(rename = "TOKENIZER_PATH")]
    tokenizer: PathBuf,
    #[serde(rename = "BEST_MODEL_PATH")]
    best_model: PathBuf,
}

impl Paths {
    /// Build the registry from a resolved configuration.
    ///
    /// Values are interpolated verbatim. Use
    /// [`naming::validate_config`](crate::naming::validate_config) to check
    /// that derived entries stay under the project root.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let model_output = PathBuf::from(format!(
            "{}/{}",
            RegistryLayout::OUTPUT_ROOT,
            config.model
        ));
        let tokenizer = model_output.join(format!(
            "{}{}",
            RegistryLayout::TOKENIZER_PREFIX,
            config.tokenizer_version
        ));

        let paths = Self {
            root_data: PathBuf::from(RegistryLayout::ROOT_DATA),
            train_csv: PathBuf::from(RegistryLayout::TRAIN_CSV),
            test_csv: PathBuf::from(RegistryLayout::TEST_CSV),
            competition_train_csv: PathBuf::from(RegistryLayout::COMPETITION_TRAIN_CSV),
            competition_test_csv: PathBuf::from(RegistryLayout::COMPETITION_TEST_CSV),
            persuade_csv: PathBuf::from(RegistryLayout::PERSUADE_CSV),
            data_loader: PathBuf::from(format!(
                "{}_v{}",
                RegistryLayout::DATA_LOADER_PREFIX,
                config.data_version
            )),
            model_output,
            tokenizer,
            best_model: PathBuf::from(RegistryLayout::BEST_MODEL),
        };

        debug!(
            data_loader = %paths.data_loader.display(),
            model_output = %paths.model_output.display(),
            tokenizer = %paths.tokenizer.display(),
            "Built path registry"
        );
        Ok(paths)
    }

    /// Resolve a configuration source and build the registry from it.
    pub fn build(source: &ConfigSource) -> Result<Self> {
        Self::from_config(&source.clone().resolve()?)
    }

    pub fn root_data(&self) -> &Path {
        &self.root_data
    }

    pub fn train_csv(&self) -> &Path {
        &self.train_csv
    }

    pub fn test_csv(&self) -> &Path {
        &self.test_csv
    }

    pub fn competition_train_csv(&self) -> &Path {
        &self.competition_train_csv
    }

    pub fn competition_test_csv(&self) -> &Path {
        &self.competition_test_csv
    }

    pub fn persuade_csv(&self) -> &Path {
        &self.persuade_csv
    }

    pub fn data_loader(&self) -> &Path {
        &self.data_loader
    }

    pub fn model_output(&self) -> &Path {
        &self.model_output
    }

    pub fn tokenizer(&self) -> &Path {
        &self.tokenizer
    }

    /// Pinned best checkpoint. Does not follow the configured model.
    pub fn best_model(&self) -> &Path {
        &self.best_model
    }

    /// Look up an entry by key.
    pub fn get(&self, key: PathKey) -> &Path {
        match key {
            PathKey::RootData => &self.root_data,
            PathKey::TrainCsv => &self.train_csv,
            PathKey::TestCsv => &self.test_csv,
            PathKey::CompetitionTrainCsv => &self.competition_train_csv,
            PathKey::CompetitionTestCsv => &self.competition_test_csv,
            PathKey::PersuadeCsv => &self.persuade_csv,
            PathKey::DataLoader => &self.data_loader,
            PathKey::ModelOutput => &self.model_output,
            PathKey::Tokenizer => &self.tokenizer,
            PathKey::BestModel => &self.best_model,
        }
    }

    /// All entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = (PathKey, &Path)> + '_ {
        PathKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// A copy with every entry placed under `root`.
    pub fn rooted_at(&self, root: &Path) -> Paths {
        Paths {
            root_data: root.join(&self.root_data),
            train_csv: root.join(&self.train_csv),
            test_csv: root.join(&self.test_csv),
            competition_train_csv: root.join(&self.competition_train_csv),
            competition_test_csv: root.join(&self.competition_test_csv),
            persuade_csv: root.join(&self.persuade_csv),
            data_loader: root.join(&self.data_loader),
            model_output: root.join(&self.model_output),
            tokenizer: root.join(&self.tokenizer),
            best_model: root.join(&self.best_model),
        }
    }
}

impl fmt::Display for Paths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, path) in self.entries() {
            writeln!(f, "{} = {}", key, path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EssayError;

    fn reference_config() -> PipelineConfig {
        PipelineConfig::new("3", "microsoft/deberta-v3-base", "1")
    }

    #[test]
    fn test_derived_entries() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        assert_eq!(paths.data_loader(), Path::new("data/dataloader_v3"));
        assert_eq!(
            paths.model_output(),
            Path::new("output/microsoft/deberta-v3-base")
        );
        assert_eq!(
            paths.tokenizer(),
            Path::new("output/microsoft/deberta-v3-base").join("tokenizer_v1")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_derived_entries_as_strings() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        assert_eq!(
            paths.tokenizer().to_str(),
            Some("output/microsoft/deberta-v3-base/tokenizer_v1")
        );
    }

    #[test]
    fn test_best_model_is_pinned() {
        let config = PipelineConfig::new("9", "google/electra-large", "7");
        let paths = Paths::from_config(&config).unwrap();
        assert_eq!(
            paths.best_model(),
            Path::new("output/microsoft/deberta-v3-base/best_model")
        );
        assert_eq!(paths.model_output(), Path::new("output/google/electra-large"));
    }

    #[test]
    fn test_any_present_value_builds() {
        let long = "9".repeat(100);
        let configs = [
            PipelineConfig::new("3", "my org/deberta base", "1"),
            PipelineConfig::new("3", "microsoft/deberta-v3-base", "1+cu118"),
            PipelineConfig::new("v3 final", "microsoft/deberta-v3-base", "1"),
            PipelineConfig::new("_3", "microsoft/deberta-v3-base", "1"),
            PipelineConfig::new(long.as_str(), "microsoft/deberta-v3-base", "1"),
        ];
        for config in &configs {
            let paths = Paths::from_config(config).unwrap();
            assert_eq!(
                paths.data_loader(),
                Path::new(&format!("data/dataloader_v{}", config.data_version))
            );
            assert_eq!(
                paths.model_output(),
                Path::new(&format!("output/{}", config.model))
            );
        }
    }

    #[test]
    fn test_model_output_keeps_model_id_text() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        assert_eq!(
            paths.model_output().to_str(),
            Some("output/microsoft/deberta-v3-base")
        );
    }

    #[test]
    fn test_build_fails_fast_on_missing_field() {
        let source = ConfigSource {
            data_version: Some("3".into()),
            model: Some("microsoft/deberta-v3-base".into()),
            tokenizer_version: None,
        };
        assert!(matches!(
            Paths::build(&source),
            Err(EssayError::MissingConfigField {
                field: "tokenizer_version"
            })
        ));
    }

    #[test]
    fn test_get_matches_accessors() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        assert_eq!(paths.get(PathKey::RootData), paths.root_data());
        assert_eq!(paths.get(PathKey::PersuadeCsv), paths.persuade_csv());
        assert_eq!(paths.get(PathKey::Tokenizer), paths.tokenizer());
        assert_eq!(paths.entries().count(), PathKey::ALL.len());
    }

    #[test]
    fn test_rooted_at() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        let root = Path::new("/srv/essays");
        let rooted = paths.rooted_at(root);
        for ((key, relative), (_, absolute)) in paths.entries().zip(rooted.entries()) {
            assert_eq!(absolute, root.join(relative), "{key}");
        }
    }

    #[test]
    fn test_serialize_uses_canonical_names() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        let value = serde_json::to_value(&paths).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), PathKey::ALL.len());
        for key in PathKey::ALL {
            assert!(object.contains_key(key.as_str()), "{key}");
        }
        assert_eq!(object["ROOT_DATA_PATH"], "data");
        assert_eq!(object["DATA_LOADER_PATH"], "data/dataloader_v3");
    }

    #[test]
    fn test_display_lists_every_entry() {
        let paths = Paths::from_config(&reference_config()).unwrap();
        let text = paths.to_string();
        assert_eq!(text.lines().count(), PathKey::ALL.len());
        assert!(text.starts_with("ROOT_DATA_PATH = data\n"));
    }
}
