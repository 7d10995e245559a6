//! Names of the registry entries.

use crate::error::EssayError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One named entry of the path registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathKey {
    RootData,
    TrainCsv,
    TestCsv,
    CompetitionTrainCsv,
    CompetitionTestCsv,
    PersuadeCsv,
    DataLoader,
    ModelOutput,
    Tokenizer,
    BestModel,
}

/// Whether an entry depends on the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Static,
    Derived,
}

/// What the pipeline expects to find at an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTarget {
    File,
    Directory,
}

impl PathKey {
    /// Every key, in registry order.
    pub const ALL: [PathKey; 10] = [
        PathKey::RootData,
        PathKey::TrainCsv,
        PathKey::TestCsv,
        PathKey::CompetitionTrainCsv,
        PathKey::CompetitionTestCsv,
        PathKey::PersuadeCsv,
        PathKey::DataLoader,
        PathKey::ModelOutput,
        PathKey::Tokenizer,
        PathKey::BestModel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathKey::RootData => "ROOT_DATA_PATH",
            PathKey::TrainCsv => "TRAIN_CSV_PATH",
            PathKey::TestCsv => "TEST_CSV_PATH",
            PathKey::CompetitionTrainCsv => "COMPETITION_TRAIN_CSV_PATH",
            PathKey::CompetitionTestCsv => "COMPETITION_TEST_CSV_PATH",
            PathKey::PersuadeCsv => "PERSUADE_CSV_PATH",
            PathKey::DataLoader => "DATA_LOADER_PATH",
            PathKey::ModelOutput => "MODEL_OUTPUT_PATH",
            PathKey::Tokenizer => "TOKENIZER_PATH",
            PathKey::BestModel => "BEST_MODEL_PATH",
        }
    }

    pub fn kind(&self) -> PathKind {
        match self {
            PathKey::DataLoader | PathKey::ModelOutput | PathKey::Tokenizer => PathKind::Derived,
            _ => PathKind::Static,
        }
    }

    pub fn target(&self) -> PathTarget {
        match self {
            PathKey::TrainCsv
            | PathKey::TestCsv
            | PathKey::CompetitionTrainCsv
            | PathKey::CompetitionTestCsv
            | PathKey::PersuadeCsv => PathTarget::File,
            PathKey::RootData
            | PathKey::DataLoader
            | PathKey::ModelOutput
            | PathKey::Tokenizer
            | PathKey::BestModel => PathTarget::Directory,
        }
    }
}

impl FromStr for PathKey {
    type Err = EssayError;

    /// Parse a canonical name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PathKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EssayError::UnknownPathKey(s.to_string()))
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
