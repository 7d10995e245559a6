//! Filesystem checks and setup for a project root.
//!
//! The registry only names locations. These helpers are what callers use when
//! they actually want to look at, or prepare, those locations.

use crate::error::{EssayError, Result};
use crate::registry::{PathKey, PathTarget, Paths};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// What was found on disk at an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Disk status of one registry entry.
#[derive(Debug, Clone, Serialize)]
pub struct PathStatus {
    pub key: PathKey,
    pub path: PathBuf,
    pub found: Option<EntryKind>,
}

impl PathStatus {
    pub fn exists(&self) -> bool {
        self.found.is_some()
    }

    /// True if the entry exists and has the expected type.
    pub fn matches_target(&self) -> bool {
        matches!(
            (self.key.target(), self.found),
            (PathTarget::File, Some(EntryKind::File))
                | (PathTarget::Directory, Some(EntryKind::Directory))
        )
    }
}

/// Report the disk status of every entry under `project_root`.
pub fn inspect(paths: &Paths, project_root: &Path) -> Vec<PathStatus> {
    paths
        .entries()
        .map(|(key, relative)| {
            let path = project_root.join(relative);
            let found = std::fs::metadata(&path).ok().map(|meta| {
                if meta.is_file() {
                    EntryKind::File
                } else if meta.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::Other
                }
            });
            PathStatus { key, path, found }
        })
        .collect()
}

/// Entries that pipeline stages write into and that may be created up front.
pub const OUTPUT_DIRS: [PathKey; 2] = [PathKey::RootData, PathKey::ModelOutput];

/// Create the output directories under `project_root` if they are missing.
///
/// Returns the directories that were created.
pub fn ensure_output_dirs(paths: &Paths, project_root: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for key in OUTPUT_DIRS {
        let dir = project_root.join(paths.get(key));
        if dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(&dir).map_err(|e| EssayError::Io {
            message: format!("Failed to create directory: {}", dir.display()),
            path: Some(dir.clone()),
            source: Some(e),
        })?;
        info!("Created {} at {}", key, dir.display());
        created.push(dir);
    }

    Ok(created)
}
