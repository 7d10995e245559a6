//! Process-wide registry context.
//!
//! The application builds a [`Paths`] value once at startup and installs it
//! here. Installed values are never replaced.

use crate::error::{EssayError, Result};
use crate::registry::paths::Paths;
use std::sync::OnceLock;
use tracing::debug;

static REGISTRY: OnceLock<Paths> = OnceLock::new();

/// Install the process-wide registry.
///
/// Installing a value equal to the current one returns the installed
/// registry. Installing a different value fails with
/// [`EssayError::RegistryConflict`].
pub fn install(paths: Paths) -> Result<&'static Paths> {
    let mut installed_now = false;
    let current = REGISTRY.get_or_init(|| {
        installed_now = true;
        paths.clone()
    });

    if installed_now {
        debug!("Installed process-wide path registry");
        return Ok(current);
    }
    if *current == paths {
        Ok(current)
    } else {
        Err(EssayError::RegistryConflict)
    }
}

/// The installed registry.
pub fn current() -> Result<&'static Paths> {
    REGISTRY.get().ok_or(EssayError::RegistryUninitialized)
}

pub fn is_installed() -> bool {
    REGISTRY.get().is_some()
}
