//! Essay Core - path registry for the essay scoring training pipeline.
//!
//! Every stage of the pipeline (data preparation, tokenizer training, model
//! training, inference) refers to the same set of filesystem locations. This
//! crate defines them once: a [`Paths`] value is built from the run
//! configuration at startup and handed to the stages, or installed in the
//! process-wide [`registry::global`] context.
//!
//! # Example
//!
//! ```
//! use essay_core::{Paths, PipelineConfig};
//! use std::path::Path;
//!
//! let config = PipelineConfig::new("3", "microsoft/deberta-v3-base", "1");
//! let paths = Paths::from_config(&config)?;
//!
//! assert_eq!(paths.data_loader(), Path::new("data/dataloader_v3"));
//! assert_eq!(paths.model_output(), Path::new("output/microsoft/deberta-v3-base"));
//! # Ok::<(), essay_core::EssayError>(())
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod naming;
pub mod registry;

// Re-export commonly used types
pub use config::{discover_config_file, ConfigSource, PipelineConfig, RegistryLayout};
pub use error::{EssayError, Result};
pub use layout::{EntryKind, PathStatus};
pub use registry::{PathKey, PathKind, PathTarget, Paths};
