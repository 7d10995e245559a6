//! Command-line arguments and subcommand handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use essay_core::layout::{self, PathStatus};
use essay_core::naming;
use essay_core::{ConfigSource, PathKey, PathKind, PathTarget, Paths, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "essay-paths")]
#[command(about = "Path registry for the essay scoring training pipeline")]
pub struct Args {
    /// Project root the registry paths are relative to
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// JSON configuration file (defaults to <root>/pipeline.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset version, overrides ESSAY_DATA_VERSION and the config file
    #[arg(long, global = true)]
    pub data_version: Option<String>,

    /// Model identifier, overrides ESSAY_MODEL and the config file
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Tokenizer version, overrides ESSAY_TOKENIZER_VERSION and the config file
    #[arg(long, global = true)]
    pub tokenizer_version: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every registry entry
    Show {
        /// Print a JSON object instead of NAME = path lines
        #[arg(long)]
        json: bool,
        /// Place entries under --root
        #[arg(long)]
        absolute: bool,
    },
    /// Print a single entry by name, e.g. TOKENIZER_PATH
    Get {
        key: PathKey,
        /// Place the entry under --root
        #[arg(long)]
        absolute: bool,
    },
    /// Report which entries exist under --root
    Check {
        /// Fail if a static input file is missing or a derived entry could
        /// leave --root
        #[arg(long)]
        strict: bool,
    },
    /// Create the output directories under --root
    Prepare,
}

impl Args {
    /// Configuration values given on the command line.
    pub fn flag_source(&self) -> ConfigSource {
        ConfigSource {
            data_version: self.data_version.clone(),
            model: self.model.clone(),
            tokenizer_version: self.tokenizer_version.clone(),
        }
    }
}

pub fn run(args: &Args, config: &PipelineConfig, paths: &Paths) -> Result<ExitCode> {
    match &args.command {
        Command::Show { json, absolute } => {
            let rooted;
            let shown = if *absolute {
                rooted = paths.rooted_at(&args.root);
                &rooted
            } else {
                paths
            };
            if *json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                print!("{}", shown);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Get { key, absolute } => {
            let path = paths.get(*key);
            if *absolute {
                println!("{}", args.root.join(path).display());
            } else {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { strict } => {
            let statuses = layout::inspect(paths, &args.root);
            for status in &statuses {
                println!("{}", describe(status));
            }
            if let Err(err) = naming::validate_config(config) {
                println!("{:<10} {}", "unsafe", err);
                if *strict {
                    eprintln!("error: {}", err);
                    return Ok(ExitCode::FAILURE);
                }
            }
            let missing: Vec<_> = statuses.iter().filter(|s| is_missing_input(s)).collect();
            if *strict && !missing.is_empty() {
                eprintln!(
                    "error: {} input file(s) missing: {}",
                    missing.len(),
                    missing
                        .iter()
                        .map(|s| s.key.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Prepare => {
            let created = layout::ensure_output_dirs(paths, &args.root)
                .with_context(|| format!("preparing {}", args.root.display()))?;
            if created.is_empty() {
                info!("Output directories already present");
            }
            for dir in created {
                println!("created {}", dir.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn is_missing_input(status: &PathStatus) -> bool {
    status.key.kind() == PathKind::Static
        && status.key.target() == PathTarget::File
        && !status.matches_target()
}

fn describe(status: &PathStatus) -> String {
    let state = match (status.exists(), status.matches_target()) {
        (false, _) => "missing",
        (true, true) => "ok",
        (true, false) => "wrong type",
    };
    format!("{:<10} {} = {}", state, status.key, status.path.display())
}
