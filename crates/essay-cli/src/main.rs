//! essay-paths - inspect and prepare the training pipeline's filesystem layout.
//!
//! Resolves the run configuration (config file, then `ESSAY_*` environment
//! variables, then flags), builds the path registry once and runs a
//! subcommand against it.

mod commands;

use clap::Parser;
use commands::Args;
use essay_core::{registry::global, ConfigSource, EssayError, Paths, PipelineConfig};
use std::process::ExitCode;
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit code for missing or invalid configuration.
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging; stdout is reserved for command output
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let (config, paths) = match load_registry(&args) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("error: {}", err);
            return if err.is_config_error() {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::FAILURE
            };
        }
    };

    match commands::run(&args, &config, paths) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Resolve configuration, build the registry and install it process-wide.
fn load_registry(args: &Args) -> Result<(PipelineConfig, &'static Paths), EssayError> {
    let discovered = essay_core::discover_config_file(&args.root);
    let config_file = match (&args.config, discovered) {
        (Some(explicit), Some(found)) if *explicit != found => {
            warn!(
                "Ignoring {} in favour of --config {}",
                found.display(),
                explicit.display()
            );
            Some(explicit.clone())
        }
        (Some(explicit), _) => Some(explicit.clone()),
        (None, found) => found,
    };

    let file_source = match &config_file {
        Some(path) => ConfigSource::from_json_file(path)?,
        None => {
            debug!("No configuration file found");
            ConfigSource::default()
        }
    };

    let config = file_source
        .merge(ConfigSource::from_env()?)
        .merge(args.flag_source())
        .resolve()?;
    let paths = global::install(Paths::from_config(&config)?)?;
    Ok((config, paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "essay-paths",
            "--model",
            "microsoft/deberta-v3-base",
            "--data-version",
            "3",
            "get",
            "TOKENIZER_PATH",
        ])
        .unwrap();
        assert_eq!(args.flag_source().model.as_deref(), Some("microsoft/deberta-v3-base"));
        assert!(matches!(args.command, Command::Get { .. }));
    }
}
