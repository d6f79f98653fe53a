//! tackle CLI - command-line front end for the tackle helper crates.
//!
//! Each subcommand drives one library surface end to end:
//!
//! ```text
//! version   -> tackle_config   (app version/build)
//! query     -> tackle_types    (query-string parsing)
//! ranges    -> tackle_types    (regex / literal occurrence search)
//! validate  -> tackle_types    (email, phone, url checks)
//! save      -> tackle_utils    (atomic document write)
//! count     -> tackle_utils    (Guarded counter under thread contention)
//! delay     -> tackle_utils    (SerialQueue delayed job)
//! ```
//!
//! Logs go to a file so they never interleave with command output.

mod commands;

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tackle_config::{TackleConfig, config_dir};

#[derive(Parser)]
#[command(name = "tackle", version, about = "Everyday string, path and concurrency helpers")]
struct Cli {
    /// Config file to use instead of ~/.tackle/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the configured app version and build
    Version,
    /// Parse a query string into decoded key/value pairs
    Query { raw: String },
    /// Print the ranges of a pattern within some text
    Ranges {
        text: String,
        pattern: String,
        /// Literal, case-insensitive search instead of a regex
        #[arg(long)]
        ignore_case: bool,
    },
    /// Check whether a value is a well-formed email, phone number or URL
    Validate {
        #[arg(value_enum)]
        kind: ValidateKind,
        value: String,
    },
    /// Save text as a named document
    Save {
        name: String,
        contents: String,
        /// Directory to save into instead of the configured documents directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Increment a shared counter from several threads and report the total
    Count {
        #[arg(long, default_value_t = 4)]
        threads: usize,
        #[arg(long, default_value_t = 10_000)]
        iterations: u64,
    },
    /// Print a message from a serial queue after a delay
    Delay {
        #[arg(long, default_value_t = 1.0)]
        seconds: f64,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ValidateKind {
    Email,
    Phone,
    Url,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Command::Version => commands::version(&config),
        Command::Query { raw } => commands::query(&raw),
        Command::Ranges {
            text,
            pattern,
            ignore_case,
        } => commands::ranges(&text, &pattern, ignore_case),
        Command::Validate { kind, value } => commands::validate(kind, &value),
        Command::Save {
            name,
            contents,
            dir,
        } => commands::save(&config, dir, &name, &contents),
        Command::Count {
            threads,
            iterations,
        } => commands::count(threads, iterations),
        Command::Delay { seconds, message } => commands::delay(&config, seconds, message),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<TackleConfig> {
    let loaded = match explicit {
        Some(path) => TackleConfig::load_from(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => TackleConfig::load().context("load config")?,
    };
    Ok(loaded.unwrap_or_default())
}

fn init_tracing(config: &TackleConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file(config);

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No writable log file: stay silent rather than mixing logs into stdout.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file(config: &TackleConfig) -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates(config) {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates(config: &TackleConfig) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(configured) = config.log_file() {
        candidates.push(configured);
    }

    // ~/.tackle/logs/tackle.log
    if let Some(dir) = config_dir() {
        candidates.push(dir.join("logs").join("tackle.log"));
    }

    // ./.tackle/logs/tackle.log for sandboxes without a writable home
    candidates.push(PathBuf::from(".tackle").join("logs").join("tackle.log"));

    candidates
}
