//! Subcommand implementations.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Barrier};
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info};

use tackle_config::TackleConfig;
use tackle_types::{
    SearchOptions, is_valid_email, is_valid_phone, is_valid_url, match_ranges, parse_query,
    ranges_of,
};
use tackle_utils::{Guarded, SerialQueue, delay_seconds, write_document};

use crate::ValidateKind;

pub fn version(config: &TackleConfig) -> Result<ExitCode> {
    println!("{}", config.app_version_build());
    Ok(ExitCode::SUCCESS)
}

pub fn query(raw: &str) -> Result<ExitCode> {
    let pairs = parse_query(raw);
    debug!(pairs = pairs.len(), "query parsed");
    for (key, value) in pairs {
        println!("{key}={value}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn ranges(text: &str, pattern: &str, ignore_case: bool) -> Result<ExitCode> {
    let ranges = if ignore_case {
        Some(ranges_of(text, pattern, &SearchOptions::case_insensitive()))
    } else {
        match_ranges(text, Some(pattern))
    };

    match ranges {
        Some(ranges) if !ranges.is_empty() => {
            for range in ranges {
                println!("{}..{}\t{}", range.start, range.end, &text[range.clone()]);
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            println!("no matches");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn validate(kind: ValidateKind, value: &str) -> Result<ExitCode> {
    let valid = match kind {
        ValidateKind::Email => is_valid_email(value),
        ValidateKind::Phone => is_valid_phone(value),
        ValidateKind::Url => is_valid_url(value),
    };
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub fn save(
    config: &TackleConfig,
    dir: Option<PathBuf>,
    name: &str,
    contents: &str,
) -> Result<ExitCode> {
    let Some(dir) = dir.or_else(|| config.documents_dir()) else {
        bail!("no documents directory: pass --dir or set [documents] dir in the config");
    };
    let path = write_document(&dir, name, contents).context("save document")?;
    info!(path = %path.display(), "document saved");
    println!("saved {}", path.display());
    Ok(ExitCode::SUCCESS)
}

pub fn count(threads: usize, iterations: u64) -> Result<ExitCode> {
    if threads == 0 {
        bail!("--threads must be at least 1");
    }
    let expected = u64::try_from(threads)
        .ok()
        .and_then(|threads| threads.checked_mul(iterations))
        .context("--threads times --iterations overflows u64")?;

    let counter = Arc::new(Guarded::new(0_u64));
    let start = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let counter = Arc::clone(&counter);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for _ in 0..iterations {
                    counter.update(|n| *n += 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("counter thread panicked"))?;
    }

    let total = counter.get();
    info!(threads, iterations, total, "count finished");
    println!("total={total} expected={expected}");
    if total != expected {
        bail!("lost updates: counted {total}, expected {expected}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn delay(config: &TackleConfig, seconds: f64, message: String) -> Result<ExitCode> {
    let queue = SerialQueue::new(config.queue_label()).context("start serial queue")?;
    let (done_tx, done_rx) = crossbeam::channel::bounded(1);

    queue
        .run_after(delay_seconds(seconds), move || {
            println!("{message}");
            let _ = done_tx.send(());
        })
        .context("schedule delayed message")?;

    done_rx
        .recv()
        .map_err(|_| anyhow!("delayed job on queue '{}' did not complete", queue.label()))?;
    queue.shutdown();
    Ok(ExitCode::SUCCESS)
}
