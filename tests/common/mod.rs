//! Shared test utilities and fixtures
//!
//! Helpers for driving the `tackle` binary against an isolated config.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch directory holding a config file and a documents directory.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    /// Write `config.toml` with `body`. The log file always points into the sandbox.
    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        let log = self.dir.path().join("logs").join("tackle.log");
        let contents = format!(
            "{body}\n[logging]\nfile = \"{}\"\n",
            log.display().to_string().replace('\\', "/")
        );
        fs::write(&path, contents).expect("write config");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.dir.path().join("documents")
    }

    /// Run `tackle --config <sandbox config> <args>`.
    pub fn run(&self, config: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_tackle"))
            .arg("--config")
            .arg(config)
            .args(args)
            .env_remove("RUST_LOG")
            .current_dir(self.dir.path())
            .output()
            .expect("spawn tackle")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
