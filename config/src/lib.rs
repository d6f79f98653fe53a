//! Configuration loading for tackle.
//!
//! The config file lives at `~/.tackle/config.toml`. Every section is
//! optional and a missing file is not an error:
//!
//! ```toml
//! [app]
//! version = "2.3.0"
//! build = "41"
//!
//! [documents]
//! dir = "${HOME}/Documents/tackle"
//!
//! [logging]
//! filter = "tackle=debug,info"
//!
//! [dispatch]
//! queue_label = "tackle-main"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const DEFAULT_APP_BUILD: &str = "1";
pub const DEFAULT_QUEUE_LABEL: &str = "tackle-main";

#[derive(Debug, Default, Deserialize)]
pub struct TackleConfig {
    pub app: Option<AppConfig>,
    pub documents: Option<DocumentsConfig>,
    pub logging: Option<LoggingConfig>,
    pub dispatch: Option<DispatchConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub version: Option<String>,
    pub build: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentsConfig {
    /// Where saved documents go. `${VAR}` references are expanded.
    pub dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` takes precedence.
    pub filter: Option<String>,
    /// Log file path. `${VAR}` references are expanded.
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DispatchConfig {
    /// Thread name for the main serial queue.
    pub queue_label: Option<String>,
}

/// Replace `${VAR}` with the value of the environment variable (empty when unset).
///
/// An unterminated `${` is kept literally.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end + 1..];
    }

    out.push_str(rest);
    out
}

impl TackleConfig {
    /// Load `~/.tackle/config.toml`. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| {
            tracing::warn!(path = %path.display(), "Failed to read config: {source}");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&content).map(Some).map_err(|source| {
            tracing::warn!(path = %path.display(), "Failed to parse config: {source}");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    #[must_use]
    pub fn app_version(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.version.as_deref())
            .unwrap_or(DEFAULT_APP_VERSION)
    }

    #[must_use]
    pub fn app_build(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.build.as_deref())
            .unwrap_or(DEFAULT_APP_BUILD)
    }

    /// `v{version}({build})`, e.g. `v1.0.0(1)`.
    #[must_use]
    pub fn app_version_build(&self) -> String {
        format!("v{}({})", self.app_version(), self.app_build())
    }

    /// Configured documents directory, else the platform documents directory,
    /// else `~/.tackle/documents`.
    #[must_use]
    pub fn documents_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = self.documents.as_ref().and_then(|docs| docs.dir.as_deref()) {
            return Some(PathBuf::from(expand_env_vars(dir)));
        }
        dirs::document_dir().or_else(|| config_dir().map(|dir| dir.join("documents")))
    }

    #[must_use]
    pub fn log_filter(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|logging| logging.filter.as_deref())
    }

    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.file.as_deref())
            .map(|file| PathBuf::from(expand_env_vars(file)))
    }

    #[must_use]
    pub fn queue_label(&self) -> &str {
        self.dispatch
            .as_ref()
            .and_then(|dispatch| dispatch.queue_label.as_deref())
            .unwrap_or(DEFAULT_QUEUE_LABEL)
    }
}

/// `~/.tackle`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tackle"))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use super::{ConfigError, TackleConfig, expand_env_vars};

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_replaces_set_and_unset() {
        unsafe {
            env::set_var("TACKLE_TEST_EXPAND", "replaced");
        }
        assert_eq!(
            expand_env_vars("a/${TACKLE_TEST_EXPAND}/b/${TACKLE_TEST_UNSET_VAR}/c"),
            "a/replaced/b//c"
        );
    }

    #[test]
    fn expand_env_vars_keeps_unterminated_reference() {
        assert_eq!(expand_env_vars("keep ${OPEN"), "keep ${OPEN");
        assert_eq!(expand_env_vars("empty ${} name"), "empty  name");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: TackleConfig = toml::from_str("").expect("parse");
        assert_eq!(config.app_version(), "1.0.0");
        assert_eq!(config.app_build(), "1");
        assert_eq!(config.app_version_build(), "v1.0.0(1)");
        assert_eq!(config.queue_label(), "tackle-main");
        assert!(config.log_filter().is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config: TackleConfig = toml::from_str(
            r#"
[app]
version = "2.3.0"
build = "41"

[documents]
dir = "/srv/docs"

[logging]
filter = "debug"

[dispatch]
queue_label = "ui"
"#,
        )
        .expect("parse");

        assert_eq!(config.app_version_build(), "v2.3.0(41)");
        assert_eq!(config.documents_dir(), Some(PathBuf::from("/srv/docs")));
        assert_eq!(config.log_filter(), Some("debug"));
        assert_eq!(config.queue_label(), "ui");
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = TackleConfig::load_from(&dir.path().join("config.toml")).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "invalid toml [").expect("write");

        let err = TackleConfig::load_from(&path).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn load_from_reads_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[app]\nbuild = \"7\"\n").expect("write");

        let config = TackleConfig::load_from(&path).expect("load").expect("present");
        assert_eq!(config.app_version_build(), "v1.0.0(7)");
    }
}
