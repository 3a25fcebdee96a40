//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PETALSCOPE_MODEL_PATH` | `models` | model directory or JSON file |
//! | `PETALSCOPE_REQUIRE_MANIFEST` | `false` | refuse models without `manifest.json` |
//! | `PETALSCOPE_LOG_MODE` | `auto` | `auto`, `file` or `stdout` |
//! | `PETALSCOPE_LOG_FILE` | `petalscope.log` | log path in file mode |

use std::path::PathBuf;

pub const MODEL_PATH_ENV: &str = "PETALSCOPE_MODEL_PATH";
pub const REQUIRE_MANIFEST_ENV: &str = "PETALSCOPE_REQUIRE_MANIFEST";
pub const LOG_MODE_ENV: &str = "PETALSCOPE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "PETALSCOPE_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models";
const DEFAULT_LOG_FILE: &str = "petalscope.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when stdout is a terminal (logs would corrupt the TUI), stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Parse a mode name; anything unrecognised falls back to `Auto`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Whether logs should go to a file given the terminal state.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub require_manifest: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            require_manifest: false,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model_path: non_empty(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            require_manifest: lookup(REQUIRE_MANIFEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.require_manifest),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
        assert_eq!(AppConfig::default().model_path, PathBuf::from("models"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (MODEL_PATH_ENV, "/opt/iris/model.json"),
            (REQUIRE_MANIFEST_ENV, "YES"),
            (LOG_MODE_ENV, "stdout"),
            (LOG_FILE_ENV, "/tmp/p.log"),
        ]);
        assert_eq!(config.model_path, PathBuf::from("/opt/iris/model.json"));
        assert!(config.require_manifest);
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/p.log"));
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = config_from(&[(MODEL_PATH_ENV, "  "), (REQUIRE_MANIFEST_ENV, "nope")]);
        assert_eq!(config.model_path, PathBuf::from("models"));
        assert!(!config.require_manifest);
    }

    #[test]
    fn test_log_mode() {
        assert_eq!(LogMode::parse("FILE"), LogMode::File);
        assert_eq!(LogMode::parse("syslog"), LogMode::Auto);
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
