//! CLI configuration.
//!
//! Loaded via the `config` crate from an optional TOML file, then from
//! environment variables prefixed with `AGENCY_` (`AGENCY_OUTPUT_DIR`,
//! `AGENCY_STORAGE_PATH`, `AGENCY_LOG_FILTER`). Later sources win.

use agency_toolkit_assets::store::DEFAULT_STORAGE_PATH;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "agency.toml";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Output directory used when a generator's `--output` is omitted.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Key-value store snapshot file.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            storage_path: default_storage_path(),
            log_filter: default_log_filter(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `file` (if it exists) and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or a variable cannot be parsed.
    pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("AGENCY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = CliConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.storage_path, PathBuf::from(".agency_storage.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = CliConfig::load(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.output_dir, CliConfig::default().output_dir);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("agency.toml");
        std::fs::write(&path, "output_dir = \"deliverables\"\nlog_filter = \"debug\"\n")
            .expect("write config");

        let config = CliConfig::load(&path).expect("load");
        assert_eq!(config.output_dir, PathBuf::from("deliverables"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.storage_path, PathBuf::from(".agency_storage.json"));
    }
}
