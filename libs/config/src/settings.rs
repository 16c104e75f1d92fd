//! Reconciler Settings Module
//!
//! Loads `ReconcilerSettings` from defaults, an optional TOML file and
//! environment overrides, then validates the result.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable prefix, e.g. `TORQ_RECONCILER__UPSTREAM_BUFFER=32`
pub const ENV_PREFIX: &str = "TORQ_RECONCILER";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime settings for the state reconciler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerSettings {
    /// Capacity of the in-process upstream bundle channel
    pub upstream_buffer: usize,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,

    /// Blocks slower than this are logged at warn level
    pub slow_block_ms: u64,

    /// Newline-delimited JSON bundle file; stdin when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_path: Option<PathBuf>,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            upstream_buffer: 16,
            log_level: "info".to_string(),
            json_logs: false,
            slow_block_ms: 250,
            bundle_path: None,
        }
    }
}

impl ReconcilerSettings {
    /// Load with the standard `TORQ_RECONCILER__` environment prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Load defaults, then `path` (required if given), then `{prefix}__*` variables
    pub fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading reconciler config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut settings: ReconcilerSettings = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        settings.expand_paths()?;
        settings.validate()?;

        debug!(?settings, "Reconciler settings loaded");
        Ok(settings)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.upstream_buffer == 0 {
            bail!("upstream_buffer must be at least 1");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!(
                "log_level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render settings as TOML")
    }

    fn expand_paths(&mut self) -> Result<()> {
        if let Some(path) = &self.bundle_path {
            let raw = path.to_string_lossy();
            let expanded = shellexpand::full(&raw).context("Failed to expand bundle_path")?;
            self.bundle_path = Some(PathBuf::from(expanded.as_ref()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_sources() {
        let settings = ReconcilerSettings::load_with_prefix(None, "TORQ_TEST_DEFAULTS").unwrap();

        assert_eq!(settings, ReconcilerSettings::default());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("reconciler.toml");

        fs::write(
            &config_path,
            r#"
upstream_buffer = 64
log_level = "debug"
json_logs = true
"#,
        )
        .unwrap();

        let settings =
            ReconcilerSettings::load_with_prefix(Some(&config_path), "TORQ_TEST_FILE").unwrap();

        assert_eq!(settings.upstream_buffer, 64);
        assert_eq!(settings.log_level, "debug");
        assert!(settings.json_logs);
        // Untouched keys keep their defaults
        assert_eq!(settings.slow_block_ms, 250);
    }

    #[test]
    fn test_environment_override() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("reconciler.toml");
        fs::write(&config_path, "slow_block_ms = 100\n").unwrap();

        std::env::set_var("TORQ_TEST_ENV__SLOW_BLOCK_MS", "900");

        let settings =
            ReconcilerSettings::load_with_prefix(Some(&config_path), "TORQ_TEST_ENV").unwrap();

        std::env::remove_var("TORQ_TEST_ENV__SLOW_BLOCK_MS");
        assert_eq!(settings.slow_block_ms, 900);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(ReconcilerSettings::load_with_prefix(Some(&missing), "TORQ_TEST_MISSING").is_err());
    }

    #[test]
    fn test_validation() {
        let mut settings = ReconcilerSettings::default();
        assert!(settings.validate().is_ok());

        settings.upstream_buffer = 0;
        assert!(settings.validate().is_err());

        settings.upstream_buffer = 1;
        settings.log_level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_rendering_reloads() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("rendered.toml");
        let settings = ReconcilerSettings {
            upstream_buffer: 8,
            ..ReconcilerSettings::default()
        };

        fs::write(&config_path, settings.to_toml().unwrap()).unwrap();

        let reloaded =
            ReconcilerSettings::load_with_prefix(Some(&config_path), "TORQ_TEST_RENDER").unwrap();
        assert_eq!(reloaded, settings);
    }
}
