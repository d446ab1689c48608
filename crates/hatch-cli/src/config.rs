//! Application configuration.
//!
//! [`AppConfig`] is loaded once in `main` and passed down by value. The
//! core and adapter crates never see it; commands translate the relevant
//! values into service settings and blueprint options.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HATCH_<SECTION>__<KEY>`, e.g.
//!    `HATCH_NETWORK__FETCH_TIMEOUT_SECS=60`
//! 3. Config file (`--config FILE`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `hatch new`.
    pub defaults: Defaults,
    /// Remote fetch settings.
    pub network: NetworkConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Prepended to the project name to form the Go import path,
    /// e.g. `github.com/me`.
    pub import_prefix: Option<String>,
    pub with_pop: bool,
    pub with_webpack: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            import_prefix: None,
            with_pop: true,
            with_webpack: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub fetch_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
        }
    }
}

impl NetworkConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// `config_file` is the path passed via `--config`. An explicit file must
    /// exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, config_file.is_some(), Environment::with_prefix("HATCH"))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the configuration file in use.
    pub fn resolve_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hatch.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("rs", "hatch", "hatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hatch.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix("HATCH").source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_enable_both_features() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.with_pop);
        assert!(cfg.defaults.with_webpack);
        assert_eq!(cfg.network.fetch_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_only_given_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hatch.toml");
        std::fs::write(
            &path,
            "[defaults]\nwith_pop = false\nimport_prefix = \"github.com/me\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert!(!cfg.defaults.with_pop);
        assert!(cfg.defaults.with_webpack);
        assert_eq!(cfg.defaults.import_prefix.as_deref(), Some("github.com/me"));
    }

    #[test]
    fn environment_wins_over_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hatch.toml");
        std::fs::write(&path, "[network]\nfetch_timeout_secs = 5\n").unwrap();

        let env = Environment::with_prefix("HATCH").source(Some(HashMap::from([(
            "HATCH_NETWORK__FETCH_TIMEOUT_SECS".to_string(),
            "90".to_string(),
        )])));
        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert_eq!(cfg.network.fetch_timeout_secs, 90);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
