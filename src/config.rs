//! Application configuration and persisted settings.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$OFT2EML_CONFIG` (environment variable)
//! 2. `~/.config/oft2eml/config.toml` (Linux/macOS)
//!    `%APPDATA%\oft2eml\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! The UI writes the last used output directory back to the same file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Conversion defaults.
    pub convert: ConvertConfig,
    /// Display settings for the terminal UI.
    pub display: DisplayConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Conversion defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Last output directory chosen in the UI (also the CLI default).
    pub output_dir: Option<PathBuf>,
    /// Replace existing `.eml` files instead of writing `name_1.eml`.
    pub overwrite: bool,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// List every file in the browser, not only `.oft` templates.
    pub show_all_files: bool,
    /// Number of selected files listed by name before "and N more".
    pub file_preview_count: usize,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            overwrite: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_all_files: false,
            file_preview_count: 3,
        }
    }
}

impl Config {
    /// Output directory to use: the saved one, else the current directory.
    pub fn output_dir(&self) -> PathBuf {
        self.convert
            .output_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) => load_config_from(&path),
        None => Config::default(),
    }
}

/// Load configuration from an explicit path, falling back to defaults.
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "Loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read config file, using defaults"
            );
            Config::default()
        }
    }
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;
    save_config_to(config, &path)
}

/// Save configuration to an explicit path.
pub fn save_config_to(config: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("OFT2EML_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("oft2eml").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oft2eml")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("oft2eml.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert!(cfg.convert.output_dir.is_none());
        assert!(cfg.convert.overwrite);
        assert_eq!(cfg.display.file_preview_count, 3);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[convert]
output_dir = "/tmp/eml-out"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.convert.output_dir, Some(PathBuf::from("/tmp/eml-out")));
        // Other fields use defaults
        assert!(cfg.convert.overwrite);
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut cfg = Config::default();
        cfg.convert.output_dir = Some(dir.path().join("out"));
        cfg.convert.overwrite = false;
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path), cfg);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [not toml").unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn test_log_file_under_cache_override() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/var/tmp/oft2eml-logs"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/var/tmp/oft2eml-logs/oft2eml.log")
        );
    }

    #[test]
    fn test_output_dir_fallback() {
        let cfg = Config::default();
        assert!(!cfg.output_dir().as_os_str().is_empty());
    }
}
