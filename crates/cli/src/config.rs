//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use hashorbit_core::{Md5DbProvider, ReversalRegistry};

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Hashorbit configuration
# See: horb --help for all options

# Hide candidates below this confidence (0-100)
min_confidence = 0

# Disable colored output
no_color = false

# Reversal lookup timeout in seconds
timeout = 10

# MD5 lookup service; the digest is appended as the last path segment
reversal_url = "https://www.nitrxgen.net/md5db"
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_confidence: Option<u8>,
    pub no_color: Option<bool>,
    pub timeout: Option<u64>,
    pub reversal_url: Option<String>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/horb/config.toml`
    /// - Windows: `%APPDATA%\horb\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("horb").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get min_confidence with precedence: env > config > default.
    pub fn min_confidence(&self) -> u8 {
        Self::env_var("HORB_MIN_CONFIDENCE")
            .or(self.min_confidence)
            .unwrap_or(0)
            .min(100)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("HORB_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Get timeout (seconds) with precedence: env > config > default.
    pub fn timeout(&self) -> u64 {
        Self::env_var("HORB_TIMEOUT")
            .or(self.timeout)
            .unwrap_or(ReversalRegistry::DEFAULT_TIMEOUT.as_secs())
    }

    /// Get reversal_url with precedence: env > config > default.
    pub fn reversal_url(&self) -> String {
        std::env::var("HORB_REVERSAL_URL")
            .ok()
            .or_else(|| self.reversal_url.clone())
            .unwrap_or_else(|| Md5DbProvider::DEFAULT_URL.to_string())
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}
