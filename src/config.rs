//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any command
//! touches the data file.
//!
//! ## Variables
//!
//! - `ATLAS_DATA_FILE` - Path to the backing JSON document (default: `dane.json`)
//! - `ATLAS_PRETTY_PERSIST` - Pretty-print the document on save (default: `true`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON document holding the whole dataset.
    pub data_file: PathBuf,
    /// When true, the document is persisted with two-space indentation,
    /// matching the layout produced by hand-edited fixture files.
    pub pretty_persist: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let data_file = env::var("ATLAS_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("dane.json"));

        let pretty_persist = env::var("ATLAS_PRETTY_PERSIST")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            data_file,
            pretty_persist,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data_file` is empty
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("ATLAS_DATA_FILE must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!("  Pretty persist: {}", self.pretty_persist);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
