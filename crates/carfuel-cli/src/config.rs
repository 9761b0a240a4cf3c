//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,

    /// Default vehicle (id or nickname) when none is active
    #[serde(default)]
    pub vehicle: Option<String>,

    /// Default station name for new records
    #[serde(default)]
    pub station: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("carfuel")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }
}

/// Resolve the output format: explicit flag overrides config, text is the
/// fallback.
pub fn resolve_format(arg: Option<OutputFormat>, config: &Config) -> OutputFormat {
    if let Some(format) = arg {
        return format;
    }
    match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    }
}

/// Resolve the vehicle selector: explicit arg first, then config default.
pub fn resolve_vehicle_arg(arg: Option<String>, config: &Config) -> Option<String> {
    arg.or_else(|| config.vehicle.clone())
}
