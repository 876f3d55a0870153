//! Configuration and settings management for Printbench
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into sections:
//! - Bed dimensions used when no printer profile is available
//! - Workbench editing defaults (rotation step, proportional scaling)
//! - Storage locations for builtin models, uploads, and downloads

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use printbench_core::constants::DEFAULT_ROTATE_STEP_DEGREES;
use printbench_core::{BedDimensions, ScaleInputMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "printbench";

/// Workbench editing preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchSettings {
    /// Step used by the rotate clockwise/counter-clockwise buttons
    pub rotate_step_degrees: f64,
    /// Whether editing one scale field scales the other axes along
    pub keep_proportions: bool,
    /// Initial units of the scale input fields
    pub scale_input_mode: ScaleInputMode,
    /// Builtin model placed on the bed when a session starts
    pub default_model: Option<String>,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            rotate_step_degrees: DEFAULT_ROTATE_STEP_DEGREES,
            keep_proportions: true,
            scale_input_mode: ScaleInputMode::Size,
            default_model: None,
        }
    }
}

/// Where models and scenes are read from and written to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory with models shipped with the application
    pub models_dir: PathBuf,
    /// Directory the file store uploads scenes into
    pub uploads_dir: PathBuf,
    /// Directory local downloads are written to
    pub downloads_dir: PathBuf,
    /// Destination identifier passed to the file store
    pub upload_target: String,
    /// Printer bed profile document; `Config::bed` is used when absent
    pub bed_profile: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            models_dir: data_dir.join("models"),
            uploads_dir: data_dir.join("uploads"),
            downloads_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            upload_target: "local".to_string(),
            bed_profile: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Fallback bed dimensions
    #[serde(default)]
    pub bed: BedDimensions,
    /// Workbench preferences
    #[serde(default)]
    pub workbench: WorkbenchSettings,
    /// Storage locations
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(SettingsError::read(path))?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::write(path))?;
        }
        std::fs::write(path, content).map_err(SettingsError::write(path))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bed.validate().is_err() {
            return Err(ConfigError::ValueOutOfRange {
                key: "bed".to_string(),
                value: self.bed.to_string(),
            });
        }

        let step = self.workbench.rotate_step_degrees;
        if !step.is_finite() || step <= 0.0 || step > 360.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "workbench.rotate_step_degrees".to_string(),
                value: step.to_string(),
            });
        }

        if self.storage.upload_target.trim().is_empty() {
            return Err(ConfigError::ValueOutOfRange {
                key: "storage.upload_target".to_string(),
                value: String::new(),
            });
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Location of the config file in the platform config directory
pub fn default_config_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))
}
