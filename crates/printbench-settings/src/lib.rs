//! Printbench Settings Crate
//!
//! Handles application configuration and the printer bed profile document.

pub mod config;
pub mod error;
pub mod profile;

pub use config::{default_config_path, Config, StorageSettings, WorkbenchSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use profile::BedProfile;
