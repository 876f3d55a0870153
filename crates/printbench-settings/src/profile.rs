//! Printer bed profile document.
//!
//! The printer profile is fetched once when a workbench session starts and
//! is the only source of the bed envelope. Its fields are checked here so
//! the rest of the workbench only ever sees validated [`BedDimensions`].

use printbench_core::{BedDimensions, ProfileError};
use serde::Deserialize;

/// Raw bed profile as stored by the printer profile service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedProfile {
    #[serde(default)]
    pub name: Option<String>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    pub height: Option<f64>,
}

impl BedProfile {
    /// Parse a JSON profile document.
    pub fn from_json(data: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(data).map_err(|e| ProfileError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Validate the profile and convert it into bed dimensions.
    pub fn into_dimensions(self) -> Result<BedDimensions, ProfileError> {
        let width = require("width", self.width)?;
        let depth = require("depth", self.depth)?;
        let height = require("height", self.height)?;
        BedDimensions::new(width, depth, height)
    }
}

fn require(field: &str, value: Option<f64>) -> Result<f64, ProfileError> {
    value.ok_or_else(|| ProfileError::Malformed {
        reason: format!("missing {}", field),
    })
}
