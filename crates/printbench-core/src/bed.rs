//! Print bed geometry.

use crate::constants::{DEFAULT_BED_DEPTH_MM, DEFAULT_BED_HEIGHT_MM, DEFAULT_BED_WIDTH_MM};
use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical envelope of the print bed in millimeters.
///
/// The bed is centered on the origin in X/Y; Z grows upward from the bed
/// surface at `z = 0` to `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BedDimensions {
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub depth: f64,
    /// Printable height along Z
    pub height: f64,
}

impl BedDimensions {
    /// Creates validated bed dimensions.
    ///
    /// Every dimension must be finite and strictly positive.
    pub fn new(width: f64, depth: f64, height: f64) -> Result<Self, ProfileError> {
        let bed = Self {
            width,
            depth,
            height,
        };
        bed.validate()?;
        Ok(bed)
    }

    /// Checks that all dimensions are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in [
            ("width", self.width),
            ("depth", self.depth),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::InvalidDimension {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }
}

impl Default for BedDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_BED_WIDTH_MM,
            depth: DEFAULT_BED_DEPTH_MM,
            height: DEFAULT_BED_HEIGHT_MM,
        }
    }
}

impl fmt::Display for BedDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} mm", self.width, self.depth, self.height)
    }
}
