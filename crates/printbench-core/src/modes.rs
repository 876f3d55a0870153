//! Editing modes shared between the workbench and its presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Active manipulation mode of the transform gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    /// Move along the bed axes
    #[default]
    Translate,
    /// Rotate around the object's origin
    Rotate,
    /// Resize along each axis
    Scale,
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate => write!(f, "translate"),
            Self::Rotate => write!(f, "rotate"),
            Self::Scale => write!(f, "scale"),
        }
    }
}

/// Units the scale input fields are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleInputMode {
    /// Absolute size in millimeters
    #[default]
    Size,
    /// Percentage of the size the object had when it was selected
    Percentage,
}

impl fmt::Display for ScaleInputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size => write!(f, "mm"),
            Self::Percentage => write!(f, "%"),
        }
    }
}
