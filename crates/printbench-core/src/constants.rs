//! Shared constants.

/// Bed width (X) of the reference printer, in millimeters.
pub const DEFAULT_BED_WIDTH_MM: f64 = 190.0;

/// Bed depth (Y) of the reference printer, in millimeters.
pub const DEFAULT_BED_DEPTH_MM: f64 = 135.0;

/// Printable height (Z) of the reference printer, in millimeters.
pub const DEFAULT_BED_HEIGHT_MM: f64 = 125.0;

/// Base name used for generated scene files when no model has been loaded.
pub const DEFAULT_SCENE_BASE_NAME: &str = "bee";

/// Extension of exported scene files.
pub const SCENE_FILE_EXTENSION: &str = "stl";

/// Relative rotation applied by a single clockwise/counter-clockwise step.
pub const DEFAULT_ROTATE_STEP_DEGREES: f64 = 45.0;
