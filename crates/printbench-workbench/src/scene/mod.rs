//! Scene state: the objects on the bed, the selection, and its gizmo.

mod gizmo;
mod object;
mod registry;

pub use gizmo::TransformGizmo;
pub use object::{Color, ObjectId, SceneObject, PLACE_ON_BED_EPSILON};
pub use registry::{ScaleState, SceneRegistry, SelectionChange};
