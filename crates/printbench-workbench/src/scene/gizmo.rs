use super::object::{ObjectId, SceneObject};
use nalgebra::Vector3;
use printbench_core::TransformMode;

/// Interactive transform handle attached to the selected object.
///
/// A fresh gizmo is created whenever the selection moves to another
/// object; the generation number tells successive attachments apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformGizmo {
    generation: u64,
    attached_to: ObjectId,
    mode: TransformMode,
}

impl TransformGizmo {
    pub(crate) fn attach(generation: u64, object: ObjectId) -> Self {
        Self {
            generation,
            attached_to: object,
            mode: TransformMode::default(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn attached_to(&self) -> ObjectId {
        self.attached_to
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TransformMode) {
        self.mode = mode;
    }

    /// Apply a handle drag to the attached object.
    ///
    /// Translate adds `delta` in mm, Rotate adds `delta` in radians, and
    /// Scale multiplies each axis by `1 + delta`. A scale component that
    /// would become zero or negative is left unchanged.
    ///
    /// Returns false if the object is not the one this gizmo is attached to.
    pub fn apply_drag(&self, object: &mut SceneObject, delta: Vector3<f64>) -> bool {
        if object.id() != self.attached_to {
            return false;
        }
        match self.mode {
            TransformMode::Translate => object.position += delta,
            TransformMode::Rotate => object.rotation += delta,
            TransformMode::Scale => {
                for axis in 0..3 {
                    let scaled = object.scale[axis] * (1.0 + delta[axis]);
                    if scaled.is_finite() && scaled > 0.0 {
                        object.scale[axis] = scaled;
                    }
                }
            }
        }
        true
    }
}
