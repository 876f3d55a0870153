//! Transform operations on the selected object.

use super::Workbench;
use crate::scene::{ObjectId, SceneObject, SceneRegistry};
use crate::transform::{Axis, TransformController};
use nalgebra::Vector3;
use printbench_core::{AppEvent, ScaleInputMode, SceneEvent, SelectionEvent, TransformEvent};
use tracing::debug;

impl Workbench {
    /// Run a controller operation and announce it if it changed the selection.
    fn edit<F>(&mut self, operation: &str, apply: F) -> bool
    where
        F: FnOnce(&mut TransformController, &mut SceneRegistry) -> bool,
    {
        let was_out_of_bounds = self.controller.panel().out_of_bounds;
        if !apply(&mut self.controller, &mut self.registry) {
            debug!("{} not applied", operation);
            return false;
        }
        let Some(id) = self.registry.selected() else {
            return true;
        };
        self.publish(AppEvent::Transform(TransformEvent::Applied {
            id: id.value(),
            operation: operation.to_string(),
        }));
        let out_of_bounds = self.controller.panel().out_of_bounds;
        if out_of_bounds != was_out_of_bounds {
            self.publish(AppEvent::Transform(TransformEvent::BoundsChanged {
                id: id.value(),
                out_of_bounds,
            }));
        }
        true
    }

    pub fn move_to(&mut self, x: &str, y: &str, z: &str) -> bool {
        self.edit("move", |c, r| c.move_to(r, x, y, z))
    }

    pub fn rotate(&mut self, x: &str, y: &str, z: &str) -> bool {
        self.edit("rotate", |c, r| c.rotate(r, x, y, z))
    }

    pub fn rotate_step(&mut self, degrees: f64) -> bool {
        self.edit("rotate", |c, r| c.rotate_step(r, degrees))
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.edit("rotate_cw", |c, r| c.rotate_cw(r))
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.edit("rotate_ccw", |c, r| c.rotate_ccw(r))
    }

    pub fn set_rotation_axis(&mut self, axis: Axis) {
        self.controller.set_rotation_axis(axis);
    }

    pub fn scale(&mut self, x: &str, y: &str, z: &str, changed: Axis) -> bool {
        self.edit("scale", |c, r| c.scale(r, x, y, z, changed))
    }

    pub fn scale_by_size(&mut self, size: Vector3<f64>) -> bool {
        self.edit("scale", |c, r| c.scale_by_size(r, size))
    }

    pub fn set_scale_input_mode(&mut self, mode: ScaleInputMode) {
        self.controller.set_scale_input_mode(&self.registry, mode);
    }

    pub fn set_keep_proportions(&mut self, keep: bool) {
        self.controller.set_keep_proportions(keep);
    }

    pub fn scale_to_max(&mut self) -> bool {
        self.edit("scale_to_max", |c, r| c.scale_to_max(r))
    }

    pub fn center_model(&mut self) -> bool {
        self.edit("center", |c, r| c.center_model(r))
    }

    pub fn place_on_bed(&mut self) -> bool {
        self.edit("place_on_bed", |c, r| c.place_on_bed(r))
    }

    pub fn reset_selected_model(&mut self) -> bool {
        self.edit("reset", |c, r| c.reset_selected_model(r))
    }

    /// Apply a gizmo handle drag in the gizmo's current mode.
    pub fn apply_gizmo_drag(&mut self, delta: Vector3<f64>) -> bool {
        self.edit("drag", |c, r| c.apply_drag(r, delta))
    }

    /// Copy an object; the copy becomes the selection and sits on the bed.
    pub fn duplicate_model(&mut self, id: ObjectId) -> Option<ObjectId> {
        let copy = self.controller.duplicate_model(&mut self.registry, id)?;
        let file_name = self
            .registry
            .get(copy)
            .and_then(|o| o.file_name().map(str::to_string));
        self.publish(AppEvent::Scene(SceneEvent::ObjectAdded {
            id: copy.value(),
            file_name,
        }));
        if let Some(gizmo) = self.registry.gizmo() {
            self.publish(AppEvent::Selection(SelectionEvent::Selected {
                id: copy.value(),
                gizmo_generation: gizmo.generation(),
            }));
        }
        Some(copy)
    }

    pub fn duplicate_selected(&mut self) -> Option<ObjectId> {
        let id = self.registry.selected()?;
        self.duplicate_model(id)
    }

    /// Remove the selected object.
    pub fn remove_selected(&mut self) -> Option<ObjectId> {
        let id = self.controller.remove_selected(&mut self.registry)?;
        self.publish(AppEvent::Scene(SceneEvent::ObjectRemoved { id: id.value() }));
        self.publish(AppEvent::Selection(SelectionEvent::Cleared));
        Some(id)
    }

    /// Remove any object. The selection, its gizmo, and the out-of-bounds
    /// indication are cleared first.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.registry.get(id)?;
        self.remove_all_selections();
        let removed = self.registry.remove_object(id)?;
        self.publish(AppEvent::Scene(SceneEvent::ObjectRemoved { id: id.value() }));
        Some(removed)
    }

    /// Remove every object from the bed.
    pub fn clear_bed(&mut self) -> usize {
        self.remove_all_selections();
        let removed = self.registry.clear_bed();
        self.publish(AppEvent::Scene(SceneEvent::BedCleared { removed }));
        removed
    }
}
