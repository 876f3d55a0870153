//! Selection, pointer and keyboard input, and viewport resize.

use super::Workbench;
use crate::input::{Key, KeyAction, PointerOutcome};
use crate::scene::{ObjectId, SelectionChange};
use printbench_core::{AppEvent, SelectionEvent, TransformEvent, TransformMode};

impl Workbench {
    /// Select an object and put its gizmo in translate mode.
    ///
    /// Re-selecting the current object keeps its gizmo.
    pub fn select_object(&mut self, id: ObjectId) -> Option<SelectionChange> {
        let change = self.controller.select(&mut self.registry, id)?;
        self.publish_selected(&change);
        Some(change)
    }

    /// Clear the selection and detach the gizmo.
    pub fn remove_all_selections(&mut self) -> Option<ObjectId> {
        let previous = self.controller.clear_selection(&mut self.registry);
        if previous.is_some() {
            self.publish(AppEvent::Selection(SelectionEvent::Cleared));
        }
        previous
    }

    /// Switch the transform mode of the selected object's gizmo.
    pub fn activate_mode(&mut self, mode: TransformMode) -> bool {
        let activated = self.controller.activate(&mut self.registry, mode);
        if activated {
            self.publish(AppEvent::Transform(TransformEvent::ModeChanged { mode }));
        }
        activated
    }

    pub fn activate_move(&mut self) -> bool {
        self.activate_mode(TransformMode::Translate)
    }

    pub fn activate_rotate(&mut self) -> bool {
        self.activate_mode(TransformMode::Rotate)
    }

    pub fn activate_scale(&mut self) -> bool {
        self.activate_mode(TransformMode::Scale)
    }

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.input.pointer_down(client_x, client_y)
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) -> PointerOutcome {
        let outcome = self.input.pointer_up(
            client_x,
            client_y,
            &mut self.registry,
            &mut self.controller,
            self.ray_caster.as_ref(),
        );
        match outcome {
            PointerOutcome::Selected(change) => self.publish_selected(&change),
            PointerOutcome::Cleared(Some(_)) => {
                self.publish(AppEvent::Selection(SelectionEvent::Cleared))
            }
            _ => {}
        }
        outcome
    }

    /// Apply the shortcut bound to `key`, if any.
    pub fn key_down(&mut self, key: Key) -> Option<KeyAction> {
        let action = KeyAction::for_key(key)?;
        let handled = match action {
            KeyAction::Activate(mode) => self.activate_mode(mode),
            KeyAction::RemoveSelected => self.remove_selected().is_some(),
            KeyAction::Deselect => self.remove_all_selections().is_some(),
        };
        handled.then_some(action)
    }

    /// New viewport size; the camera aspect follows and one render is requested.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.input.resize(width, height)
    }

    /// Whether a render was requested since the last call.
    pub fn take_render_request(&mut self) -> bool {
        self.input.take_render_request()
    }

    fn publish_selected(&self, change: &SelectionChange) {
        self.publish(AppEvent::Selection(SelectionEvent::Selected {
            id: change.selected.value(),
            gizmo_generation: change.gizmo_generation,
        }));
        self.publish(AppEvent::Transform(TransformEvent::ModeChanged {
            mode: TransformMode::Translate,
        }));
    }
}
