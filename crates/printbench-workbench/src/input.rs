//! Pointer and keyboard handling for the workbench viewport.
//!
//! A pointer press followed by a release at the identical position is a
//! click and picks an object; any movement in between is a camera drag and
//! leaves the selection alone.

use crate::camera::{Camera, RayCaster};
use crate::scene::{ObjectId, SceneRegistry, SelectionChange};
use crate::transform::TransformController;
use printbench_core::TransformMode;
use tracing::{debug, trace};

/// Depth component used for every pointer position.
pub const POINTER_DEPTH: f64 = 0.5;

/// Pointer position in normalised device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PointerVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: POINTER_DEPTH,
        }
    }

    fn same_position(&self, other: &PointerVector) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

/// Placement of the render surface in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_left: f64,
    pub offset_top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            offset_left: 0.0,
            offset_top: 0.0,
            width,
            height,
        }
    }

    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self
    }

    /// Client pixel position to NDC, origin at the viewport centre and Y up.
    pub fn to_ndc(&self, client_x: f64, client_y: f64) -> Option<PointerVector> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(PointerVector::new(
            2.0 * ((client_x - self.offset_left) / self.width) - 1.0,
            1.0 - 2.0 * ((client_y - self.offset_top) / self.height),
        ))
    }
}

/// What a pointer release did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A click picked a different object.
    Selected(SelectionChange),
    /// A click hit the object that was already selected.
    AlreadySelected(ObjectId),
    /// A click hit nothing; carries the previous selection.
    Cleared(Option<ObjectId>),
    /// The pointer moved between press and release.
    Dragged,
    /// No matching press, or the viewport has no area.
    Ignored,
}

/// Keys the workbench reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Delete,
    Backspace,
    Escape,
}

/// Action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Activate(TransformMode),
    RemoveSelected,
    Deselect,
}

impl KeyAction {
    /// `W` translate, `E` rotate, `R` scale, Delete/Backspace remove,
    /// Escape deselect.
    pub fn for_key(key: Key) -> Option<KeyAction> {
        match key {
            Key::Character(c) => match c.to_ascii_lowercase() {
                'w' => Some(KeyAction::Activate(TransformMode::Translate)),
                'e' => Some(KeyAction::Activate(TransformMode::Rotate)),
                'r' => Some(KeyAction::Activate(TransformMode::Scale)),
                _ => None,
            },
            Key::Delete | Key::Backspace => Some(KeyAction::RemoveSelected),
            Key::Escape => Some(KeyAction::Deselect),
        }
    }
}

/// Turns raw viewport input into selection changes.
#[derive(Debug, Clone)]
pub struct InputBridge {
    camera: Camera,
    viewport: Viewport,
    pressed_at: Option<PointerVector>,
    render_requested: bool,
}

impl InputBridge {
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = Camera::default();
        camera.set_viewport(viewport.width, viewport.height);
        Self {
            camera,
            viewport,
            pressed_at: None,
            render_requested: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        self.pressed_at = self.viewport.to_ndc(client_x, client_y);
        self.pressed_at.is_some()
    }

    pub fn pointer_up(
        &mut self,
        client_x: f64,
        client_y: f64,
        registry: &mut SceneRegistry,
        controller: &mut TransformController,
        caster: &dyn RayCaster,
    ) -> PointerOutcome {
        let Some(pressed) = self.pressed_at.take() else {
            return PointerOutcome::Ignored;
        };
        let Some(released) = self.viewport.to_ndc(client_x, client_y) else {
            return PointerOutcome::Ignored;
        };
        if !pressed.same_position(&released) {
            trace!("Pointer dragged, selection unchanged");
            return PointerOutcome::Dragged;
        }

        let hits = caster.intersect(&released, &self.camera, registry.objects());
        let outcome = match hits.first() {
            Some(hit) if registry.selected() == Some(hit.object) => {
                PointerOutcome::AlreadySelected(hit.object)
            }
            Some(hit) => match controller.select(registry, hit.object) {
                Some(change) => PointerOutcome::Selected(change),
                None => PointerOutcome::Ignored,
            },
            None => PointerOutcome::Cleared(controller.clear_selection(registry)),
        };
        debug!("Pointer click at ({:.3}, {:.3}): {:?}", released.x, released.y, outcome);

        if registry.selected().is_some() {
            controller.refresh_inputs(registry);
        }
        outcome
    }

    /// New viewport size. Updates the camera aspect and requests one render.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.camera.set_viewport(width, height) {
            return false;
        }
        self.viewport.width = width;
        self.viewport.height = height;
        self.render_requested = true;
        true
    }

    /// Returns and clears the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }
}
