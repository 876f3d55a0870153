use super::gizmo::TransformGizmo;
use super::object::{Color, ObjectId, SceneObject};
use crate::geometry::{calculate_object_shift, object_out_of_bounds, object_size};
use crate::model3d::Mesh3D;
use nalgebra::Vector3;
use printbench_core::BedDimensions;
use std::collections::HashSet;
use tracing::debug;

/// Reference size captured when an object is selected.
///
/// Size-mode scale inputs are interpreted relative to this, so it must
/// always belong to the currently selected object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    pub object: ObjectId,
    pub initial_size: Vector3<f64>,
}

/// Outcome of [`SceneRegistry::select_object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub selected: ObjectId,
    pub previous: Option<ObjectId>,
    pub gizmo_generation: u64,
}

/// Owns every object on the bed together with the selection state.
///
/// `SceneRegistry` is responsible for:
/// - Keeping the placed objects in insertion order
/// - Tracking the single selected object and its transform gizmo
/// - Colouring objects to reflect selection and bed bounds
/// - Remembering scene file names saved during this session
///
/// # Selection Model
///
/// At most one object is selected. While one is, exactly one gizmo exists
/// and it is attached to that object; with no selection there is no gizmo.
/// The selected object is drawn in [`Color::SELECTED`] (or
/// [`Color::OUT_OF_BOUNDS`]), every other object in [`Color::DEFAULT`].
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    selected: Option<ObjectId>,
    gizmo: Option<TransformGizmo>,
    scale_state: Option<ScaleState>,
    bed: BedDimensions,
    saved_scenes: HashSet<String>,
    last_loaded_name: Option<String>,
    next_id: u64,
    next_gizmo_generation: u64,
}

impl SceneRegistry {
    /// Creates an empty registry for a bed of the given size.
    pub fn new(bed: BedDimensions) -> Self {
        Self {
            objects: Vec::new(),
            selected: None,
            gizmo: None,
            scale_state: None,
            bed,
            saved_scenes: HashSet::new(),
            last_loaded_name: None,
            next_id: 1,
            next_gizmo_generation: 1,
        }
    }

    pub fn bed(&self) -> &BedDimensions {
        &self.bed
    }

    pub fn set_bed(&mut self, bed: BedDimensions) {
        self.bed = bed;
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&SceneObject> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_object_mut(&mut self) -> Option<&mut SceneObject> {
        let id = self.selected?;
        self.get_mut(id)
    }

    pub fn gizmo(&self) -> Option<&TransformGizmo> {
        self.gizmo.as_ref()
    }

    pub fn gizmo_mut(&mut self) -> Option<&mut TransformGizmo> {
        self.gizmo.as_mut()
    }

    /// Scale reference of the selected object.
    pub fn scale_state(&self) -> Option<ScaleState> {
        self.scale_state
            .filter(|state| Some(state.object) == self.selected)
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a mesh as a new object, shifted along X to sit right of the
    /// previously added object.
    ///
    /// # Returns
    ///
    /// The id of the new object. It is not selected.
    pub fn add_object(&mut self, mesh: Mesh3D, file_name: Option<String>) -> ObjectId {
        let id = self.allocate_id();
        let shift = calculate_object_shift(self.objects.last(), &mesh.bounds());
        let mut object = SceneObject::new(id, mesh, file_name);
        object.position.x = shift;
        debug!("Added object {} at x = {:.3}", id, shift);
        self.objects.push(object);
        id
    }

    /// Adds a copy of an existing object, laid out like a newly loaded one.
    ///
    /// # Returns
    ///
    /// The id of the copy, or `None` if `source` is not in the scene.
    pub fn duplicate_object(&mut self, source: ObjectId) -> Option<ObjectId> {
        let id = ObjectId::new(self.next_id);
        let mut copy = self.get(source)?.duplicate(id);
        self.next_id += 1;
        copy.color = Color::DEFAULT;
        copy.position.x = calculate_object_shift(self.objects.last(), &copy.world_bounds());
        debug!("Duplicated object {} as {}", source, id);
        self.objects.push(copy);
        Some(id)
    }

    /// Makes `id` the single selected object.
    ///
    /// The previous selection is un-highlighted and the scale reference is
    /// captured from the object's untransformed size. The gizmo is replaced
    /// only when the selection moves to a different object.
    ///
    /// # Returns
    ///
    /// `None` if `id` is not in the scene, leaving the selection untouched.
    pub fn select_object(&mut self, id: ObjectId) -> Option<SelectionChange> {
        let initial_size = object_size(Some(self.get(id)?.mesh()));
        let previous = self.selected;

        if let Some(prev) = previous.and_then(|p| self.get_mut(p)) {
            prev.color = Color::DEFAULT;
        }
        if let Some(object) = self.get_mut(id) {
            object.color = Color::SELECTED;
        }

        let generation = match self.gizmo {
            Some(gizmo) if previous == Some(id) => gizmo.generation(),
            _ => {
                let generation = self.next_gizmo_generation;
                self.next_gizmo_generation += 1;
                self.gizmo = Some(TransformGizmo::attach(generation, id));
                generation
            }
        };
        self.selected = Some(id);
        self.scale_state = Some(ScaleState {
            object: id,
            initial_size,
        });

        Some(SelectionChange {
            selected: id,
            previous,
            gizmo_generation: generation,
        })
    }

    /// Clears the selection and detaches the gizmo.
    ///
    /// # Returns
    ///
    /// The previously selected object, if there was one.
    pub fn remove_all_selections(&mut self) -> Option<ObjectId> {
        let previous = self.selected.take();
        if let Some(prev) = previous.and_then(|p| self.get_mut(p)) {
            prev.color = Color::DEFAULT;
        }
        self.gizmo = None;
        self.scale_state = None;
        previous
    }

    /// Removes one object. The selection is cleared and the gizmo detached
    /// first, whichever object was selected.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id() == id)?;
        self.remove_all_selections();
        Some(self.objects.remove(index))
    }

    /// Removes every object and clears the selection.
    ///
    /// # Returns
    ///
    /// The number of objects removed.
    pub fn clear_bed(&mut self) -> usize {
        self.remove_all_selections();
        let removed = self.objects.len();
        self.objects.clear();
        removed
    }

    /// Recolours the selected object according to whether it fits the bed.
    ///
    /// # Returns
    ///
    /// `Some(out_of_bounds)` for the selected object, `None` with no selection.
    pub fn refresh_bounds_indicator(&mut self) -> Option<bool> {
        let bed = self.bed;
        let object = self.selected_object_mut()?;
        let out_of_bounds = object_out_of_bounds(object, &bed);
        object.color = if out_of_bounds {
            Color::OUT_OF_BOUNDS
        } else {
            Color::SELECTED
        };
        Some(out_of_bounds)
    }

    pub fn last_loaded_name(&self) -> Option<&str> {
        self.last_loaded_name.as_deref()
    }

    pub fn set_last_loaded_name(&mut self, name: impl Into<String>) {
        self.last_loaded_name = Some(name.into());
    }

    /// Records a scene file name as saved. Returns false if it already was.
    pub fn mark_saved(&mut self, file_name: &str) -> bool {
        self.saved_scenes.insert(file_name.to_string())
    }

    /// Forgets a saved name after the upload failed.
    pub fn retract_saved(&mut self, file_name: &str) -> bool {
        self.saved_scenes.remove(file_name)
    }

    pub fn was_saved(&self, file_name: &str) -> bool {
        self.saved_scenes.contains(file_name)
    }

    pub fn saved_scene_count(&self) -> usize {
        self.saved_scenes.len()
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new(BedDimensions::default())
    }
}
