//! Translate, rotate, and scale controller for the selected object.
//!
//! Operations take the [`SceneRegistry`] explicitly and return whether they
//! changed anything. Unparsable or out-of-range input is ignored without
//! error; the [`InputPanel`] keeps showing the object's actual values.

use crate::geometry::{convert_to_degrees, convert_to_radians};
use crate::scene::{ObjectId, SceneRegistry, SelectionChange};
use nalgebra::Vector3;
use printbench_core::constants::DEFAULT_ROTATE_STEP_DEGREES;
use printbench_core::{format_fixed, parse_decimal, ScaleInputMode, TransformMode};
use tracing::debug;

/// Subtracted from the fit ratio so scaled-to-max objects stay clear of the walls.
pub const SCALE_TO_MAX_MARGIN: f64 = 0.01;

const POSITION_DECIMALS: usize = 1;
const ROTATION_DECIMALS: usize = 1;
const SIZE_DECIMALS: usize = 2;
const PERCENT_DECIMALS: usize = 1;

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Values shown in the transform input fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputPanel {
    /// Input group currently shown, `None` when nothing is selected.
    pub visible_group: Option<TransformMode>,
    /// Position in mm.
    pub position: [String; 3],
    /// Rotation in degrees.
    pub rotation: [String; 3],
    /// Size in mm or percentage, depending on `scale_units`.
    pub scale: [String; 3],
    pub scale_units: ScaleInputMode,
    /// Whether controls that need a selection are enabled.
    pub selection_controls_enabled: bool,
    /// Whether the selected object extends past the printable volume.
    pub out_of_bounds: bool,
}

/// Applies transform operations to the selected object and keeps the input
/// panel in sync with it.
#[derive(Debug, Clone)]
pub struct TransformController {
    mode: TransformMode,
    scale_input_mode: ScaleInputMode,
    keep_proportions: bool,
    rotation_axis: Axis,
    rotate_step_degrees: f64,
    panel: InputPanel,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformController {
    pub fn new() -> Self {
        Self {
            mode: TransformMode::Translate,
            scale_input_mode: ScaleInputMode::Size,
            keep_proportions: true,
            rotation_axis: Axis::X,
            rotate_step_degrees: DEFAULT_ROTATE_STEP_DEGREES,
            panel: InputPanel::default(),
        }
    }

    pub fn with_rotate_step(mut self, degrees: f64) -> Self {
        self.rotate_step_degrees = degrees;
        self
    }

    pub fn with_keep_proportions(mut self, keep: bool) -> Self {
        self.keep_proportions = keep;
        self
    }

    pub fn with_scale_input_mode(mut self, mode: ScaleInputMode) -> Self {
        self.scale_input_mode = mode;
        self.panel.scale_units = mode;
        self
    }

    pub fn mode(&self) -> TransformMode {
        self.mode
    }

    pub fn scale_input_mode(&self) -> ScaleInputMode {
        self.scale_input_mode
    }

    pub fn keep_proportions(&self) -> bool {
        self.keep_proportions
    }

    pub fn set_keep_proportions(&mut self, keep: bool) {
        self.keep_proportions = keep;
    }

    pub fn rotation_axis(&self) -> Axis {
        self.rotation_axis
    }

    pub fn set_rotation_axis(&mut self, axis: Axis) {
        self.rotation_axis = axis;
    }

    pub fn rotate_step_degrees(&self) -> f64 {
        self.rotate_step_degrees
    }

    pub fn panel(&self) -> &InputPanel {
        &self.panel
    }

    /// Select an object and switch to translate mode.
    pub fn select(&mut self, registry: &mut SceneRegistry, id: ObjectId) -> Option<SelectionChange> {
        let change = registry.select_object(id)?;
        self.panel.selection_controls_enabled = true;
        self.activate(registry, TransformMode::Translate);
        self.check_bounds(registry);
        Some(change)
    }

    pub fn clear_selection(&mut self, registry: &mut SceneRegistry) -> Option<ObjectId> {
        let previous = registry.remove_all_selections();
        self.panel.selection_controls_enabled = false;
        self.panel.visible_group = None;
        self.panel.out_of_bounds = false;
        previous
    }

    /// Switch the gizmo mode and show the matching input group.
    ///
    /// Does nothing without a selection.
    pub fn activate(&mut self, registry: &mut SceneRegistry, mode: TransformMode) -> bool {
        if registry.selected().is_none() {
            return false;
        }
        let Some(gizmo) = registry.gizmo_mut() else {
            return false;
        };
        gizmo.set_mode(mode);
        self.mode = mode;
        self.panel.visible_group = Some(mode);
        self.refresh_inputs(registry);
        true
    }

    pub fn activate_move(&mut self, registry: &mut SceneRegistry) -> bool {
        self.activate(registry, TransformMode::Translate)
    }

    pub fn activate_rotate(&mut self, registry: &mut SceneRegistry) -> bool {
        self.activate(registry, TransformMode::Rotate)
    }

    pub fn activate_scale(&mut self, registry: &mut SceneRegistry) -> bool {
        self.activate(registry, TransformMode::Scale)
    }

    /// Set the absolute position of the selected object, in mm.
    pub fn move_to(&mut self, registry: &mut SceneRegistry, x: &str, y: &str, z: &str) -> bool {
        let Some(position) = parse_triplet(x, y, z) else {
            return false;
        };
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.position = position;
        self.finish_edit(registry)
    }

    /// Set the absolute rotation of the selected object, in degrees.
    pub fn rotate(&mut self, registry: &mut SceneRegistry, x: &str, y: &str, z: &str) -> bool {
        let Some(degrees) = parse_triplet(x, y, z) else {
            return false;
        };
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.rotation = degrees.map(convert_to_radians);
        self.finish_edit(registry)
    }

    /// Rotate by `degrees` about the current rotation axis.
    ///
    /// X and Y turn by `+degrees`; Z turns by `-degrees`.
    pub fn rotate_step(&mut self, registry: &mut SceneRegistry, degrees: f64) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        let radians = convert_to_radians(degrees);
        let axis = self.rotation_axis;
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        match axis {
            Axis::X => object.rotation.x += radians,
            Axis::Y => object.rotation.y += radians,
            Axis::Z => object.rotation.z -= radians,
        }
        self.finish_edit(registry)
    }

    pub fn rotate_cw(&mut self, registry: &mut SceneRegistry) -> bool {
        self.rotate_step(registry, self.rotate_step_degrees)
    }

    pub fn rotate_ccw(&mut self, registry: &mut SceneRegistry) -> bool {
        self.rotate_step(registry, -self.rotate_step_degrees)
    }

    /// Scale the selected object from input field values.
    ///
    /// In size mode the values are millimetres relative to the size captured
    /// at selection; in percentage mode they are percentages. With
    /// proportions kept, the factor from `changed` is applied to all axes.
    /// Zero or negative values are rejected.
    pub fn scale(
        &mut self,
        registry: &mut SceneRegistry,
        x: &str,
        y: &str,
        z: &str,
        changed: Axis,
    ) -> bool {
        let Some(values) = parse_triplet(x, y, z) else {
            return false;
        };
        if values.iter().any(|v| *v <= 0.0) {
            debug!("Rejected non-positive scale input {:?}", values);
            return false;
        }
        let Some(state) = registry.scale_state() else {
            return false;
        };
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };

        let mut factors = match self.scale_input_mode {
            ScaleInputMode::Size => Vector3::from_fn(|i, _| {
                if state.initial_size[i] > 0.0 {
                    values[i] / state.initial_size[i]
                } else {
                    object.scale[i]
                }
            }),
            ScaleInputMode::Percentage => values / 100.0,
        };
        if self.keep_proportions {
            factors = Vector3::repeat(factors[changed.index()]);
        }
        if factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return false;
        }

        object.scale = factors;
        self.finish_edit(registry)
    }

    /// Scale the selected object to an absolute size in mm, ignoring the
    /// proportion lock.
    pub fn scale_by_size(&mut self, registry: &mut SceneRegistry, size: Vector3<f64>) -> bool {
        if size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return false;
        }
        let Some(state) = registry.scale_state() else {
            return false;
        };
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.scale = Vector3::from_fn(|i, _| {
            if state.initial_size[i] > 0.0 {
                size[i] / state.initial_size[i]
            } else {
                object.scale[i]
            }
        });
        self.finish_edit(registry)
    }

    /// Switch between size and percentage display. The object is unchanged.
    pub fn set_scale_input_mode(&mut self, registry: &SceneRegistry, mode: ScaleInputMode) {
        self.scale_input_mode = mode;
        self.panel.scale_units = mode;
        self.refresh_inputs(registry);
    }

    /// Uniformly scale the selected object to the largest size that fits
    /// the bed and move it to the origin.
    ///
    /// The object is placed so its world bounds are centred on the origin
    /// in X and Y, which keeps meshes whose geometry is off-centre on the
    /// bed. Z is left at 0; [`Self::place_on_bed`] drops it onto the surface.
    pub fn scale_to_max(&mut self, registry: &mut SceneRegistry) -> bool {
        let Some(state) = registry.scale_state() else {
            return false;
        };
        let bed = *registry.bed();
        let limits = Vector3::new(bed.width, bed.depth, bed.height);
        let ratio = (0..3)
            .filter(|&i| state.initial_size[i] > 0.0)
            .map(|i| limits[i] / state.initial_size[i])
            .fold(f64::INFINITY, f64::min);
        let factor = ratio - SCALE_TO_MAX_MARGIN;
        if !factor.is_finite() || factor <= 0.0 {
            debug!("Cannot scale to max, fit ratio {}", ratio);
            return false;
        }
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.scale = Vector3::repeat(factor);
        object.position = Vector3::zeros();
        let center = object.world_bounds().center();
        object.position.x = -center.x;
        object.position.y = -center.y;
        self.finish_edit(registry)
    }

    /// Move the selected object to the bed centre and onto the surface.
    pub fn center_model(&mut self, registry: &mut SceneRegistry) -> bool {
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.position.x = 0.0;
        object.position.y = 0.0;
        object.place_on_bed();
        self.finish_edit(registry)
    }

    pub fn place_on_bed(&mut self, registry: &mut SceneRegistry) -> bool {
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.place_on_bed();
        self.finish_edit(registry)
    }

    /// Reset position, rotation, and scale of the selected object.
    pub fn reset_selected_model(&mut self, registry: &mut SceneRegistry) -> bool {
        let Some(object) = registry.selected_object_mut() else {
            return false;
        };
        object.reset_transform();
        self.finish_edit(registry)
    }

    /// Copy an object, select the copy, and drop it onto the bed.
    pub fn duplicate_model(&mut self, registry: &mut SceneRegistry, id: ObjectId) -> Option<ObjectId> {
        let copy = registry.duplicate_object(id)?;
        self.select(registry, copy);
        self.place_on_bed(registry);
        Some(copy)
    }

    /// Remove the selected object from the scene.
    pub fn remove_selected(&mut self, registry: &mut SceneRegistry) -> Option<ObjectId> {
        let id = registry.selected()?;
        registry.remove_object(id);
        self.clear_selection(registry);
        Some(id)
    }

    /// Apply a gizmo handle drag to the selected object.
    pub fn apply_drag(&mut self, registry: &mut SceneRegistry, delta: Vector3<f64>) -> bool {
        if delta.iter().any(|d| !d.is_finite()) {
            return false;
        }
        let Some(gizmo) = registry.gizmo().copied() else {
            return false;
        };
        let Some(object) = registry.get_mut(gizmo.attached_to()) else {
            return false;
        };
        if !gizmo.apply_drag(object, delta) {
            return false;
        }
        self.finish_edit(registry)
    }

    /// Recolour the selection for bed bounds and mirror it on the panel.
    pub fn check_bounds(&mut self, registry: &mut SceneRegistry) -> Option<bool> {
        let result = registry.refresh_bounds_indicator();
        self.panel.out_of_bounds = result.unwrap_or(false);
        result
    }

    /// Rewrite every input field from the selected object.
    pub fn refresh_inputs(&mut self, registry: &SceneRegistry) {
        let Some(object) = registry.selected_object() else {
            return;
        };
        self.panel.position = format_triplet(&object.position, POSITION_DECIMALS);
        self.panel.rotation =
            format_triplet(&object.rotation.map(convert_to_degrees), ROTATION_DECIMALS);
        self.panel.scale = match (self.scale_input_mode, registry.scale_state()) {
            (ScaleInputMode::Size, Some(state)) => format_triplet(
                &state.initial_size.component_mul(&object.scale),
                SIZE_DECIMALS,
            ),
            (ScaleInputMode::Size, None) => Default::default(),
            (ScaleInputMode::Percentage, _) => {
                format_triplet(&(object.scale * 100.0), PERCENT_DECIMALS)
            }
        };
    }

    fn finish_edit(&mut self, registry: &mut SceneRegistry) -> bool {
        self.check_bounds(registry);
        self.refresh_inputs(registry);
        true
    }
}

fn parse_triplet(x: &str, y: &str, z: &str) -> Option<Vector3<f64>> {
    let parse = |input: &str| match parse_decimal(input) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Ignoring transform input {:?}: {}", input, e);
            None
        }
    };
    Some(Vector3::new(parse(x)?, parse(y)?, parse(z)?))
}

fn format_triplet(values: &Vector3<f64>, decimals: usize) -> [String; 3] {
    [
        format_fixed(values.x, decimals),
        format_fixed(values.y, decimals),
        format_fixed(values.z, decimals),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::object_out_of_bounds;
    use crate::model3d::Mesh3D;
    use crate::scene::Color;
    use nalgebra::Point3;
    use printbench_core::BedDimensions;

    fn setup(min: [f32; 3], max: [f32; 3]) -> (SceneRegistry, TransformController, ObjectId) {
        let mut registry = SceneRegistry::new(BedDimensions::default());
        let id = registry.add_object(Mesh3D::cuboid(Point3::from(min), Point3::from(max)), None);
        let mut controller = TransformController::new();
        controller.select(&mut registry, id);
        (registry, controller, id)
    }

    fn object(registry: &SceneRegistry, id: ObjectId) -> &crate::scene::SceneObject {
        registry.get(id).unwrap()
    }

    #[test]
    fn test_select_shows_translate_group() {
        let (registry, controller, _) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        let panel = controller.panel();
        assert_eq!(panel.visible_group, Some(TransformMode::Translate));
        assert!(panel.selection_controls_enabled);
        assert!(!panel.out_of_bounds);
        assert_eq!(panel.position, ["0.0", "0.0", "0.0"]);
        assert_eq!(panel.scale, ["10.00", "10.00", "10.00"]);
        assert_eq!(registry.gizmo().unwrap().mode(), TransformMode::Translate);
    }

    #[test]
    fn test_reselect_keeps_gizmo_and_returns_to_translate() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        let generation = registry.gizmo().unwrap().generation();
        controller.activate_rotate(&mut registry);

        controller.select(&mut registry, id).unwrap();
        assert_eq!(registry.gizmo().unwrap().generation(), generation);
        assert_eq!(registry.gizmo().unwrap().mode(), TransformMode::Translate);
        assert_eq!(controller.panel().visible_group, Some(TransformMode::Translate));
    }

    #[test]
    fn test_activate_without_selection_is_noop() {
        let mut registry = SceneRegistry::default();
        let mut controller = TransformController::new();
        assert!(!controller.activate_rotate(&mut registry));
        assert_eq!(controller.mode(), TransformMode::Translate);
        assert_eq!(controller.panel().visible_group, None);
    }

    #[test]
    fn test_activate_scale_sets_gizmo_mode() {
        let (mut registry, mut controller, _) = setup([0.0; 3], [1.0; 3]);
        assert!(controller.activate_scale(&mut registry));
        assert_eq!(controller.mode(), TransformMode::Scale);
        assert_eq!(registry.gizmo().unwrap().mode(), TransformMode::Scale);
        assert_eq!(controller.panel().visible_group, Some(TransformMode::Scale));
    }

    #[test]
    fn test_move_to_accepts_comma_decimal() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        assert!(controller.move_to(&mut registry, "12,5", "-3", "0"));
        assert_eq!(object(&registry, id).position, Vector3::new(12.5, -3.0, 0.0));
        assert_eq!(controller.panel().position, ["12.5", "-3.0", "0.0"]);
    }

    #[test]
    fn test_move_to_rejects_garbage() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        assert!(!controller.move_to(&mut registry, "abc", "0", "0"));
        assert_eq!(object(&registry, id).position, Vector3::zeros());
    }

    #[test]
    fn test_move_out_of_bounds_recolours() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        assert!(controller.move_to(&mut registry, "200", "0", "0"));
        assert!(controller.panel().out_of_bounds);
        assert_eq!(object(&registry, id).color, Color::OUT_OF_BOUNDS);

        controller.move_to(&mut registry, "0", "0", "0");
        assert!(!controller.panel().out_of_bounds);
        assert_eq!(object(&registry, id).color, Color::SELECTED);
    }

    #[test]
    fn test_rotate_in_degrees() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [1.0; 3]);
        assert!(controller.rotate(&mut registry, "90", "0", "-45"));
        let rotation = object(&registry, id).rotation;
        assert!((rotation.x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((rotation.z + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
        assert_eq!(controller.panel().rotation, ["90.0", "0.0", "-45.0"]);
    }

    #[test]
    fn test_rotate_cw_on_x() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [1.0; 3]);
        controller.set_rotation_axis(Axis::X);
        assert!(controller.rotate_cw(&mut registry));
        let degrees = convert_to_degrees(object(&registry, id).rotation.x);
        assert!((degrees - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_step_z_is_inverted() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [1.0; 3]);
        controller.set_rotation_axis(Axis::Z);
        controller.rotate_cw(&mut registry);
        let degrees = convert_to_degrees(object(&registry, id).rotation.z);
        assert!((degrees + 45.0).abs() < 1e-9);

        controller.rotate_ccw(&mut registry);
        assert!(object(&registry, id).rotation.z.abs() < 1e-12);
    }

    #[test]
    fn test_scale_size_mode_with_proportions() {
        let (mut registry, mut controller, id) = setup([-5.0, -10.0, 0.0], [5.0, 10.0, 4.0]);
        assert!(controller.scale(&mut registry, "20", "20", "4", Axis::X));
        assert_eq!(object(&registry, id).scale, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(controller.panel().scale, ["20.00", "40.00", "8.00"]);
    }

    #[test]
    fn test_scale_size_mode_free_axes() {
        let (mut registry, mut controller, id) = setup([-5.0, -10.0, 0.0], [5.0, 10.0, 4.0]);
        controller.set_keep_proportions(false);
        assert!(controller.scale(&mut registry, "5", "40", "4", Axis::Y));
        assert_eq!(object(&registry, id).scale, Vector3::new(0.5, 2.0, 1.0));
    }

    #[test]
    fn test_scale_percentage_mode() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [10.0; 3]);
        controller.set_scale_input_mode(&registry, ScaleInputMode::Percentage);
        assert_eq!(controller.panel().scale, ["100.0", "100.0", "100.0"]);
        assert!(controller.scale(&mut registry, "150", "100", "100", Axis::X));
        assert_eq!(object(&registry, id).scale, Vector3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_scale_rejects_negative_and_zero() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [10.0; 3]);
        assert!(!controller.scale(&mut registry, "-5", "10", "10", Axis::X));
        assert!(!controller.scale(&mut registry, "0", "10", "10", Axis::X));
        assert_eq!(object(&registry, id).scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_switching_scale_mode_keeps_object() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [10.0; 3]);
        controller.scale(&mut registry, "25", "25", "25", Axis::X);
        controller.set_scale_input_mode(&registry, ScaleInputMode::Percentage);
        assert_eq!(controller.panel().scale, ["250.0", "250.0", "250.0"]);
        controller.set_scale_input_mode(&registry, ScaleInputMode::Size);
        assert_eq!(controller.panel().scale, ["25.00", "25.00", "25.00"]);
        assert_eq!(object(&registry, id).scale, Vector3::new(2.5, 2.5, 2.5));
    }

    #[test]
    fn test_scale_by_size_ignores_lock() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [10.0; 3]);
        assert!(controller.scale_by_size(&mut registry, Vector3::new(20.0, 10.0, 5.0)));
        assert_eq!(object(&registry, id).scale, Vector3::new(2.0, 1.0, 0.5));
        assert!(!controller.scale_by_size(&mut registry, Vector3::new(-1.0, 10.0, 5.0)));
    }

    #[test]
    fn test_scale_to_max_fits_bed() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, -5.0], [5.0, 5.0, 5.0]);
        assert!(controller.scale_to_max(&mut registry));
        controller.place_on_bed(&mut registry);

        let object = object(&registry, id);
        // Height limits: 125 / 10 - 0.01
        assert!((object.scale.x - 12.49).abs() < 1e-9);
        assert!(!controller.panel().out_of_bounds);
        let bounds = object.world_bounds();
        let bed = BedDimensions::default();
        assert!(bounds.min.x >= -bed.half_width() && bounds.max.x <= bed.half_width());
        assert!(bounds.min.y >= -bed.half_depth() && bounds.max.y <= bed.half_depth());
        assert!(bounds.min.z >= 0.0 && bounds.max.z <= bed.height);
    }

    #[test]
    fn test_scale_to_max_centres_off_centre_mesh() {
        // Straddles the origin unevenly, so loading does not re-centre it
        let (mut registry, mut controller, id) = setup([-1.0, -5.0, 0.0], [39.0, 5.0, 10.0]);
        assert!(controller.scale_to_max(&mut registry));
        controller.place_on_bed(&mut registry);

        let bounds = object(&registry, id).world_bounds();
        assert!(bounds.center().x.abs() < 1e-9);
        assert!(bounds.center().y.abs() < 1e-9);
        assert!(!object_out_of_bounds(object(&registry, id), registry.bed()));
        assert!(!controller.panel().out_of_bounds);
    }

    #[test]
    fn test_center_model() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, -5.0], [5.0, 5.0, 5.0]);
        controller.move_to(&mut registry, "30", "20", "50");
        assert!(controller.center_model(&mut registry));
        let bounds = object(&registry, id).world_bounds();
        assert_eq!(object(&registry, id).position.x, 0.0);
        assert_eq!(object(&registry, id).position.y, 0.0);
        assert!(bounds.min.z.abs() < 1e-3);
    }

    #[test]
    fn test_reset_selected_model() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [10.0; 3]);
        controller.move_to(&mut registry, "30", "20", "50");
        controller.rotate(&mut registry, "10", "20", "30");
        controller.scale(&mut registry, "20", "20", "20", Axis::X);
        assert!(controller.reset_selected_model(&mut registry));
        let object = object(&registry, id);
        assert_eq!(object.position, Vector3::zeros());
        assert_eq!(object.rotation, Vector3::zeros());
        assert_eq!(object.scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_duplicate_model_selects_copy() {
        let (mut registry, mut controller, id) = setup([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);
        let copy = controller.duplicate_model(&mut registry, id).unwrap();
        assert_eq!(registry.selected(), Some(copy));
        assert_eq!(object(&registry, id).color, Color::DEFAULT);
        assert_eq!(object(&registry, copy).world_bounds().min.z, 0.0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_selected() {
        let (mut registry, mut controller, id) = setup([0.0; 3], [1.0; 3]);
        assert_eq!(controller.remove_selected(&mut registry), Some(id));
        assert!(registry.is_empty());
        assert!(!controller.panel().selection_controls_enabled);
        assert_eq!(controller.panel().visible_group, None);
        assert_eq!(controller.remove_selected(&mut registry), None);
    }

    #[test]
    fn test_apply_drag_follows_gizmo_mode() {
        let (mut registry, mut controller, id) = setup([-1.0, -1.0, 0.0], [1.0, 1.0, 2.0]);
        assert!(controller.apply_drag(&mut registry, Vector3::new(4.0, 0.0, 0.0)));
        assert_eq!(object(&registry, id).position.x, 4.0);
        assert_eq!(controller.panel().position[0], "4.0");

        controller.activate_scale(&mut registry);
        controller.apply_drag(&mut registry, Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(object(&registry, id).scale, Vector3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_operations_without_selection() {
        let mut registry = SceneRegistry::default();
        registry.add_object(Mesh3D::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0)), None);
        let mut controller = TransformController::new();
        assert!(!controller.move_to(&mut registry, "1", "1", "1"));
        assert!(!controller.rotate_cw(&mut registry));
        assert!(!controller.scale(&mut registry, "1", "1", "1", Axis::X));
        assert!(!controller.scale_to_max(&mut registry));
        assert!(!controller.place_on_bed(&mut registry));
        assert!(!controller.apply_drag(&mut registry, Vector3::new(1.0, 0.0, 0.0)));
    }
}
