use crate::geometry::Aabb;
use crate::model3d::Mesh3D;
use nalgebra::{Matrix4, Rotation3, Vector3};
use std::fmt;

/// Nudge applied when floating-point drift leaves an object just below the bed.
pub const PLACE_ON_BED_EPSILON: f64 = 0.0001;

/// Stable identifier of an object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// RGB surface colour of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Unselected objects.
    pub const DEFAULT: Color = Color::from_hex(0x8C8C8C);
    /// The selected object while it fits on the bed.
    pub const SELECTED: Color = Color::from_hex(0xECC459);
    /// The selected object while it extends past the printable volume.
    pub const OUT_OF_BOUNDS: Color = Color::from_hex(0xBD362F);

    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A model placed in the scene.
///
/// Each object owns its mesh; placement lives in the position, rotation
/// (XYZ Euler, radians), and scale fields.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: ObjectId,
    mesh: Mesh3D,
    file_name: Option<String>,
    pub color: Color,
    pub position: Vector3<f64>,
    pub rotation: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl SceneObject {
    pub fn new(id: ObjectId, mesh: Mesh3D, file_name: Option<String>) -> Self {
        Self {
            id,
            mesh,
            file_name,
            color: Color::DEFAULT,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn mesh(&self) -> &Mesh3D {
        &self.mesh
    }

    /// Name of the file this object was loaded from, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn rotation_matrix(&self) -> Matrix4<f64> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z);
        (rx * ry * rz).to_homogeneous()
    }

    /// Local-to-world matrix: translation * rotation * scale.
    pub fn transform_matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation_matrix()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    pub fn world_bounds(&self) -> Aabb {
        self.mesh.world_bounds(&self.transform_matrix())
    }

    pub fn reset_transform(&mut self) {
        self.position = Vector3::zeros();
        self.rotation = Vector3::zeros();
        self.scale = Vector3::new(1.0, 1.0, 1.0);
    }

    /// Lower the object until its lowest point touches Z = 0.
    ///
    /// If rounding still leaves it below the bed it is raised by
    /// [`PLACE_ON_BED_EPSILON`].
    pub fn place_on_bed(&mut self) {
        let bounds = self.world_bounds();
        if bounds.is_empty() {
            return;
        }
        if bounds.min.z != 0.0 {
            self.position.z -= bounds.min.z;
        }
        if self.world_bounds().min.z < 0.0 {
            self.position.z += PLACE_ON_BED_EPSILON;
        }
    }

    /// Copy with its own mesh, keeping rotation, scale, and colour, at the origin.
    pub fn duplicate(&self, id: ObjectId) -> SceneObject {
        SceneObject {
            id,
            mesh: self.mesh.clone(),
            file_name: self.file_name.clone(),
            color: self.color,
            position: Vector3::zeros(),
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}
