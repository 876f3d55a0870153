//! Geometry helpers for placing models on the bed.
//!
//! All placement math is done in double precision in world millimetres,
//! with Z pointing up from the bed surface and the bed centred on the origin.

use crate::model3d::Mesh3D;
use crate::scene::SceneObject;
use nalgebra::{Point3, Vector3};
use printbench_core::BedDimensions;

/// Gap left between auto-laid-out objects along X, in mm.
pub const LAYOUT_GAP_MM: f64 = 1.0;

/// Axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis so that expanding it by a
/// point yields a degenerate box at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<I: IntoIterator<Item = Point3<f64>>>(points: I) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_by_point(&point);
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_by_point(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Extent along each axis; zero for an empty box.
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Slab test. Returns the distance along the ray to the entry point,
    /// or to the exit point when the origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let inv_dir = ray.direction.map(|d| 1.0 / d);
        let t_min = (self.min - ray.origin).component_mul(&inv_dir);
        let t_max = (self.max - ray.origin).component_mul(&inv_dir);

        let t1 = t_min.inf(&t_max);
        let t2 = t_min.sup(&t_max);

        let t_near = t1.max();
        let t_far = t2.min();

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

/// A ray in world space with a normalised direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

fn axis_extent(min: f64, max: f64) -> f64 {
    let mut extent = 0.0;
    if max < 0.0 {
        extent -= max;
    } else {
        extent += max;
    }
    if min < 0.0 {
        extent -= min;
    } else {
        extent += min;
    }
    extent
}

/// Untransformed size of a mesh, used as the 100% reference for scaling.
///
/// Each axis contributes `|max| + |min|`, which equals the true extent for a
/// mesh straddling the origin on that axis. Missing or empty meshes are size
/// zero.
pub fn object_size(mesh: Option<&Mesh3D>) -> Vector3<f64> {
    let Some(mesh) = mesh else {
        return Vector3::zeros();
    };
    let bounds = mesh.bounds();
    if bounds.is_empty() {
        return Vector3::zeros();
    }
    Vector3::new(
        axis_extent(bounds.min.x, bounds.max.x),
        axis_extent(bounds.min.y, bounds.max.y),
        axis_extent(bounds.min.z, bounds.max.z),
    )
}

/// Whether the object's world bounds leave the printable volume.
///
/// The volume spans `[-w/2, w/2] x [-d/2, d/2] x [0, h]`. Touching a face
/// is still inside.
pub fn object_out_of_bounds(object: &SceneObject, bed: &BedDimensions) -> bool {
    let bounds = object.world_bounds();
    if bounds.is_empty() {
        return false;
    }
    let half_width = bed.half_width();
    let half_depth = bed.half_depth();

    bounds.min.x < -half_width
        || bounds.max.x > half_width
        || bounds.min.y < -half_depth
        || bounds.max.y > half_depth
        || bounds.max.z > bed.height
        || bounds.min.z < 0.0
}

/// X offset that places a new mesh just right of the previously added object.
///
/// Returns 0 when there is no previous object or either box is empty.
pub fn calculate_object_shift(previous: Option<&SceneObject>, incoming: &Aabb) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };
    let previous_bounds = previous.world_bounds();
    if previous_bounds.is_empty() || incoming.is_empty() {
        return 0.0;
    }
    previous_bounds.max.x + LAYOUT_GAP_MM - incoming.min.x
}

/// Re-centre mesh vertices on the origin along every axis where the mesh
/// lies entirely on one side of zero. Axes that already straddle zero are
/// left alone.
pub fn center_model_based_on_bounding_box(mesh: &mut Mesh3D) {
    let bounds = mesh.bounds();
    if bounds.is_empty() {
        return;
    }
    let center = bounds.center();
    let straddles = |min: f64, max: f64| min < 0.0 && max > 0.0;

    let offset = Vector3::new(
        if straddles(bounds.min.x, bounds.max.x) { 0.0 } else { -center.x },
        if straddles(bounds.min.y, bounds.max.y) { 0.0 } else { -center.y },
        if straddles(bounds.min.z, bounds.max.z) { 0.0 } else { -center.z },
    );
    if offset != Vector3::zeros() {
        mesh.translate(offset);
    }
}

/// Radians to degrees. NaN converts to 0.
pub fn convert_to_degrees(radians: f64) -> f64 {
    if radians.is_nan() {
        return 0.0;
    }
    radians.to_degrees()
}

/// Degrees to radians. NaN converts to 0.
pub fn convert_to_radians(degrees: f64) -> f64 {
    if degrees.is_nan() {
        return 0.0;
    }
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectId;

    fn cuboid(min: [f32; 3], max: [f32; 3]) -> Mesh3D {
        Mesh3D::cuboid(Point3::from(min), Point3::from(max))
    }

    fn object_at(mesh: Mesh3D, position: Vector3<f64>) -> SceneObject {
        let mut object = SceneObject::new(ObjectId::new(1), mesh, None);
        object.position = position;
        object
    }

    #[test]
    fn test_aabb_empty_and_expand() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), Vector3::zeros());

        aabb.expand_by_point(&Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        aabb.expand_by_point(&Point3::new(-1.0, 0.0, 5.0));
        assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 3.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 5.0));
        assert_eq!(aabb.center(), Point3::new(0.0, 1.0, 4.0));
    }

    #[test]
    fn test_aabb_union() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(-2.0, 0.5, 0.0), Point3::new(0.5, 3.0, 1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 3.0, 1.0));
        assert_eq!(Aabb::empty().union(&a), a);
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));

        let hit = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&hit), Some(4.0));

        let miss = Ray::new(Point3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&miss), None);

        let behind = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.intersect_ray(&behind), None);

        let inside = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(aabb.intersect_ray(&inside), Some(1.0));
    }

    #[test]
    fn test_object_size_straddling_and_missing() {
        assert_eq!(object_size(None), Vector3::zeros());

        let mesh = cuboid([-10.0, -5.0, 0.0], [10.0, 5.0, 8.0]);
        assert_eq!(object_size(Some(&mesh)), Vector3::new(20.0, 10.0, 8.0));

        let empty = Mesh3D::new(Vec::new());
        assert_eq!(object_size(Some(&empty)), Vector3::zeros());
    }

    #[test]
    fn test_object_size_one_sided_axis_sums_magnitudes() {
        let mesh = cuboid([2.0, -4.0, -3.0], [6.0, -1.0, 3.0]);
        let size = object_size(Some(&mesh));
        assert_eq!(size.x, 8.0);
        assert_eq!(size.y, 5.0);
        assert_eq!(size.z, 6.0);
    }

    #[test]
    fn test_out_of_bounds_faces() {
        let bed = BedDimensions::default();
        let mesh = || cuboid([-5.0, -5.0, 0.0], [5.0, 5.0, 10.0]);

        assert!(!object_out_of_bounds(&object_at(mesh(), Vector3::zeros()), &bed));
        // Touching the right edge exactly is inside
        assert!(!object_out_of_bounds(
            &object_at(mesh(), Vector3::new(90.0, 0.0, 0.0)),
            &bed
        ));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(91.0, 0.0, 0.0)), &bed));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(-91.0, 0.0, 0.0)), &bed));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(0.0, 63.0, 0.0)), &bed));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(0.0, -63.0, 0.0)), &bed));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(0.0, 0.0, -0.5)), &bed));
        assert!(object_out_of_bounds(&object_at(mesh(), Vector3::new(0.0, 0.0, 116.0)), &bed));
    }

    #[test]
    fn test_object_shift() {
        let incoming = Aabb::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(5.0, 5.0, 5.0));
        assert_eq!(calculate_object_shift(None, &incoming), 0.0);

        let previous = object_at(
            cuboid([-10.0, -10.0, 0.0], [10.0, 10.0, 5.0]),
            Vector3::new(3.0, 0.0, 0.0),
        );
        // previous max.x = 13, so incoming min.x lands at 14
        assert_eq!(calculate_object_shift(Some(&previous), &incoming), 19.0);
        assert_eq!(calculate_object_shift(Some(&previous), &Aabb::empty()), 0.0);
    }

    #[test]
    fn test_center_model_only_one_sided_axes() {
        let mut mesh = cuboid([10.0, -4.0, 0.0], [20.0, 6.0, 8.0]);
        center_model_based_on_bounding_box(&mut mesh);
        let bounds = mesh.bounds();
        assert_eq!(bounds.min.x, -5.0);
        assert_eq!(bounds.max.x, 5.0);
        // Y straddles zero, untouched
        assert_eq!(bounds.min.y, -4.0);
        assert_eq!(bounds.max.y, 6.0);
        // Z touches zero, so it is one-sided and gets centred
        assert_eq!(bounds.min.z, -4.0);
        assert_eq!(bounds.max.z, 4.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert!((convert_to_degrees(std::f64::consts::FRAC_PI_4) - 45.0).abs() < 1e-12);
        assert!((convert_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(convert_to_degrees(f64::NAN), 0.0);
        assert_eq!(convert_to_radians(f64::NAN), 0.0);
    }
}
