//! Perspective camera and ray picking against scene meshes.

use crate::geometry::Ray;
use crate::input::PointerVector;
use crate::scene::{ObjectId, SceneObject};
use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

/// Perspective camera looking at the bed.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, -200.0, 100.0),
            target: Point3::new(0.0, -100.0, 0.0),
            up: Vector3::z(),
            fov_y_degrees: 45.0,
            aspect: 1.0,
            near: 1.0,
            far: 3000.0,
        }
    }
}

impl Camera {
    /// Update the aspect ratio from a viewport size. Ignored for a zero height.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> bool {
        if height <= 0.0 || width <= 0.0 {
            return false;
        }
        self.aspect = width / height;
        true
    }

    /// World-space ray from the camera through a point in normalised
    /// device coordinates.
    pub fn ray_through(&self, pointer: &PointerVector) -> Option<Ray> {
        let view = Isometry3::look_at_rh(&self.position, &self.target, &self.up);
        let projection = Perspective3::new(
            self.aspect,
            self.fov_y_degrees.to_radians(),
            self.near,
            self.far,
        );
        let on_plane = projection.unproject_point(&Point3::new(pointer.x, pointer.y, pointer.z));
        let world = view.inverse_transform_point(&on_plane);
        let direction = (world - self.position).try_normalize(f64::EPSILON)?;
        if direction.iter().any(|d| !d.is_finite()) {
            return None;
        }
        Some(Ray::new(self.position, direction))
    }
}

/// A ray hit on a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub object: ObjectId,
    pub distance: f64,
}

/// Intersects a pointer ray with scene objects.
pub trait RayCaster: Send + Sync {
    /// Hits ordered nearest first.
    fn intersect(
        &self,
        pointer: &PointerVector,
        camera: &Camera,
        objects: &[SceneObject],
    ) -> Vec<RayHit>;
}

/// Ray caster testing world bounds first, then every triangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshRayCaster;

impl RayCaster for MeshRayCaster {
    fn intersect(
        &self,
        pointer: &PointerVector,
        camera: &Camera,
        objects: &[SceneObject],
    ) -> Vec<RayHit> {
        let Some(ray) = camera.ray_through(pointer) else {
            return Vec::new();
        };

        let mut hits: Vec<RayHit> = objects
            .iter()
            .filter(|object| object.world_bounds().intersect_ray(&ray).is_some())
            .filter_map(|object| {
                let transform = object.transform_matrix();
                object
                    .mesh()
                    .world_triangles(&transform)
                    .iter()
                    .filter_map(|tri| intersect_triangle(&ray, tri))
                    .min_by(f64::total_cmp)
                    .map(|distance| RayHit {
                        object: object.id(),
                        distance,
                    })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Möller–Trumbore ray/triangle test, double sided.
fn intersect_triangle(ray: &Ray, triangle: &[Point3<f64>; 3]) -> Option<f64> {
    const EPSILON: f64 = 1e-9;

    let edge1 = triangle[1] - triangle[0];
    let edge2 = triangle[2] - triangle[0];
    let p = ray.direction.cross(&edge2);
    let det = edge1.dot(&p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - triangle[0];
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(&q) * inv_det;
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model3d::Mesh3D;

    fn top_down_camera() -> Camera {
        Camera {
            position: Point3::new(0.0, 0.0, 100.0),
            target: Point3::origin(),
            up: Vector3::y(),
            ..Camera::default()
        }
    }

    fn cube_at(id: u64, x: f64) -> SceneObject {
        let mut object = SceneObject::new(
            ObjectId::new(id),
            Mesh3D::cuboid(Point3::new(-5.0, -5.0, 0.0), Point3::new(5.0, 5.0, 10.0)),
            None,
        );
        object.position.x = x;
        object
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = top_down_camera();
        let ray = camera.ray_through(&PointerVector::new(0.0, 0.0)).unwrap();
        assert!((ray.direction - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_set_viewport() {
        let mut camera = Camera::default();
        assert!(camera.set_viewport(800.0, 400.0));
        assert_eq!(camera.aspect, 2.0);
        assert!(!camera.set_viewport(800.0, 0.0));
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let tri = [
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let down = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!((intersect_triangle(&down, &tri).unwrap() - 5.0).abs() < 1e-12);

        let beside = Ray::new(Point3::new(3.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(intersect_triangle(&beside, &tri), None);

        let parallel = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(intersect_triangle(&parallel, &tri), None);
    }

    #[test]
    fn test_mesh_ray_caster_orders_hits() {
        let camera = top_down_camera();
        let mut tall = cube_at(2, 0.0);
        tall.scale.z = 2.0;
        let objects = vec![cube_at(1, 0.0), tall, cube_at(3, 40.0)];

        let hits = MeshRayCaster.intersect(&PointerVector::new(0.0, 0.0), &camera, &objects);
        let ids: Vec<_> = hits.iter().map(|h| h.object).collect();
        assert_eq!(ids, vec![ObjectId::new(2), ObjectId::new(1)]);
        assert!((hits[0].distance - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_ray_caster_miss() {
        let camera = top_down_camera();
        let objects = vec![cube_at(1, 60.0)];
        let hits = MeshRayCaster.intersect(&PointerVector::new(0.0, 0.0), &camera, &objects);
        assert!(hits.is_empty());
    }
}
