//! # 3D Model Module
//!
//! Triangle meshes for models placed on the bed, plus STL import.
//!
//! Vertices are kept in single precision as read from STL files. Anything
//! derived from them for placement (bounds, world transforms) is computed
//! in double precision.

use crate::geometry::Aabb;
use anyhow::{anyhow, Result};
use nalgebra::{Matrix4, Point3, Vector3};
use std::path::Path;
use tracing::debug;

/// A 3D triangle made up of three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f32>; 3],
    pub normal: Vector3<f32>,
}

impl Triangle3D {
    pub fn new(v1: Point3<f32>, v2: Point3<f32>, v3: Point3<f32>) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normal: face_normal(&v1, &v2, &v3),
        }
    }

    /// Vertices as double precision points.
    pub fn points(&self) -> [Point3<f64>; 3] {
        self.vertices.map(|v| v.cast::<f64>())
    }
}

/// Unit normal of a triangle, or zero for a degenerate one.
pub(crate) fn face_normal<T: nalgebra::RealField + Copy>(
    v1: &Point3<T>,
    v2: &Point3<T>,
    v3: &Point3<T>,
) -> Vector3<T> {
    let normal = (v2 - v1).cross(&(v3 - v1));
    normal
        .try_normalize(T::default_epsilon())
        .unwrap_or_else(Vector3::zeros)
}

/// A 3D mesh model
#[derive(Debug, Clone)]
pub struct Mesh3D {
    pub triangles: Vec<Triangle3D>,
    bounds: Aabb,
}

impl Mesh3D {
    pub fn new(triangles: Vec<Triangle3D>) -> Self {
        let mut mesh = Self {
            triangles,
            bounds: Aabb::empty(),
        };
        mesh.calculate_bounds();
        mesh
    }

    pub fn from_stl_mesh(stl_mesh: &stl_io::IndexedMesh) -> Self {
        let vertex_count = stl_mesh.vertices.len();
        let to_point = |index: usize| {
            let v = stl_mesh.vertices[index];
            Point3::new(v[0], v[1], v[2])
        };

        let triangles = stl_mesh
            .faces
            .iter()
            .filter(|face| face.vertices.iter().all(|&i| i < vertex_count))
            .map(|face| {
                Triangle3D::new(
                    to_point(face.vertices[0]),
                    to_point(face.vertices[1]),
                    to_point(face.vertices[2]),
                )
            })
            .collect();

        Self::new(triangles)
    }

    /// Closed box mesh spanning `min` to `max`, twelve triangles.
    pub fn cuboid(min: Point3<f32>, max: Point3<f32>) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            Point3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let c = [
            corner(false, false, false),
            corner(true, false, false),
            corner(true, true, false),
            corner(false, true, false),
            corner(false, false, true),
            corner(true, false, true),
            corner(true, true, true),
            corner(false, true, true),
        ];
        let faces = [
            [0, 2, 1], [0, 3, 2], // bottom
            [4, 5, 6], [4, 6, 7], // top
            [0, 1, 5], [0, 5, 4], // front
            [2, 3, 7], [2, 7, 6], // back
            [1, 2, 6], [1, 6, 5], // right
            [3, 0, 4], [3, 4, 7], // left
        ];
        Self::new(
            faces
                .iter()
                .map(|f| Triangle3D::new(c[f[0]], c[f[1]], c[f[2]]))
                .collect(),
        )
    }

    fn calculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|tri| tri.points()),
        );
    }

    /// Local-space bounds; empty for a mesh without triangles.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Translate the mesh vertices
    pub fn translate(&mut self, offset: Vector3<f64>) {
        let offset = offset.cast::<f32>();
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                *vertex += offset;
            }
        }
        self.calculate_bounds();
    }

    /// Bounds of the mesh after applying `transform` to every vertex.
    pub fn world_bounds(&self, transform: &Matrix4<f64>) -> Aabb {
        Aabb::from_points(
            self.triangles
                .iter()
                .flat_map(|tri| tri.points())
                .map(|p| transform.transform_point(&p)),
        )
    }

    /// Triangles in world space, normals recomputed after the transform.
    pub fn world_triangles(&self, transform: &Matrix4<f64>) -> Vec<[Point3<f64>; 3]> {
        self.triangles
            .iter()
            .map(|tri| tri.points().map(|p| transform.transform_point(&p)))
            .collect()
    }
}

/// Supported 3D file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model3DFormat {
    /// STL (STereoLithography) format
    Stl,
}

/// 3D model importer for converting STL files to meshes
#[derive(Debug, Clone)]
pub struct Model3DImporter {
    pub reject_empty: bool,
}

impl Model3DImporter {
    pub fn new() -> Self {
        Self { reject_empty: true }
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.reject_empty = !allow;
        self
    }

    /// Import 3D model from file path
    pub fn import_file(&self, path: &Path) -> Result<Mesh3D> {
        match Self::detect_format(path)? {
            Model3DFormat::Stl => {
                debug!("Importing STL file: {}", path.display());
                let data = std::fs::read(path)
                    .map_err(|e| anyhow!("Failed to open STL file {}: {}", path.display(), e))?;
                self.import_stl_data(&data)
            }
        }
    }

    /// Import STL from in-memory data, binary or ASCII
    pub fn import_stl_data(&self, data: &[u8]) -> Result<Mesh3D> {
        debug!("Importing STL from data ({} bytes)", data.len());

        let mut cursor = std::io::Cursor::new(data);
        let stl = stl_io::read_stl(&mut cursor).map_err(|e| anyhow!("Failed to parse STL data: {}", e))?;

        debug!("STL contains {} faces", stl.faces.len());

        let mesh = Mesh3D::from_stl_mesh(&stl);
        if self.reject_empty && mesh.is_empty() {
            return Err(anyhow!("STL data contains no triangles"));
        }

        debug!("Mesh bounds: {:?} to {:?}", mesh.bounds().min, mesh.bounds().max);
        Ok(mesh)
    }

    /// Detect file format from file extension
    pub fn detect_format(path: &Path) -> Result<Model3DFormat> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
            .ok_or_else(|| anyhow!("Unable to determine file extension for: {}", path.display()))?;

        match extension.as_str() {
            "stl" => Ok(Model3DFormat::Stl),
            _ => Err(anyhow!("Unsupported 3D file format: .{}", extension)),
        }
    }
}

impl Default for Model3DImporter {
    fn default() -> Self {
        Self::new()
    }
}
