//! Scene file names and binary STL payloads.
//!
//! Exported scenes contain every object's triangles in world coordinates,
//! so the file reflects the layout on the bed rather than the source meshes.

use crate::model3d::face_normal;
use crate::scene::SceneObject;
use chrono::NaiveDateTime;
use printbench_core::constants::{DEFAULT_SCENE_BASE_NAME, SCENE_FILE_EXTENSION};
use printbench_core::{Result, SceneError, StorageError};
use std::path::Path;
use tracing::debug;

/// A serialised scene ready for upload or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneExport {
    pub file_name: String,
    pub payload: Vec<u8>,
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')')
}

fn has_stl_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCENE_FILE_EXTENSION))
}

/// Make a user-supplied scene name safe for the file store.
///
/// Spaces become underscores and any other character outside
/// `[A-Za-z0-9-_.()]` is dropped. A `.stl` extension is appended when
/// missing.
pub fn sanitize_file_name(name: &str) -> std::result::Result<String, StorageError> {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| is_allowed(*c))
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        return Err(StorageError::InvalidFileName {
            name: name.to_string(),
        });
    }

    if has_stl_extension(&cleaned) {
        Ok(cleaned)
    } else {
        Ok(format!("{}.{}", cleaned, SCENE_FILE_EXTENSION))
    }
}

/// `<base>_<Y>_<M>_<D>_<h>_<m>_<s>.stl` without zero padding, where base is
/// the stem of the last loaded model or `bee`.
pub fn default_scene_name(last_loaded: Option<&str>, now: &NaiveDateTime) -> String {
    let base = last_loaded
        .and_then(|name| Path::new(name).file_stem())
        .and_then(|stem| stem.to_str())
        .map(|stem| {
            stem.chars()
                .map(|c| if c == ' ' { '_' } else { c })
                .filter(|c| is_allowed(*c))
                .collect::<String>()
        })
        .filter(|stem| !stem.is_empty() && !stem.chars().all(|c| c == '.'))
        .unwrap_or_else(|| DEFAULT_SCENE_BASE_NAME.to_string());

    format!(
        "{}_{}.{}",
        base,
        now.format("%Y_%-m_%-d_%-H_%-M_%-S"),
        SCENE_FILE_EXTENSION
    )
}

/// Serialise all objects to one binary STL in world coordinates.
pub fn export_scene(objects: &[SceneObject]) -> std::result::Result<Vec<u8>, SceneError> {
    let triangles: Vec<stl_io::Triangle> = objects
        .iter()
        .flat_map(|object| object.mesh().world_triangles(&object.transform_matrix()))
        .map(|[a, b, c]| {
            let normal = face_normal(&a, &b, &c).cast::<f32>();
            let vertex = |p: nalgebra::Point3<f64>| {
                stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            };
            stl_io::Triangle {
                normal: stl_io::Normal::new([normal.x, normal.y, normal.z]),
                vertices: [vertex(a), vertex(b), vertex(c)],
            }
        })
        .collect();

    let mut payload = Vec::with_capacity(84 + triangles.len() * 50);
    stl_io::write_stl(&mut payload, triangles.iter()).map_err(|e| SceneError::ExportFailed {
        reason: e.to_string(),
    })?;

    debug!(
        "Exported {} objects, {} triangles, {} bytes",
        objects.len(),
        triangles.len(),
        payload.len()
    );
    Ok(payload)
}

/// File name plus payload for the current scene.
///
/// An explicit name is sanitised; otherwise a timestamped default is used.
pub fn prepare_export(
    objects: &[SceneObject],
    file_name: Option<&str>,
    last_loaded: Option<&str>,
    now: &NaiveDateTime,
) -> Result<SceneExport> {
    let file_name = match file_name {
        Some(name) => sanitize_file_name(name)?,
        None => default_scene_name(last_loaded, now),
    };
    let payload = export_scene(objects)?;
    Ok(SceneExport { file_name, payload })
}
