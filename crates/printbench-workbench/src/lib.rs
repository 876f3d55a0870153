//! # Printbench Workbench
//!
//! Scene editing core of the printer workbench: STL models are placed on a
//! virtual print bed, selected, moved, rotated, and scaled, then exported as
//! a single binary STL for slicing.
//!
//! ## Core Components
//!
//! - **Geometry**: bounding boxes, object sizes, bed bounds checks, auto-layout
//! - **Scene**: placed objects, the print bed, the selection, and its gizmo
//! - **Transform**: the translate/rotate/scale controller and its input panel
//! - **Input**: pointer picking and keyboard shortcuts
//! - **Persistence**: scene file names and STL payloads for the file store
//! - **Workbench**: the session tying these together with async collaborators
//!
//! ## Architecture
//!
//! ```text
//! Workbench (session)
//!   ├── InputBridge ──► RayCaster (picking)
//!   ├── TransformController ──► InputPanel (displayed values)
//!   ├── SceneRegistry
//!   │     ├── SceneObject (Mesh3D + transform)
//!   │     └── TransformGizmo
//!   └── Services (MeshSource, FileStore, SceneDownloader)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printbench_workbench::Workbench;
//!
//! let mut workbench = Workbench::start(&profile_source, services).await;
//! workbench.load_model("BEE.stl", true, false).await?;
//! workbench.scale_to_max();
//! workbench.place_on_bed();
//! let file_name = workbench.save_scene(None).await?;
//! ```

pub mod camera;
pub mod geometry;
pub mod input;
pub mod model3d;
pub mod persistence;
pub mod scene;
pub mod services;
pub mod transform;
pub mod workbench;

pub use camera::{Camera, MeshRayCaster, RayCaster, RayHit};
pub use geometry::{
    calculate_object_shift, center_model_based_on_bounding_box, convert_to_degrees,
    convert_to_radians, object_out_of_bounds, object_size, Aabb, Ray,
};
pub use input::{InputBridge, Key, KeyAction, PointerOutcome, PointerVector, Viewport};
pub use model3d::{Mesh3D, Model3DImporter, Triangle3D};
pub use persistence::{
    default_scene_name, export_scene, prepare_export, sanitize_file_name, SceneExport,
};
pub use scene::{
    Color, ObjectId, ScaleState, SceneObject, SceneRegistry, SelectionChange, TransformGizmo,
};
pub use services::{
    BedProfileSource, DirectoryDownloader, FileStore, LocalFileStore, LocalMeshSource,
    MeshSource, ModelOrigin, SceneDownloader, StaticBedProfile,
};
pub use transform::{Axis, InputPanel, TransformController};
pub use workbench::{Workbench, WorkbenchServices};

pub use printbench_core::{BedDimensions, ScaleInputMode, TransformMode};
