//! Builds a workbench session from the application configuration.

use async_trait::async_trait;
use nalgebra::Vector3;
use printbench_core::{BedDimensions, EventBus, ProfileError};
use printbench_settings::{BedProfile, Config};
use printbench_workbench::{
    calculate_object_shift, BedProfileSource, DirectoryDownloader, LocalFileStore,
    LocalMeshSource, ObjectId, StaticBedProfile, TransformController, Workbench,
    WorkbenchServices,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Reads the bed profile from a JSON document on disk.
#[derive(Debug, Clone)]
pub struct ProfileFileSource {
    path: PathBuf,
}

impl ProfileFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BedProfileSource for ProfileFileSource {
    async fn fetch_bed(&self) -> Result<BedDimensions, ProfileError> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ProfileError::FetchFailed {
                reason: format!("{}: {}", self.path.display(), e),
            })?;
        BedProfile::from_json(&data)?.into_dimensions()
    }
}

/// Mesh source over the configured model and upload directories.
pub fn local_mesh_source(config: &Config) -> LocalMeshSource {
    LocalMeshSource::new(&config.storage.models_dir, &config.storage.uploads_dir)
}

/// Opens a session wired to the local filesystem.
///
/// The bed comes from the configured profile document, or from
/// `config.bed` when none is set. The configured default model, if any, is
/// loaded before the session is returned; a failed default load is only
/// logged since the session already published a notification for it.
pub async fn open_session(config: &Config, events: Arc<EventBus>) -> Workbench {
    let storage = &config.storage;
    let controller = TransformController::new()
        .with_rotate_step(config.workbench.rotate_step_degrees)
        .with_keep_proportions(config.workbench.keep_proportions)
        .with_scale_input_mode(config.workbench.scale_input_mode);

    let services = WorkbenchServices::new(
        Arc::new(local_mesh_source(config)),
        Arc::new(LocalFileStore::new().with_target(&storage.upload_target, &storage.uploads_dir)),
        Arc::new(DirectoryDownloader::new(&storage.downloads_dir)),
    )
    .with_events(events)
    .with_upload_target(&storage.upload_target)
    .with_controller(controller);

    let profile: Box<dyn BedProfileSource> = match &storage.bed_profile {
        Some(path) => Box::new(ProfileFileSource::new(path)),
        None => Box::new(StaticBedProfile(config.bed)),
    };
    let mut workbench = Workbench::start(profile.as_ref(), services).await;

    if let Some(model) = &config.workbench.default_model {
        match workbench.load_model(model, true, true).await {
            Ok(_) => info!("Loaded default model {}", model),
            Err(e) => warn!("Default model {} not loaded: {}", model, e),
        }
    }

    workbench
}

/// Loads `models` in order and lays them out left to right.
///
/// With `scale_to_max` each model is scaled to fit the bed and dropped onto
/// it, then shifted along X to sit beside the previous model.
/// Stops at the first model that fails to load.
pub async fn arrange_models(
    workbench: &mut Workbench,
    models: &[String],
    builtin: bool,
    scale_to_max: bool,
) -> printbench_core::Result<Vec<ObjectId>> {
    let mut placed = Vec::with_capacity(models.len());
    for model in models {
        let Some(id) = workbench.load_model(model, builtin, true).await? else {
            continue;
        };
        if scale_to_max {
            workbench.scale_to_max();
            workbench.place_on_bed();
            let previous = placed.last().and_then(|p| workbench.registry().get(*p));
            let shift = workbench
                .registry()
                .get(id)
                .map(|object| calculate_object_shift(previous, &object.world_bounds()))
                .unwrap_or(0.0);
            if shift != 0.0 {
                workbench.activate_move();
                workbench.apply_gizmo_drag(Vector3::new(shift, 0.0, 0.0));
            }
        }
        placed.push(id);
    }
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printbench_workbench::{export_scene, Mesh3D, SceneObject};
    use nalgebra::Point3;
    use tempfile::TempDir;

    fn write_cube(path: &std::path::Path, size: f32) {
        let object = SceneObject::new(
            ObjectId::new(1),
            Mesh3D::cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(size, size, size)),
            None,
        );
        std::fs::write(path, export_scene(&[object]).unwrap()).unwrap();
    }

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::new();
        config.storage.models_dir = dir.path().join("models");
        config.storage.uploads_dir = dir.path().join("uploads");
        config.storage.downloads_dir = dir.path().join("downloads");
        std::fs::create_dir_all(&config.storage.models_dir).unwrap();
        config
    }

    #[tokio::test]
    async fn test_profile_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bed.json");
        std::fs::write(&path, r#"{"width": 220, "depth": 220, "height": 250}"#).unwrap();

        let bed = ProfileFileSource::new(&path).fetch_bed().await.unwrap();
        assert_eq!(bed, BedDimensions::new(220.0, 220.0, 250.0).unwrap());

        let missing = ProfileFileSource::new(dir.path().join("none.json"));
        assert!(matches!(
            missing.fetch_bed().await,
            Err(ProfileError::FetchFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_open_session_uses_profile_and_default_model() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        write_cube(&config.storage.models_dir.join("cube.stl"), 10.0);
        let profile = dir.path().join("bed.json");
        std::fs::write(&profile, r#"{"width": 220, "depth": 220, "height": 250}"#).unwrap();
        config.storage.bed_profile = Some(profile);
        config.workbench.default_model = Some("cube.stl".to_string());

        let workbench = open_session(&config, Arc::new(EventBus::new())).await;
        assert_eq!(workbench.bed().width, 220.0);
        assert_eq!(workbench.registry().len(), 1);
        assert!(workbench.registry().selected().is_some());
    }

    #[tokio::test]
    async fn test_open_session_survives_missing_default_model() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.workbench.default_model = Some("absent.stl".to_string());

        let workbench = open_session(&config, Arc::new(EventBus::new())).await;
        assert_eq!(*workbench.bed(), config.bed);
        assert!(workbench.registry().is_empty());
    }

    #[tokio::test]
    async fn test_arrange_scaled_models_side_by_side() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_cube(&config.storage.models_dir.join("a.stl"), 10.0);
        write_cube(&config.storage.models_dir.join("b.stl"), 20.0);

        let mut workbench = open_session(&config, Arc::new(EventBus::new())).await;
        let models = vec!["a.stl".to_string(), "b.stl".to_string()];
        let placed = arrange_models(&mut workbench, &models, true, true)
            .await
            .unwrap();

        assert_eq!(placed.len(), 2);
        let first = workbench.registry().get(placed[0]).unwrap().world_bounds();
        let second = workbench.registry().get(placed[1]).unwrap().world_bounds();
        assert!(second.min.x >= first.max.x + 1.0 - 1e-6);
        assert!(second.min.z >= 0.0 && second.min.z < 1e-3);
        assert!((second.size().x - first.size().x).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_arrange_stops_at_missing_model() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_cube(&config.storage.models_dir.join("a.stl"), 10.0);

        let mut workbench = open_session(&config, Arc::new(EventBus::new())).await;
        let models = vec!["a.stl".to_string(), "absent.stl".to_string()];
        assert!(arrange_models(&mut workbench, &models, true, false)
            .await
            .is_err());
        assert_eq!(workbench.registry().len(), 1);
    }

    #[tokio::test]
    async fn test_saved_scene_lands_in_uploads() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_cube(&config.storage.models_dir.join("cube.stl"), 5.0);

        let mut workbench = open_session(&config, Arc::new(EventBus::new())).await;
        workbench.load_model("cube.stl", true, true).await.unwrap();
        let name = workbench.save_scene(Some("plate one")).await.unwrap();

        assert_eq!(name, "plate_one.stl");
        assert!(config.storage.uploads_dir.join("plate_one.stl").exists());
    }
}
