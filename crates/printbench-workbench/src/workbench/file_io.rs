//! Model loading and scene save/download.

use super::Workbench;
use crate::geometry::center_model_based_on_bounding_box;
use crate::persistence::{prepare_export, SceneExport};
use crate::scene::ObjectId;
use crate::services::{is_scene_file, ModelOrigin};
use chrono::Local;
use printbench_core::{AppEvent, NotificationEvent, PersistenceEvent, Result, SceneEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

impl Workbench {
    /// Load a mesh by name and place it on the bed.
    ///
    /// The mesh is centred on any axis where it lies entirely on one side of
    /// the origin, shifted right of the previously added object, selected,
    /// and dropped onto the bed.
    ///
    /// Unless `force_load` is set, a name this session saved a scene under
    /// is skipped and `Ok(None)` returned; saving a scene also shows up as a
    /// new upload and must not re-import the scene into itself.
    ///
    /// On failure an error notification is published and the scene is left
    /// untouched.
    pub async fn load_model(
        &mut self,
        name: &str,
        is_builtin: bool,
        force_load: bool,
    ) -> Result<Option<ObjectId>> {
        if !force_load && self.registry.was_saved(name) {
            info!("Skipping load of {}, saved by this session", name);
            self.publish(AppEvent::Scene(SceneEvent::LoadSkipped {
                name: name.to_string(),
            }));
            return Ok(None);
        }

        let origin = if is_builtin {
            ModelOrigin::Builtin
        } else {
            ModelOrigin::Uploaded
        };
        let source = Arc::clone(&self.mesh_source);
        let mut mesh = match source.fetch(name, origin).await {
            Ok(mesh) => mesh,
            Err(e) => {
                error!("Failed to load model {}: {}", name, e);
                self.notify(NotificationEvent::error(
                    "Load failed",
                    format!("Could not load {}: {}", name, e),
                ));
                return Err(e.into());
            }
        };

        center_model_based_on_bounding_box(&mut mesh);
        let id = self.registry.add_object(mesh, Some(name.to_string()));
        self.registry.set_last_loaded_name(name);
        info!("Loaded {} as object {}", name, id);
        self.publish(AppEvent::Scene(SceneEvent::ObjectAdded {
            id: id.value(),
            file_name: Some(name.to_string()),
        }));

        self.select_object(id);
        self.place_on_bed();
        Ok(Some(id))
    }

    /// Load an uploaded file if it is an STL, without forcing.
    pub async fn on_file_uploaded(&mut self, file_name: &str) -> Result<Option<ObjectId>> {
        if !is_scene_file(file_name) {
            return Ok(None);
        }
        self.load_model(file_name, false, false).await
    }

    fn export(&self, file_name: Option<&str>) -> Result<SceneExport> {
        let export = prepare_export(
            self.registry.objects(),
            file_name,
            self.registry.last_loaded_name(),
            &Local::now().naive_local(),
        );
        if let Err(e) = &export {
            self.notify(NotificationEvent::error("Export failed", e.to_string()));
        }
        export
    }

    /// Upload the scene as one STL to the configured target.
    ///
    /// The name is recorded as saved before the upload starts so the upload
    /// notification cannot race a re-import; it is forgotten again if the
    /// upload fails.
    ///
    /// # Returns
    ///
    /// The file name the scene was stored under.
    pub async fn save_scene(&mut self, file_name: Option<&str>) -> Result<String> {
        let SceneExport { file_name, payload } = self.export(file_name)?;
        let bytes = payload.len();

        let newly_marked = self.registry.mark_saved(&file_name);
        let store = Arc::clone(&self.file_store);
        match store.upload(payload, &file_name, &self.upload_target).await {
            Ok(()) => {
                info!("Scene saved as {} ({} bytes)", file_name, bytes);
                self.publish(AppEvent::Persistence(PersistenceEvent::SceneSaved {
                    file_name: file_name.clone(),
                    bytes,
                }));
                self.notify(NotificationEvent::success(
                    "Scene saved",
                    format!("Saved as {}", file_name),
                ));
                Ok(file_name)
            }
            Err(e) => {
                warn!("Saving scene {} failed: {}", file_name, e);
                // A name saved earlier in the session stays recorded
                if newly_marked {
                    self.registry.retract_saved(&file_name);
                }
                self.publish(AppEvent::Persistence(PersistenceEvent::SaveFailed {
                    file_name: file_name.clone(),
                    reason: e.to_string(),
                }));
                self.notify(NotificationEvent::error(
                    "Save failed",
                    format!("Could not save {}: {}", file_name, e),
                ));
                Err(e.into())
            }
        }
    }

    /// Hand the scene to the local downloader under a default name.
    pub async fn download_scene(&mut self) -> Result<PathBuf> {
        let SceneExport { file_name, payload } = self.export(None)?;
        let downloader = Arc::clone(&self.downloader);
        match downloader.download(&payload, &file_name).await {
            Ok(path) => {
                self.publish(AppEvent::Persistence(PersistenceEvent::SceneDownloaded {
                    file_name,
                }));
                Ok(path)
            }
            Err(e) => {
                self.notify(NotificationEvent::error("Download failed", e.to_string()));
                Err(e.into())
            }
        }
    }
}
