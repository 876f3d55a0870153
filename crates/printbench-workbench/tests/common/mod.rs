//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use nalgebra::Point3;
use printbench_core::{AppEvent, EventBus, EventFilter, SceneError, StorageError};
use printbench_workbench::{
    Camera, FileStore, Mesh3D, MeshSource, ModelOrigin, PointerVector, RayCaster, RayHit,
    SceneDownloader, SceneObject, WorkbenchServices,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn cube(size: f32) -> Mesh3D {
    Mesh3D::cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(size, size, size))
}

/// Serves meshes by name and counts fetches.
#[derive(Default)]
pub struct MemoryMeshSource {
    meshes: Mutex<HashMap<String, Mesh3D>>,
    pub fetches: Mutex<Vec<(String, ModelOrigin)>>,
}

impl MemoryMeshSource {
    pub fn with(self, name: &str, mesh: Mesh3D) -> Self {
        self.meshes.lock().unwrap().insert(name.to_string(), mesh);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }
}

#[async_trait]
impl MeshSource for MemoryMeshSource {
    async fn fetch(&self, name: &str, origin: ModelOrigin) -> Result<Mesh3D, SceneError> {
        self.fetches
            .lock()
            .unwrap()
            .push((name.to_string(), origin));
        self.meshes
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| SceneError::LoadFailed {
                name: name.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Records uploads; can be switched to fail.
#[derive(Default)]
pub struct MemoryFileStore {
    pub uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
    pub fail: Mutex<bool>,
}

impl MemoryFileStore {
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn upload(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: &str,
    ) -> Result<(), StorageError> {
        if *self.fail.lock().unwrap() {
            return Err(StorageError::UploadFailed {
                file_name: file_name.to_string(),
                reason: "store unavailable".to_string(),
            });
        }
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), target.to_string(), payload));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryDownloader {
    pub downloads: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl SceneDownloader for MemoryDownloader {
    async fn download(&self, payload: &[u8], file_name: &str) -> Result<PathBuf, StorageError> {
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.to_string(), payload.len()));
        Ok(PathBuf::from(file_name))
    }
}

/// Ray caster returning hits from a script, one list per call.
#[derive(Default)]
pub struct ScriptedCaster {
    pub hits: Mutex<Vec<Vec<printbench_workbench::ObjectId>>>,
}

impl RayCaster for ScriptedCaster {
    fn intersect(&self, _: &PointerVector, _: &Camera, _: &[SceneObject]) -> Vec<RayHit> {
        let mut script = self.hits.lock().unwrap();
        if script.is_empty() {
            return Vec::new();
        }
        script
            .remove(0)
            .into_iter()
            .enumerate()
            .map(|(i, object)| RayHit {
                object,
                distance: 10.0 + i as f64,
            })
            .collect()
    }
}

pub struct Harness {
    pub source: Arc<MemoryMeshSource>,
    pub store: Arc<MemoryFileStore>,
    pub downloader: Arc<MemoryDownloader>,
    pub events: Arc<EventBus>,
    pub seen: Arc<Mutex<Vec<AppEvent>>>,
}

impl Harness {
    pub fn new(source: MemoryMeshSource) -> Self {
        let events = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        events.subscribe(EventFilter::All, move |event| {
            sink.lock().unwrap().push(event);
        });
        Self {
            source: Arc::new(source),
            store: Arc::new(MemoryFileStore::default()),
            downloader: Arc::new(MemoryDownloader::default()),
            events,
            seen,
        }
    }

    pub fn services(&self) -> WorkbenchServices {
        WorkbenchServices::new(
            self.source.clone(),
            self.store.clone(),
            self.downloader.clone(),
        )
        .with_events(Arc::clone(&self.events))
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.seen.lock().unwrap().clone()
    }
}
