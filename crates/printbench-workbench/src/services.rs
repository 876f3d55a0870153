//! Collaborators the workbench talks to across async boundaries.
//!
//! The traits describe what the session needs from the outside world:
//! meshes by name, somewhere to upload scenes, somewhere to download them,
//! and the printer's bed size. Filesystem-backed implementations are
//! provided for headless use.

use crate::model3d::{Mesh3D, Model3DImporter};
use async_trait::async_trait;
use printbench_core::constants::SCENE_FILE_EXTENSION;
use printbench_core::{BedDimensions, ProfileError, SceneError, StorageError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a model is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelOrigin {
    /// Shipped with the application.
    Builtin,
    /// Uploaded by the user, including previously saved scenes.
    Uploaded,
}

/// Fetches meshes by file name.
#[async_trait]
pub trait MeshSource: Send + Sync {
    async fn fetch(&self, name: &str, origin: ModelOrigin) -> Result<Mesh3D, SceneError>;
}

/// Stores an uploaded scene under a named target.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload(&self, payload: Vec<u8>, file_name: &str, target: &str)
        -> Result<(), StorageError>;
}

/// Hands a scene to the user as a local file.
#[async_trait]
pub trait SceneDownloader: Send + Sync {
    async fn download(&self, payload: &[u8], file_name: &str) -> Result<PathBuf, StorageError>;
}

/// Provides the printer's bed size, fetched once at startup.
#[async_trait]
pub trait BedProfileSource: Send + Sync {
    async fn fetch_bed(&self) -> Result<BedDimensions, ProfileError>;
}

/// Reject names that would escape the model directory.
fn plain_file_name(name: &str) -> Option<&str> {
    let file_name = Path::new(name).file_name()?.to_str()?;
    (file_name == name).then_some(file_name)
}

/// Reads STL files from a built-in models directory and an uploads directory.
#[derive(Debug, Clone)]
pub struct LocalMeshSource {
    models_dir: PathBuf,
    uploads_dir: PathBuf,
    importer: Model3DImporter,
}

impl LocalMeshSource {
    pub fn new(models_dir: impl Into<PathBuf>, uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
            uploads_dir: uploads_dir.into(),
            importer: Model3DImporter::new(),
        }
    }

    pub fn directory(&self, origin: ModelOrigin) -> &Path {
        match origin {
            ModelOrigin::Builtin => &self.models_dir,
            ModelOrigin::Uploaded => &self.uploads_dir,
        }
    }

    /// STL file names available from `origin`, sorted.
    pub async fn list_models(&self, origin: ModelOrigin) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(self.directory(origin)).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if Model3DImporter::detect_format(Path::new(&name)).is_ok() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl MeshSource for LocalMeshSource {
    async fn fetch(&self, name: &str, origin: ModelOrigin) -> Result<Mesh3D, SceneError> {
        let load_failed = |reason: String| SceneError::LoadFailed {
            name: name.to_string(),
            reason,
        };
        let file_name =
            plain_file_name(name).ok_or_else(|| load_failed("not a plain file name".into()))?;
        let path = self.directory(origin).join(file_name);
        debug!("Reading model {}", path.display());

        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| load_failed(e.to_string()))?;
        self.importer
            .import_stl_data(&data)
            .map_err(|e| load_failed(format!("{:#}", e)))
    }
}

/// Writes uploads into directories registered per target name.
#[derive(Debug, Clone, Default)]
pub struct LocalFileStore {
    targets: HashMap<String, PathBuf>,
}

impl LocalFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.targets.insert(target.into(), dir.into());
        self
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: &str,
    ) -> Result<(), StorageError> {
        let upload_failed = |reason: String| StorageError::UploadFailed {
            file_name: file_name.to_string(),
            reason,
        };
        let dir = self
            .targets
            .get(target)
            .ok_or_else(|| upload_failed(format!("unknown upload target '{}'", target)))?;
        let name = plain_file_name(file_name).ok_or_else(|| StorageError::InvalidFileName {
            name: file_name.to_string(),
        })?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| upload_failed(e.to_string()))?;
        let path = dir.join(name);
        tokio::fs::write(&path, &payload)
            .await
            .map_err(|e| upload_failed(e.to_string()))?;

        info!("Uploaded {} ({} bytes) to {}", name, payload.len(), path.display());
        Ok(())
    }
}

/// Saves downloads into a fixed directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl SceneDownloader for DirectoryDownloader {
    async fn download(&self, payload: &[u8], file_name: &str) -> Result<PathBuf, StorageError> {
        let name = plain_file_name(file_name).ok_or_else(|| StorageError::InvalidFileName {
            name: file_name.to_string(),
        })?;
        let download_failed = |e: std::io::Error| StorageError::DownloadFailed {
            file_name: file_name.to_string(),
            reason: e.to_string(),
        };
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(download_failed)?;
        let path = self.dir.join(name);
        tokio::fs::write(&path, payload)
            .await
            .map_err(download_failed)?;
        info!("Downloaded scene to {}", path.display());
        Ok(path)
    }
}

/// Bed profile with fixed dimensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBedProfile(pub BedDimensions);

#[async_trait]
impl BedProfileSource for StaticBedProfile {
    async fn fetch_bed(&self) -> Result<BedDimensions, ProfileError> {
        self.0.validate()?;
        Ok(self.0)
    }
}

/// Whether an uploaded file should be loaded into the scene.
pub fn is_scene_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SCENE_FILE_EXTENSION))
}
