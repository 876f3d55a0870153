//! Error handling for Printbench
//!
//! Provides error types for the layers of the workbench:
//! - Scene errors (mesh loading, object lookup, export)
//! - Storage errors (uploading and downloading scene files)
//! - Profile errors (fetching and validating the bed profile)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scene error type
///
/// Represents failures while loading meshes into the scene or producing
/// a scene payload from it.
#[derive(Error, Debug, Clone)]
pub enum SceneError {
    /// The mesh source could not provide the named model
    #[error("Failed to load model {name}: {reason}")]
    LoadFailed {
        /// The requested model name.
        name: String,
        /// The reason the load failed.
        reason: String,
    },

    /// Mesh data could not be parsed or is empty
    #[error("Invalid mesh data: {reason}")]
    InvalidMesh {
        /// Why the mesh was rejected.
        reason: String,
    },

    /// No object with the given id is registered
    #[error("Object {id} not found")]
    ObjectNotFound {
        /// The missing object id.
        id: u64,
    },

    /// The scene could not be serialized
    #[error("Failed to export scene: {reason}")]
    ExportFailed {
        /// The reason the export failed.
        reason: String,
    },
}

/// Storage error type
///
/// Represents failures at the file storage boundary.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Upload to the file store failed
    #[error("Failed to upload {file_name}: {reason}")]
    UploadFailed {
        /// The file name that was being uploaded.
        file_name: String,
        /// The reason the upload failed.
        reason: String,
    },

    /// Local download failed
    #[error("Failed to download {file_name}: {reason}")]
    DownloadFailed {
        /// The file name that was being downloaded.
        file_name: String,
        /// The reason the download failed.
        reason: String,
    },

    /// The file name has no usable characters left after sanitizing
    #[error("Invalid file name: {name:?}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
    },
}

/// Bed profile error type
#[derive(Error, Debug, Clone)]
pub enum ProfileError {
    /// The profile could not be fetched
    #[error("Failed to fetch bed profile: {reason}")]
    FetchFailed {
        /// The reason the fetch failed.
        reason: String,
    },

    /// The profile document could not be parsed
    #[error("Malformed bed profile: {reason}")]
    Malformed {
        /// The parse error.
        reason: String,
    },

    /// A dimension is missing, non-finite, or not positive
    #[error("Invalid bed {field}: {value}")]
    InvalidDimension {
        /// The offending field name.
        field: String,
        /// The rejected value.
        value: f64,
    },
}

/// Main error type for Printbench
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Bed profile error
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a model load failure
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Scene(SceneError::LoadFailed { .. }))
    }

    /// Check if this is a storage error
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this is a bed profile error
    pub fn is_profile_error(&self) -> bool {
        matches!(self, Error::Profile(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
