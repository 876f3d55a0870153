//! Event type definitions for the event bus.
//!
//! Events are grouped by category and are cloneable and serializable so a
//! presentation layer can log or forward them.

use serde::{Deserialize, Serialize};

use crate::modes::TransformMode;

/// Root event enum for all workbench events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Objects entering or leaving the scene
    Scene(SceneEvent),
    /// Selection changes
    Selection(SelectionEvent),
    /// Transform mode and transform edits
    Transform(TransformEvent),
    /// Scene save and download results
    Persistence(PersistenceEvent),
    /// Dismissable user notifications
    Notification(NotificationEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::Selection(_) => EventCategory::Selection,
            AppEvent::Transform(_) => EventCategory::Transform,
            AppEvent::Persistence(_) => EventCategory::Persistence,
            AppEvent::Notification(_) => EventCategory::Notification,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Scene(e) => e.description(),
            AppEvent::Selection(e) => e.description(),
            AppEvent::Transform(e) => e.description(),
            AppEvent::Persistence(e) => e.description(),
            AppEvent::Notification(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Scene,
    Selection,
    Transform,
    Persistence,
    Notification,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Transform => write!(f, "Transform"),
            EventCategory::Persistence => write!(f, "Persistence"),
            EventCategory::Notification => write!(f, "Notification"),
        }
    }
}

/// Scene content events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A mesh was placed on the bed.
    ObjectAdded {
        /// Id of the new object.
        id: u64,
        /// File the mesh came from, if any.
        file_name: Option<String>,
    },
    /// An object was removed from the bed.
    ObjectRemoved {
        /// Id of the removed object.
        id: u64,
    },
    /// Every object was removed.
    BedCleared {
        /// Number of objects removed.
        removed: usize,
    },
    /// A load was skipped because the session itself produced the file.
    LoadSkipped {
        /// The skipped file name.
        name: String,
    },
}

impl SceneEvent {
    pub fn description(&self) -> String {
        match self {
            SceneEvent::ObjectAdded { id, file_name } => match file_name {
                Some(name) => format!("Object {} added from {}", id, name),
                None => format!("Object {} added", id),
            },
            SceneEvent::ObjectRemoved { id } => format!("Object {} removed", id),
            SceneEvent::BedCleared { removed } => format!("Bed cleared ({} objects)", removed),
            SceneEvent::LoadSkipped { name } => format!("Skipped re-import of {}", name),
        }
    }
}

/// Selection events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// An object became the selection.
    Selected {
        /// Id of the selected object.
        id: u64,
        /// Generation of the gizmo attached to it.
        gizmo_generation: u64,
    },
    /// Nothing is selected any more.
    Cleared,
}

impl SelectionEvent {
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::Selected {
                id,
                gizmo_generation,
            } => format!("Object {} selected (gizmo #{})", id, gizmo_generation),
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// Transform events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransformEvent {
    /// The active transform mode changed.
    ModeChanged {
        /// The new mode.
        mode: TransformMode,
    },
    /// A transform operation was applied to an object.
    Applied {
        /// Id of the edited object.
        id: u64,
        /// Operation name, e.g. `"scale_to_max"`.
        operation: String,
    },
    /// The out-of-bounds state of the selection changed.
    BoundsChanged {
        /// Id of the checked object.
        id: u64,
        /// Whether it now exceeds the bed.
        out_of_bounds: bool,
    },
}

impl TransformEvent {
    pub fn description(&self) -> String {
        match self {
            TransformEvent::ModeChanged { mode } => format!("Transform mode: {}", mode),
            TransformEvent::Applied { id, operation } => {
                format!("{} applied to object {}", operation, id)
            }
            TransformEvent::BoundsChanged { id, out_of_bounds } => {
                if *out_of_bounds {
                    format!("Object {} is out of bounds", id)
                } else {
                    format!("Object {} is within bounds", id)
                }
            }
        }
    }
}

/// Persistence events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PersistenceEvent {
    /// The scene was uploaded to the file store.
    SceneSaved {
        /// Name the scene was stored under.
        file_name: String,
        /// Payload size in bytes.
        bytes: usize,
    },
    /// The upload failed.
    SaveFailed {
        /// Name the scene would have been stored under.
        file_name: String,
        /// The failure reason.
        reason: String,
    },
    /// The scene was handed to the local downloader.
    SceneDownloaded {
        /// Name of the downloaded file.
        file_name: String,
    },
}

impl PersistenceEvent {
    pub fn description(&self) -> String {
        match self {
            PersistenceEvent::SceneSaved { file_name, bytes } => {
                format!("Scene saved as {} ({} bytes)", file_name, bytes)
            }
            PersistenceEvent::SaveFailed { file_name, reason } => {
                format!("Saving {} failed: {}", file_name, reason)
            }
            PersistenceEvent::SceneDownloaded { file_name } => {
                format!("Scene downloaded as {}", file_name)
            }
        }
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Dismissable notification shown to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Severity.
    pub level: NotificationLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl NotificationEvent {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn description(&self) -> String {
        format!("[{:?}] {}: {}", self.level, self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            AppEvent::Selection(SelectionEvent::Cleared).category(),
            EventCategory::Selection
        );
        assert_eq!(
            AppEvent::Scene(SceneEvent::BedCleared { removed: 2 }).category(),
            EventCategory::Scene
        );
        assert_eq!(
            AppEvent::Notification(NotificationEvent::error("Load", "failed")).category(),
            EventCategory::Notification
        );
    }

    #[test]
    fn test_descriptions() {
        let event = AppEvent::Transform(TransformEvent::BoundsChanged {
            id: 3,
            out_of_bounds: true,
        });
        assert_eq!(event.description(), "Object 3 is out of bounds");

        let event = AppEvent::Scene(SceneEvent::ObjectAdded {
            id: 1,
            file_name: Some("cube.stl".to_string()),
        });
        assert_eq!(event.description(), "Object 1 added from cube.stl");
    }

    #[test]
    fn test_events_serialize() {
        let event = AppEvent::Persistence(PersistenceEvent::SceneSaved {
            file_name: "bee_1.stl".to_string(),
            bytes: 84,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("SceneSaved"));
        assert!(json.contains("bee_1.stl"));
    }
}
