//! Workbench session state for UI integration.
//!
//! The session owns the scene, the transform controller, and the input
//! bridge, and reaches the outside world only through the collaborators in
//! [`WorkbenchServices`]. Every state change is announced on the shared
//! [`EventBus`].
//!
//! This module is split into submodules:
//! - `selection`: selecting, pointer and keyboard input, viewport resize
//! - `transforms`: move, rotate, scale, placement, duplicate, remove
//! - `file_io`: model loading, scene save and download, upload hooks

mod file_io;
mod selection;
mod transforms;

use crate::camera::{MeshRayCaster, RayCaster};
use crate::input::{InputBridge, Viewport};
use crate::scene::SceneRegistry;
use crate::services::{BedProfileSource, FileStore, MeshSource, SceneDownloader};
use crate::transform::{InputPanel, TransformController};
use printbench_core::{AppEvent, BedDimensions, EventBus, NotificationEvent};
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Upload target used when none is configured.
pub const DEFAULT_UPLOAD_TARGET: &str = "local";

/// External collaborators of a workbench session.
pub struct WorkbenchServices {
    pub mesh_source: Arc<dyn MeshSource>,
    pub file_store: Arc<dyn FileStore>,
    pub downloader: Arc<dyn SceneDownloader>,
    pub ray_caster: Box<dyn RayCaster>,
    pub events: Arc<EventBus>,
    pub upload_target: String,
    pub viewport: Viewport,
    pub controller: TransformController,
}

impl WorkbenchServices {
    pub fn new(
        mesh_source: Arc<dyn MeshSource>,
        file_store: Arc<dyn FileStore>,
        downloader: Arc<dyn SceneDownloader>,
    ) -> Self {
        Self {
            mesh_source,
            file_store,
            downloader,
            ray_caster: Box::new(MeshRayCaster),
            events: Arc::new(EventBus::new()),
            upload_target: DEFAULT_UPLOAD_TARGET.to_string(),
            viewport: Viewport::new(800.0, 600.0),
            controller: TransformController::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = events;
        self
    }

    pub fn with_ray_caster(mut self, caster: Box<dyn RayCaster>) -> Self {
        self.ray_caster = caster;
        self
    }

    pub fn with_upload_target(mut self, target: impl Into<String>) -> Self {
        self.upload_target = target.into();
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_controller(mut self, controller: TransformController) -> Self {
        self.controller = controller;
        self
    }
}

/// A workbench editing session.
pub struct Workbench {
    registry: SceneRegistry,
    controller: TransformController,
    input: InputBridge,
    mesh_source: Arc<dyn MeshSource>,
    file_store: Arc<dyn FileStore>,
    downloader: Arc<dyn SceneDownloader>,
    ray_caster: Box<dyn RayCaster>,
    events: Arc<EventBus>,
    upload_target: String,
}

impl Workbench {
    /// Creates a session for a bed of known size.
    pub fn new(bed: BedDimensions, services: WorkbenchServices) -> Self {
        info!("Workbench session on a {} bed", bed);
        Self {
            registry: SceneRegistry::new(bed),
            controller: services.controller,
            input: InputBridge::new(services.viewport),
            mesh_source: services.mesh_source,
            file_store: services.file_store,
            downloader: services.downloader,
            ray_caster: services.ray_caster,
            events: services.events,
            upload_target: services.upload_target,
        }
    }

    /// Fetches the bed profile, then creates the session.
    ///
    /// The session is only built once the fetch has finished. If it fails
    /// the default bed is used and an error notification is published.
    pub async fn start(profile: &dyn BedProfileSource, services: WorkbenchServices) -> Self {
        let bed = match profile.fetch_bed().await {
            Ok(bed) => bed,
            Err(e) => {
                warn!("Bed profile unavailable, using default bed: {}", e);
                let fallback = BedDimensions::default();
                let workbench = Self::new(fallback, services);
                workbench.notify(NotificationEvent::error(
                    "Printer profile",
                    format!("Could not read the bed size ({}); using {}", e, fallback),
                ));
                return workbench;
            }
        };
        Self::new(bed, services)
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn panel(&self) -> &InputPanel {
        self.controller.panel()
    }

    pub fn input(&self) -> &InputBridge {
        &self.input
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn bed(&self) -> &BedDimensions {
        self.registry.bed()
    }

    pub fn upload_target(&self) -> &str {
        &self.upload_target
    }

    /// Tears the scene down: selection cleared and every object removed.
    pub fn dispose(&mut self) {
        self.clear_bed();
        info!("Workbench session disposed");
    }

    pub(crate) fn publish(&self, event: AppEvent) {
        // Nobody listening is fine for a headless session
        if let Err(e) = self.events.publish(event) {
            trace!("Event not delivered: {}", e);
        }
    }

    pub(crate) fn notify(&self, notification: NotificationEvent) {
        self.publish(AppEvent::Notification(notification));
    }
}
