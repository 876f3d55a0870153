//! # Printbench
//!
//! Arrange STL models on a 3D printer bed and export the arrangement as a
//! single STL file.
//!
//! ## Architecture
//!
//! Printbench is organized as a workspace with multiple crates:
//!
//! 1. **printbench-core** - Bed geometry, errors, transform modes, event bus
//! 2. **printbench-settings** - Configuration file and bed profile document
//! 3. **printbench-workbench** - Scene registry, transform controller,
//!    input bridge, persistence, and the workbench session
//! 4. **printbench** - Session wiring and the headless command line tool

pub mod session;

pub use printbench_core::{
    AppEvent, BedDimensions, Error, EventBus, EventFilter, NotificationEvent, NotificationLevel,
    Result, ScaleInputMode, TransformMode,
};

pub use printbench_settings::{default_config_path, BedProfile, Config};

pub use printbench_workbench::{
    Mesh3D, ModelOrigin, ObjectId, SceneObject, SceneRegistry, TransformController, Workbench,
    WorkbenchServices,
};

pub use session::{arrange_models, local_mesh_source, open_session, ProfileFileSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
