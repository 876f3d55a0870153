//! # Printbench Core
//!
//! Core types, errors, and utilities shared by the Printbench crates.
//! Provides the bed geometry description, the transform mode enumeration,
//! locale-tolerant numeric parsing for input fields, and the event bus the
//! workbench uses to publish scene, selection, and notification events.

pub mod bed;
pub mod constants;
pub mod error;
pub mod event_bus;
pub mod modes;
pub mod units;

pub use bed::BedDimensions;
pub use modes::{ScaleInputMode, TransformMode};

pub use error::{Error, ProfileError, Result, SceneError, StorageError};

pub use event_bus::{
    AppEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter, JournalEntry,
    NotificationEvent, NotificationLevel, PersistenceEvent, SceneEvent, SelectionEvent,
    SubscriptionId, TransformEvent,
};

pub use units::{format_fixed, parse_decimal};
