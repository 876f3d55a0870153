//! # Event Bus Module
//!
//! Publish/subscribe channel between the workbench session and whatever
//! presents it (a UI shell, the CLI, or tests).
//!
//! - The workbench publishes typed events without knowing who listens
//! - Subscribers filter by category and receive events synchronously
//! - Async consumers can poll a broadcast receiver instead
//!
//! ## Usage
//!
//! ```rust
//! use printbench_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter, SelectionEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let AppEvent::Selection(selection) = event {
//!             println!("selection: {:?}", selection);
//!         }
//!     },
//! );
//!
//! bus.publish(AppEvent::Selection(SelectionEvent::Cleared)).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
