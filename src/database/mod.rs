use std::sync::Arc;

pub mod activity_registry;
pub mod seed;

pub use activity_registry::ActivityRegistry;

/// Handle shared by every request handler.
pub type SharedRegistry = Arc<ActivityRegistry>;
