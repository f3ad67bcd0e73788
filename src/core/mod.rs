//! Core controller modules - visibility gating, preload hinting, events
//!
//! These modules form the media controller, independent of UI.

pub mod events;
pub mod loader;
pub mod preload;

// Re-exports for convenience
pub use events::{EventBus, MediaEvent, MediaEventEmitter};
pub use loader::{Gate, VisibilityLoader};
pub use preload::PreloadAdvisor;
