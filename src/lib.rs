//! VITRINE - Visibility-gated media loading and preload hinting
//!
//! Re-exports all modules for use by host shells.

// Core controllers (loader, preload advisor, events)
pub mod core;

// Shared modules
pub mod config;
pub mod entities;
pub mod utils;

// Re-export commonly used types from core
pub use core::events::{EventBus, MediaEvent, MediaEventEmitter};
pub use core::loader::{Gate, VisibilityLoader};
pub use core::preload::PreloadAdvisor;

// Re-export entities
pub use entities::{Content, HeroMedia, MediaKind, MediaRef, Project};
pub use entities::traits::{
    CacheHinter, ElementId, MediaSink, SinkError, ViewportHost, WatchId,
};

// Re-export config
pub use config::Settings;
