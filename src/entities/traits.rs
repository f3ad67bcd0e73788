//! Abstract traits for dependency inversion.
//!
//! These traits define what the controllers need from the host runtime
//! (viewport intersection reporting, an addressable media sink, a cache
//! hinter), keeping `core` free of any UI or network dependency.
//!
//! Implementations live in the host shell (and in test doubles).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::MediaKind;

/// Opaque handle to a live, mounted visual node in the host UI.
///
/// The host mints one per displayed media element and uses it to address
/// its own sink when the loader calls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle identifying one loader attachment (the "subscription")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchId(Uuid);

impl WatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback/load failure classification reported by a media sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Request interrupted because the user navigated or hovered away
    /// before the asset was ready. Expected during normal interaction.
    Aborted,
    /// Any other sink failure (decode error, unsupported codec, ...)
    Failed(String),
}

impl SinkError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, SinkError::Aborted)
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Aborted => write!(f, "playback aborted"),
            SinkError::Failed(e) => write!(f, "sink failure: {}", e),
        }
    }
}

impl std::error::Error for SinkError {}

/// Viewport intersection capability.
///
/// The host begins reporting intersection ratios for an observed element
/// and delivers crossings back to the loader via
/// `VisibilityLoader::on_intersection`, keyed by the watch handle.
pub trait ViewportHost: Send + Sync {
    /// Begin observing `element` at `threshold` (0.0-1.0 visible fraction)
    fn observe(&self, watch: WatchId, element: ElementId, threshold: f32);

    /// Stop reporting for a previously observed watch. Must be idempotent.
    fn unobserve(&self, watch: WatchId);
}

/// Addressable media sink - an image/video node behind the host UI.
pub trait MediaSink: Send + Sync {
    /// Attach the real source URL. `mime` may be empty - the host infers.
    fn bind_source(&self, element: ElementId, url: &str, mime: &str);

    /// Request fetch/decode of the bound source
    fn load(&self, element: ElementId);

    /// Start playback. Only meaningful after bind and load.
    fn play(&self, element: ElementId) -> Result<(), SinkError>;

    /// Pause playback
    fn pause(&self, element: ElementId);

    /// Reset playback position to the start
    fn rewind(&self, element: ElementId);
}

/// Best-effort cache warming capability.
///
/// A hint must not block and must not surface failure to the caller:
/// Image requests decode-warming, Video requests a cache-only byte fetch.
pub trait CacheHinter: Send + Sync {
    fn hint(&self, url: &str, kind: MediaKind);
}

/// Blanket impl: Arc<T> implements traits if T does
impl<T: ViewportHost + ?Sized> ViewportHost for Arc<T> {
    fn observe(&self, watch: WatchId, element: ElementId, threshold: f32) {
        (**self).observe(watch, element, threshold)
    }

    fn unobserve(&self, watch: WatchId) {
        (**self).unobserve(watch)
    }
}

impl<T: MediaSink + ?Sized> MediaSink for Arc<T> {
    fn bind_source(&self, element: ElementId, url: &str, mime: &str) {
        (**self).bind_source(element, url, mime)
    }

    fn load(&self, element: ElementId) {
        (**self).load(element)
    }

    fn play(&self, element: ElementId) -> Result<(), SinkError> {
        (**self).play(element)
    }

    fn pause(&self, element: ElementId) {
        (**self).pause(element)
    }

    fn rewind(&self, element: ElementId) {
        (**self).rewind(element)
    }
}

impl<T: CacheHinter + ?Sized> CacheHinter for Arc<T> {
    fn hint(&self, url: &str, kind: MediaKind) {
        (**self).hint(url, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_classification() {
        assert!(SinkError::Aborted.is_aborted());
        assert!(!SinkError::Failed("codec".into()).is_aborted());
        assert_eq!(SinkError::Aborted.to_string(), "playback aborted");
        assert_eq!(
            SinkError::Failed("bad codec".into()).to_string(),
            "sink failure: bad codec"
        );
    }

    #[test]
    fn test_handles_are_unique() {
        assert_ne!(WatchId::new(), WatchId::new());
        assert_ne!(ElementId::new(), ElementId::new());
    }
}
