//! Visibility-gated media loader - defers heavy loads until an element is
//! about to be seen, then binds, loads, and plays exactly once.
//!
//! **Why**: Fetching and decoding every gallery video up front wastes
//! bandwidth and decode time on media the user may never scroll to. Each
//! attachment carries a load-once latch: the first qualifying reveal binds
//! the real URL and requests the load, and later viewport churn is free.
//!
//! **Used by**: gallery cards (hover gate), project hero media (viewport gate)
//!
//! # Error policy
//!
//! Nothing here surfaces an error to the caller. A play interrupted by the
//! user moving on arrives as `SinkError::Aborted` and is swallowed; any
//! other sink failure logs one warning and is neither retried nor
//! propagated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, trace, warn};

use crate::core::events::{MediaEvent, MediaEventEmitter};
use crate::entities::media::MediaRef;
use crate::entities::traits::{ElementId, MediaSink, SinkError, ViewportHost, WatchId};

/// Reveal trigger for one attachment: a viewport threshold, a hover gate,
/// or both. With both, whichever fires first spends the load-once latch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    threshold: Option<f32>,
    hover: bool,
}

impl Gate {
    /// Default intersection ratio for ordinary gallery media
    pub const GALLERY_THRESHOLD: f32 = 0.10;
    /// Intersection ratio for full-bleed hero media - playback should not
    /// start until the element is substantially on-screen
    pub const HERO_THRESHOLD: f32 = 0.50;

    /// Viewport gate at the gallery default (10% visible)
    pub fn viewport() -> Self {
        Self::viewport_at(Self::GALLERY_THRESHOLD)
    }

    /// Viewport gate at a custom ratio (clamped to 0.0-1.0)
    pub fn viewport_at(threshold: f32) -> Self {
        Self { threshold: Some(threshold.clamp(0.0, 1.0)), hover: false }
    }

    /// Viewport gate at the hero default (50% visible)
    pub fn hero() -> Self {
        Self::viewport_at(Self::HERO_THRESHOLD)
    }

    /// Hover-only gate (gallery thumbnail videos)
    pub fn hover() -> Self {
        Self { threshold: None, hover: true }
    }

    /// Hover gate that also reveals on viewport intersection
    pub fn hover_with_viewport(threshold: f32) -> Self {
        Self { threshold: Some(threshold.clamp(0.0, 1.0)), hover: true }
    }

    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    pub fn is_hover(&self) -> bool {
        self.hover
    }
}

/// Per-attachment state
#[derive(Debug, Clone)]
struct Watch {
    element: ElementId,
    media: MediaRef,
    gate: Gate,
    /// Load-once latch: flips false→true on first reveal, never back
    revealed: bool,
    /// Whether a viewport observation is currently registered
    observing: bool,
}

/// Visibility-Gated Loader.
///
/// Attach an element with its media reference and a [`Gate`]; feed the
/// host's intersection and pointer callbacks in; the loader performs the
/// one-time bind → load → play against the [`MediaSink`] and tears the
/// observation down so later scroll activity costs nothing.
pub struct VisibilityLoader {
    viewport: Arc<dyn ViewportHost>,
    sink: Arc<dyn MediaSink>,
    watches: Mutex<HashMap<WatchId, Watch>>,
    emitter: MediaEventEmitter,
}

impl std::fmt::Debug for VisibilityLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityLoader")
            .field("watches", &self.watches.lock().map(|w| w.len()).unwrap_or(0))
            .finish()
    }
}

impl VisibilityLoader {
    pub fn new(viewport: Arc<dyn ViewportHost>, sink: Arc<dyn MediaSink>) -> Self {
        Self {
            viewport,
            sink,
            watches: Mutex::new(HashMap::new()),
            emitter: MediaEventEmitter::dummy(),
        }
    }

    /// Wire an event emitter for host observation
    pub fn with_events(mut self, emitter: MediaEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Register interest in an element's reveal.
    ///
    /// Viewport observation starts only when the gate carries a threshold
    /// AND the media URL is non-empty. An empty URL means "no media
    /// configured": the watch is registered but permanently inert - no
    /// observation, no reveal, no error.
    pub fn attach(&self, element: ElementId, media: MediaRef, gate: Gate) -> WatchId {
        let watch_id = WatchId::new();
        let mut observing = false;
        if !media.is_empty() {
            if let Some(threshold) = gate.threshold() {
                self.viewport.observe(watch_id, element, threshold);
                observing = true;
            }
        }
        trace!(
            "attach: watch={} element={} url='{}' gate={:?} observing={}",
            watch_id,
            element,
            media.url(),
            gate,
            observing
        );
        self.watches.lock().unwrap_or_else(|e| e.into_inner()).insert(
            watch_id,
            Watch { element, media, gate, revealed: false, observing },
        );
        watch_id
    }

    /// Viewport callback: qualifies when `ratio` meets the gate threshold.
    ///
    /// At most one reveal fires per watch; the observation is unregistered
    /// immediately after, so repeat crossings are free no-ops. Events for
    /// detached watches are ignored (a reveal that "would have fired"
    /// after teardown must not fire).
    pub fn on_intersection(&self, watch_id: WatchId, ratio: f32) {
        let snapshot = {
            let mut watches = self.watches.lock().unwrap_or_else(|e| e.into_inner());
            let Some(watch) = watches.get_mut(&watch_id) else {
                return;
            };
            let Some(threshold) = watch.gate.threshold() else {
                return;
            };
            if watch.revealed || watch.media.is_empty() || ratio < threshold {
                return;
            }
            watch.revealed = true;
            watch.observing = false;
            watch.clone()
        };

        self.viewport.unobserve(watch_id);
        self.bind_and_load(watch_id, &snapshot);
        if snapshot.media.kind().is_video() {
            self.request_play(watch_id, snapshot.element);
        }
    }

    /// Pointer entered a hover-gated element.
    ///
    /// The first enter spends the load-once latch (bind + load); every
    /// enter, including the first, requests playback for video media.
    pub fn pointer_enter(&self, watch_id: WatchId) {
        let (snapshot, first, was_observing) = {
            let mut watches = self.watches.lock().unwrap_or_else(|e| e.into_inner());
            let Some(watch) = watches.get_mut(&watch_id) else {
                return;
            };
            if !watch.gate.is_hover() || watch.media.is_empty() {
                return;
            }
            let first = !watch.revealed;
            let was_observing = watch.observing;
            watch.revealed = true;
            watch.observing = false;
            (watch.clone(), first, was_observing)
        };

        if was_observing {
            // Hover won the race; the viewport gate is spent
            self.viewport.unobserve(watch_id);
        }
        if first {
            self.bind_and_load(watch_id, &snapshot);
        }
        if snapshot.media.kind().is_video() {
            self.request_play(watch_id, snapshot.element);
        }
    }

    /// Pointer left a hover-gated element: pause and rewind to start.
    ///
    /// Not subject to the latch - may repeat any number of times. No-op
    /// before the first reveal (nothing is bound yet).
    pub fn pointer_leave(&self, watch_id: WatchId) {
        let element = {
            let watches = self.watches.lock().unwrap_or_else(|e| e.into_inner());
            let Some(watch) = watches.get(&watch_id) else {
                return;
            };
            if !watch.gate.is_hover() || !watch.revealed || !watch.media.kind().is_video() {
                return;
            }
            watch.element
        };

        self.sink.pause(element);
        self.sink.rewind(element);
        trace!("pointer_leave: watch={} paused and rewound", watch_id);
        self.emitter.emit(MediaEvent::Paused { watch: watch_id });
    }

    /// Teardown on unmount: cancels any pending observation and drops the
    /// watch so no late reveal can fire.
    pub fn detach(&self, watch_id: WatchId) {
        let removed = self
            .watches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&watch_id);
        if let Some(watch) = removed {
            if watch.observing {
                self.viewport.unobserve(watch_id);
            }
            trace!("detach: watch={} element={}", watch_id, watch.element);
        }
    }

    /// Whether a watch's latch has fired
    pub fn is_revealed(&self, watch_id: WatchId) -> bool {
        self.watches
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&watch_id)
            .map(|w| w.revealed)
            .unwrap_or(false)
    }

    /// Number of live attachments
    pub fn watch_count(&self) -> usize {
        self.watches.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Bind the real URL and request the load. Binding MUST precede the
    /// load, and both MUST precede any play request.
    fn bind_and_load(&self, watch_id: WatchId, watch: &Watch) {
        debug!("reveal: watch={} url='{}'", watch_id, watch.media.url());
        self.sink.bind_source(watch.element, watch.media.url(), watch.media.mime_type());
        self.sink.load(watch.element);
        self.emitter.emit(MediaEvent::Revealed {
            watch: watch_id,
            url: watch.media.url().to_string(),
        });
    }

    fn request_play(&self, watch_id: WatchId, element: ElementId) {
        match self.sink.play(element) {
            Ok(()) => {
                trace!("play started: watch={}", watch_id);
                self.emitter.emit(MediaEvent::PlaybackStarted { watch: watch_id });
            }
            Err(SinkError::Aborted) => {
                // User navigated or hovered away before the asset was
                // ready. Expected; not a failure.
                debug!("play aborted: watch={}", watch_id);
            }
            Err(err) => {
                warn!("playback failed: watch={}: {}", watch_id, err);
                self.emitter.emit(MediaEvent::PlaybackBlocked {
                    watch: watch_id,
                    reason: err.to_string(),
                });
            }
        }
    }
}
