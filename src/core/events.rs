//! Media event channel for decoupled host observation.
//!
//! Architecture:
//! - Observers subscribe with callbacks (immediate invocation)
//! - emit() invokes callbacks immediately AND queues for deferred processing
//! - poll() returns queued events for batch processing in the host's loop
//!
//! Callback order: FIFO (first-subscribed, first-called). The queue is
//! bounded; when full, the oldest half is evicted.

use std::sync::{Arc, Mutex};

use log::warn;

use crate::entities::media::MediaKind;
use crate::entities::traits::WatchId;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Everything the controllers report to interested observers
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A watch latch fired: the real source is bound and loading
    Revealed { watch: WatchId, url: String },
    /// Sink accepted a play request
    PlaybackStarted { watch: WatchId },
    /// Non-abort sink failure (already logged; informational here)
    PlaybackBlocked { watch: WatchId, reason: String },
    /// Hover left: playback paused and rewound
    Paused { watch: WatchId },
    /// Preload advisor handed a fresh URL to the cache hinter
    HintIssued { url: String, kind: MediaKind },
}

/// Subscriber callback
type Callback = Arc<dyn Fn(&MediaEvent) + Send + Sync>;

/// Pub/sub channel for [`MediaEvent`] with deferred processing support.
///
/// Both modes work together - callbacks fire immediately on emit, and
/// events are also available for batch processing via poll().
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Callback>>>,
    queue: Arc<Mutex<Vec<MediaEvent>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.lock().map(|s| s.len()).unwrap_or(0))
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all media events.
    ///
    /// The callback is invoked synchronously on every emit().
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&MediaEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(callback));
    }

    /// Emit event: invoke callbacks immediately AND queue for poll()
    pub fn emit(&self, event: MediaEvent) {
        for cb in self.subscribers.lock().unwrap_or_else(|e| e.into_inner()).iter() {
            cb(&event);
        }

        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!("EventBus queue full ({} events), evicting oldest {}", queue.len(), evict_count);
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }

    /// Poll all queued events since the last poll
    pub fn poll(&self) -> Vec<MediaEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Check queue length
    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Get an emitter handle for wiring into controllers
    pub fn emitter(&self) -> MediaEventEmitter {
        MediaEventEmitter { inner: Some(self.clone()) }
    }
}

/// Optional emitter handle for controllers (no-op when detached).
///
/// Controllers hold one of these so event wiring stays opt-in: a
/// controller built without a bus emits nothing.
#[derive(Clone, Default, Debug)]
pub struct MediaEventEmitter {
    inner: Option<EventBus>,
}

impl MediaEventEmitter {
    /// Create a no-op emitter (for controllers without observers)
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    /// Emit event (no-op if dummy)
    pub fn emit(&self, event: MediaEvent) {
        if let Some(ref bus) = self.inner {
            bus.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn started(watch: WatchId) -> MediaEvent {
        MediaEvent::PlaybackStarted { watch }
    }

    #[test]
    fn test_subscribe_emit_immediate() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);

        bus.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(started(WatchId::new()));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        bus.emit(started(WatchId::new()));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();

        bus.emit(started(WatchId::new()));
        bus.emit(MediaEvent::HintIssued { url: "a.jpg".into(), kind: MediaKind::Image });

        let events = bus.poll();
        assert_eq!(events.len(), 2);

        // Queue is empty after poll
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_dummy_emitter_is_silent() {
        let emitter = MediaEventEmitter::dummy();
        // Must not panic or queue anywhere
        emitter.emit(started(WatchId::new()));
    }

    #[test]
    fn test_emitter_handle_reaches_bus() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(started(WatchId::new()));
        assert_eq!(bus.poll().len(), 1);
    }

    #[test]
    fn test_queue_eviction() {
        let bus = EventBus::new();
        for _ in 0..=MAX_QUEUE_SIZE {
            bus.emit(started(WatchId::new()));
        }
        // At the moment the queue hit capacity, the oldest half was dropped
        assert_eq!(bus.queue_len(), MAX_QUEUE_SIZE / 2 + 1);
    }
}
