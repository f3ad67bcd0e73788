//! Preload advisor - deduplicated, fire-and-forget cache warming.
//!
//! **Why**: Assets the user is likely to navigate to next should already
//! be warm in the fetch cache. Hinting the same URL twice is wasted work,
//! so a session-wide set records every URL ever hinted - a URL is handed
//! to the hinter at most once per session, no matter how many call sites
//! request it.
//!
//! **Used by**: page shells ahead of likely navigations (home → portfolio)
//!
//! Classification: image extensions get a decode-warming hint (decoding an
//! image is cheap and warms the full pipeline); everything else gets a
//! cache-only video hint (only the bytes, no decode). There is no retry,
//! no cancellation, and no ordering guarantee between hints.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use indexmap::IndexSet;
use log::trace;

use crate::core::events::{MediaEvent, MediaEventEmitter};
use crate::entities::media::MediaKind;
use crate::entities::traits::CacheHinter;

/// Process-wide preload registry and the hinting policy around it.
///
/// Clones share the underlying set: the "hinted at most once per session"
/// guarantee holds across every clone and call site. The set grows
/// monotonically and never shrinks (bounded in practice by the distinct
/// asset count of the content corpus).
#[derive(Clone)]
pub struct PreloadAdvisor {
    hinter: Arc<dyn CacheHinter>,
    hinted: Arc<Mutex<IndexSet<String>>>,
    enabled: Arc<AtomicBool>,
    emitter: MediaEventEmitter,
}

impl std::fmt::Debug for PreloadAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadAdvisor")
            .field("hinted", &self.hinted.lock().map(|h| h.len()).unwrap_or(0))
            .field("enabled", &self.enabled.load(Ordering::Relaxed))
            .finish()
    }
}

impl PreloadAdvisor {
    pub fn new(hinter: Arc<dyn CacheHinter>) -> Self {
        Self {
            hinter,
            hinted: Arc::new(Mutex::new(IndexSet::new())),
            enabled: Arc::new(AtomicBool::new(true)),
            emitter: MediaEventEmitter::dummy(),
        }
    }

    /// Wire an event emitter for host observation
    pub fn with_events(mut self, emitter: MediaEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Toggle hinting (e.g. constrained connections). While disabled,
    /// preload() is a no-op and nothing is recorded as hinted.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Issue best-effort fetch hints for every not-yet-hinted URL.
    ///
    /// Idempotent and synchronous: duplicates within the call and across
    /// the session are skipped, empty URLs are skipped, and the call
    /// never blocks on network - the hinter only schedules work. Nothing
    /// here can fail from the caller's perspective. Safe for zero, one,
    /// or thousands of URLs.
    pub fn preload<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_enabled() {
            return;
        }

        // Dedup under the lock, hint outside it - hints are independent
        // and must not serialize against other callers.
        let fresh: Vec<(String, MediaKind)> = {
            let mut hinted = self.hinted.lock().unwrap_or_else(|e| e.into_inner());
            urls.into_iter()
                .filter_map(|url| {
                    let url = url.as_ref();
                    if url.is_empty() || !hinted.insert(url.to_string()) {
                        return None;
                    }
                    Some((url.to_string(), MediaKind::from_url(url)))
                })
                .collect()
        };

        for (url, kind) in fresh {
            trace!("preload hint: {} ({:?})", url, kind);
            self.hinter.hint(&url, kind);
            self.emitter.emit(MediaEvent::HintIssued { url, kind });
        }
    }

    /// Number of distinct URLs hinted this session
    pub fn hinted_count(&self) -> usize {
        self.hinted.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether a URL has already been hinted
    pub fn is_hinted(&self, url: &str) -> bool {
        self.hinted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(url)
    }
}
