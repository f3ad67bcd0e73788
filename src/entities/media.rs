//! MediaRef - reference to a loadable asset
//!
//! Provides extension-based kind inference shared by the loader (play vs.
//! display) and the preload advisor (decode-warming vs. byte-warming).

use serde::{Deserialize, Serialize};

use crate::utils::media as media_utils;

/// Asset classification driving load and hint strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Infer kind from URL extension.
    ///
    /// Unknown extensions classify as Video: decoding an image is cheap
    /// and worth warming the full pipeline for, force-decoding a
    /// multi-second clip is not, so anything unrecognized only gets its
    /// bytes warmed.
    pub fn from_url(url: &str) -> Self {
        if media_utils::is_image_url(url) {
            MediaKind::Image
        } else {
            MediaKind::Video
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

/// Reference to a loadable asset. Immutable once constructed.
///
/// An empty URL is legal and means "no media configured" - the loader
/// treats such a reference as a permanent no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    url: String,
    kind: MediaKind,
}

impl MediaRef {
    /// Build a reference, inferring kind from the URL extension
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = MediaKind::from_url(&url);
        Self { url, kind }
    }

    /// Build with an explicit kind, overriding extension inference
    pub fn with_kind(url: impl Into<String>, kind: MediaKind) -> Self {
        Self { url: url.into(), kind }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// True when no media is configured
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    /// MIME type hint for video sinks. Empty string lets the host infer.
    pub fn mime_type(&self) -> &'static str {
        match self.kind {
            MediaKind::Video => media_utils::video_mime_type(&self.url),
            MediaKind::Image => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference() {
        assert_eq!(MediaRef::new("thumb.jpg").kind(), MediaKind::Image);
        assert_eq!(MediaRef::new("thumb.webp").kind(), MediaKind::Image);
        assert_eq!(MediaRef::new("reel.mp4").kind(), MediaKind::Video);
        // Unknown extension falls back to byte-warmed video
        assert_eq!(MediaRef::new("asset.bin").kind(), MediaKind::Video);
        assert_eq!(MediaRef::new("https://cdn.io/stream").kind(), MediaKind::Video);
    }

    #[test]
    fn test_explicit_kind_overrides() {
        let media = MediaRef::with_kind("stream", MediaKind::Image);
        assert_eq!(media.kind(), MediaKind::Image);
    }

    #[test]
    fn test_empty_url() {
        let media = MediaRef::new("");
        assert!(media.is_empty());
        assert_eq!(media.mime_type(), "");
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(MediaRef::new("reel.mp4").mime_type(), "video/mp4");
        assert_eq!(MediaRef::new("reel.webm?t=1").mime_type(), "video/webm");
        assert_eq!(MediaRef::new("thumb.png").mime_type(), "");
    }
}
