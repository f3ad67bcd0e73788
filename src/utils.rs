//! Utility functions and constants
//!
//! **Why**: Centralized URL/media helpers shared by the loader and the
//! preload advisor
//!
//! **Used by**: entities, core::loader, core::preload

/// Media URL type detection
pub mod media {
    /// Image file extensions eligible for decode-warming hints
    pub const IMAGE_EXTS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

    /// Video file extensions with known MIME types
    pub const VIDEO_EXTS: &[&str] = &["mp4", "webm", "ogv", "ogg", "mov"];

    /// Extract the lowercase extension of a URL, ignoring query string
    /// and fragment. Returns None for extensionless URLs.
    pub fn url_extension(url: &str) -> Option<String> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let name = path.rsplit('/').next().unwrap_or(path);
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Check if URL points at an image format
    pub fn is_image_url(url: &str) -> bool {
        url_extension(url)
            .map(|ext| IMAGE_EXTS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Check if URL points at a known video format
    pub fn is_video_url(url: &str) -> bool {
        url_extension(url)
            .map(|ext| VIDEO_EXTS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// MIME type for a video URL. Empty string when unknown - the host
    /// sink is expected to infer it.
    pub fn video_mime_type(url: &str) -> &'static str {
        match url_extension(url).as_deref() {
            Some("mp4") => "video/mp4",
            Some("webm") => "video/webm",
            Some("ogv") | Some("ogg") => "video/ogg",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::media;

    #[test]
    fn test_url_extension() {
        assert_eq!(media::url_extension("https://cdn.io/a/b/clip.mp4"), Some("mp4".into()));
        assert_eq!(media::url_extension("thumb.PNG"), Some("png".into()));
        assert_eq!(media::url_extension("photo.jpeg?auto=compress&w=1920"), Some("jpeg".into()));
        assert_eq!(media::url_extension("reel.webm#t=10"), Some("webm".into()));
        assert_eq!(media::url_extension("https://cdn.io/no-extension"), None);
        assert_eq!(media::url_extension(""), None);
        assert_eq!(media::url_extension("trailing.dot."), None);
    }

    #[test]
    fn test_is_image_url() {
        assert!(media::is_image_url("poster.jpg"));
        assert!(media::is_image_url("https://images.pexels.com/photo.jpeg?cs=tinysrgb&w=1920"));
        assert!(media::is_image_url("logo.SVG"));
        assert!(!media::is_image_url("clip.mp4"));
        assert!(!media::is_image_url("archive.tar.gz"));
        assert!(!media::is_image_url(""));
    }

    #[test]
    fn test_is_video_url() {
        assert!(media::is_video_url("clip.mp4"));
        assert!(media::is_video_url("reel.OGV"));
        assert!(!media::is_video_url("poster.png"));
    }

    #[test]
    fn test_video_mime_type() {
        assert_eq!(media::video_mime_type("clip.mp4"), "video/mp4");
        assert_eq!(media::video_mime_type("reel.webm"), "video/webm");
        assert_eq!(media::video_mime_type("old.ogv"), "video/ogg");
        assert_eq!(media::video_mime_type("old.ogg"), "video/ogg");
        assert_eq!(media::video_mime_type("take.mov"), "");
        assert_eq!(media::video_mime_type("poster.png"), "");
    }
}
