//! Static content corpus - projects, bio, and the media they carry
//!
//! **Why**: Pages flatten this structure into URL lists for the preload
//! advisor and into MediaRefs for the loader. The controllers themselves
//! never parse it - they only consume what they are handed.
//!
//! **Used by**: host page shells, core::preload (via flattened URLs)

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::media::{MediaKind, MediaRef};

/// Full-bleed media at the top of a project page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "src", rename_all = "lowercase")]
pub enum HeroMedia {
    Image(String),
    Video(String),
}

impl HeroMedia {
    pub fn src(&self) -> &str {
        match self {
            HeroMedia::Image(src) | HeroMedia::Video(src) => src,
        }
    }

    /// MediaRef with the kind the tag dictates, regardless of extension
    pub fn media_ref(&self) -> MediaRef {
        match self {
            HeroMedia::Image(src) => MediaRef::with_kind(src.clone(), MediaKind::Image),
            HeroMedia::Video(src) => MediaRef::with_kind(src.clone(), MediaKind::Video),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, HeroMedia::Video(_))
    }
}

/// One portfolio project and every asset it can display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub thumbnail: String,
    #[serde(default)]
    pub thumbnail_video: Option<String>,
    pub hero_media: HeroMedia,
    pub client: String,
    pub year: u16,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Project {
    /// Every URL this project can display: thumbnail, thumbnail video,
    /// hero source, gallery. Display order, empties skipped.
    pub fn media_urls(&self) -> Vec<&str> {
        let mut urls = Vec::new();
        if !self.thumbnail.is_empty() {
            urls.push(self.thumbnail.as_str());
        }
        if let Some(video) = self.thumbnail_video.as_deref() {
            if !video.is_empty() {
                urls.push(video);
            }
        }
        if !self.hero_media.src().is_empty() {
            urls.push(self.hero_media.src());
        }
        urls.extend(self.gallery.iter().filter(|u| !u.is_empty()).map(String::as_str));
        urls
    }

    /// MediaRef for the hover thumbnail video. Empty when the project has
    /// none - attaching it to the loader is then a permanent no-op.
    pub fn thumbnail_video_ref(&self) -> MediaRef {
        MediaRef::new(self.thumbnail_video.clone().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub bio: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
}

/// Whole-site content, keyed by project identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default)]
    pub last_updated: String,
    pub about: About,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

impl Content {
    /// Parse content from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid content JSON")
    }

    /// Load content from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read content file {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Look up a project by id
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Unique project categories, insertion order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for project in &self.projects {
            seen.insert(project.category.as_str());
        }
        seen.into_iter().collect()
    }

    /// Flattened, deduplicated URL list across all projects, insertion
    /// order preserved. This is the input the preload advisor consumes
    /// ahead of a likely navigation.
    pub fn media_urls(&self) -> Vec<String> {
        let mut seen: IndexSet<String> = IndexSet::new();
        for project in &self.projects {
            for url in project.media_urls() {
                seen.insert(url.to_string());
            }
        }
        seen.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "lastUpdated": "2024-11-02",
            "about": { "bio": "Motion designer.", "imageUrl": "https://cdn.io/me.jpg" },
            "skills": [{ "name": "Compositing" }],
            "testimonials": [
                { "quote": "Great work", "author": "A. Client", "company": "Studio X" }
            ],
            "projects": [
                {
                    "id": "neon",
                    "title": "Neon Nights",
                    "category": "VFX",
                    "thumbnail": "https://cdn.io/neon/thumb.jpg",
                    "thumbnailVideo": "https://cdn.io/neon/thumb.mp4",
                    "heroMedia": { "type": "video", "src": "https://cdn.io/neon/hero.mp4" },
                    "client": "Studio X",
                    "year": 2024,
                    "tools": ["Nuke"],
                    "description": "Title sequence.",
                    "gallery": ["https://cdn.io/neon/g1.jpg", "https://cdn.io/neon/g2.jpg"]
                },
                {
                    "id": "paper",
                    "title": "Paper Worlds",
                    "category": "Motion",
                    "thumbnail": "https://cdn.io/neon/thumb.jpg",
                    "heroMedia": { "type": "image", "src": "https://cdn.io/paper/hero.jpg" },
                    "client": "Agency Y",
                    "year": 2023
                }
            ],
            "socialLinks": [{ "name": "Behance", "href": "https://behance.net/x" }]
        }"#
    }

    #[test]
    fn test_parse_content() {
        let content = Content::from_json(sample_json()).unwrap();
        assert_eq!(content.projects.len(), 2);
        assert_eq!(content.last_updated, "2024-11-02");

        let neon = content.project("neon").unwrap();
        assert!(neon.hero_media.is_video());
        assert_eq!(neon.hero_media.src(), "https://cdn.io/neon/hero.mp4");
        assert_eq!(neon.thumbnail_video.as_deref(), Some("https://cdn.io/neon/thumb.mp4"));

        // Optional fields absent in the second project
        let paper = content.project("paper").unwrap();
        assert!(paper.thumbnail_video.is_none());
        assert!(paper.gallery.is_empty());
        assert!(content.project("missing").is_none());
    }

    #[test]
    fn test_media_urls_flatten_and_dedup() {
        let content = Content::from_json(sample_json()).unwrap();
        let urls = content.media_urls();
        // Shared thumbnail appears once; order follows first appearance
        assert_eq!(
            urls,
            vec![
                "https://cdn.io/neon/thumb.jpg",
                "https://cdn.io/neon/thumb.mp4",
                "https://cdn.io/neon/hero.mp4",
                "https://cdn.io/neon/g1.jpg",
                "https://cdn.io/neon/g2.jpg",
                "https://cdn.io/paper/hero.jpg",
            ]
        );
    }

    #[test]
    fn test_categories() {
        let content = Content::from_json(sample_json()).unwrap();
        assert_eq!(content.categories(), vec!["VFX", "Motion"]);
    }

    #[test]
    fn test_missing_thumbnail_video_is_inert_ref() {
        let content = Content::from_json(sample_json()).unwrap();
        let media = content.project("paper").unwrap().thumbnail_video_ref();
        assert!(media.is_empty());
    }

    #[test]
    fn test_hero_media_ref_honors_tag() {
        // Tag wins over extension
        let hero = HeroMedia::Video("https://cdn.io/stream".into());
        assert_eq!(hero.media_ref().kind(), MediaKind::Video);
        let hero = HeroMedia::Image("https://cdn.io/art".into());
        assert_eq!(hero.media_ref().kind(), MediaKind::Image);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Content::from_json("{ not json").is_err());
    }
}
