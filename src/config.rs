//! Runtime settings with JSON persistence.
//!
//! Missing or unknown fields in persisted JSON fall back to defaults, so
//! older settings files keep loading across releases.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::loader::Gate;

/// Controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Intersection ratio revealing ordinary gallery media
    pub gallery_threshold: f32,
    /// Intersection ratio for full-bleed hero media
    pub hero_threshold: f32,
    /// Disable to skip all preload hinting (constrained connections)
    pub preload_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gallery_threshold: Gate::GALLERY_THRESHOLD,
            hero_threshold: Gate::HERO_THRESHOLD,
            preload_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text).context("invalid settings JSON")
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }

    /// Viewport gate honoring the configured gallery threshold
    pub fn gallery_gate(&self) -> Gate {
        Gate::viewport_at(self.gallery_threshold)
    }

    /// Viewport gate honoring the configured hero threshold
    pub fn hero_gate(&self) -> Gate {
        Gate::viewport_at(self.hero_threshold)
    }

    /// Hover gate that also reveals at the gallery threshold
    pub fn thumbnail_gate(&self) -> Gate {
        Gate::hover_with_viewport(self.gallery_threshold)
    }
}
