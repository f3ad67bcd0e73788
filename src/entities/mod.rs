//! Entities module - media references, content corpus, host capability traits
//!
//! Pure data and trait seams; no controller logic lives here. `core`
//! depends on `entities`, never the other way around.

pub mod content;
pub mod media;
pub mod traits;

pub use content::{About, Content, HeroMedia, Project, Skill, SocialLink, Testimonial};
pub use media::{MediaKind, MediaRef};
pub use traits::{CacheHinter, ElementId, MediaSink, SinkError, ViewportHost, WatchId};
