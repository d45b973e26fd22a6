//! Video lookup: query templates, descriptors and the search seam.

pub mod youtube;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub use youtube::YouTubeSearchClient;

/// Hard cap on results per lookup
pub const MAX_VIDEOS_PER_LOOKUP: usize = 3;

/// Characters of a title shown on a video card before it is cut off
const CARD_TITLE_CHARS: usize = 50;

/// A single search hit. Produced fresh per lookup, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoDescriptor {
    pub title: String,
    pub video_id: String,
    pub thumbnail_url: String,
    pub description: String,
}

impl VideoDescriptor {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    /// Title as shown on a card: first 50 characters followed by "..."
    pub fn display_title(&self) -> String {
        let short: String = self.title.chars().take(CARD_TITLE_CHARS).collect();
        format!("{}...", short)
    }
}

/// Search phrase built from a fixed template and one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    subject: String,
    text: String,
}

impl VideoQuery {
    /// First aid tutorial search for an emergency description
    pub fn emergency(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            text: format!("first aid {} emergency treatment tutorial medical", subject),
        }
    }

    /// Preparation guide search for an extracted remedy name
    pub fn remedy(name: &str) -> Self {
        Self {
            subject: name.to_string(),
            text: format!("how to prepare {} natural remedy home remedies tutorial", name),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Trait for video search backends
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for up to [`MAX_VIDEOS_PER_LOOKUP`] embeddable videos matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<VideoDescriptor>, LookupError>;
}
