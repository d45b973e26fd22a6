//! MediAI Assistant
//!
//! Forwards emergency descriptions, medicine names and symptom descriptions to
//! a generative-text service, then finds matching instructional videos. For
//! remedies, the numbered remedy list in the generated text drives one video
//! lookup per remedy.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod first_aid;
pub mod llm;
pub mod logging;
pub mod session;
pub mod video;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::controller::{Notice, NoticeLevel, PageAction, PageController, PageView, VideoSection};
pub use crate::error::{ConfigError, GenerationError, LookupError};
pub use crate::extract::extract_remedies;
pub use crate::llm::{create_llm, ContentGenerator, GeneratedText, LLMConfig, LLMProvider, PromptTemplate, LLM};
pub use crate::session::{Page, Query, SessionState, SessionStore};
pub use crate::video::{VideoDescriptor, VideoQuery, VideoSearch, YouTubeSearchClient};

use std::sync::Arc;

/// Build a controller wired to the real services described by `config`
pub fn build_controller(config: &Config) -> anyhow::Result<PageController> {
    let llm = create_llm(&config.llm)?;
    let videos = YouTubeSearchClient::new(config.video.clone())?;
    Ok(PageController::new(ContentGenerator::new(llm), Arc::new(videos)))
}
