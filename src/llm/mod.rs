pub mod generator;
pub mod prompts;
pub mod providers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::GenerationError;

pub use generator::{ContentGenerator, GeneratedText};
pub use prompts::PromptTemplate;

/// LLM provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LLMProvider {
    Gemini,
    OpenAI,
}

impl LLMProvider {
    /// Environment variable holding the provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "GEMINI_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "gemini-1.5-pro",
            LLMProvider::OpenAI => "gpt-4o-mini",
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider to send prompts to
    pub provider: LLMProvider,

    /// Override for the provider's API base URL
    pub endpoint: Option<String>,

    /// API key; usually filled from the environment rather than the config file
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        let provider = LLMProvider::Gemini;
        Self {
            provider,
            endpoint: None,
            api_key: None,
            model: provider.default_model().to_string(),
            max_tokens: 2048,
            temperature: 0.4,
            timeout_seconds: 60,
        }
    }
}

/// Chat message for LLM communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// LLM response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub tokens_used: Option<u32>,
}

/// Trait for LLM providers
#[async_trait]
pub trait LLM: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse, GenerationError>;
    async fn is_available(&self) -> bool;
    fn provider_type(&self) -> LLMProvider;
}

/// Create LLM instance based on configuration
pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn LLM>, GenerationError> {
    match config.provider {
        LLMProvider::Gemini => Ok(Arc::new(providers::GeminiProvider::new(config.clone())?)),
        LLMProvider::OpenAI => Ok(Arc::new(providers::OpenAIProvider::new(config.clone())?)),
    }
}
