use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use super::{PromptTemplate, LLM};
use crate::error::GenerationError;
use crate::session::Query;

/// Formatted text returned by the model. Treated as opaque except by the
/// remedy extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedText(String);

impl GeneratedText {
    pub fn new(text: impl Into<String>) -> Self {
        GeneratedText(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content generator adapter: one fixed template, one parameter, one call.
#[derive(Clone)]
pub struct ContentGenerator {
    llm: Arc<dyn LLM>,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self { llm }
    }

    /// Run `template` against the model with `parameter` interpolated.
    ///
    /// No retries. Empty answers come back as [`GenerationError::Empty`] so the
    /// caller never renders a blank content block.
    pub async fn generate(
        &self,
        template: PromptTemplate,
        parameter: &Query,
    ) -> Result<GeneratedText, GenerationError> {
        info!(
            "🧬 Generating {} content with {:?}",
            template.id(),
            self.llm.provider_type()
        );

        let response = self.llm.chat(template.messages(parameter)).await?;

        if response.content.trim().is_empty() {
            return Err(GenerationError::Empty(self.llm.provider_type()));
        }

        debug!(
            "Generation for {} completed ({} chars, tokens: {:?})",
            template.id(),
            response.content.len(),
            response.tokens_used
        );

        Ok(GeneratedText::new(response.content))
    }

    pub async fn is_available(&self) -> bool {
        self.llm.is_available().await
    }
}
