use super::{ChatMessage, LLMConfig, LLMProvider, LLMResponse, LLM};
use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

fn build_client(config: &LLMConfig) -> Result<reqwest::Client, GenerationError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?)
}

fn require_api_key(config: &LLMConfig) -> Result<(), GenerationError> {
    match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(GenerationError::Configuration(format!(
            "{:?} API key required ({})",
            config.provider,
            config.provider.api_key_var()
        ))),
    }
}

/// Gemini provider implementation
pub struct GeminiProvider {
    config: LLMConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "totalTokenCount")]
    total_token_count: u32,
}

/// Finish reasons that mean the candidate was withheld by a content filter
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

impl GeminiProvider {
    pub fn new(config: LLMConfig) -> Result<Self, GenerationError> {
        require_api_key(&config)?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    fn base_url(&self) -> &str {
        self.config.endpoint.as_deref().unwrap_or(GEMINI_BASE_URL)
    }

    fn build_request(&self, messages: Vec<ChatMessage>) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            if message.role == "system" {
                system_parts.push(GeminiPart { text: message.content });
            } else {
                let role = if message.role == "assistant" { "model" } else { "user" };
                contents.push(GeminiContent {
                    role: Some(role.to_string()),
                    parts: vec![GeminiPart { text: message.content }],
                });
            }
        }

        GeminiRequest {
            contents,
            system_instruction: (!system_parts.is_empty()).then(|| GeminiContent {
                role: None,
                parts: system_parts,
            }),
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            },
        }
    }
}

/// Pull the generated text out of a Gemini response, mapping filtered or empty
/// answers to errors.
fn gemini_response_text(response: GeminiResponse) -> Result<LLMResponse, GenerationError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerationError::Empty(LLMProvider::Gemini))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(GenerationError::Blocked(reason.to_string()));
        }
    }

    let content = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(GenerationError::Empty(LLMProvider::Gemini));
    }

    Ok(LLMResponse {
        content,
        tokens_used: response.usage_metadata.map(|u| u.total_token_count),
    })
}

#[async_trait]
impl LLM for GeminiProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse, GenerationError> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let request = self.build_request(messages);

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url(),
            self.config.model
        );

        debug!("Sending request to Gemini API (model {})", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service {
                provider: LLMProvider::Gemini,
                status,
                body,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;
        gemini_response_text(gemini_response)
    }

    async fn is_available(&self) -> bool {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let url = format!("{}/models/{}", self.base_url(), self.config.model);

        match self
            .client
            .get(&url)
            .header("x-goog-api-key", api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn provider_type(&self) -> LLMProvider {
        LLMProvider::Gemini
    }
}

/// OpenAI-compatible chat completions provider
pub struct OpenAIProvider {
    config: LLMConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(config: LLMConfig) -> Result<Self, GenerationError> {
        require_api_key(&config)?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    fn base_url(&self) -> &str {
        self.config.endpoint.as_deref().unwrap_or(OPENAI_BASE_URL)
    }
}

fn openai_response_text(response: OpenAIResponse) -> Result<LLMResponse, GenerationError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::Empty(LLMProvider::OpenAI))?;

    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(GenerationError::Blocked("content_filter".to_string()));
    }

    let content = choice.message.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(GenerationError::Empty(LLMProvider::OpenAI));
    }

    Ok(LLMResponse {
        content,
        tokens_used: response.usage.map(|u| u.total_tokens),
    })
}

#[async_trait]
impl LLM for OpenAIProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse, GenerationError> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        let request = OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url());

        debug!("Sending request to OpenAI API (model {})", self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service {
                provider: LLMProvider::OpenAI,
                status,
                body,
            });
        }

        let openai_response: OpenAIResponse = response.json().await?;
        openai_response_text(openai_response)
    }

    async fn is_available(&self) -> bool {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let url = format!("{}/models", self.base_url());

        match self.client.get(&url).bearer_auth(api_key).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn provider_type(&self) -> LLMProvider {
        LLMProvider::OpenAI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini(json: &str) -> Result<LLMResponse, GenerationError> {
        gemini_response_text(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_gemini_text_joins_parts() {
        let response = gemini(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"**Immediate "},{"text":"Steps**"}]},"finishReason":"STOP"}],
                "usageMetadata":{"totalTokenCount":42}}"#,
        )
        .unwrap();
        assert_eq!(response.content, "**Immediate Steps**");
        assert_eq!(response.tokens_used, Some(42));
    }

    #[test]
    fn test_gemini_prompt_block_is_reported() {
        let err = gemini(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(reason) if reason == "SAFETY"));
    }

    #[test]
    fn test_gemini_safety_finish_reason_is_reported() {
        let err = gemini(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(_)));
    }

    #[test]
    fn test_gemini_without_candidates_is_empty() {
        let err = gemini(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Empty(LLMProvider::Gemini)));
    }

    #[test]
    fn test_openai_content_filter_is_reported() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null},"finish_reason":"content_filter"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            openai_response_text(response),
            Err(GenerationError::Blocked(_))
        ));
    }

    #[test]
    fn test_gemini_request_moves_system_prompt() {
        let config = LLMConfig {
            api_key: Some("test-key".to_string()),
            ..LLMConfig::default()
        };
        let provider = GeminiProvider::new(config).unwrap();
        let request = provider.build_request(vec![
            ChatMessage::system("You are a doctor"),
            ChatMessage::user("Burns"),
        ]);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are a doctor");
        assert_eq!(json["contents"].as_array().unwrap().len(), 1);
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_provider_requires_api_key() {
        assert!(GeminiProvider::new(LLMConfig::default()).is_err());
    }
}
