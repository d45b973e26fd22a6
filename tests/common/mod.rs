#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mediai_assistant::llm::{ChatMessage, LLMResponse};
use mediai_assistant::{
    ContentGenerator, GenerationError, LLMProvider, LookupError, PageController, VideoDescriptor,
    VideoSearch, LLM,
};

pub const REMEDY_TEXT: &str = "\
**Condition Assessment:**
Tension-type headache with poor sleep.

**Top Natural Remedies:**
1. Ginger Tea
   - Key Ingredients: fresh ginger, honey
   - Benefits: eases nausea
2. Peppermint Oil - applied to temples
3. Chamomile Infusion
   - Key Ingredients: dried chamomile

**Lifestyle Recommendations:**
- Regular sleep schedule
";

/// LLM stub returning a canned answer or a canned failure
pub struct MockLLM {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLLM {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LLM for MockLLM {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<LLMResponse, GenerationError> {
        self.prompts.lock().unwrap().push(messages);
        match &self.reply {
            Ok(text) => Ok(LLMResponse {
                content: text.clone(),
                tokens_used: Some(10),
            }),
            Err(message) => Err(GenerationError::Service {
                provider: LLMProvider::Gemini,
                status: 503,
                body: message.clone(),
            }),
        }
    }

    async fn is_available(&self) -> bool {
        self.reply.is_ok()
    }

    fn provider_type(&self) -> LLMProvider {
        LLMProvider::Gemini
    }
}

/// Start or end of one lookup, tagged with its 1-based call number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupEvent {
    Start(usize),
    End(usize),
}

/// Video search stub recording every query in call order
#[derive(Default)]
pub struct MockVideoSearch {
    pub queries: Mutex<Vec<String>>,
    pub events: Mutex<Vec<LookupEvent>>,
    failing_call_numbers: HashSet<usize>,
    delay: Option<Duration>,
}

impl MockVideoSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail the given 1-based call numbers
    pub fn failing_on(calls: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            failing_call_numbers: calls.iter().copied().collect(),
            ..Self::default()
        })
    }

    /// Each lookup sleeps for `delay` before answering, failing the given calls
    pub fn slow(delay: Duration, failing: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            failing_call_numbers: failing.iter().copied().collect(),
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<LookupEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearch for MockVideoSearch {
    async fn search(&self, query: &str) -> Result<Vec<VideoDescriptor>, LookupError> {
        let call_number = {
            let mut queries = self.queries.lock().unwrap();
            queries.push(query.to_string());
            queries.len()
        };
        self.events.lock().unwrap().push(LookupEvent::Start(call_number));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.events.lock().unwrap().push(LookupEvent::End(call_number));

        if self.failing_call_numbers.contains(&call_number) {
            return Err(LookupError::Service {
                status: 403,
                body: "quotaExceeded".to_string(),
            });
        }

        Ok((1..=3)
            .map(|n| VideoDescriptor {
                title: format!("Video {} for call {}", n, call_number),
                video_id: format!("vid{}-{}", call_number, n),
                thumbnail_url: format!("https://i.ytimg.com/vi/vid{}-{}/mqdefault.jpg", call_number, n),
                description: String::new(),
            })
            .collect())
    }
}

pub fn controller(llm: Arc<MockLLM>, videos: Arc<MockVideoSearch>) -> PageController {
    PageController::new(ContentGenerator::new(llm), videos)
}
