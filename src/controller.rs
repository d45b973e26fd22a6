//! Page controller: turns one user action into at most one generation call
//! and a strictly sequential run of video lookups.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::extract::extract_remedies;
use crate::first_aid::{EMERGENCY_SERVICES_WARNING, FIRST_AID_KIT, MEDICAL_DISCLAIMER};
use crate::llm::{ContentGenerator, GeneratedText, PromptTemplate};
use crate::session::{Page, Query, SessionState};
use crate::video::{VideoDescriptor, VideoQuery, VideoSearch};

/// User actions accepted by the controller
#[derive(Debug, Clone)]
pub enum PageAction {
    Navigate(Page),
    ToggleFirstAid,
    /// Generate/analyze button on the current page
    Submit(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// User-visible message attached to a view
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContentBlock {
    pub template: PromptTemplate,
    pub text: GeneratedText,
}

/// Videos for one subject. Sections are never merged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VideoSection {
    pub subject: String,
    pub videos: Vec<VideoDescriptor>,
}

/// Everything a renderer needs for one page pass
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub page: Page,
    pub first_aid_panel_visible: bool,
    /// Kit contents, present only while the panel is open
    pub first_aid_kit: Vec<&'static str>,
    pub banner: Option<&'static str>,
    pub content: Option<ContentBlock>,
    /// In extraction order for remedies
    pub video_sections: Vec<VideoSection>,
    pub notices: Vec<Notice>,
    pub disclaimer: &'static str,
}

impl PageView {
    /// View of `state` with no action results
    pub fn for_state(state: SessionState) -> Self {
        Self {
            page: state.current_page,
            first_aid_panel_visible: state.first_aid_panel_visible,
            first_aid_kit: if state.first_aid_panel_visible {
                FIRST_AID_KIT.to_vec()
            } else {
                Vec::new()
            },
            banner: (state.current_page == Page::Emergency).then_some(EMERGENCY_SERVICES_WARNING),
            content: None,
            video_sections: Vec::new(),
            notices: Vec::new(),
            disclaimer: MEDICAL_DISCLAIMER,
        }
    }
}

/// Dispatches actions to the generator and video search
#[derive(Clone)]
pub struct PageController {
    generator: ContentGenerator,
    videos: Arc<dyn VideoSearch>,
}

impl PageController {
    pub fn new(generator: ContentGenerator, videos: Arc<dyn VideoSearch>) -> Self {
        Self { generator, videos }
    }

    pub fn generator(&self) -> &ContentGenerator {
        &self.generator
    }

    /// Apply `action` to `state`, returning the new state and the view to render.
    ///
    /// Service failures never escape: they become notices and the rest of the
    /// view is still produced.
    pub async fn handle(&self, state: SessionState, action: PageAction) -> (SessionState, PageView) {
        match action {
            PageAction::Navigate(page) => {
                let state = state.navigate(page);
                (state, PageView::for_state(state))
            }
            PageAction::ToggleFirstAid => {
                let state = state.toggle_first_aid();
                (state, PageView::for_state(state))
            }
            PageAction::Submit(text) => {
                let mut view = PageView::for_state(state);
                match Query::new(text) {
                    Some(query) => self.submit(state.current_page, &query, &mut view).await,
                    None => {
                        warn!("Ignoring blank query on {} page", state.current_page);
                        view.notices.push(Notice::warning("Please enter a description first"));
                    }
                }
                (state, view)
            }
        }
    }

    async fn submit(&self, page: Page, query: &Query, view: &mut PageView) {
        let Some(template) = page.template() else {
            warn!("Ignoring query submitted on {} page", page);
            view.notices.push(Notice::warning(
                "Choose the emergency, medicine or remedies page before submitting",
            ));
            return;
        };

        let text = match self.generator.generate(template, query).await {
            Ok(text) => text,
            Err(e) => {
                warn!("❌ Generation failed for {}: {}", template.id(), e);
                view.notices.push(Notice::error(format!("Error generating content: {}", e)));
                return;
            }
        };

        match page {
            Page::Emergency => {
                let section = self.lookup(VideoQuery::emergency(query.as_str()), view).await;
                view.video_sections.push(section);
            }
            Page::Remedies => {
                let remedies = extract_remedies(text.as_str());
                info!("🌿 Extracted {} remedies", remedies.len());
                for remedy in &remedies {
                    let section = self.lookup(VideoQuery::remedy(remedy), view).await;
                    view.video_sections.push(section);
                }
            }
            Page::Medicine | Page::Home => {}
        }

        view.content = Some(ContentBlock { template, text });
    }

    /// One video lookup; a failure yields an empty section plus a notice
    async fn lookup(&self, query: VideoQuery, view: &mut PageView) -> VideoSection {
        let videos = match self.videos.search(query.as_str()).await {
            Ok(videos) => videos,
            Err(e) => {
                warn!("❌ Video lookup failed for '{}': {}", query.subject(), e);
                view.notices.push(Notice::error(format!("Error fetching videos: {}", e)));
                Vec::new()
            }
        };

        VideoSection {
            subject: query.subject().to_string(),
            videos,
        }
    }
}
