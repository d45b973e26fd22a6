//! Per-user session state and user queries.
//!
//! A session is nothing more than which page is showing and whether the
//! first-aid panel is open. It is passed into the controller by value and
//! handed back after each action.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::llm::PromptTemplate;

/// The four navigable views
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Emergency,
    Medicine,
    Remedies,
}

impl Page {
    /// Prompt template used when the user submits on this page
    pub fn template(&self) -> Option<PromptTemplate> {
        match self {
            Page::Home => None,
            Page::Emergency => Some(PromptTemplate::EmergencyFirstAid),
            Page::Medicine => Some(PromptTemplate::MedicineAnalysis),
            Page::Remedies => Some(PromptTemplate::SymptomRemedies),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Emergency => "Emergency Response",
            Page::Medicine => "Medicine Analysis",
            Page::Remedies => "Natural Remedies",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Navigation state for one user
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub current_page: Page,
    pub first_aid_panel_visible: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `page`; panel visibility is untouched
    pub fn navigate(self, page: Page) -> Self {
        Self {
            current_page: page,
            ..self
        }
    }

    /// Flip the first-aid panel; the current page is untouched
    pub fn toggle_first_aid(self) -> Self {
        Self {
            first_aid_panel_visible: !self.first_aid_panel_visible,
            ..self
        }
    }
}

/// A submitted user query. Never blank, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Returns `None` for empty or whitespace-only input
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a single session's state. Holding the lock for the length of an
/// action keeps actions on one session strictly one at a time.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Idle time after which a session is dropped
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct SessionEntry {
    handle: SessionHandle,
    last_seen: DateTime<Utc>,
}

/// In-memory registry of live sessions. Nothing is written to disk.
///
/// Sessions idle for longer than the TTL are evicted on the next `create`,
/// on lookup, or by [`SessionStore::evict_expired`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    ttl: TimeDelta,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    fn is_expired(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.ttl
    }

    /// Start a new session in the initial state
    pub async fn create(&self) -> (Uuid, SessionState) {
        self.evict_expired().await;

        let id = Uuid::new_v4();
        let state = SessionState::new();
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                handle: Arc::new(Mutex::new(state)),
                last_seen: Utc::now(),
            },
        );
        info!("🆕 Session {} started", id);
        (id, state)
    }

    /// Look up a live session and mark it as seen. An expired session is
    /// removed and reported as missing.
    pub async fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let expired = self.is_expired(sessions.get(id)?, now);
        if expired {
            sessions.remove(id);
            debug!("Session {} expired", id);
            return None;
        }

        let entry = sessions.get_mut(id)?;
        entry.last_seen = now;
        Some(entry.handle.clone())
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!("Session {} ended", id);
        }
        removed
    }

    /// Drop every idle session; returns how many were dropped
    pub async fn evict_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_expired(entry, now));

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("🧹 Evicted {} idle sessions", evicted);
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
