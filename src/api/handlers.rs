//! API request handlers

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::models::SessionView;
use crate::controller::{PageAction, PageController, PageView};
use crate::first_aid::FIRST_AID_KIT;
use crate::session::{Page, Query, SessionStore};

/// Errors surfaced to API clients
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Query must not be blank")]
    BlankQuery,
}

/// Handle health check requests
pub async fn health_check(sessions: &SessionStore) -> Value {
    serde_json::json!({
        "status": "healthy",
        "service": "mediai-assistant",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": sessions.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}

/// Start a new session on the home page
pub async fn create_session(sessions: &SessionStore) -> SessionView {
    let (session_id, state) = sessions.create().await;
    SessionView {
        session_id,
        view: PageView::for_state(state),
    }
}

/// Current view for a session, without running any action
pub async fn get_session(sessions: &SessionStore, id: Uuid) -> Result<SessionView, ApiError> {
    let handle = sessions.get(&id).await.ok_or(ApiError::SessionNotFound(id))?;
    let state = *handle.lock().await;
    Ok(SessionView {
        session_id: id,
        view: PageView::for_state(state),
    })
}

pub async fn end_session(sessions: &SessionStore, id: Uuid) -> Result<Value, ApiError> {
    if sessions.remove(&id).await {
        Ok(serde_json::json!({ "session_id": id, "ended": true }))
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

/// Run one action against a session. The session lock is held until the
/// controller finishes, so a second action on the same session waits.
async fn run_action(
    controller: &PageController,
    sessions: &SessionStore,
    id: Uuid,
    action: PageAction,
) -> Result<SessionView, ApiError> {
    let handle = sessions.get(&id).await.ok_or(ApiError::SessionNotFound(id))?;
    let mut state = handle.lock().await;

    let (next, view) = controller.handle(*state, action).await;
    *state = next;

    Ok(SessionView { session_id: id, view })
}

pub async fn navigate(
    controller: &PageController,
    sessions: &SessionStore,
    id: Uuid,
    page: Page,
) -> Result<SessionView, ApiError> {
    info!("📍 Session {} navigating to {}", id, page);
    run_action(controller, sessions, id, PageAction::Navigate(page)).await
}

pub async fn toggle_first_aid(
    controller: &PageController,
    sessions: &SessionStore,
    id: Uuid,
) -> Result<SessionView, ApiError> {
    run_action(controller, sessions, id, PageAction::ToggleFirstAid).await
}

pub async fn submit(
    controller: &PageController,
    sessions: &SessionStore,
    id: Uuid,
    query: String,
) -> Result<SessionView, ApiError> {
    if Query::new(query.as_str()).is_none() {
        return Err(ApiError::BlankQuery);
    }
    run_action(controller, sessions, id, PageAction::Submit(query)).await
}

pub fn first_aid_kit() -> Vec<&'static str> {
    FIRST_AID_KIT.to_vec()
}
