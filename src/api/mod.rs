//! API module for the MediAI assistant
//!
//! Exposes the page controller over REST: one session per browser, each action
//! runs to completion before the next one on that session is accepted.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::controller::PageController;
use crate::session::SessionStore;

pub mod handlers;
pub mod models;
pub mod server;

/// API Server for handling REST requests
pub struct ApiServer {
    controller: PageController,
    config: Arc<Config>,
}

impl ApiServer {
    pub fn new(controller: PageController, config: Arc<Config>) -> Self {
        Self { controller, config }
    }

    /// Run the API server until it fails
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.config.server.port);

        let ttl = Duration::from_secs(self.config.server.session_ttl_seconds);
        let sessions = SessionStore::with_ttl(ttl);
        spawn_session_sweeper(sessions.clone(), ttl);

        let state = server::AppState {
            controller: self.controller,
            sessions,
        };
        server::start_http_server(state, &self.config.server.host, self.config.server.port).await
    }
}

/// Periodically drop sessions whose browser went away without ending them
fn spawn_session_sweeper(sessions: SessionStore, ttl: Duration) -> tokio::task::JoinHandle<()> {
    let period = (ttl / 2).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            sessions.evict_expired().await;
        }
    })
}
