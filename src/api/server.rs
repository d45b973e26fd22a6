//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use uuid::Uuid;

use super::handlers::{self, ApiError};
use super::models::{ApiResponse, NavigateRequest, SubmitRequest};
use crate::controller::PageController;
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: PageController,
    pub sessions: SessionStore,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BlankQuery => StatusCode::BAD_REQUEST,
        };
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(data) => ok(data),
        Err(e) => e.into_response(),
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/sessions", post(create_session_handler))
        .route(
            "/api/sessions/:id",
            get(get_session_handler).delete(end_session_handler),
        )
        .route("/api/sessions/:id/navigate", post(navigate_handler))
        .route("/api/sessions/:id/first-aid/toggle", post(toggle_first_aid_handler))
        .route("/api/sessions/:id/submit", post(submit_handler))
        .route("/api/first-aid-kit", get(first_aid_kit_handler))
        .route("/", get(index_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("🌐 API server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check(&state.sessions).await))
}

async fn create_session_handler(State(state): State<AppState>) -> Response {
    let created = handlers::create_session(&state.sessions).await;
    (StatusCode::CREATED, Json(ApiResponse::success(created))).into_response()
}

async fn get_session_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(handlers::get_session(&state.sessions, id).await)
}

async fn end_session_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(handlers::end_session(&state.sessions, id).await)
}

async fn navigate_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateRequest>,
) -> Response {
    respond(handlers::navigate(&state.controller, &state.sessions, id, payload.page).await)
}

async fn toggle_first_aid_handler(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(handlers::toggle_first_aid(&state.controller, &state.sessions, id).await)
}

async fn submit_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitRequest>,
) -> Response {
    respond(handlers::submit(&state.controller, &state.sessions, id, payload.query).await)
}

async fn first_aid_kit_handler() -> Response {
    ok(handlers::first_aid_kit())
}

async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>MediAI Assistant API</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .endpoint { background: #f5f5f5; padding: 10px; margin: 10px 0; }
        .warning { background: #dc2626; color: white; padding: 10px; }
    </style>
</head>
<body>
    <h1>MediAI Assistant API</h1>
    <p class="warning">For life-threatening emergencies, immediately call emergency services (911/112)</p>
    <div class="endpoint"><strong>POST /api/sessions</strong> - Start a session</div>
    <div class="endpoint"><strong>GET /api/sessions/:id</strong> - Current page view</div>
    <div class="endpoint"><strong>POST /api/sessions/:id/navigate</strong> - {"page": "home|emergency|medicine|remedies"}</div>
    <div class="endpoint"><strong>POST /api/sessions/:id/first-aid/toggle</strong> - Show or hide the first aid kit</div>
    <div class="endpoint"><strong>POST /api/sessions/:id/submit</strong> - {"query": "..."} on the current page</div>
    <div class="endpoint"><strong>GET /api/first-aid-kit</strong> - First aid kit contents</div>
</body>
</html>"#,
    )
}
