//! API data models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::controller::PageView;
use crate::session::Page;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// A session id together with the view to render for it
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub view: PageView,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub query: String,
}
