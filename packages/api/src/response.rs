// ABOUTME: Ajax response envelope shared by admin endpoints
// ABOUTME: `{"success":true}` on success, `{"success":false,"data":...}` on failure

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Standard ajax response wrapper
#[derive(Debug, Serialize)]
pub struct AjaxResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl AjaxResponse<()> {
    pub fn success() -> Self {
        AjaxResponse {
            success: true,
            data: None,
        }
    }
}

impl AjaxResponse<String> {
    pub fn error(message: impl Into<String>) -> Self {
        AjaxResponse {
            success: false,
            data: Some(message.into()),
        }
    }
}

/// Envelope with `status`
pub fn ajax_response<T: Serialize>(status: StatusCode, body: AjaxResponse<T>) -> Response {
    (status, Json(body)).into_response()
}
