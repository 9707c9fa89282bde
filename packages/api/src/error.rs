// ABOUTME: Error type returned by admin handlers
// ABOUTME: Maps save and storage failures to status codes and the ajax envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rstore_settings::SaveError;
use rstore_storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::response::{ajax_response, AjaxResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Save(#[from] SaveError),

    #[error("Storage error")]
    Storage(#[from] StorageError),

    #[error("Unknown ajax action: {0}")]
    UnknownAction(String),

    #[error("Resource not found")]
    NotFound,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Save(SaveError::InvalidSession) => StatusCode::FORBIDDEN,
            AppError::Save(SaveError::InvalidPrivateLabelId) => StatusCode::BAD_REQUEST,
            AppError::Save(SaveError::Storage(_)) | AppError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::UnknownAction(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the admin; storage details stay in the logs
    fn to_user_message(&self) -> String {
        match self {
            AppError::Save(SaveError::Storage(_)) | AppError::Storage(_) => {
                "Error: Settings could not be saved. Try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Save(SaveError::Storage(err)) | AppError::Storage(err) => {
                let request_id = Uuid::new_v4().to_string();
                error!(
                    request_id = %request_id,
                    storage_error = %err,
                    "Storage system error"
                );
            }
            // The admin-ajax convention: unknown actions answer a bare `0`
            AppError::UnknownAction(action) => {
                warn!(action = %action, "Unknown ajax action");
                return (status, "0").into_response();
            }
            AppError::NotFound => return status.into_response(),
            AppError::Save(_) => {}
        }

        ajax_response(status, AjaxResponse::error(self.to_user_message()))
    }
}
