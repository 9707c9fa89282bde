// ABOUTME: HTTP API layer for the Reseller Store settings panel
// ABOUTME: Routes admin screens and the ajax save action to the settings controller

use axum::{
    routing::{get, post},
    Router,
};
use rstore_core::InProcessHost;
use rstore_settings::SettingsController;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod response;
pub mod settings_handlers;

pub use error::AppError;
pub use response::AjaxResponse;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SettingsController>,
    /// Host holding the startup registrations and content item metadata
    pub host: Arc<InProcessHost>,
    /// Account every request acts as; there is no login layer
    pub user_id: u64,
}

impl AppState {
    pub fn new(
        controller: Arc<SettingsController>,
        host: Arc<InProcessHost>,
        user_id: u64,
    ) -> Self {
        Self {
            controller,
            host,
            user_id,
        }
    }
}

/// Creates the admin router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/wp-admin/admin-ajax.php",
            post(settings_handlers::admin_ajax),
        )
        .route("/wp-admin/{*screen}", get(settings_handlers::admin_screen))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
