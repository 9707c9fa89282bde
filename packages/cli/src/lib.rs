// ABOUTME: Server wiring for the Reseller Store settings panel
// ABOUTME: Opens storage, registers the panel with the host and serves the admin router

use rstore_api::{create_router, AppState};
use rstore_core::constants::{PAGE_SLUG, SETTINGS_MENU_SLUG};
use rstore_core::{EventBus, InProcessHost};
use rstore_settings::{NonceService, SettingsController};
use rstore_storage::SqliteOptionStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

pub mod config;

use config::Config;

/// Everything the running server holds on to
pub struct App {
    pub router: axum::Router,
    pub controller: Arc<SettingsController>,
    pub host: Arc<InProcessHost>,
    pub bus: EventBus,
}

/// Open storage and run the panel's startup registrations
pub async fn build_app(config: &Config) -> anyhow::Result<App> {
    let store = SqliteOptionStore::open(&config.database_url).await?;
    info!(database_url = %config.database_url, "Option store ready");

    if config.nonce_secret_generated {
        warn!("RSTORE_NONCE_SECRET is not set; forms will not survive a restart");
    }

    let controller = Arc::new(SettingsController::new(
        Arc::new(store),
        NonceService::new(config.nonce_secret.clone()),
        config.panel_config(),
    ));

    let host = Arc::new(InProcessHost::new(config.storefront));
    let bus = EventBus::new();

    controller.register(&bus).await?;
    controller.admin_init(host.as_ref());
    let page = controller.admin_menu(host.as_ref());
    controller.add_meta_boxes(host.as_ref());
    info!(menu_slug = %page.menu_slug(), "Settings panel registered");

    let router = create_router(AppState::new(controller.clone(), host.clone(), config.user_id));

    Ok(App {
        router,
        controller,
        host,
        bus,
    })
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let app = build_app(&config).await?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!("Server listening on {}", addr);
    info!(
        "Settings screen: {}{}&page={}",
        config.admin_url, PAGE_SLUG, SETTINGS_MENU_SLUG
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.router).await?;

    Ok(())
}
