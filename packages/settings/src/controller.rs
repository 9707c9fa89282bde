// ABOUTME: Settings panel controller tying schema, storage, host and filters together
// ABOUTME: Startup registration, admin screen rendering and the save action

use rstore_core::constants::{
    filters, EXPORT_ACTION, MANAGE_OPTIONS, PAGE_SLUG, POST_TYPE, SAVE_ACTION, SETTINGS_GROUP,
    SETTINGS_MENU_SLUG, SETTINGS_PAGE_SLUG,
};
use rstore_core::{
    is_admin_uri, AdminHost, Asset, AssetKind, EventBus, MenuPage, MetaBox, PostMeta,
};
use rstore_storage::{KeyValueStore, OptionValue, StorageResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::debug::render_debug_info;
use crate::filters::{ApiQueryArgsFilter, DomainSearchHtmlFilter, StoredOptionFilter};
use crate::import_export::{export_button, import_button, import_url, install_nonce_action};
use crate::nonce::NonceService;
use crate::render::{render_settings_form, DisplayFormat, FormContext};
use crate::schema::{reseller_settings, API_TLD, PL_ID, SETUP_RCC, SYNC_TTL};
use crate::types::{SettingDefinition, Submission};
use crate::validation::{plan_changes, private_label_id, SaveError};

const PAGE_TITLE: &str = "Reseller Store Settings";
const SUBMENU_TITLE: &str = "Settings";

/// Id of the diagnostic meta box on the product edit screen
pub const DEBUG_META_BOX_ID: &str = "debug-reseller_product";

/// Where the panel's own URLs and assets live
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Admin base URL, ending in `/`
    pub admin_url: String,
    /// Plugin asset base URL, ending in `/`
    pub assets_url: String,
    /// Host asset base URL (spinner image), ending in `/`
    pub includes_url: String,
    /// Serve unminified scripts and styles
    pub script_debug: bool,
    /// Plugin version appended to asset URLs
    pub version: String,
    pub display: DisplayFormat,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            admin_url: "/wp-admin/".to_string(),
            assets_url: "/wp-content/plugins/reseller-store-settings/assets/".to_string(),
            includes_url: "/wp-includes/".to_string(),
            script_debug: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            display: DisplayFormat::default(),
        }
    }
}

pub struct SettingsController {
    store: Arc<dyn KeyValueStore>,
    nonces: NonceService,
    config: PanelConfig,
}

impl SettingsController {
    pub fn new(store: Arc<dyn KeyValueStore>, nonces: NonceService, config: PanelConfig) -> Self {
        Self {
            store,
            nonces,
            config,
        }
    }

    /// The schema both the form and the save handler work from
    pub fn settings(&self) -> &'static [SettingDefinition] {
        reseller_settings()
    }

    pub fn nonces(&self) -> &NonceService {
        &self.nonces
    }

    /// Subscribe the panel's filters.
    ///
    /// Override filters are only subscribed when their setting holds a value
    /// right now; the query argument filter is always subscribed. Returns the
    /// subscribed event names in subscription order.
    pub async fn register(&self, bus: &EventBus) -> StorageResult<Vec<&'static str>> {
        let mut subscribed = Vec::new();

        if self.has_value(API_TLD).await? {
            bus.subscribe(
                filters::API_TLD,
                Arc::new(StoredOptionFilter::new(self.store.clone(), API_TLD)),
            );
            bus.subscribe(
                filters::DOMAIN_SEARCH_HTML,
                Arc::new(DomainSearchHtmlFilter::new(self.store.clone())),
            );
            subscribed.extend([filters::API_TLD, filters::DOMAIN_SEARCH_HTML]);
        }

        if self.has_value(SETUP_RCC).await? {
            bus.subscribe(
                filters::SETUP_RCC,
                Arc::new(StoredOptionFilter::new(self.store.clone(), SETUP_RCC)),
            );
            subscribed.push(filters::SETUP_RCC);
        }

        if self.has_value(SYNC_TTL).await? {
            bus.subscribe(
                filters::SYNC_TTL,
                Arc::new(StoredOptionFilter::new(self.store.clone(), SYNC_TTL)),
            );
            subscribed.push(filters::SYNC_TTL);
        }

        bus.subscribe(
            filters::API_QUERY_ARGS,
            Arc::new(ApiQueryArgsFilter::new(self.store.clone())),
        );
        subscribed.push(filters::API_QUERY_ARGS);

        info!(filters = ?subscribed, "Registered settings filters");
        Ok(subscribed)
    }

    async fn has_value(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .store
            .get(key)
            .await?
            .is_some_and(|value| !value.is_empty()))
    }

    /// Add the settings screen to the admin menu.
    ///
    /// Until the storefront is set up and has products the product listing
    /// screen is unusable, so the page goes under the host's settings screen
    /// instead of under the listing.
    pub fn admin_menu(&self, host: &dyn AdminHost) -> MenuPage {
        let storefront_incomplete = host
            .storefront_status()
            .is_some_and(|status| !status.is_setup || !status.has_products);

        let page = if storefront_incomplete {
            MenuPage::OptionsPage {
                page_title: PAGE_TITLE.to_string(),
                menu_title: PAGE_TITLE.to_string(),
                capability: MANAGE_OPTIONS.to_string(),
                menu_slug: SETTINGS_MENU_SLUG.to_string(),
            }
        } else {
            MenuPage::Submenu {
                parent_slug: PAGE_SLUG.to_string(),
                page_title: PAGE_TITLE.to_string(),
                menu_title: SUBMENU_TITLE.to_string(),
                capability: MANAGE_OPTIONS.to_string(),
                menu_slug: SETTINGS_MENU_SLUG.to_string(),
            }
        };

        info!(storefront_incomplete, "Registering settings page");
        host.add_menu_page(page.clone());
        page
    }

    /// Register every schema field under the settings group
    pub fn admin_init(&self, host: &dyn AdminHost) {
        for setting in self.settings() {
            host.register_setting(SETTINGS_GROUP, setting.name);
        }
    }

    /// Whether `request_uri` targets the listing or the settings screen
    pub fn is_settings_screen(request_uri: &str) -> bool {
        is_admin_uri(request_uri, PAGE_SLUG) || is_admin_uri(request_uri, SETTINGS_PAGE_SLUG)
    }

    /// Queue the panel's scripts and styles on its own screens only
    pub fn admin_enqueue_scripts(&self, host: &dyn AdminHost, request_uri: &str) -> bool {
        if !Self::is_settings_screen(request_uri) {
            return false;
        }

        let suffix = if self.config.script_debug { "" } else { ".min" };
        let jquery = vec!["jquery".to_string()];

        let assets = [
            (
                AssetKind::Script,
                "rstore-settings",
                format!("js/advanced-settings{}.js", suffix),
                jquery.clone(),
            ),
            (
                AssetKind::Script,
                "rstore-magnific-popup",
                format!("js/magnific-popup{}.js", suffix),
                jquery.clone(),
            ),
            (
                AssetKind::Script,
                "rstore-clipboard",
                "js/clipboard.min.js".to_string(),
                jquery,
            ),
            (
                AssetKind::Style,
                "rstore-magnific-popup-css",
                format!("css/magnific-popup{}.css", suffix),
                Vec::new(),
            ),
            (
                AssetKind::Style,
                "rstore-settings-css",
                format!("css/advanced-settings{}.css", suffix),
                Vec::new(),
            ),
        ];

        for (kind, handle, path, deps) in assets {
            host.enqueue(Asset {
                kind,
                handle: handle.to_string(),
                src: format!("{}{}", self.config.assets_url, path),
                deps,
                version: self.config.version.clone(),
                in_footer: kind == AssetKind::Script,
            });
        }

        debug!(request_uri = %request_uri, "Enqueued settings assets");
        true
    }

    /// Attach the diagnostic meta box to the product edit screen
    pub fn add_meta_boxes(&self, host: &dyn AdminHost) {
        host.add_meta_box(MetaBox {
            id: DEBUG_META_BOX_ID.to_string(),
            title: "Debug Info".to_string(),
            screen: POST_TYPE.to_string(),
            context: "advanced".to_string(),
            priority: "low".to_string(),
        });
    }

    /// Body of the diagnostic meta box for an item's custom fields
    pub fn debug_meta_box(&self, meta: &PostMeta) -> String {
        render_debug_info(meta)
    }

    /// Callback of the meta box `meta_box_id` on the edit screen of `post_id`.
    ///
    /// `None` when the box is not one of the panel's or the host has no such
    /// content item.
    pub fn render_meta_box(
        &self,
        host: &dyn AdminHost,
        meta_box_id: &str,
        post_id: u64,
    ) -> Option<String> {
        match meta_box_id {
            DEBUG_META_BOX_ID => {
                let meta = host.post_meta(post_id)?;
                debug!(post_id, fields = meta.len(), "Rendering debug meta box");
                Some(self.debug_meta_box(&meta))
            }
            _ => None,
        }
    }

    /// Render the settings page, or nothing when `request_uri` is not one of
    /// the panel's screens.
    pub async fn edit_settings(
        &self,
        request_uri: &str,
        user_id: u64,
    ) -> StorageResult<Option<String>> {
        if !Self::is_settings_screen(request_uri) {
            return Ok(None);
        }

        let values = self.load_values().await?;
        let form_nonce = self.nonces.create(SAVE_ACTION, user_id);
        let spinner_url = format!("{}images/spinner-2x.gif", self.config.includes_url);

        let mut html = render_settings_form(
            self.settings(),
            &FormContext {
                values: &values,
                nonce: &form_nonce,
                display: &self.config.display,
                spinner_url: &spinner_url,
            },
        );

        let pl_id = values.get(PL_ID).map(OptionValue::to_string).unwrap_or_default();
        let install_nonce = self.nonces.create(&install_nonce_action(user_id), user_id);
        html.push_str(&import_button(&import_url(
            &self.config.admin_url,
            &install_nonce,
            &pl_id,
        )));

        html.push_str(&export_button(&self.nonces.create(EXPORT_ACTION, user_id)));

        Ok(Some(html))
    }

    async fn load_values(&self) -> StorageResult<HashMap<String, OptionValue>> {
        let mut values = HashMap::new();
        for setting in self.settings() {
            if let Some(value) = self.store.get(setting.name).await? {
                values.insert(setting.name.to_string(), value);
            }
        }
        Ok(values)
    }

    /// Handle the save action.
    ///
    /// Rejects before touching storage when the nonce or the private label id
    /// is invalid. Otherwise every submitted setting is upserted or deleted and
    /// `next_sync` is cleared, as a single batch.
    pub async fn save(&self, submission: &Submission, user_id: u64) -> Result<(), SaveError> {
        let nonce = submission.get("nonce").unwrap_or_default();
        if self.nonces.verify(nonce, SAVE_ACTION, user_id).is_none() {
            warn!(user_id, audit = true, "Settings save rejected: invalid session");
            return Err(SaveError::InvalidSession);
        }

        let pl_id = match private_label_id(submission) {
            Ok(id) => id,
            Err(e) => {
                warn!(user_id, audit = true, "Settings save rejected: invalid private label id");
                return Err(e);
            }
        };

        let changes = plan_changes(submission);
        self.store.apply(&changes).await?;

        info!(user_id, pl_id, changes = changes.len(), "Saved reseller store settings");
        Ok(())
    }
}
