// ABOUTME: Fixed identifiers shared across the settings panel packages
// ABOUTME: Hook names, action names, admin page slugs and the option prefix

/// Prefix applied to every option key written by this plugin
pub const OPTION_PREFIX: &str = "rstore_";

/// Custom post type holding imported products
pub const POST_TYPE: &str = "reseller_product";

/// Product listing screen, parent of the settings submenu
pub const PAGE_SLUG: &str = "edit.php?post_type=reseller_product";

/// Stand-alone settings screen used before the storefront is set up
pub const SETTINGS_PAGE_SLUG: &str = "options-general.php?page=reseller-store-settings";

/// Menu slug of the settings page (both registrations share it)
pub const SETTINGS_MENU_SLUG: &str = "reseller-store-settings";

/// Menu slug of the product import screen owned by the setup subsystem
pub const SETUP_MENU_SLUG: &str = "reseller-store-setup";

/// Settings group every schema field is registered under
pub const SETTINGS_GROUP: &str = "reseller_settings";

/// Capability required to see the settings page
pub const MANAGE_OPTIONS: &str = "manage_options";

/// Ajax action (and nonce action) of the save endpoint
pub const SAVE_ACTION: &str = "rstore_settings_save";

/// Nonce action and form action of the product export form
pub const EXPORT_ACTION: &str = "rstore_export";

/// Filters produced by the settings panel
pub mod filters {
    pub const API_TLD: &str = "rstore_api_tld";
    pub const DOMAIN_SEARCH_HTML: &str = "rstore_domain_search_html";
    pub const SETUP_RCC: &str = "rstore_setup_rcc";
    pub const SYNC_TTL: &str = "rstore_sync_ttl";
    pub const API_QUERY_ARGS: &str = "rstore_api_query_args";
}

/// Option key of a plugin setting
pub fn prefixed(key: &str) -> String {
    format!("{}{}", OPTION_PREFIX, key)
}
