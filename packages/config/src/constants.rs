// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names read by rstore

// Server
pub const RSTORE_PORT: &str = "RSTORE_PORT";
pub const RSTORE_DATABASE_URL: &str = "RSTORE_DATABASE_URL";

// Security
pub const RSTORE_NONCE_SECRET: &str = "RSTORE_NONCE_SECRET";
pub const RSTORE_USER_ID: &str = "RSTORE_USER_ID";

// Admin Host
pub const RSTORE_ADMIN_URL: &str = "RSTORE_ADMIN_URL";
pub const RSTORE_ASSETS_URL: &str = "RSTORE_ASSETS_URL";
pub const RSTORE_INCLUDES_URL: &str = "RSTORE_INCLUDES_URL";
pub const RSTORE_SCRIPT_DEBUG: &str = "RSTORE_SCRIPT_DEBUG";
pub const RSTORE_PLUGIN_VERSION: &str = "RSTORE_PLUGIN_VERSION";

// Date/Time Display
pub const RSTORE_DATE_FORMAT: &str = "RSTORE_DATE_FORMAT";
pub const RSTORE_TIME_FORMAT: &str = "RSTORE_TIME_FORMAT";
pub const RSTORE_UTC_OFFSET_SECONDS: &str = "RSTORE_UTC_OFFSET_SECONDS";

// Storefront Status (unset means the storefront plugin is not loaded)
pub const RSTORE_STOREFRONT_SETUP: &str = "RSTORE_STOREFRONT_SETUP";
pub const RSTORE_STOREFRONT_HAS_PRODUCTS: &str = "RSTORE_STOREFRONT_HAS_PRODUCTS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
