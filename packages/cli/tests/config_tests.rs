// ABOUTME: Tests for reading server configuration from the environment
// ABOUTME: Defaults, overrides and rejection of malformed values

use pretty_assertions::assert_eq;
use rstore_cli::config::{Config, ConfigError};
use rstore_config::constants::*;
use rstore_core::StorefrontStatus;
use serial_test::serial;
use std::env;

const ALL_VARS: &[&str] = &[
    RSTORE_PORT,
    RSTORE_DATABASE_URL,
    RSTORE_NONCE_SECRET,
    RSTORE_USER_ID,
    RSTORE_ADMIN_URL,
    RSTORE_ASSETS_URL,
    RSTORE_INCLUDES_URL,
    RSTORE_SCRIPT_DEBUG,
    RSTORE_PLUGIN_VERSION,
    RSTORE_DATE_FORMAT,
    RSTORE_TIME_FORMAT,
    RSTORE_UTC_OFFSET_SECONDS,
    RSTORE_STOREFRONT_SETUP,
    RSTORE_STOREFRONT_HAS_PRODUCTS,
];

fn clear_env() {
    for name in ALL_VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, 4010);
    assert_eq!(config.database_url, "sqlite://rstore.db?mode=rwc");
    assert_eq!(config.user_id, 1);
    assert_eq!(config.admin_url, "http://localhost:4010/wp-admin/");
    assert!(!config.script_debug);
    assert!(config.nonce_secret_generated);
    assert_eq!(config.nonce_secret.len(), 64);
    assert_eq!(config.storefront, None);
    assert_eq!(config.panel_config().display.date_format, "%B %-d, %Y");
}

#[test]
#[serial]
fn test_overrides() {
    clear_env();
    env::set_var(RSTORE_PORT, "8080");
    env::set_var(RSTORE_NONCE_SECRET, "s3cret");
    env::set_var(RSTORE_ADMIN_URL, "https://shop.test/wp-admin");
    env::set_var(RSTORE_SCRIPT_DEBUG, "true");
    env::set_var(RSTORE_UTC_OFFSET_SECONDS, "-18000");
    env::set_var(RSTORE_STOREFRONT_SETUP, "1");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.port, 8080);
    assert_eq!(config.nonce_secret, "s3cret");
    assert!(!config.nonce_secret_generated);
    assert_eq!(config.admin_url, "https://shop.test/wp-admin/");
    assert!(config.script_debug);
    assert_eq!(config.utc_offset.local_minus_utc(), -18000);
    assert_eq!(
        config.storefront,
        Some(StorefrontStatus {
            is_setup: true,
            has_products: false
        })
    );

    let panel = config.panel_config();
    assert!(panel.script_debug);
    assert_eq!(panel.admin_url, "https://shop.test/wp-admin/");
}

#[test]
#[serial]
fn test_rejects_port_zero() {
    clear_env();
    env::set_var(RSTORE_PORT, "0");

    let result = Config::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::PortOutOfRange(0))));
}

#[test]
#[serial]
fn test_rejects_malformed_values() {
    for (name, value) in [
        (RSTORE_PORT, "http"),
        (RSTORE_USER_ID, "admin"),
        (RSTORE_USER_ID, "0"),
        (RSTORE_SCRIPT_DEBUG, "maybe"),
        (RSTORE_UTC_OFFSET_SECONDS, "999999"),
    ] {
        clear_env();
        env::set_var(name, value);

        let result = Config::from_env();
        assert!(result.is_err(), "{}={} should be rejected", name, value);
    }
    clear_env();
}
