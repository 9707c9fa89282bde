// ABOUTME: Server configuration read from environment variables
// ABOUTME: Port, database, nonce secret, admin URLs, display formats and storefront status

use chrono::FixedOffset;
use rstore_config::constants::*;
use rstore_core::StorefrontStatus;
use rstore_settings::{DisplayFormat, PanelConfig};
use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("UTC offset {0}s is out of range")]
    UtcOffsetOutOfRange(i32),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub nonce_secret: String,
    /// True when no secret was configured and one was generated for this run
    pub nonce_secret_generated: bool,
    pub user_id: u64,
    pub admin_url: String,
    pub assets_url: String,
    pub includes_url: String,
    pub script_debug: bool,
    pub plugin_version: String,
    pub date_format: String,
    pub time_format: String,
    pub utc_offset: FixedOffset,
    /// `None` when the storefront plugin is not loaded
    pub storefront: Option<StorefrontStatus>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = var(RSTORE_PORT)
            .unwrap_or_else(|| "4010".to_string())
            .parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let database_url =
            var(RSTORE_DATABASE_URL).unwrap_or_else(|| "sqlite://rstore.db?mode=rwc".to_string());

        let (nonce_secret, nonce_secret_generated) = match var(RSTORE_NONCE_SECRET) {
            Some(secret) => (secret, false),
            None => (
                format!(
                    "{}{}",
                    uuid::Uuid::new_v4().simple(),
                    uuid::Uuid::new_v4().simple()
                ),
                true,
            ),
        };

        let user_id = parse_number(RSTORE_USER_ID, "1")?;
        if user_id == 0 {
            return Err(ConfigError::InvalidValue {
                var: RSTORE_USER_ID,
                value: "0".to_string(),
            });
        }

        let admin_url = with_trailing_slash(
            var(RSTORE_ADMIN_URL).unwrap_or_else(|| format!("http://localhost:{}/wp-admin/", port)),
        );
        let assets_url = with_trailing_slash(var(RSTORE_ASSETS_URL).unwrap_or_else(|| {
            format!(
                "http://localhost:{}/wp-content/plugins/reseller-store-settings/assets/",
                port
            )
        }));
        let includes_url = with_trailing_slash(
            var(RSTORE_INCLUDES_URL)
                .unwrap_or_else(|| format!("http://localhost:{}/wp-includes/", port)),
        );

        let script_debug = parse_bool(RSTORE_SCRIPT_DEBUG)?.unwrap_or(false);
        let plugin_version =
            var(RSTORE_PLUGIN_VERSION).unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        let date_format = var(RSTORE_DATE_FORMAT).unwrap_or_else(|| "%B %-d, %Y".to_string());
        let time_format = var(RSTORE_TIME_FORMAT).unwrap_or_else(|| "%-I:%M %P".to_string());

        let offset_seconds: i32 = parse_number(RSTORE_UTC_OFFSET_SECONDS, "0")?;
        let utc_offset = FixedOffset::east_opt(offset_seconds)
            .ok_or(ConfigError::UtcOffsetOutOfRange(offset_seconds))?;

        let storefront = match parse_bool(RSTORE_STOREFRONT_SETUP)? {
            Some(is_setup) => Some(StorefrontStatus {
                is_setup,
                has_products: parse_bool(RSTORE_STOREFRONT_HAS_PRODUCTS)?.unwrap_or(false),
            }),
            None => None,
        };

        Ok(Config {
            port,
            database_url,
            nonce_secret,
            nonce_secret_generated,
            user_id,
            admin_url,
            assets_url,
            includes_url,
            script_debug,
            plugin_version,
            date_format,
            time_format,
            utc_offset,
            storefront,
        })
    }

    /// Settings the panel renders with
    pub fn panel_config(&self) -> PanelConfig {
        PanelConfig {
            admin_url: self.admin_url.clone(),
            assets_url: self.assets_url.clone(),
            includes_url: self.includes_url.clone(),
            script_debug: self.script_debug,
            version: self.plugin_version.clone(),
            display: DisplayFormat {
                date_format: self.date_format.clone(),
                time_format: self.time_format.clone(),
                utc_offset: self.utc_offset,
            },
        }
    }
}

/// Environment variable, with empty values treated as unset
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let raw = var(name).unwrap_or_else(|| default.to_string());
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        var: name,
        value: raw,
    })
}

fn parse_bool(name: &'static str) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = var(name) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            var: name,
            value: raw,
        }),
    }
}

fn with_trailing_slash(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_trailing_slash() {
        assert_eq!(
            with_trailing_slash("https://shop.test/wp-admin".to_string()),
            "https://shop.test/wp-admin/"
        );
        assert_eq!(
            with_trailing_slash("https://shop.test/wp-admin/".to_string()),
            "https://shop.test/wp-admin/"
        );
    }
}
