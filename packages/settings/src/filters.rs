// ABOUTME: Filters re-publishing stored settings to the rest of the application
// ABOUTME: Stored-value overrides, domain search markup and API query arguments

use async_trait::async_trait;
use regex::{Captures, Regex};
use rstore_core::{html_escape, Filter};
use rstore_storage::{KeyValueStore, OptionValue};
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use crate::schema::{API_CURRENCY, API_MARKET, API_TLD, DEFAULT_CHOICE};

/// First opening `<div ...>` tag of a fragment
static OPENING_DIV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<div\b([^>]*)>").expect("opening div pattern is valid"));

/// Read a non-empty option, logging and swallowing store failures
async fn read_option(store: &dyn KeyValueStore, key: &str) -> Option<OptionValue> {
    match store.get(key).await {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read option for filter");
            None
        }
    }
}

/// Replaces the filtered value with a stored setting.
///
/// Backs `rstore_api_tld`, `rstore_setup_rcc` and `rstore_sync_ttl`. When the
/// setting has been emptied since registration the input passes through.
pub struct StoredOptionFilter {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
}

impl StoredOptionFilter {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { store, key }
    }
}

#[async_trait]
impl Filter for StoredOptionFilter {
    async fn apply(&self, value: Value) -> Value {
        match read_option(self.store.as_ref(), self.key).await {
            Some(stored) => {
                debug!(key = %self.key, "Overriding filtered value with stored option");
                stored.to_json()
            }
            None => value,
        }
    }
}

/// Points the domain search widget at the overridden API host by adding a
/// `data-base_url` attribute to its outer `<div>`.
pub struct DomainSearchHtmlFilter {
    store: Arc<dyn KeyValueStore>,
}

impl DomainSearchHtmlFilter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

/// Add `data-base_url="<base_url>"` to the first `<div>` of `html`
pub fn add_base_url(html: &str, base_url: &str) -> String {
    let escaped = html_escape(base_url);
    OPENING_DIV
        .replacen(html, 1, |caps: &Captures| {
            format!("<div{} data-base_url=\"{}\">", &caps[1], escaped)
        })
        .into_owned()
}

#[async_trait]
impl Filter for DomainSearchHtmlFilter {
    async fn apply(&self, value: Value) -> Value {
        let Some(html) = value.as_str() else {
            return value;
        };

        match read_option(self.store.as_ref(), API_TLD).await {
            Some(tld) => Value::String(add_base_url(html, &tld.to_string())),
            None => value,
        }
    }
}

/// Adds market and currency overrides to outgoing API query arguments.
///
/// Stored values equal to the `default` sentinel add nothing.
pub struct ApiQueryArgsFilter {
    store: Arc<dyn KeyValueStore>,
}

impl ApiQueryArgsFilter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn override_for(&self, key: &str) -> Option<String> {
        read_option(self.store.as_ref(), key)
            .await
            .map(|v| v.to_string())
            .filter(|v| v != DEFAULT_CHOICE)
    }
}

#[async_trait]
impl Filter for ApiQueryArgsFilter {
    async fn apply(&self, value: Value) -> Value {
        let mut args = match value {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                warn!("Query args filter received a non-object value");
                return other;
            }
        };

        if let Some(market) = self.override_for(API_MARKET).await {
            args.insert("marketId".to_string(), Value::String(market));
        }

        if let Some(currency) = self.override_for(API_CURRENCY).await {
            args.insert("currencyType".to_string(), Value::String(currency));
        }

        Value::Object(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstore_storage::MemoryStore;
    use serde_json::json;

    fn store(values: &[(&str, &str)]) -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::with_values(values.iter().copied()))
    }

    #[tokio::test]
    async fn test_stored_option_filter_returns_stored_value() {
        let filter = StoredOptionFilter::new(store(&[("api_tld", "test-godaddy.com")]), API_TLD);
        assert_eq!(
            filter.apply(json!("secureserver.net")).await,
            json!("test-godaddy.com")
        );
    }

    #[tokio::test]
    async fn test_stored_option_filter_passes_through_when_unset() {
        let filter = StoredOptionFilter::new(store(&[]), API_TLD);
        assert_eq!(
            filter.apply(json!("secureserver.net")).await,
            json!("secureserver.net")
        );
    }

    #[tokio::test]
    async fn test_stored_numbers_stay_numbers() {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::with_values([("sync_ttl", 300u64)]));
        let filter = StoredOptionFilter::new(store, "sync_ttl");
        assert_eq!(filter.apply(json!(900)).await, json!(300));
    }

    #[test]
    fn test_add_base_url() {
        assert_eq!(
            add_base_url(
                r#"<div class="widget rstore-domain"><input name="q"></div>"#,
                "test-godaddy.com"
            ),
            r#"<div class="widget rstore-domain" data-base_url="test-godaddy.com"><input name="q"></div>"#
        );
    }

    #[test]
    fn test_add_base_url_touches_only_first_div_and_escapes() {
        assert_eq!(
            add_base_url("<div><div>x</div></div>", r#"a"b"#),
            r#"<div data-base_url="a&quot;b"><div>x</div></div>"#
        );
        assert_eq!(add_base_url("<span>no div</span>", "x"), "<span>no div</span>");
    }

    #[tokio::test]
    async fn test_domain_search_html_filter() {
        let filter = DomainSearchHtmlFilter::new(store(&[("api_tld", "test-godaddy.com")]));
        assert_eq!(
            filter.apply(json!("<div class=\"search\"></div>")).await,
            json!("<div class=\"search\" data-base_url=\"test-godaddy.com\"></div>")
        );
    }

    #[tokio::test]
    async fn test_query_args_default_market_adds_nothing() {
        let filter = ApiQueryArgsFilter::new(store(&[
            ("api_market", "default"),
            ("api_currency", "default"),
        ]));
        assert_eq!(
            filter.apply(json!({"isc": "promo"})).await,
            json!({"isc": "promo"})
        );
    }

    #[tokio::test]
    async fn test_query_args_adds_overrides() {
        let filter = ApiQueryArgsFilter::new(store(&[
            ("api_market", "fr-FR"),
            ("api_currency", "EUR"),
        ]));
        assert_eq!(
            filter.apply(json!({"isc": "promo"})).await,
            json!({"isc": "promo", "marketId": "fr-FR", "currencyType": "EUR"})
        );
    }

    #[tokio::test]
    async fn test_query_args_without_settings() {
        let filter = ApiQueryArgsFilter::new(store(&[]));
        assert_eq!(filter.apply(json!({})).await, json!({}));
        assert_eq!(filter.apply(Value::Null).await, json!({}));
    }
}
