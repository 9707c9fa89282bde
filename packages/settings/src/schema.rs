// ABOUTME: The static settings schema
// ABOUTME: Ordered field definitions plus the currency and market value lists

use crate::types::{FieldKind, SettingDefinition};

/// Currencies offered for the storefront; `default` defers to the account setting
pub const CURRENCIES: &[&str] = &[
    "default", "USD", "AED", "ARS", "AUD", "BRL", "CAD", "CHF", "CLP", "CNY", "COP", "CZK", "DKK",
    "EGP", "EUR", "GBP", "HKD", "HUF", "IDR", "ILS", "INR", "JPY", "KRW", "MAD", "MXN", "MYR",
    "NOK", "NZD", "PEN", "PHP", "PKR", "PLN", "RON", "RUB", "SAR", "SEK", "SGD", "THB", "TRY",
    "TWD", "UAH", "UYU", "VND", "ZAR",
];

/// Markets (locales) offered for the storefront; `default` defers to the site language
pub const MARKETS: &[&str] = &[
    "default", "da-DK", "de-DE", "el-GR", "en-US", "es-MX", "fi-FI", "fr-FR", "hi-IN", "id-ID",
    "it-IT", "ja-JP", "ko-KR", "mr-IN", "nb-NO", "nl-NL", "pl-PL", "pt-BR", "pt-PT", "ru-RU",
    "sv-SE", "ta-IN", "th-TH", "tr-TR", "uk-UA", "vi-VN", "zh-CN", "zh-TW",
];

/// Sentinel select value meaning "no override"
pub const DEFAULT_CHOICE: &str = "default";

pub const PL_ID: &str = "pl_id";
pub const API_CURRENCY: &str = "api_currency";
pub const API_MARKET: &str = "api_market";
pub const SYNC_TTL: &str = "sync_ttl";
pub const LAST_SYNC: &str = "last_sync";
pub const NEXT_SYNC: &str = "next_sync";
pub const API_TLD: &str = "api_tld";
pub const SETUP_RCC: &str = "setup_rcc";

static RESELLER_SETTINGS: [SettingDefinition; 8] = [
    SettingDefinition {
        name: PL_ID,
        label: "Private Label Id",
        kind: FieldKind::Number,
        help_text: Some("The private label id that you have set for your storefront."),
    },
    SettingDefinition {
        name: API_CURRENCY,
        label: "Currency",
        kind: FieldKind::Select { allowed: CURRENCIES },
        help_text: Some("Set the currency to display on your storefront."),
    },
    SettingDefinition {
        name: API_MARKET,
        label: "Override Api Market",
        kind: FieldKind::Select { allowed: MARKETS },
        help_text: Some("Override your default language selected in the wordpress setup."),
    },
    SettingDefinition {
        name: SYNC_TTL,
        label: "Api Sync TTL (seconds)",
        kind: FieldKind::Number,
        help_text: Some(
            "Reseller store will check the api for changes periodically. The default is 15 minutes (900 seconds).",
        ),
    },
    SettingDefinition {
        name: LAST_SYNC,
        label: "Last Api Sync",
        kind: FieldKind::Time,
        help_text: None,
    },
    SettingDefinition {
        name: NEXT_SYNC,
        label: "Next Api Sync",
        kind: FieldKind::Time,
        help_text: None,
    },
    SettingDefinition {
        name: API_TLD,
        label: "Api Url",
        kind: FieldKind::Text,
        help_text: Some("Set url for internal testing. (i.e. secureserver.net)"),
    },
    SettingDefinition {
        name: SETUP_RCC,
        label: "RCC Url",
        kind: FieldKind::Text,
        help_text: Some("Set url for internal testing. (i.e. https://reseller.godaddy.com)"),
    },
];

/// Every setting in render order
pub fn reseller_settings() -> &'static [SettingDefinition] {
    &RESELLER_SETTINGS
}

/// Look up a definition by storage key
#[cfg(test)]
pub(crate) fn find(name: &str) -> Option<&'static SettingDefinition> {
    RESELLER_SETTINGS.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = reseller_settings().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), reseller_settings().len());
    }

    #[test]
    fn test_render_order() {
        let names: Vec<_> = reseller_settings().iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "pl_id",
                "api_currency",
                "api_market",
                "sync_ttl",
                "last_sync",
                "next_sync",
                "api_tld",
                "setup_rcc"
            ]
        );
    }

    #[test]
    fn test_select_lists_start_with_default() {
        assert_eq!(CURRENCIES[0], DEFAULT_CHOICE);
        assert_eq!(MARKETS[0], DEFAULT_CHOICE);
        assert_eq!(CURRENCIES.len(), 44);
        assert_eq!(MARKETS.len(), 28);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("api_market").unwrap().kind, FieldKind::Select { allowed: MARKETS });
        assert_eq!(find("next_sync").unwrap().kind, FieldKind::Time);
        assert!(find("nonce").is_none());
    }
}
