// ABOUTME: HTML rendering of the settings form
// ABOUTME: One table row per schema field, pre-filled from stored options

use chrono::{DateTime, FixedOffset, Offset, Utc};
use rstore_core::constants::{SAVE_ACTION, SETTINGS_GROUP};
use rstore_core::html_escape;
use rstore_storage::OptionValue;
use std::collections::HashMap;
use std::fmt::Write;

use crate::types::{FieldKind, SettingDefinition};

/// Used when a configured format cannot be rendered
const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The host's date/time display preferences
#[derive(Debug, Clone)]
pub struct DisplayFormat {
    pub date_format: String,
    pub time_format: String,
    pub utc_offset: FixedOffset,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            date_format: "%B %-d, %Y".to_string(),
            time_format: "%-I:%M %P".to_string(),
            utc_offset: Utc.fix(),
        }
    }
}

impl DisplayFormat {
    /// Render an epoch timestamp in the site's offset and formats
    pub fn format_timestamp(&self, timestamp: i64) -> String {
        let Some(utc) = DateTime::from_timestamp(timestamp, 0) else {
            return String::new();
        };
        let local = utc.with_timezone(&self.utc_offset);
        let pattern = format!("{} {}", self.date_format, self.time_format);

        let mut out = String::new();
        if write!(out, "{}", local.format(&pattern)).is_ok() {
            return out;
        }

        out.clear();
        let _ = write!(out, "{}", local.format(FALLBACK_FORMAT));
        out
    }
}

/// Everything the form needs besides the schema
pub struct FormContext<'a> {
    pub values: &'a HashMap<String, OptionValue>,
    pub nonce: &'a str,
    pub display: &'a DisplayFormat,
    pub spinner_url: &'a str,
}

impl FormContext<'_> {
    fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    fn text(&self, name: &str) -> String {
        self.value(name).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Render the settings form for `settings` in order
pub fn render_settings_form(settings: &[SettingDefinition], ctx: &FormContext<'_>) -> String {
    let mut html = String::new();

    html.push_str(concat!(
        "<style type=\"text/css\">\n",
        ".rstore-spinner { visibility: hidden; max-width: 20px; height: auto; margin-bottom: -4px; }\n",
        "</style>\n",
        "<div class=\"wrap\">\n",
        "<h1>Reseller Store Settings</h1>\n",
        "<form id=\"rstore-settings-form\">\n",
        "<table class=\"form-table\">\n",
        "<tbody>\n",
    ));

    html.push_str(&hidden_field("nonce", ctx.nonce));
    html.push_str(&hidden_field("option_page", SETTINGS_GROUP));
    html.push_str(&hidden_field("action", SAVE_ACTION));

    for setting in settings {
        html.push_str(&render_row(setting, ctx));
    }

    html.push_str("</tbody>\n</table>\n");
    let _ = write!(
        html,
        concat!(
            "<p class=\"submit\">\n",
            "<button type=\"submit\" class=\"button button-primary\">Save Changes</button>\n",
            "<img src=\"{}\" class=\"rstore-spinner\">\n",
            "</p>\n",
            "</form>\n",
            "</div>\n",
        ),
        html_escape(ctx.spinner_url)
    );

    html
}

/// `<input type="hidden">` carrying `value`
pub fn hidden_field(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" id=\"{0}\" name=\"{0}\" value=\"{1}\">\n",
        html_escape(name),
        html_escape(value)
    )
}

fn render_row(setting: &SettingDefinition, ctx: &FormContext<'_>) -> String {
    let name = html_escape(setting.name);
    let label = html_escape(setting.label);

    let mut row = format!(
        "<tr>\n<th><label for=\"{}\">{}</label></th>\n<td>",
        name, label
    );

    match setting.kind {
        FieldKind::Text | FieldKind::Number => {
            let _ = write!(
                row,
                "<input type=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\" class=\"regular-text\">",
                setting.kind.as_str(),
                name,
                name,
                html_escape(&ctx.text(setting.name))
            );
        }
        FieldKind::Time => {
            // Missing timestamps show the epoch, as the sync subsystem never ran
            let timestamp = ctx
                .value(setting.name)
                .and_then(OptionValue::as_int)
                .unwrap_or(0);
            let shown = ctx
                .display
                .format_timestamp(i64::try_from(timestamp).unwrap_or(i64::MAX));
            let _ = write!(row, "<label id=\"{}\">{}</label>", name, html_escape(&shown));
        }
        FieldKind::Checkbox => {
            let checked = ctx.value(setting.name).and_then(OptionValue::as_int) == Some(1);
            let _ = write!(
                row,
                "<input type=\"checkbox\" id=\"{}\" name=\"{}\" value=\"1\"{}>",
                name,
                name,
                if checked { " checked=\"checked\"" } else { "" }
            );
        }
        FieldKind::Select { allowed } => {
            let current = ctx.text(setting.name);
            let _ = write!(
                row,
                "<select title=\"{}\" id=\"{}\" name=\"{}\">",
                label, name, name
            );
            for item in allowed {
                let selected = ctx.value(setting.name).is_some() && current == *item;
                let item = html_escape(item);
                if selected {
                    let _ = write!(
                        row,
                        "<option selected=\"selected\" value=\"{0}\">{0}</option>",
                        item
                    );
                } else {
                    let _ = write!(row, "<option value=\"{0}\">{0}</option>", item);
                }
            }
            row.push_str("</select>");
        }
    }

    if let Some(help) = setting.help_text {
        let _ = write!(row, "\n<p class=\"description\">{}</p>", html_escape(help));
    }

    row.push_str("</td>\n</tr>\n");
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::reseller_settings;
    use pretty_assertions::assert_eq;

    fn render_with(values: &[(&str, OptionValue)]) -> String {
        let values: HashMap<String, OptionValue> = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let display = DisplayFormat::default();
        let ctx = FormContext {
            values: &values,
            nonce: "abc123",
            display: &display,
            spinner_url: "/wp-includes/images/spinner-2x.gif",
        };
        render_settings_form(reseller_settings(), &ctx)
    }

    #[test]
    fn test_form_embeds_nonce_and_group_marker() {
        let html = render_with(&[]);
        assert!(html.contains(r#"<input type="hidden" id="nonce" name="nonce" value="abc123">"#));
        assert!(html.contains(r#"name="option_page" value="reseller_settings""#));
        assert!(html.contains(r#"name="action" value="rstore_settings_save""#));
        assert!(html.contains(r#"<form id="rstore-settings-form">"#));
    }

    #[test]
    fn test_rows_follow_schema_order() {
        let html = render_with(&[]);
        let positions: Vec<usize> = reseller_settings()
            .iter()
            .map(|s| html.find(&format!("<label for=\"{}\">", s.name)).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_text_and_number_inputs_are_prefilled() {
        let html = render_with(&[
            ("pl_id", OptionValue::Int(42)),
            ("api_tld", OptionValue::from("secureserver.net")),
        ]);
        assert!(html.contains(
            r#"<input type="number" id="pl_id" name="pl_id" value="42" class="regular-text">"#
        ));
        assert!(html.contains(
            r#"<input type="text" id="api_tld" name="api_tld" value="secureserver.net" class="regular-text">"#
        ));
        assert!(html.contains(
            r#"<input type="text" id="setup_rcc" name="setup_rcc" value="" class="regular-text">"#
        ));
    }

    #[test]
    fn test_stored_values_are_escaped() {
        let html = render_with(&[("api_tld", OptionValue::from("\"><script>x</script>"))]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;x&lt;/script&gt;\""));
    }

    #[test]
    fn test_select_preselects_stored_value() {
        let html = render_with(&[("api_market", OptionValue::from("fr-FR"))]);
        assert!(html.contains(r#"<option selected="selected" value="fr-FR">fr-FR</option>"#));
        assert!(html.contains(r#"<option value="de-DE">de-DE</option>"#));
        assert!(html.contains(
            r#"<select title="Override Api Market" id="api_market" name="api_market">"#
        ));
        assert_eq!(html.matches("selected=\"selected\"").count(), 1);
    }

    #[test]
    fn test_time_rows_are_read_only_labels() {
        let html = render_with(&[("last_sync", OptionValue::Int(1_714_564_800))]);
        assert!(html.contains(r#"<label id="last_sync">May 1, 2024 12:00 pm</label>"#));
        assert!(html.contains(r#"<label id="next_sync">January 1, 1970 12:00 am</label>"#));
        assert!(!html.contains(r#"name="last_sync""#));
    }

    #[test]
    fn test_help_text_is_rendered() {
        let html = render_with(&[]);
        assert!(html.contains(
            "<p class=\"description\">Set the currency to display on your storefront.</p>"
        ));
    }

    #[test]
    fn test_checkbox_checked_when_one() {
        let flag = SettingDefinition {
            name: "debug_mode",
            label: "Debug",
            kind: FieldKind::Checkbox,
            help_text: None,
        };
        let display = DisplayFormat::default();
        let on: HashMap<String, OptionValue> =
            [("debug_mode".to_string(), OptionValue::from("1"))].into();
        let off = HashMap::new();

        let render = |values: &HashMap<String, OptionValue>| {
            render_settings_form(
                &[flag],
                &FormContext {
                    values,
                    nonce: "n",
                    display: &display,
                    spinner_url: "",
                },
            )
        };

        assert!(render(&on).contains(r#"value="1" checked="checked">"#));
        assert!(render(&off).contains(r#"name="debug_mode" value="1">"#));
    }

    #[test]
    fn test_format_timestamp_applies_offset() {
        let display = DisplayFormat {
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
            utc_offset: FixedOffset::east_opt(2 * 3600).unwrap(),
        };
        assert_eq!(display.format_timestamp(1_714_564_800), "2024-05-01 14:00");
    }

    #[test]
    fn test_format_timestamp_survives_bad_format() {
        let display = DisplayFormat {
            date_format: "%Q".to_string(),
            ..DisplayFormat::default()
        };
        assert_eq!(display.format_timestamp(0), "1970-01-01 00:00:00");
    }
}
