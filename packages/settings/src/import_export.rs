// ABOUTME: Import link and export form rendered below the settings form
// ABOUTME: Hands product import and export off to the setup and export subsystems

use rstore_core::constants::{prefixed, EXPORT_ACTION, SETUP_MENU_SLUG};
use rstore_core::html_escape;

use crate::render::hidden_field;

/// Nonce action of the import screen, scoped to the current user
pub fn install_nonce_action(user_id: u64) -> String {
    prefixed(&format!("install-{}", user_id))
}

/// URL of the import screen for `pl_id`
pub fn import_url(admin_url: &str, nonce: &str, pl_id: &str) -> String {
    format!(
        "{}admin.php?page={}&nonce={}&rstore_plid={}",
        admin_url,
        SETUP_MENU_SLUG,
        urlencoding::encode(nonce),
        urlencoding::encode(pl_id)
    )
}

pub fn import_button(url: &str) -> String {
    format!(
        concat!(
            "<div class=\"wrap rstore-settings-import\">",
            "<a class=\"button\" href=\"{}\">Import products</a></div>\n"
        ),
        html_escape(url)
    )
}

/// Export form plus the modal the client-side tooling fills with the export
pub fn export_button(nonce: &str) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"wrap\">\n<form id=\"rstore-settings-export\">\n");
    html.push_str(&hidden_field("nonce", nonce));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"action\" value=\"{}\">\n",
        EXPORT_ACTION
    ));
    html.push_str(concat!(
        "<button type=\"submit\" class=\"button link\">Export Products</button>\n",
        "</form>\n",
        "<div id=\"json-generator\" class=\"json-generator mfp-hide mfp-with-anim\">\n",
        "<div class=\"json-content\">\n<div id=\"header\">\n</div>\n</div>\n",
        "<div class=\"container\">\n",
        "<button id=\"clipboard\" class=\"button button-primary\" data-clipboard-action=\"copy\" ",
        "data-clipboard-target=\"#json-text\">Copy to clipboard</button>\n",
        "<div id=\"json-content\">\n<p><textarea id=\"json-text\"> </textarea></p>\n</div>\n",
        "</div>\n",
        "</div>\n",
        "</div>\n",
    ));
    html
}
