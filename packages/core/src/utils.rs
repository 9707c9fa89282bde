// ABOUTME: Shared utility functions for the settings panel
// ABOUTME: HTML escaping and admin request matching

/// Escape text for use in HTML element content and quoted attributes
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Non-strict admin screen match: the request URI merely has to contain the
/// screen identifier, so sub-pages of a screen match too.
pub fn is_admin_uri(request_uri: &str, screen: &str) -> bool {
    !screen.is_empty() && request_uri.contains(screen)
}
