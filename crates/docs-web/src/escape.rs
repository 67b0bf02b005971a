//! HTML and script-context escaping.
//!
//! Every piece of configured content passes through one of these before it
//! reaches markup; none of the renderers trust entry text.

use serde::Serialize;

/// Escape for attribute values: `& < > " '`.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape for element content: `& < >` only.
pub fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `</` would close the surrounding `<script>`; `<\/` is equivalent inside
/// JSON strings and JS literals.
pub fn escape_script_content(s: &str) -> String {
    s.replace("</", r"<\/")
}

/// Render ` data-{name}="{value}"` with the value escaped.
pub fn data_attr(name: &str, value: &str) -> String {
    format!(" data-{name}=\"{}\"", escape_html(value))
}

/// Serialize `value` as JSON that can be assigned inside a `<script>` tag.
pub fn inline_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value).map(|json| escape_script_content(&json))
}
