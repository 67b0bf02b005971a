//! Viewer navigation and document panels.

use std::fmt::Write as _;

use crate::escape::{data_attr, escape_html, escape_html_text};
use crate::model::Document;
use crate::render::markdown::render_markdown;
use crate::viewer::ViewerState;

pub const PANEL_ID_PREFIX: &str = "doc-";

pub fn render_doc_nav(documents: &[Document], viewer: &ViewerState) -> String {
    let mut html = String::from("<nav class=\"doc-nav\">\n");
    for doc in documents {
        let _ = writeln!(
            html,
            "  <a class=\"doc-nav-link{}\" href=\"#{}\"{}>{}</a>",
            if viewer.is_active(&doc.id) { " active" } else { "" },
            escape_html(&doc.id),
            data_attr("doc", &doc.id),
            escape_html_text(&doc.title),
        );
    }
    html.push_str("</nav>\n");
    html
}

/// Every panel is rendered; only the active one carries `active`.
pub fn render_doc_panels(documents: &[Document], viewer: &ViewerState) -> String {
    let mut html = String::new();
    for doc in documents {
        let _ = write!(
            html,
            "<section class=\"doc-panel{}\" id=\"{PANEL_ID_PREFIX}{}\"{}>\n<h2>{}</h2>\n{}</section>\n",
            if viewer.is_active(&doc.id) { " active" } else { "" },
            escape_html(&doc.id),
            data_attr("doc", &doc.id),
            escape_html_text(&doc.title),
            render_markdown(&doc.body),
        );
    }
    html
}
