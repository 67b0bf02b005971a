//! Feature cards, the category filter bar and the search box.

use std::fmt::Write as _;

use url::Url;

use crate::escape::{data_attr, escape_html, escape_html_text};
use crate::filter::{ALL, CategoryFilter, FilterState};
use crate::highlight::highlight_html;
use crate::model::{Entry, EntryCollection, slugify};
use crate::url_state::share_link;

/// One feature card. The element id is the entry identifier so deep links
/// can scroll to it; text fields are highlighted with the current term.
pub fn render_card(entry: &Entry, filter: &FilterState, base: Option<&Url>) -> String {
    let term = filter.term.as_str();
    let link = share_link(base, filter, &entry.id);
    format!(
        r#"<div class="feature-card {class}" id="{id}"{category}>
  <button class="card-link"{link} title="Copy link to this card">🔗</button>
  <div class="feature-header">
    <h3>{name}</h3>
    <span class="feature-tag">{tag}</span>
  </div>
  <p class="feature-description">{description}</p>
  <div class="feature-implementation">
    <strong>Implementation:</strong>
    <code class="code-ref"{copy} title="Click to copy">{implementation}</code>
  </div>
  <div class="feature-details">
    <strong>Technical Details:</strong><br />
    {details}
  </div>
</div>
"#,
        class = slugify(&entry.category),
        id = escape_html(&entry.id),
        category = data_attr("category", &entry.category),
        link = data_attr("link", &link),
        name = highlight_html(&entry.name, term),
        tag = escape_html_text(&entry.category),
        description = highlight_html(&entry.description, term),
        copy = data_attr("copy", &entry.implementation_ref),
        implementation = highlight_html(&entry.implementation_ref, term),
        details = highlight_html(&entry.details, term),
    )
}

/// The full grid contents for a filter pass. An empty pass renders a
/// placeholder rather than nothing.
pub fn render_cards(visible: &[&Entry], filter: &FilterState, base: Option<&Url>) -> String {
    if visible.is_empty() {
        return format!(
            "<p class=\"no-results\">No features match <strong>{}</strong>.</p>\n",
            escape_html_text(&filter.term)
        );
    }
    visible
        .iter()
        .map(|entry| render_card(entry, filter, base))
        .collect()
}

/// `All` plus one button per declared category.
pub fn render_filter_bar(collection: &EntryCollection, active: &CategoryFilter) -> String {
    let mut html = String::from("<div class=\"feature-filters\" role=\"toolbar\">\n");
    let button = |html: &mut String, value: &str, label: &str| {
        let is_active = active.as_str() == value;
        let _ = writeln!(
            html,
            "  <button class=\"filter-btn{}\"{} aria-pressed=\"{is_active}\">{}</button>",
            if is_active { " active" } else { "" },
            data_attr("filter", value),
            escape_html_text(label),
        );
    };
    button(&mut html, ALL, "All");
    for category in collection.categories() {
        button(&mut html, &category.id, &category.label);
    }
    html.push_str("</div>\n");
    html
}

pub fn render_search_input(term: &str) -> String {
    format!(
        "<input type=\"search\" id=\"globalSearch\" class=\"feature-search\" placeholder=\"Search features…\" value=\"{}\" autocomplete=\"off\" />\n",
        escape_html(term)
    )
}
