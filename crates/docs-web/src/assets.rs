//! Embedded assets and page shells.
//!
//! Both pages inline their CSS, the host script and the page data, and are
//! fully rendered on the server. The host script then loads the compiled
//! controller from `pkg/` next to the page and hands it the page over;
//! without the controller (or from `file://`) the pre-rendered page stays
//! as it is.

use url::Url;

use crate::config::Site;
use crate::controller::PageData;
use crate::escape::{escape_html, escape_html_text, inline_json};
use crate::filter::FilterState;
use crate::render;
use crate::viewer::ViewerState;

/// The site stylesheet.
pub const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Host script shared by the features page and the viewer.
pub const RAGDOCS_JS: &str = include_str!("../assets/ragdocs.js");

pub const VIEWER_FILENAME: &str = "viewer.html";

fn navbar(site: &Site, links: &[(&str, &str)], with_export: bool) -> String {
    let mut items = String::new();
    for (href, label) in links {
        items.push_str(&format!(
            "      <li><a href=\"{}\">{}</a></li>\n",
            escape_html(href),
            escape_html_text(label)
        ));
    }
    let export = if with_export {
        r#"      <div class="export">
        <button id="exportBtn" aria-haspopup="true" aria-expanded="false">Export</button>
        <div class="export-dropdown" role="menu">
          <button data-export="json" role="menuitem">Download features.json</button>
          <button data-export="print" role="menuitem">Print</button>
        </div>
      </div>
"#
    } else {
        ""
    };
    format!(
        r#"  <nav class="navbar">
    <div class="nav-brand">{title}</div>
    <button class="nav-toggle" aria-expanded="false" aria-label="Toggle navigation">☰</button>
    <ul class="nav-links">
{items}    </ul>
    <div class="nav-actions">
{export}      <button id="darkToggle" class="icon-btn" aria-pressed="false" title="Toggle dark mode">🌙</button>
    </div>
  </nav>
"#,
        title = escape_html_text(&site.meta.title),
    )
}

fn section(id: &str, title: &str, class: &str, body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!(
        "  <section class=\"site-section\" id=\"{id}\">\n    <h2 class=\"section-title\">{title}</h2>\n    <div class=\"{class}\">\n{body}    </div>\n  </section>\n"
    )
}

fn shell(title: &str, data_json: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{css}</style>
</head>
<body>
{body}  <button id="backToTop" aria-label="Back to top">↑</button>
  <script>window.RAGDOCS_DATA = {data_json};</script>
  <script>{js}</script>
</body>
</html>
"#,
        title = escape_html_text(title),
        css = STYLES_CSS,
        js = RAGDOCS_JS,
    )
}

/// The features page, pre-rendered for `filter`.
///
/// `base` makes card share links absolute; without it they are relative.
pub fn features_page(site: &Site, filter: &FilterState, base: Option<&Url>) -> serde_json::Result<String> {
    let content = &site.content;
    let visible = filter.apply(&site.collection);

    let pipeline = render::render_pipeline(&content.pipeline);
    let optimizations = render::render_optimizations(&content.optimizations);
    let architecture = render::render_architecture(&content.architecture);
    let tech = render::render_tech(&content.tech);

    let mut links = Vec::new();
    for (id, label, body) in [
        ("#pipeline", "Pipeline", &pipeline),
        ("#optimizations", "Optimizations", &optimizations),
        ("#architecture", "Architecture", &architecture),
    ] {
        if !body.is_empty() {
            links.push((id, label));
        }
    }
    links.push(("#features", "Features"));
    if !tech.is_empty() {
        links.push(("#tech", "Tech Stack"));
    }
    if !content.documents.is_empty() {
        links.push((VIEWER_FILENAME, "Docs"));
    }

    let mut body = navbar(site, &links, true);
    body.push_str(&format!(
        "  <header class=\"hero\">\n    <h1>{}</h1>\n    <p>{}</p>\n  </header>\n",
        escape_html_text(&site.meta.title),
        escape_html_text(&site.meta.tagline),
    ));
    body.push_str(&section("pipeline", "Retrieval Pipeline", "pipeline", &pipeline));
    body.push_str(&section("optimizations", "Optimizations", "optimizations-grid", &optimizations));
    body.push_str(&section("architecture", "Architecture", "architecture", &architecture));
    body.push_str(&format!(
        r#"  <section class="site-section" id="features">
    <h2 class="section-title">Features</h2>
{filters}{search}    <div class="features-grid" id="featuresGrid">
{cards}    </div>
  </section>
"#,
        filters = render::render_filter_bar(&site.collection, &filter.category),
        search = render::render_search_input(&filter.term),
        cards = render::render_cards(&visible, filter, base),
    ));
    body.push_str(&section("tech", "Tech Stack", "tech-grid", &tech));

    let data = inline_json(&PageData::new(site, "features"))?;
    Ok(shell(&site.meta.title, &data, &body))
}

/// The document viewer with `active` (or the default document) shown.
pub fn viewer_page(site: &Site, active: Option<&str>) -> serde_json::Result<String> {
    let documents = &site.content.documents;
    let mut viewer = ViewerState::new(documents, site.meta.default_document.as_deref());

    let mut body = navbar(site, &[("index.html", "Features")], false);
    match viewer.as_mut() {
        Some(viewer) => {
            viewer.navigate(active);
            body.push_str(&format!(
                "  <div class=\"viewer-layout\">\n{}<main class=\"doc-content\">\n{}</main>\n  </div>\n",
                render::render_doc_nav(documents, viewer),
                render::render_doc_panels(documents, viewer),
            ));
        }
        None => body.push_str("  <main class=\"doc-content\"><p class=\"no-results\">No documents.</p></main>\n"),
    }

    let data = inline_json(&PageData::new(site, "viewer"))?;
    Ok(shell(&format!("{} · Docs", site.meta.title), &data, &body))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use regex::Regex;

    use super::*;
    use crate::controller::{CONTROLLER_DIR, CONTROLLER_FILES};
    use crate::events::{Effect, SiteEvent};
    use crate::filter::CategoryFilter;

    const SITE: &str = r#"
[site]
title = "CAES </title> Docs"
tagline = "RAG chatbot internals"

[[categories]]
id = "retrieval"
label = "Retrieval"

[[entries]]
id = "vector"
category = "retrieval"
name = "Vector Search"
description = "</script><script>alert(1)</script>"

[[entries]]
id = "memory"
category = "conversation"
name = "Memory"

[[pipeline]]
number = 1
title = "Acronyms"
description = "Expand"
reference = "src/rag/acronyms.js"

[[documents]]
id = "welcome"
title = "Welcome"
body = "Hi"

[[documents]]
id = "setup"
title = "Setup"
body = "Install"
"#;

    fn site() -> Site {
        Site::from_toml_str(SITE, Path::new(".")).unwrap()
    }

    fn tag<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_value(value).unwrap()["type"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn effect_tags() -> Vec<String> {
        [
            Effect::Render {
                ids: Vec::new(),
                term: String::new(),
                html: String::new(),
            },
            Effect::SetActiveFilter {
                category: String::new(),
            },
            Effect::SetSearchValue {
                value: String::new(),
            },
            Effect::ReplaceUrl { url: String::new() },
            Effect::ScrollIntoView { id: String::new() },
            Effect::ScrollToTop,
            Effect::ScheduleTick { delay_ms: 0 },
            Effect::CopyToClipboard {
                text: String::new(),
            },
            Effect::Download {
                filename: String::new(),
                mime: String::new(),
                contents: String::new(),
            },
            Effect::Print,
            Effect::PersistPreference {
                key: String::new(),
                value: String::new(),
            },
            Effect::SetDarkMode { enabled: false },
            Effect::SetNavOpen { open: false },
            Effect::SetExportMenuOpen { open: false },
            Effect::ActivatePanel { id: String::new() },
            Effect::SetBackToTopVisible { visible: false },
            Effect::SetNavShadow { enabled: false },
        ]
        .iter()
        .map(tag)
        .collect()
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(STYLES_CSS.contains(":root"));
        assert!(STYLES_CSS.contains(".feature-card"));
    }

    #[test]
    fn host_script_loads_the_controller() {
        let module = format!("'{CONTROLLER_DIR}/{}'", CONTROLLER_FILES[0]);
        assert!(RAGDOCS_JS.contains(&module), "host must import {module}");
        assert!(RAGDOCS_JS.contains("new module.SiteController("));
        assert!(RAGDOCS_JS.contains("RAGDOCS_DATA"));
    }

    #[test]
    fn host_script_carries_out_every_effect() {
        let handled: Vec<&str> = Regex::new(r"case '([a-z_]+)':")
            .unwrap()
            .captures_iter(RAGDOCS_JS)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        let tags = effect_tags();
        for tag in &tags {
            assert!(handled.contains(&tag.as_str()), "effect `{tag}` is not handled");
        }
        for case in &handled {
            assert!(tags.iter().any(|t| t == case), "unknown effect `{case}`");
        }
    }

    #[test]
    fn host_script_sends_known_events() {
        let known: Vec<String> = [
            SiteEvent::SearchInput {
                value: String::new(),
            },
            SiteEvent::HashChanged { fragment: None },
            SiteEvent::Scrolled { y: 0.0 },
        ]
        .iter()
        .map(tag)
        .collect();
        let sent: Vec<&str> = Regex::new(r"type: '([a-z_]+)'")
            .unwrap()
            .captures_iter(RAGDOCS_JS)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(sent.len(), known.len());
        for tag in sent {
            assert!(known.iter().any(|k| k == tag), "unknown event `{tag}`");
        }

        // everything else goes through the click path
        assert!(RAGDOCS_JS.contains("controller.click("));
    }

    #[test]
    fn features_page_is_prerendered() {
        let site = site();
        let html = features_page(&site, &FilterState::default(), None).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>CAES &lt;/title&gt; Docs</title>"));
        assert!(html.contains("id=\"featuresGrid\""));
        assert!(html.contains("id=\"vector\""));
        assert!(html.contains("id=\"memory\""));
        assert!(html.contains("class=\"pipeline-stage\""));
        assert!(html.contains("href=\"viewer.html\""));
        // empty sections are dropped along with their nav links
        assert!(!html.contains("id=\"tech\""));
        assert!(!html.contains("href=\"#tech\""));
    }

    #[test]
    fn features_page_applies_filter() {
        let site = site();
        let filter = FilterState::new(CategoryFilter::Only("retrieval".into()), "vector");
        let html = features_page(&site, &filter, None).unwrap();
        assert!(html.contains("id=\"vector\""));
        assert!(!html.contains("id=\"memory\""));
        assert!(html.contains("value=\"vector\""));
        assert!(html.contains("class=\"filter-btn active\" data-filter=\"retrieval\""));
    }

    #[test]
    fn inlined_data_cannot_close_script() {
        let html = features_page(&site(), &FilterState::default(), None).unwrap();
        let script = html
            .split("window.RAGDOCS_DATA = ")
            .nth(1)
            .and_then(|rest| rest.split(";</script>").next())
            .unwrap();
        assert!(!script.contains("</script>"));
        assert!(script.contains(r#"<\/script>"#));
        assert!(script.contains("\"debounceMs\":180"));
    }

    #[test]
    fn viewer_page_activates_requested_document() {
        let site = site();
        let html = viewer_page(&site, Some("setup")).unwrap();
        assert!(html.contains("class=\"doc-panel active\" id=\"doc-setup\""));
        assert_eq!(html.matches("doc-panel active").count(), 1);
        assert!(html.contains("\"defaultDocument\":\"welcome\""));

        let html = viewer_page(&site, Some("nope")).unwrap();
        assert!(html.contains("class=\"doc-panel active\" id=\"doc-welcome\""));
    }

    #[test]
    fn viewer_page_without_documents() {
        let site = Site::from_toml_str("", Path::new(".")).unwrap();
        let html = viewer_page(&site, None).unwrap();
        assert!(html.contains("No documents."));
        assert!(html.contains("\"defaultDocument\":null"));
    }
}
