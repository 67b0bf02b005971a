//! Delegated event handling.
//!
//! The page installs a single click listener on the document. The listener
//! hands over the click path (target first, then each ancestor) as plain
//! [`ElementDescriptor`]s, and [`dispatch_click`] turns it into
//! [`SiteEvent`]s by looking for the nearest element carrying the relevant
//! class, id or data attribute. Nothing here touches a DOM, so handlers are
//! tested as plain functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::export::ExportKind;

/// One element on a click path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    /// `data-*` attributes, keyed without the `data-` prefix
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    /// Text content, used where an element has no `data-copy`
    #[serde(default)]
    pub text: Option<String>,
}

impl ElementDescriptor {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SiteEvent {
    FilterSelected { category: String },
    SearchInput { value: String },
    CopyLink { link: String },
    CopyCode { text: String },
    ToggleExportMenu,
    Export { kind: ExportKind },
    ToggleNav,
    ClickOutsideNav,
    SelectDocument { id: String },
    HashChanged { fragment: Option<String> },
    ToggleDarkMode,
    BackToTop,
    Scrolled { y: f64 },
}

/// Instructions for the host page, produced by the state reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Replace the feature grid with these entries, highlighting `term`.
    /// `html` is the rendered grid content.
    Render {
        ids: Vec<String>,
        term: String,
        html: String,
    },
    SetActiveFilter { category: String },
    SetSearchValue { value: String },
    /// `history.replaceState`; never a new history entry
    ReplaceUrl { url: String },
    ScrollIntoView { id: String },
    ScrollToTop,
    /// Call back into `tick` after this many milliseconds
    ScheduleTick { delay_ms: u64 },
    CopyToClipboard { text: String },
    Download {
        filename: String,
        mime: String,
        contents: String,
    },
    Print,
    PersistPreference { key: String, value: String },
    SetDarkMode { enabled: bool },
    SetNavOpen { open: bool },
    SetExportMenuOpen { open: bool },
    /// Mark this panel and its nav link active, clearing all others
    ActivatePanel { id: String },
    SetBackToTopVisible { visible: bool },
    SetNavShadow { enabled: bool },
}

fn closest<'a>(
    path: &'a [ElementDescriptor],
    pred: impl Fn(&ElementDescriptor) -> bool,
) -> Option<&'a ElementDescriptor> {
    path.iter().find(|el| pred(el))
}

/// Map a click path to the events it triggers, in a fixed order.
pub fn dispatch_click(path: &[ElementDescriptor]) -> Vec<SiteEvent> {
    let mut events = Vec::new();

    if let Some(el) = closest(path, |el| el.has_class("filter-btn")) {
        if let Some(category) = el.data("filter") {
            events.push(SiteEvent::FilterSelected {
                category: category.to_string(),
            });
        }
    }
    if let Some(link) = closest(path, |el| el.has_class("card-link")).and_then(|el| el.data("link"))
    {
        events.push(SiteEvent::CopyLink {
            link: link.to_string(),
        });
    }
    if let Some(el) = closest(path, |el| el.has_class("code-ref")) {
        let text = el.data("copy").or(el.text.as_deref()).unwrap_or_default();
        if !text.is_empty() {
            events.push(SiteEvent::CopyCode {
                text: text.to_string(),
            });
        }
    }
    if closest(path, |el| el.has_id("exportBtn")).is_some() {
        events.push(SiteEvent::ToggleExportMenu);
    }
    if let Some(kind) = closest(path, |el| el.data("export").is_some())
        .and_then(|el| el.data("export"))
        .and_then(ExportKind::parse)
    {
        events.push(SiteEvent::Export { kind });
    }
    if let Some(id) =
        closest(path, |el| el.has_class("doc-nav-link")).and_then(|el| el.data("doc"))
    {
        events.push(SiteEvent::SelectDocument { id: id.to_string() });
    }
    if closest(path, |el| el.has_id("darkToggle")).is_some() {
        events.push(SiteEvent::ToggleDarkMode);
    }
    if closest(path, |el| el.has_id("backToTop")).is_some() {
        events.push(SiteEvent::BackToTop);
    }

    if closest(path, |el| el.has_class("nav-toggle")).is_some() {
        events.push(SiteEvent::ToggleNav);
    } else if closest(path, |el| el.has_class("nav-links")).is_none() {
        events.push(SiteEvent::ClickOutsideNav);
    }

    events
}
