//! Page controller behind a JSON interface.
//!
//! Each generated page carries a [`PageData`] snapshot as
//! `window.RAGDOCS_DATA`. The host script builds a [`PageController`] from
//! it (through the `wasm` bridge), forwards DOM events and host timestamps,
//! and carries out the returned [`Effect`]s. The page holds no state of its
//! own beyond what the controller tells it to show.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{Site, SiteMeta};
use crate::events::{Effect, ElementDescriptor, SiteEvent, dispatch_click};
use crate::model::{Category, Document, Entry, EntryCollection, SiteContent};
use crate::state::SiteState;
use crate::viewer::ViewerState;

/// Directory, next to the pages, holding the compiled controller.
pub const CONTROLLER_DIR: &str = "pkg";
/// Files of the `wasm-bindgen --target web` output the pages load.
pub const CONTROLLER_FILES: [&str; 2] = ["ragdocs_web.js", "ragdocs_web_bg.wasm"];

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid page data: {0}")]
    PageData(#[source] serde_json::Error),
    #[error("invalid page URL `{url}`: {source}")]
    Url { url: String, source: url::ParseError },
    #[error("invalid event: {0}")]
    Event(#[source] serde_json::Error),
}

/// What a page needs to run the controller. Documents are listed by id
/// only; their bodies are already in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub page: String,
    pub debounce_ms: u64,
    pub dark_mode_key: String,
    pub categories: Vec<Category>,
    pub entries: Vec<Entry>,
    pub documents: Vec<String>,
    pub default_document: Option<String>,
}

impl PageData {
    pub fn new(site: &Site, page: &str) -> Self {
        let viewer = ViewerState::new(
            &site.content.documents,
            site.meta.default_document.as_deref(),
        );
        PageData {
            page: page.to_string(),
            debounce_ms: site.meta.debounce_ms,
            dark_mode_key: site.meta.dark_mode_key.clone(),
            categories: site.collection.categories().to_vec(),
            entries: site.collection.entries().to_vec(),
            documents: site.content.documents.iter().map(|d| d.id.clone()).collect(),
            default_document: viewer.map(|v| v.default_panel().to_string()),
        }
    }

    /// Rebuild the parts of a [`Site`] the controller reads.
    pub fn into_site(self) -> Site {
        let documents = self
            .documents
            .into_iter()
            .map(|id| Document {
                id,
                title: String::new(),
                body: String::new(),
            })
            .collect();
        Site {
            meta: SiteMeta {
                dark_mode_key: self.dark_mode_key,
                debounce_ms: self.debounce_ms,
                default_document: self.default_document,
                ..SiteMeta::default()
            },
            collection: EntryCollection::new(self.categories, self.entries),
            content: SiteContent {
                documents,
                ..SiteContent::default()
            },
        }
    }
}

/// Convert a host timestamp (`performance.now()`, in milliseconds).
/// Negative or non-finite values count as the origin.
pub fn host_time(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
}

pub fn effects_json(effects: &[Effect]) -> serde_json::Result<String> {
    serde_json::to_string(effects)
}

#[derive(Debug)]
pub struct PageController {
    site: Site,
    state: SiteState,
    initial: Vec<Effect>,
}

impl PageController {
    pub fn new(site: Site, url: Url, stored_dark_mode: Option<&str>) -> Self {
        let (state, initial) = SiteState::load(&site, url, stored_dark_mode);
        PageController {
            site,
            state,
            initial,
        }
    }

    /// Build from the page's inlined data and its `location.href`.
    pub fn from_page_json(
        data: &str,
        url: &str,
        stored_dark_mode: Option<&str>,
    ) -> Result<Self, ControllerError> {
        let data: PageData = serde_json::from_str(data).map_err(ControllerError::PageData)?;
        let parsed = Url::parse(url).map_err(|source| ControllerError::Url {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::new(data.into_site(), parsed, stored_dark_mode))
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    /// Effects of the first render.
    pub fn initial_effects(&self) -> &[Effect] {
        &self.initial
    }

    pub fn handle(&mut self, event: SiteEvent, now: Duration) -> Vec<Effect> {
        self.state.handle(&self.site, event, now)
    }

    pub fn handle_json(&mut self, event: &str, now: Duration) -> Result<Vec<Effect>, ControllerError> {
        let event: SiteEvent = serde_json::from_str(event).map_err(ControllerError::Event)?;
        Ok(self.handle(event, now))
    }

    /// Dispatch a click path (target first) and apply every resulting event
    /// in order.
    pub fn click(&mut self, path: &[ElementDescriptor], now: Duration) -> Vec<Effect> {
        dispatch_click(path)
            .into_iter()
            .flat_map(|event| self.state.handle(&self.site, event, now))
            .collect()
    }

    pub fn click_json(&mut self, path: &str, now: Duration) -> Result<Vec<Effect>, ControllerError> {
        let path: Vec<ElementDescriptor> =
            serde_json::from_str(path).map_err(ControllerError::Event)?;
        Ok(self.click(&path, now))
    }

    pub fn tick(&mut self, now: Duration) -> Vec<Effect> {
        self.state.tick(&self.site, now)
    }

    /// When a pending search input is due. The host re-arms its timer with
    /// this after every tick, so input is never left pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.next_deadline()
    }
}
