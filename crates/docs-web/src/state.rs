//! Application state for the interactive page.
//!
//! [`SiteState`] is the single owner of everything that changes while a
//! page is open: filter state, the pending search input, the active
//! document panel, the dark-mode flag and a few cosmetic toggles. It is
//! initialized from the URL and updated from [`SiteEvent`]s; every update
//! returns the [`Effect`]s the host has to carry out.

use std::time::Duration;

use url::Url;

use crate::config::Site;
use crate::debounce::Debouncer;
use crate::events::{Effect, SiteEvent};
use crate::export::{EXPORT_FILENAME, EXPORT_MIME, ExportKind, features_json};
use crate::filter::{CategoryFilter, FilterState};
use crate::model::Entry;
use crate::render::render_cards;
use crate::url_state::{fragment, read_filter, relevant_fragment, write_filter};
use crate::viewer::ViewerState;

/// Scroll offset past which the back-to-top button shows.
pub const BACK_TO_TOP_THRESHOLD: f64 = 600.0;
/// Scroll offset past which the navbar gets a shadow.
pub const NAV_SHADOW_THRESHOLD: f64 = 100.0;

/// Decode the persisted dark-mode flag (`"1"` means on).
pub fn dark_mode_from_stored(value: Option<&str>) -> bool {
    value == Some("1")
}

pub fn dark_mode_to_stored(enabled: bool) -> &'static str {
    if enabled { "1" } else { "0" }
}

#[derive(Debug, Clone)]
pub struct SiteState {
    url: Url,
    filter: FilterState,
    search: Debouncer<String>,
    viewer: Option<ViewerState>,
    dark_mode: bool,
    nav_open: bool,
    export_open: bool,
    back_to_top_visible: bool,
    nav_shadow: bool,
}

impl SiteState {
    /// Initialize from the page URL and the persisted dark-mode value,
    /// returning the effects of the first render.
    pub fn load(site: &Site, url: Url, stored_dark_mode: Option<&str>) -> (Self, Vec<Effect>) {
        let filter = read_filter(&url, &site.collection);
        let viewer = ViewerState::new(
            &site.content.documents,
            site.meta.default_document.as_deref(),
        );
        let mut state = SiteState {
            filter,
            search: Debouncer::new(site.meta.debounce_delay()),
            viewer,
            dark_mode: dark_mode_from_stored(stored_dark_mode),
            nav_open: false,
            export_open: false,
            back_to_top_visible: false,
            nav_shadow: false,
            url,
        };

        let mut effects = vec![
            Effect::SetDarkMode {
                enabled: state.dark_mode,
            },
            Effect::SetActiveFilter {
                category: state.filter.category.as_str().to_string(),
            },
        ];
        if !state.filter.term.is_empty() {
            effects.push(Effect::SetSearchValue {
                value: state.filter.term.clone(),
            });
        }

        let visible = state.filter.apply(&site.collection);
        effects.push(render_effect(&visible, &state.filter, &state.url));

        let target = fragment(&state.url).map(str::to_string);
        if let Some(target) = &target {
            if visible.iter().any(|e| &e.id == target) {
                effects.push(Effect::ScrollIntoView { id: target.clone() });
            }
        }
        if let Some(viewer) = &mut state.viewer {
            let id = viewer.resolve(target.as_deref()).to_string();
            viewer.navigate(Some(id.as_str()));
            effects.push(Effect::ActivatePanel { id });
        }

        tracing::debug!(url = %state.url, effects = effects.len(), "page state loaded");
        (state, effects)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn viewer(&self) -> Option<&ViewerState> {
        self.viewer.as_ref()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// When the pending search input becomes due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.search.deadline()
    }

    pub fn handle(&mut self, site: &Site, event: SiteEvent, now: Duration) -> Vec<Effect> {
        match event {
            SiteEvent::FilterSelected { category } => {
                // A click applies whatever is in the search box right away.
                if let Some(term) = self.search.flush() {
                    self.filter.term = term.trim().to_string();
                }
                self.filter.category = CategoryFilter::parse(&category, &site.collection);
                let mut effects = vec![Effect::SetActiveFilter {
                    category: self.filter.category.as_str().to_string(),
                }];
                effects.extend(self.refresh(site));
                effects
            }
            SiteEvent::SearchInput { value } => {
                self.search.push(value, now);
                vec![Effect::ScheduleTick {
                    delay_ms: self.search.delay().as_millis() as u64,
                }]
            }
            SiteEvent::CopyLink { link } => vec![Effect::CopyToClipboard { text: link }],
            SiteEvent::CopyCode { text } => vec![Effect::CopyToClipboard { text }],
            SiteEvent::ToggleExportMenu => {
                self.export_open = !self.export_open;
                vec![Effect::SetExportMenuOpen {
                    open: self.export_open,
                }]
            }
            SiteEvent::Export { kind } => {
                let mut effects = match kind {
                    ExportKind::Json => match features_json(&site.collection) {
                        Ok(contents) => vec![Effect::Download {
                            filename: EXPORT_FILENAME.to_string(),
                            mime: EXPORT_MIME.to_string(),
                            contents,
                        }],
                        Err(err) => {
                            tracing::warn!("failed to serialize export: {err}");
                            Vec::new()
                        }
                    },
                    ExportKind::Print => vec![Effect::Print],
                };
                self.export_open = false;
                effects.push(Effect::SetExportMenuOpen { open: false });
                effects
            }
            SiteEvent::ToggleNav => {
                self.nav_open = !self.nav_open;
                vec![Effect::SetNavOpen {
                    open: self.nav_open,
                }]
            }
            SiteEvent::ClickOutsideNav => {
                if self.nav_open {
                    self.nav_open = false;
                    vec![Effect::SetNavOpen { open: false }]
                } else {
                    Vec::new()
                }
            }
            SiteEvent::SelectDocument { id } => self.navigate_viewer(Some(id.as_str())),
            SiteEvent::HashChanged { fragment } => {
                self.url.set_fragment(fragment.as_deref().filter(|f| !f.is_empty()));
                self.navigate_viewer(fragment.as_deref())
            }
            SiteEvent::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                vec![
                    Effect::PersistPreference {
                        key: site.meta.dark_mode_key.clone(),
                        value: dark_mode_to_stored(self.dark_mode).to_string(),
                    },
                    Effect::SetDarkMode {
                        enabled: self.dark_mode,
                    },
                ]
            }
            SiteEvent::BackToTop => vec![Effect::ScrollToTop],
            SiteEvent::Scrolled { y } => {
                let mut effects = Vec::new();
                let visible = y > BACK_TO_TOP_THRESHOLD;
                if visible != self.back_to_top_visible {
                    self.back_to_top_visible = visible;
                    effects.push(Effect::SetBackToTopVisible { visible });
                }
                let shadow = y > NAV_SHADOW_THRESHOLD;
                if shadow != self.nav_shadow {
                    self.nav_shadow = shadow;
                    effects.push(Effect::SetNavShadow { enabled: shadow });
                }
                effects
            }
        }
    }

    /// Deliver the pending search input once its quiet period has elapsed.
    pub fn tick(&mut self, site: &Site, now: Duration) -> Vec<Effect> {
        match self.search.poll(now) {
            Some(term) => {
                self.filter.term = term.trim().to_string();
                self.refresh(site)
            }
            None => Vec::new(),
        }
    }

    /// Full re-render plus URL write-back for the current filter state.
    fn refresh(&mut self, site: &Site) -> Vec<Effect> {
        let visible = self.filter.apply(&site.collection);
        let anchor = relevant_fragment(fragment(&self.url), &visible);
        self.url = write_filter(&self.url, &self.filter, anchor.as_deref());
        vec![
            render_effect(&visible, &self.filter, &self.url),
            Effect::ReplaceUrl {
                url: self.url.to_string(),
            },
        ]
    }

    fn navigate_viewer(&mut self, fragment: Option<&str>) -> Vec<Effect> {
        let Some(viewer) = &mut self.viewer else {
            return Vec::new();
        };
        match viewer.navigate(fragment) {
            Some(id) => vec![Effect::ActivatePanel { id: id.to_string() }],
            None => Vec::new(),
        }
    }
}

/// Card share links are absolute, based on the page URL.
fn render_effect(visible: &[&Entry], filter: &FilterState, url: &Url) -> Effect {
    Effect::Render {
        ids: visible.iter().map(|e| e.id.clone()).collect(),
        term: filter.term.clone(),
        html: render_cards(visible, filter, Some(url)),
    }
}
