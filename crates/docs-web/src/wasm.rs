//! WASM bridge for the page controller
//!
//! `SiteController` is what the page host script loads from
//! `pkg/ragdocs_web.js`. Events and click paths go in as JSON, effects come
//! back as a JSON array; timestamps are `performance.now()` milliseconds.

use wasm_bindgen::prelude::*;

use crate::controller::{PageController, effects_json, host_time};
use crate::filter::{CategoryFilter, FilterState};
use crate::highlight::highlight_html;

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen]
pub struct SiteController {
    inner: PageController,
}

#[wasm_bindgen]
impl SiteController {
    /// Build a controller from `window.RAGDOCS_DATA` (as JSON), the page
    /// URL and the stored dark-mode value.
    #[wasm_bindgen(constructor)]
    pub fn new(
        page_data: &str,
        url: &str,
        stored_dark_mode: Option<String>,
    ) -> Result<SiteController, JsError> {
        let inner = PageController::from_page_json(page_data, url, stored_dark_mode.as_deref())
            .map_err(js_err)?;
        Ok(SiteController { inner })
    }

    #[wasm_bindgen(js_name = "initialEffects")]
    pub fn initial_effects(&self) -> Result<String, JsError> {
        effects_json(self.inner.initial_effects()).map_err(js_err)
    }

    /// Apply one JSON-encoded event.
    pub fn handle(&mut self, event_json: &str, now_ms: f64) -> Result<String, JsError> {
        let effects = self
            .inner
            .handle_json(event_json, host_time(now_ms))
            .map_err(js_err)?;
        effects_json(&effects).map_err(js_err)
    }

    /// Dispatch a click path (target first) and apply every resulting event.
    pub fn click(&mut self, path_json: &str, now_ms: f64) -> Result<String, JsError> {
        let effects = self
            .inner
            .click_json(path_json, host_time(now_ms))
            .map_err(js_err)?;
        effects_json(&effects).map_err(js_err)
    }

    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsError> {
        effects_json(&self.inner.tick(host_time(now_ms))).map_err(js_err)
    }

    /// Milliseconds timestamp at which pending input is due, if any.
    #[wasm_bindgen(js_name = "nextDeadline")]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner
            .next_deadline()
            .map(|deadline| deadline.as_secs_f64() * 1000.0)
    }

    /// Identifiers matching `category` and `term`, as a JSON array.
    pub fn filter(&self, category: &str, term: &str) -> Result<String, JsError> {
        let collection = &self.inner.site().collection;
        let filter = FilterState::new(CategoryFilter::parse(category, collection), term);
        let ids: Vec<&str> = filter
            .apply(collection)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        serde_json::to_string(&ids).map_err(js_err)
    }

    /// Escaped text with every occurrence of `term` marked.
    pub fn highlight(&self, text: &str, term: &str) -> String {
        highlight_html(text, term)
    }
}
