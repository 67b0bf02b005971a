//! Two-way sync between the filter state and the address bar.
//!
//! Reading: `category` and `q` come from the query string; when `category`
//! is absent or empty the fragment is tried as a category id. Writing:
//! `category` and `q` are dropped entirely when they hold their defaults,
//! every other query parameter is left in place, and the fragment points at
//! the most relevant visible entry.

use url::Url;
use url::form_urlencoded;

use crate::filter::{CategoryFilter, FilterState};
use crate::model::{Entry, EntryCollection};

pub const CATEGORY_PARAM: &str = "category";
pub const QUERY_PARAM: &str = "q";

/// Fragment without the leading `#`, if non-empty.
pub fn fragment(url: &Url) -> Option<&str> {
    url.fragment().filter(|f| !f.is_empty())
}

/// Derive the filter state a URL describes.
pub fn read_filter(url: &Url, collection: &EntryCollection) -> FilterState {
    let mut category = None;
    let mut term = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            CATEGORY_PARAM => category = Some(value.trim().to_string()),
            QUERY_PARAM => term = Some(value.into_owned()),
            _ => {}
        }
    }

    let raw = category
        .filter(|c| !c.is_empty())
        .or_else(|| fragment(url).map(str::to_string))
        .unwrap_or_default();

    FilterState::new(
        CategoryFilter::parse(&raw, collection),
        term.unwrap_or_default(),
    )
}

/// Rewrite `url` so that it reproduces `filter`, with `fragment` as anchor.
pub fn write_filter(url: &Url, filter: &FilterState, fragment: Option<&str>) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CATEGORY_PARAM && key != QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut next = url.clone();
    next.set_query(None);
    let needs_query = !retained.is_empty() || !filter.category.is_all() || !filter.term.is_empty();
    if needs_query {
        let mut pairs = next.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if !filter.category.is_all() {
            pairs.append_pair(CATEGORY_PARAM, filter.category.as_str());
        }
        if !filter.term.is_empty() {
            pairs.append_pair(QUERY_PARAM, &filter.term);
        }
    }
    next.set_fragment(fragment.filter(|f| !f.is_empty()));
    next
}

/// Pick the fragment to publish after a filter pass: keep the current one
/// while it still names a visible entry, otherwise fall back to the first
/// visible entry, otherwise none.
pub fn relevant_fragment(current: Option<&str>, visible: &[&Entry]) -> Option<String> {
    if let Some(current) = current {
        if visible.iter().any(|e| e.id == current) {
            return Some(current.to_string());
        }
    }
    visible.first().map(|e| e.id.clone())
}

/// Shareable link for one entry under the given filter state.
///
/// With a base URL the link is absolute; without one it is a relative
/// `?query#id` reference that resolves against whatever page hosts it.
pub fn share_link(base: Option<&Url>, filter: &FilterState, entry_id: &str) -> String {
    match base {
        Some(base) => write_filter(base, filter, Some(entry_id)).to_string(),
        None => {
            let mut query = form_urlencoded::Serializer::new(String::new());
            if !filter.category.is_all() {
                query.append_pair(CATEGORY_PARAM, filter.category.as_str());
            }
            if !filter.term.is_empty() {
                query.append_pair(QUERY_PARAM, &filter.term);
            }
            let query = query.finish();
            if query.is_empty() {
                format!("#{entry_id}")
            } else {
                format!("?{query}#{entry_id}")
            }
        }
    }
}
