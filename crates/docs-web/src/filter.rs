//! Category + free-text filtering over the entry collection.

use std::fmt;

use crate::model::{Entry, EntryCollection};

/// The sentinel filter value that selects every category.
pub const ALL: &str = "all";

/// Category selection. Only declared categories can be selected; anything
/// else collapses to [`CategoryFilter::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Resolve a raw filter value against the known categories.
    pub fn parse(raw: &str, collection: &EntryCollection) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL || !collection.is_known_category(raw) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    /// Value used for the `data-filter` attribute and the URL.
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(id) => id,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    fn admits(&self, entry: &Entry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => &entry.category == id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair driving what is currently visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub term: String,
}

impl FilterState {
    pub fn new(category: CategoryFilter, term: impl Into<String>) -> Self {
        Self {
            category,
            term: term.into().trim().to_string(),
        }
    }

    pub fn apply<'a>(&self, collection: &'a EntryCollection) -> Vec<&'a Entry> {
        apply_filter(collection, &self.category, Some(&self.term))
    }
}

/// Compute the visible subset, in collection order.
///
/// An entry is included iff its category is admitted by `category` and the
/// trimmed, lower-cased `term` is a substring of its searchable text. A
/// `None` term behaves exactly like an empty one. A filter naming an
/// undeclared category behaves like `all`.
pub fn apply_filter<'a>(
    collection: &'a EntryCollection,
    category: &CategoryFilter,
    term: Option<&str>,
) -> Vec<&'a Entry> {
    let admit_all = match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(id) => !collection.is_known_category(id),
    };
    let needle = term.map(|t| t.trim().to_lowercase()).unwrap_or_default();

    let visible: Vec<&Entry> = collection
        .entries()
        .iter()
        .filter(|entry| admit_all || category.admits(entry))
        .filter(|entry| needle.is_empty() || entry.search_text().contains(&needle))
        .collect();

    tracing::debug!(
        category = if admit_all { ALL } else { category.as_str() },
        term = %needle,
        visible = visible.len(),
        total = collection.len(),
        "filter pass"
    );
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn entry(id: &str, category: &str, name: &str, description: &str) -> Entry {
        Entry {
            id: id.into(),
            category: category.into(),
            name: name.into(),
            description: description.into(),
            implementation_ref: String::new(),
            details: String::new(),
        }
    }

    fn category(id: &str) -> Category {
        Category {
            id: id.into(),
            label: id.to_uppercase(),
        }
    }

    fn example() -> EntryCollection {
        EntryCollection::new(
            vec![category("x"), category("y")],
            vec![
                entry("a", "x", "Foo", "bar"),
                entry("b", "y", "Baz", "qux"),
            ],
        )
    }

    fn ids(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn end_to_end_example() {
        let c = example();
        let x = CategoryFilter::parse("x", &c);
        let y = CategoryFilter::parse("y", &c);
        assert_eq!(ids(&apply_filter(&c, &x, Some(""))), vec!["a"]);
        assert_eq!(ids(&apply_filter(&c, &CategoryFilter::All, Some("qux"))), vec!["b"]);
        assert!(apply_filter(&c, &y, Some("foo")).is_empty());
    }

    #[test]
    fn term_is_trimmed_and_case_insensitive() {
        let c = example();
        assert_eq!(ids(&apply_filter(&c, &CategoryFilter::All, Some("  FOO "))), vec!["a"]);
    }

    #[test]
    fn empty_and_missing_terms_agree() {
        let c = example();
        for filter in [CategoryFilter::All, CategoryFilter::parse("y", &c)] {
            assert_eq!(
                apply_filter(&c, &filter, Some("")),
                apply_filter(&c, &filter, None)
            );
        }
    }

    #[test]
    fn unknown_category_means_all() {
        let c = example();
        assert_eq!(CategoryFilter::parse("nope", &c), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("", &c), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("all", &c), CategoryFilter::All);
        // Constructed directly, bypassing `parse`
        let stray = CategoryFilter::Only("nope".into());
        assert_eq!(apply_filter(&c, &stray, None).len(), 2);
    }

    #[test]
    fn category_is_part_of_searchable_text() {
        let c = example();
        assert_eq!(ids(&apply_filter(&c, &CategoryFilter::All, Some("y"))), vec!["b"]);
    }

    #[test]
    fn order_follows_collection() {
        let c = EntryCollection::new(
            vec![category("x")],
            vec![
                entry("z", "x", "Zeta", "match"),
                entry("a", "x", "Alpha", "match"),
            ],
        );
        assert_eq!(ids(&apply_filter(&c, &CategoryFilter::All, Some("match"))), vec!["z", "a"]);
    }

    #[test]
    fn filter_state_trims_its_term() {
        let state = FilterState::new(CategoryFilter::All, "  qux ");
        assert_eq!(state.term, "qux");
        assert_eq!(ids(&state.apply(&example())), vec!["b"]);
    }
}
