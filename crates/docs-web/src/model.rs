//! Documentation data model
//!
//! These types describe the content rendered by the site: the filterable
//! feature entries and the static sections around them. They are
//! serializable so the same collection can be inlined into the static site,
//! exported as `features.json`, and handed to the WASM controller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A filterable documentation/feature record, rendered as one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable slug, unique within the collection; used as the card anchor
    pub id: String,
    /// Category id (see [`Category`])
    pub category: String,
    pub name: String,
    pub description: String,
    /// Code reference for the implementation (e.g. `src/rag/retrieve.js`)
    #[serde(rename = "implementation")]
    pub implementation_ref: String,
    pub details: String,
}

impl Entry {
    /// Lower-cased text searched by the free-text filter.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.category, self.description, self.implementation_ref, self.details
        )
        .to_lowercase()
    }
}

/// A declared category. The set of declared categories is the only set a
/// category filter may select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
}

/// Turn arbitrary text into an anchor-safe slug.
///
/// Lower-cases the input and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_gap = false;
    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Whether `id` can be used verbatim as an element id and URL fragment:
/// ASCII letters, digits, `-` and `_` only.
pub fn is_fragment_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Identifier derived from category and name when none is assigned.
pub fn derive_identifier(category: &str, name: &str) -> String {
    slugify(&format!("{category}-{name}"))
}

/// Immutable, ordered collection of entries plus the known categories.
///
/// Built once at load time; there is no way to add, remove or mutate an
/// entry afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryCollection {
    categories: Vec<Category>,
    entries: Vec<Entry>,
}

impl EntryCollection {
    /// Construct a collection. Callers are expected to have validated
    /// identifier uniqueness (see [`crate::config`]).
    pub(crate) fn new(categories: Vec<Category>, entries: Vec<Entry>) -> Self {
        Self {
            categories,
            entries,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_known_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find an entry by its identifier.
    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose category was never declared. They only show under `all`.
    pub fn undeclared(&self) -> Vec<&Entry> {
        let known: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        self.entries
            .iter()
            .filter(|e| !known.contains(e.category.as_str()))
            .collect()
    }
}

/// One stage of the documented retrieval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub number: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    /// Copyable code reference
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimization {
    pub name: String,
    pub impact: Impact,
    pub description: String,
    /// `(label, value)` pairs
    #[serde(default)]
    pub metrics: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchComponent {
    pub icon: String,
    pub name: String,
    pub description: String,
}

/// A horizontal layer of the architecture diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchLayer {
    pub title: String,
    /// Emphasize the first component of this layer
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub components: Vec<ArchComponent>,
}

/// A tech-stack tile such as `Backend: Node.js, Express`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechItem {
    pub label: String,
    pub value: String,
}

impl TechItem {
    /// Parse a `"Label: value"` line. Text without a colon becomes a label
    /// with an empty value.
    pub fn parse(line: &str) -> Self {
        match line.split_once(':') {
            Some((label, value)) => TechItem {
                label: label.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => TechItem {
                label: line.trim().to_string(),
                value: String::new(),
            },
        }
    }
}

/// A document panel in the viewer variant of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Markdown body
    pub body: String,
}

/// Everything rendered around the feature grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub pipeline: Vec<PipelineStage>,
    pub optimizations: Vec<Optimization>,
    pub architecture: Vec<ArchLayer>,
    pub tech: Vec<TechItem>,
    pub documents: Vec<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str) -> Entry {
        Entry {
            id: id.into(),
            category: category.into(),
            name: "Name".into(),
            description: String::new(),
            implementation_ref: String::new(),
            details: String::new(),
        }
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("Retrieval-Acronym  Expansion!"), "retrieval-acronym-expansion-");
        assert_eq!(slugify("LLM Re-ranking (GPT-4o)"), "llm-re-ranking-gpt-4o-");
        assert_eq!(slugify("abc123"), "abc123");
    }

    #[test]
    fn fragment_safe_identifiers() {
        assert!(is_fragment_safe("vector"));
        assert!(is_fragment_safe("LLM_rerank-2"));
        assert!(!is_fragment_safe(""));
        assert!(!is_fragment_safe("vector search"));
        assert!(!is_fragment_safe("re#rank"));
        assert!(!is_fragment_safe("café"));
    }

    #[test]
    fn derived_identifier_joins_category_and_name() {
        assert_eq!(
            derive_identifier("retrieval", "Vector Search"),
            "retrieval-vector-search"
        );
    }

    #[test]
    fn search_text_is_lowercase_concatenation() {
        let mut e = entry("a", "retrieval");
        e.name = "Vector".into();
        e.implementation_ref = "SRC/Retrieve.js".into();
        let text = e.search_text();
        assert!(text.contains("vector"));
        assert!(text.contains("retrieval"));
        assert!(text.contains("src/retrieve.js"));
    }

    #[test]
    fn undeclared_categories_are_reported() {
        let collection = EntryCollection::new(
            vec![Category {
                id: "x".into(),
                label: "X".into(),
            }],
            vec![entry("a", "x"), entry("b", "mystery")],
        );
        let undeclared: Vec<_> = collection.undeclared().iter().map(|e| e.id.clone()).collect();
        assert_eq!(undeclared, vec!["b".to_string()]);
        assert!(collection.is_known_category("x"));
        assert!(!collection.is_known_category("mystery"));
    }

    #[test]
    fn tech_item_parse() {
        assert_eq!(
            TechItem::parse("Vector DB: Pinecone Serverless"),
            TechItem {
                label: "Vector DB".into(),
                value: "Pinecone Serverless".into()
            }
        );
        assert_eq!(TechItem::parse("Standalone").value, "");
    }

    #[test]
    fn entry_serializes_implementation_field() {
        let json = serde_json::to_string(&entry("a", "x")).unwrap();
        assert!(json.contains("\"implementation\""));
        assert!(!json.contains("implementation_ref"));
    }
}
