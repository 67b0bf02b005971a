//! Site configuration
//!
//! The site is driven entirely by a TOML file: metadata, declared
//! categories, feature entries, and the static sections. Entries may also
//! live in a separate JSON list (the same shape `features.json` exports), so
//! an exported collection can be fed straight back in.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{
    ArchLayer, Category, Document, Entry, EntryCollection, Optimization, PipelineStage,
    SiteContent, TechItem, derive_identifier, is_fragment_safe,
};

pub const DEFAULT_DEBOUNCE_MS: u64 = 180;
pub const DEFAULT_DARK_MODE_KEY: &str = "caes-docs-dark";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid site configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid entry list `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("duplicate entry identifier `{0}`")]
    DuplicateEntry(String),
    #[error("duplicate category `{0}`")]
    DuplicateCategory(String),
    #[error("duplicate document `{0}`")]
    DuplicateDocument(String),
    #[error("entry `{name}` has an empty identifier")]
    EmptyIdentifier { name: String },
    #[error("identifier `{0}` cannot be used as an anchor; use letters, digits, `-` or `_`")]
    InvalidIdentifier(String),
    #[error("default document `{0}` is not declared")]
    UnknownDefaultDocument(String),
}

/// `[site]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub title: String,
    pub tagline: String,
    /// Local-storage key holding the dark-mode flag
    pub dark_mode_key: String,
    /// Quiet period before a search keystroke is applied
    pub debounce_ms: u64,
    /// Document shown when the viewer has no (valid) fragment
    pub default_document: Option<String>,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "RAG Chatbot Documentation".to_string(),
            tagline: String::new(),
            dark_mode_key: DEFAULT_DARK_MODE_KEY.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_document: None,
        }
    }
}

impl SiteMeta {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// An entry as written by hand; `id` is derived when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub details: String,
}

impl EntryConfig {
    fn into_entry(self) -> Entry {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => derive_identifier(&self.category, &self.name),
        };
        Entry {
            id,
            category: self.category,
            name: self.name,
            description: self.description,
            implementation_ref: self.implementation,
            details: self.details,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub id: String,
    pub title: String,
    /// Inline markdown body
    #[serde(default)]
    pub body: Option<String>,
    /// Markdown file, relative to the configuration file
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Raw TOML layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub categories: Vec<Category>,
    pub entries: Vec<EntryConfig>,
    /// JSON entry list, relative to the configuration file
    pub entries_file: Option<PathBuf>,
    pub pipeline: Vec<PipelineStage>,
    pub optimizations: Vec<Optimization>,
    pub architecture: Vec<ArchLayer>,
    /// `"Label: value"` lines
    pub tech: Vec<String>,
    pub documents: Vec<DocumentConfig>,
}

/// A loaded, validated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub meta: SiteMeta,
    pub collection: EntryCollection,
    pub content: SiteContent,
}

impl Site {
    /// Load and validate a site configuration file.
    pub fn load(path: &Path) -> Result<Site, ConfigError> {
        let text = read(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Site::from_toml_str(&text, base_dir)
    }

    /// Parse a configuration; relative paths resolve against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> Result<Site, ConfigError> {
        let config: SiteConfig = toml::from_str(text)?;
        config.resolve(base_dir)
    }
}

impl SiteConfig {
    pub fn resolve(self, base_dir: &Path) -> Result<Site, ConfigError> {
        let SiteConfig {
            site,
            categories,
            mut entries,
            entries_file,
            pipeline,
            optimizations,
            architecture,
            tech,
            documents,
        } = self;

        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category.id.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.id.clone()));
            }
        }

        if let Some(file) = entries_file {
            entries.extend(read_entry_list(&base_dir.join(file))?);
        }

        let entries: Vec<Entry> = entries.into_iter().map(EntryConfig::into_entry).collect();
        let mut seen_ids = HashSet::new();
        for entry in &entries {
            if entry.id.trim_matches('-').is_empty() {
                return Err(ConfigError::EmptyIdentifier {
                    name: entry.name.clone(),
                });
            }
            if !is_fragment_safe(&entry.id) {
                return Err(ConfigError::InvalidIdentifier(entry.id.clone()));
            }
            if !seen_ids.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateEntry(entry.id.clone()));
            }
        }

        let collection = EntryCollection::new(categories, entries);
        for entry in collection.undeclared() {
            tracing::warn!(
                entry = %entry.id,
                category = %entry.category,
                "entry uses an undeclared category; it will only appear under `all`"
            );
        }

        let mut docs = Vec::with_capacity(documents.len());
        let mut seen_docs = HashSet::new();
        for doc in documents {
            if !is_fragment_safe(&doc.id) {
                return Err(ConfigError::InvalidIdentifier(doc.id));
            }
            if !seen_docs.insert(doc.id.clone()) {
                return Err(ConfigError::DuplicateDocument(doc.id));
            }
            let body = match (doc.body, doc.path) {
                (Some(body), _) => body,
                (None, Some(path)) => read(&base_dir.join(path))?,
                (None, None) => String::new(),
            };
            docs.push(Document {
                id: doc.id,
                title: doc.title,
                body,
            });
        }
        if let Some(default) = &site.default_document {
            if !docs.iter().any(|d| &d.id == default) {
                return Err(ConfigError::UnknownDefaultDocument(default.clone()));
            }
        }

        Ok(Site {
            meta: site,
            collection,
            content: SiteContent {
                pipeline,
                optimizations,
                architecture,
                tech: tech.iter().map(|line| TechItem::parse(line)).collect(),
                documents: docs,
            },
        })
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_entry_list(path: &Path) -> Result<Vec<EntryConfig>, ConfigError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
