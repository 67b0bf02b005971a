//! Downloadable export of the entry collection.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::EntryCollection;

pub const EXPORT_FILENAME: &str = "features.json";
pub const EXPORT_MIME: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Serialize every entry to `features.json`
    Json,
    /// Open the browser's print dialog
    Print,
}

impl ExportKind {
    /// Parse the value of a `data-export` attribute.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(ExportKind::Json),
            "print" => Some(ExportKind::Print),
            _ => None,
        }
    }
}

/// The full collection, in order, as a pretty-printed JSON array.
///
/// The shape matches what `entries_file` accepts, so an export can be loaded
/// back as configuration.
pub fn features_json(collection: &EntryCollection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(collection.entries())
}

pub fn write_features_json(collection: &EntryCollection, path: &Path) -> std::io::Result<()> {
    let json = features_json(collection).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Site;

    #[test]
    fn exports_every_entry_in_order() {
        let site = Site::from_toml_str(
            r#"
[[entries]]
category = "retrieval"
name = "Vector Search"
implementation = "src/rag/pinecone.js"

[[entries]]
category = "conversation"
name = "Memory"
"#,
            Path::new("."),
        )
        .unwrap();

        let json = features_json(&site.collection).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "retrieval-vector-search");
        assert_eq!(items[0]["implementation"], "src/rag/pinecone.js");
        assert_eq!(items[1]["name"], "Memory");
    }

    #[test]
    fn export_reloads_as_entries_file() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::from_toml_str(
            r#"
[[entries]]
id = "keep-me"
category = "x"
name = "Kept"
details = "3072 dims"
"#,
            Path::new("."),
        )
        .unwrap();
        write_features_json(&site.collection, &dir.path().join(EXPORT_FILENAME)).unwrap();
        std::fs::write(dir.path().join("site.toml"), "entries_file = \"features.json\"\n").unwrap();

        let reloaded = Site::load(&dir.path().join("site.toml")).unwrap();
        assert_eq!(reloaded.collection.entries(), site.collection.entries());
    }

    #[test]
    fn export_kind_parse() {
        assert_eq!(ExportKind::parse("json"), Some(ExportKind::Json));
        assert_eq!(ExportKind::parse("print"), Some(ExportKind::Print));
        assert_eq!(ExportKind::parse("csv"), None);
    }
}
