//! Document viewer: exactly one panel is active at a time.

use crate::model::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    ids: Vec<String>,
    default: String,
    active: String,
}

impl ViewerState {
    /// Build the viewer state, or `None` when there are no documents.
    ///
    /// The default panel is `default` when it names a document, otherwise
    /// the first document.
    pub fn new(documents: &[Document], default: Option<&str>) -> Option<Self> {
        let first = documents.first()?;
        let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();
        let default = default
            .filter(|d| ids.iter().any(|id| id == d))
            .unwrap_or(first.id.as_str())
            .to_string();
        Some(Self {
            active: default.clone(),
            default,
            ids,
        })
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn default_panel(&self) -> &str {
        &self.default
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active == id
    }

    /// Which panel a fragment selects: the named document, or the default
    /// one when the fragment is absent or unknown.
    pub fn resolve<'a>(&'a self, fragment: Option<&'a str>) -> &'a str {
        match fragment {
            Some(f) if self.ids.iter().any(|id| id == f) => f,
            _ => &self.default,
        }
    }

    /// Activate the panel selected by `fragment`. Returns the newly active
    /// id, or `None` when the active panel did not change.
    pub fn navigate(&mut self, fragment: Option<&str>) -> Option<&str> {
        let next = self.resolve(fragment).to_string();
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(&self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(ids: &[&str]) -> Vec<Document> {
        ids.iter()
            .map(|id| Document {
                id: id.to_string(),
                title: id.to_uppercase(),
                body: String::new(),
            })
            .collect()
    }

    #[test]
    fn no_documents_no_viewer() {
        assert!(ViewerState::new(&[], Some("welcome")).is_none());
    }

    #[test]
    fn default_panel_selection() {
        let documents = docs(&["setup", "welcome", "api"]);
        let v = ViewerState::new(&documents, Some("welcome")).unwrap();
        assert_eq!(v.active(), "welcome");

        let v = ViewerState::new(&documents, Some("missing")).unwrap();
        assert_eq!(v.default_panel(), "setup");
        let v = ViewerState::new(&documents, None).unwrap();
        assert_eq!(v.active(), "setup");
    }

    #[test]
    fn exactly_one_panel_active_after_navigation() {
        let documents = docs(&["welcome", "setup", "api"]);
        let mut v = ViewerState::new(&documents, Some("welcome")).unwrap();

        assert_eq!(v.navigate(Some("api")), Some("api"));
        let active: Vec<_> = v.ids().iter().filter(|id| v.is_active(id)).collect();
        assert_eq!(active, vec!["api"]);

        assert_eq!(v.navigate(Some("api")), None);
        assert_eq!(v.navigate(None), Some("welcome"));
        assert_eq!(v.navigate(Some("not-a-doc")), None);
        assert_eq!(v.active(), "welcome");
    }
}
