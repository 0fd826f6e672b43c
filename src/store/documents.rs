//! Static HTML documents read from disk.
//!
//! # Responsibilities
//! - Read a named document from the document root
//! - Parse a document permissively and pull text out of `id`-marked elements
//!
//! # Design Decisions
//! - Names pass the file-name whitelist before touching the filesystem
//! - Parsing never fails on malformed or HTML5-only markup (html5ever recovers)
//! - Nothing is cached; every call re-reads the file

use std::path::{Path, PathBuf};

use scraper::{Html, Selector};

use crate::error::{SiteError, SiteResult};
use crate::store::sanitize::{sanitize, Charset};

/// Document store rooted at a fixed directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read `name` verbatim.
    pub fn fetch_raw(&self, name: &str) -> SiteResult<String> {
        let path = self.path_of(name)?;
        std::fs::read_to_string(&path).map_err(|err| {
            tracing::debug!(path = %path.display(), error = %err, "document read failed");
            SiteError::DocumentNotFound(name.to_string())
        })
    }

    /// Read and parse `name`. Parse errors are recorded by the parser, never raised.
    pub fn fetch_parsed(&self, name: &str) -> SiteResult<Html> {
        let raw = self.fetch_raw(name)?;
        let doc = Html::parse_document(&raw);
        if !doc.errors.is_empty() {
            tracing::trace!(document = name, errors = doc.errors.len(), "recovered from markup errors");
        }
        Ok(doc)
    }

    fn path_of(&self, name: &str) -> SiteResult<PathBuf> {
        let name = sanitize(name, Charset::FileName)?;
        Ok(self.root.join(name))
    }
}

/// Text content of the first element carrying `id`.
///
/// `document` only labels the error.
pub fn extract_by_id(doc: &Html, document: &str, element_id: &str) -> SiteResult<String> {
    let missing = || SiteError::DocumentStructureInvalid {
        document: document.to_string(),
        element: element_id.to_string(),
    };
    let selector = Selector::parse(&format!("[id=\"{element_id}\"]")).map_err(|_| missing())?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .ok_or_else(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let store = DocumentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_fetch_raw() {
        let (_dir, store) = store_with(&[("about.html", "<p>About me</p>")]);
        assert_eq!(store.fetch_raw("about.html").unwrap(), "<p>About me</p>");
        assert!(matches!(
            store.fetch_raw("missing.html"),
            Err(SiteError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_fetch_rejects_traversal() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(
            store.fetch_raw("../secret.html"),
            Err(SiteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_extract_from_malformed_html5() {
        let html = r#"<article><header><h2 id="title">Reading <em>PE</em> files</h2>
            <section id="intro">Headers, sections<p>and imports.</section><nav><div></article>"#;
        let (_dir, store) = store_with(&[("pe-format.html", html)]);

        let doc = store.fetch_parsed("pe-format.html").unwrap();
        assert_eq!(extract_by_id(&doc, "pe-format", "title").unwrap(), "Reading PE files");
        assert!(extract_by_id(&doc, "pe-format", "intro")
            .unwrap()
            .starts_with("Headers, sections"));
    }

    #[test]
    fn test_extract_missing_element() {
        let (_dir, store) = store_with(&[("bare.html", "<h1 id=\"title\">Only a title</h1>")]);
        let doc = store.fetch_parsed("bare.html").unwrap();
        let err = extract_by_id(&doc, "bare", "intro").unwrap_err();
        assert!(matches!(
            err,
            SiteError::DocumentStructureInvalid { ref element, .. } if element == "intro"
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let (_dir, store) = store_with(&[(
            "dup.html",
            "<p id=\"title\">first</p><p id=\"title\">second</p>",
        )]);
        let doc = store.fetch_parsed("dup.html").unwrap();
        assert_eq!(extract_by_id(&doc, "dup", "title").unwrap(), "first");
    }
}
