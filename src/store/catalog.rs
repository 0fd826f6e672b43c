//! Catalog import: categories and articles described in a TOML file.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::SiteError;
use crate::store::records::RecordStore;

/// Reasons a catalog cannot be read or imported.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A name failed the whitelist or the store rejected a write; nothing was kept.
    #[error("catalog import failed: {0}")]
    Import(#[from] SiteError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub categories: Vec<CatalogCategory>,
    /// Oldest first; later entries become the newest articles.
    pub articles: Vec<CatalogArticle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogArticle {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories: usize,
    pub new_articles: usize,
    pub tags: usize,
}

impl Catalog {
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Write the catalog into `store` in a single transaction.
    pub fn import(&self, store: &RecordStore) -> Result<ImportSummary, CatalogError> {
        let summary = store.transaction(|store| {
            let mut summary = ImportSummary::default();
            for category in &self.categories {
                store.upsert_category(&category.name, &category.color)?;
                summary.categories += 1;
            }
            for article in &self.articles {
                if store.insert_article(&article.name)? {
                    summary.new_articles += 1;
                }
                for category in &article.categories {
                    store.tag_article(&article.name, category)?;
                    summary.tags += 1;
                }
            }
            Ok(summary)
        })?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r##"
        [[categories]]
        name = "tech"
        color = "#3366ff"

        [[categories]]
        name = "news"
        color = "#ff6633"

        [[articles]]
        name = "pe-format"
        categories = ["tech"]

        [[articles]]
        name = "llvm-passes"
        categories = ["tech", "news"]
    "##;

    #[test]
    fn test_import() {
        let store = RecordStore::open_in_memory().unwrap();
        let catalog = Catalog::parse(CATALOG).unwrap();
        let summary = catalog.import(&store).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                categories: 2,
                new_articles: 2,
                tags: 3
            }
        );

        let newest = store.list_articles(None, 0, 8).unwrap();
        assert_eq!(newest[0].name, "llvm-passes");
        assert_eq!(store.list_categories(Some("llvm-passes")).unwrap().len(), 2);
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let store = RecordStore::open_in_memory().unwrap();
        let catalog = Catalog::parse(CATALOG).unwrap();
        catalog.import(&store).unwrap();
        let again = catalog.import(&store).unwrap();
        assert_eq!(again.new_articles, 0);
        assert_eq!(store.list_articles(None, 0, 8).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_name_aborts_import() {
        let store = RecordStore::open_in_memory().unwrap();
        let catalog = Catalog::parse(
            r#"
            [[articles]]
            name = "ok"
            [[articles]]
            name = "bad;name"
            "#,
        )
        .unwrap();
        assert!(matches!(
            catalog.import(&store),
            Err(CatalogError::Import(SiteError::InvalidInput(_)))
        ));
        assert!(store.list_articles(None, 0, 8).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_parse_error() {
        let err = Catalog::parse("[[categories]]\nname = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().starts_with("invalid catalog:"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match Catalog::load(&path) {
            Err(CatalogError::Io { path: reported, source }) => {
                assert_eq!(reported, path.display().to_string());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an io error, got {other:?}"),
        }
    }
}
