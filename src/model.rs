//! Data access facade.
//!
//! Composes the [`DocumentStore`] and the [`RecordStore`] into the page-level
//! and article-level operations the dispatch handlers need. Both stores are
//! constructed explicitly at startup and owned here; nothing is global.

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};
use crate::store::documents::{extract_by_id, DocumentStore};
use crate::store::records::RecordStore;

/// Articles per blog page.
pub const ARTICLES_PER_PAGE: u64 = 8;

/// Highest page number a caller may ask for.
pub const MAX_PAGE_NUMBER: i64 = 10_000;

/// Longest page name accepted by [`Model::get_doc`], before the `.html` suffix.
pub const MAX_DOC_NAME_LEN: usize = 100;

const TITLE_ID: &str = "title";
const INTRO_ID: &str = "intro";

/// A category as stored: unique name plus display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
}

/// Minimal article identity, before overview enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub name: String,
}

/// Name, title and intro extracted from an article document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleOverview {
    pub name: String,
    pub title: String,
    pub intro: String,
}

/// One row of the blog listing as sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntry {
    #[serde(flatten)]
    pub overview: ArticleOverview,
    pub categories: Vec<Category>,
}

/// Facade over documents and records.
#[derive(Debug)]
pub struct Model {
    documents: DocumentStore,
    records: RecordStore,
}

impl Model {
    pub fn new(documents: DocumentStore, records: RecordStore) -> Self {
        Self { documents, records }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Raw HTML of page `name` (`<name>.html` under the document root).
    pub fn get_doc(&self, name: &str) -> SiteResult<String> {
        if name.len() > MAX_DOC_NAME_LEN {
            return Err(SiteError::invalid(format!(
                "document name longer than {MAX_DOC_NAME_LEN} characters"
            )));
        }
        self.documents.fetch_raw(&format!("{name}.html"))
    }

    /// Title and intro of article `name`; both elements are required.
    pub fn get_article_overview(&self, name: &str) -> SiteResult<ArticleOverview> {
        let doc = self.documents.fetch_parsed(&format!("{name}.html"))?;
        let title = extract_by_id(&doc, name, TITLE_ID)?;
        let intro = extract_by_id(&doc, name, INTRO_ID)?;
        Ok(ArticleOverview {
            name: name.to_string(),
            title,
            intro,
        })
    }

    pub fn get_all_categories(&self) -> SiteResult<Vec<Category>> {
        self.records.list_categories(None)
    }

    pub fn get_article_categories(&self, name: &str) -> SiteResult<Vec<Category>> {
        self.records.list_categories(Some(name))
    }

    pub fn get_all_articles(&self, page_number: i64) -> SiteResult<Vec<ArticleRef>> {
        self.filter_articles(None, page_number)
    }

    /// One page of articles in any of the comma-joined `filter` categories.
    pub fn filter_articles(
        &self,
        filter: Option<&str>,
        page_number: i64,
    ) -> SiteResult<Vec<ArticleRef>> {
        let page_number = check_page_number(page_number)?;
        let filter = filter.and_then(normalize_filter);
        let offset = (page_number - 1) * ARTICLES_PER_PAGE;
        self.records
            .list_articles(filter.as_deref(), offset, ARTICLES_PER_PAGE)
    }
}

fn check_page_number(page_number: i64) -> SiteResult<u64> {
    if !(1..=MAX_PAGE_NUMBER).contains(&page_number) {
        return Err(SiteError::invalid(format!(
            "page number {page_number} outside 1..={MAX_PAGE_NUMBER}"
        )));
    }
    Ok(page_number as u64)
}

/// Trim each name, drop empties; `None` when nothing is left.
pub fn normalize_filter(filter: &str) -> Option<String> {
    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(","))
    }
}
