//! The three request handlers.
//!
//! # Responsibilities
//! - Claim exactly one action tag each (plus that action's required params)
//! - Turn a claimed request into a JSON value through the Model
//!
//! # Design Decisions
//! - Claiming is a pure predicate; handling never forwards
//! - Per-article failures abort the whole blog batch (no partial pages)

use serde_json::Value;

use crate::error::SiteResult;
use crate::http::request::{Action, SiteRequest};
use crate::model::{BlogEntry, Model};

/// A link in the dispatch chain.
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns true if this handler takes responsibility for `request`.
    fn claims(&self, request: &SiteRequest) -> bool;

    /// Produce the response body for a claimed request.
    fn handle(&self, request: &SiteRequest, model: &Model) -> SiteResult<Value>;
}

/// `action=get-categories`: every category as `{name, color}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoriesHandler;

impl Handler for CategoriesHandler {
    fn name(&self) -> &'static str {
        "categories"
    }

    fn claims(&self, request: &SiteRequest) -> bool {
        request.action() == Some(Action::GetCategories)
    }

    fn handle(&self, _request: &SiteRequest, model: &Model) -> SiteResult<Value> {
        Ok(serde_json::to_value(model.get_all_categories()?)?)
    }
}

/// `action=get-page&page=<name>`: the raw document as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageHandler;

impl Handler for PageHandler {
    fn name(&self) -> &'static str {
        "page"
    }

    fn claims(&self, request: &SiteRequest) -> bool {
        request.action() == Some(Action::GetPage) && request.page.is_some()
    }

    fn handle(&self, request: &SiteRequest, model: &Model) -> SiteResult<Value> {
        let page = request.page.as_deref().unwrap_or_default();
        Ok(Value::String(model.get_doc(page)?))
    }
}

/// `action=get-blog-entries[&filter=a,b][&page-number=n]`: one enriched page of articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlogEntriesHandler;

impl Handler for BlogEntriesHandler {
    fn name(&self) -> &'static str {
        "blog-entries"
    }

    fn claims(&self, request: &SiteRequest) -> bool {
        request.action() == Some(Action::GetBlogEntries)
    }

    fn handle(&self, request: &SiteRequest, model: &Model) -> SiteResult<Value> {
        let page_number = parse_page_number(request.page_number.as_deref());
        let articles = match request.filter.as_deref().filter(|f| !f.is_empty()) {
            Some(filter) => model.filter_articles(Some(filter), page_number)?,
            None => model.get_all_articles(page_number)?,
        };

        let entries = articles
            .iter()
            .map(|article| {
                Ok(BlogEntry {
                    overview: model.get_article_overview(&article.name)?,
                    categories: model.get_article_categories(&article.name)?,
                })
            })
            .collect::<SiteResult<Vec<_>>>()?;
        Ok(serde_json::to_value(entries)?)
    }
}

/// Integers and finite decimals (truncated) are numeric; anything else means page 1.
///
/// Out-of-range numbers are returned as-is so the Model can reject them.
pub fn parse_page_number(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteError;
    use crate::model::tests::fixture;

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number(None), 1);
        assert_eq!(parse_page_number(Some("abc")), 1);
        assert_eq!(parse_page_number(Some("")), 1);
        assert_eq!(parse_page_number(Some("inf")), 1);
        assert_eq!(parse_page_number(Some("3")), 3);
        assert_eq!(parse_page_number(Some("2.9")), 2);
        assert_eq!(parse_page_number(Some("0")), 0);
        assert_eq!(parse_page_number(Some("-4")), -4);
    }

    #[test]
    fn test_claims_are_disjoint() {
        let handlers: [&dyn Handler; 3] = [&CategoriesHandler, &PageHandler, &BlogEntriesHandler];
        let requests = [
            SiteRequest::new("get-categories"),
            SiteRequest::new("get-page").with_page("about"),
            SiteRequest::new("get-blog-entries"),
        ];
        for request in &requests {
            let claimants = handlers.iter().filter(|h| h.claims(request)).count();
            assert_eq!(claimants, 1, "{request}");
        }
    }

    #[test]
    fn test_page_requires_page_param() {
        assert!(!PageHandler.claims(&SiteRequest::new("get-page")));
    }

    #[test]
    fn test_categories_shape() {
        let (_dir, model) = fixture();
        let value = CategoriesHandler
            .handle(&SiteRequest::new("get-categories"), &model)
            .unwrap();
        assert_eq!(value[0], serde_json::json!({"name": "life", "color": "#33cc66"}));
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_blog_entries_second_filtered_page() {
        let (_dir, model) = fixture();
        let request = SiteRequest::new("get-blog-entries")
            .with_filter("tech,news")
            .with_page_number("2");
        let value = BlogEntriesHandler.handle(&request, &model).unwrap();
        let entries: Vec<BlogEntry> = serde_json::from_value(value).unwrap();

        // 13 tech/news posts newest first; page two holds the 9th to the 13th
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].overview.name, "post-7");
        for entry in &entries {
            assert!(!entry.categories.is_empty());
            assert!(entry
                .categories
                .iter()
                .any(|c| c.name == "tech" || c.name == "news"));
            assert!(entry.overview.title.starts_with("Post "));
        }
    }

    #[test]
    fn test_blog_entries_missing_document_aborts_batch() {
        let (dir, model) = fixture();
        std::fs::remove_file(dir.path().join("post-18.html")).unwrap();
        let result = BlogEntriesHandler.handle(&SiteRequest::new("get-blog-entries"), &model);
        assert!(matches!(result, Err(SiteError::DocumentNotFound(_))));
    }

    #[test]
    fn test_blog_entries_out_of_range() {
        let (_dir, model) = fixture();
        let request = SiteRequest::new("get-blog-entries").with_page_number("10001");
        assert!(matches!(
            BlogEntriesHandler.handle(&request, &model),
            Err(SiteError::InvalidInput(_))
        ));
        let request = SiteRequest::new("get-blog-entries").with_page_number("10000");
        assert_eq!(
            BlogEntriesHandler.handle(&request, &model).unwrap(),
            serde_json::json!([])
        );
    }
}
