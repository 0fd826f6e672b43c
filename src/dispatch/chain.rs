//! Ordered handler chain.
//!
//! # Responsibilities
//! - Hold the handlers in their startup order
//! - Give each request to the first handler that claims it
//! - Report `Unhandled` when nobody does
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan; n is three
//! - Explicit `Unhandled` outcome rather than an error

use serde_json::Value;

use crate::dispatch::handlers::{BlogEntriesHandler, CategoriesHandler, Handler, PageHandler};
use crate::error::SiteResult;
use crate::http::request::SiteRequest;
use crate::model::Model;

/// Outcome of running a request through the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Handled(Value),
    Unhandled,
}

/// Chain of responsibility over boxed handlers.
#[derive(Debug)]
pub struct Chain {
    handlers: Vec<Box<dyn Handler>>,
}

impl Chain {
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Categories, page, then blog entries.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(CategoriesHandler),
            Box::new(PageHandler),
            Box::new(BlogEntriesHandler),
        ])
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// The handler that would take `request`, if any.
    pub fn claimant(&self, request: &SiteRequest) -> Option<&dyn Handler> {
        self.handlers
            .iter()
            .find(|h| h.claims(request))
            .map(|h| &**h)
    }

    pub fn dispatch(&self, request: &SiteRequest, model: &Model) -> SiteResult<Dispatch> {
        let Some(handler) = self.claimant(request) else {
            tracing::debug!(request = %request, "no handler claimed request");
            return Ok(Dispatch::Unhandled);
        };
        tracing::debug!(handler = handler.name(), request = %request, "handler claimed request");
        handler.handle(request, model).map(Dispatch::Handled)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::fixture;

    #[test]
    fn test_standard_order() {
        assert_eq!(
            Chain::standard().handler_names(),
            ["categories", "page", "blog-entries"]
        );
    }

    #[test]
    fn test_unknown_actions_are_unhandled() {
        let (_dir, model) = fixture();
        let chain = Chain::standard();
        for request in [
            SiteRequest::default(),
            SiteRequest::new("get-everything"),
            SiteRequest::new("GET-PAGE").with_page("about"),
            SiteRequest::new("get-page"),
        ] {
            assert!(chain.claimant(&request).is_none());
            assert_eq!(chain.dispatch(&request, &model).unwrap(), Dispatch::Unhandled);
        }
    }

    #[test]
    fn test_each_action_has_one_claimant() {
        let chain = Chain::standard();
        let cases = [
            (SiteRequest::new("get-categories"), "categories"),
            (SiteRequest::new("get-page").with_page("about"), "page"),
            (SiteRequest::new("get-blog-entries"), "blog-entries"),
        ];
        for (request, expected) in cases {
            assert_eq!(chain.claimant(&request).map(|h| h.name()), Some(expected));
        }
    }

    #[test]
    fn test_dispatch_page() {
        let (_dir, model) = fixture();
        let request = SiteRequest::new("get-page").with_page("about");
        assert_eq!(
            Chain::standard().dispatch(&request, &model).unwrap(),
            Dispatch::Handled(Value::String("<p>About</p>".into()))
        );
    }

    #[test]
    fn test_handler_errors_propagate() {
        let (_dir, model) = fixture();
        let request = SiteRequest::new("get-page").with_page("../about");
        assert!(Chain::standard().dispatch(&request, &model).is_err());
    }

    #[test]
    fn test_store_failure_is_no_content() {
        use crate::config::AppMode;
        use crate::error::SiteError;
        use crate::http::response::present;
        use crate::model::Model;
        use crate::store::{DocumentStore, RecordStore};

        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("site.db");
        let model = Model::new(
            DocumentStore::new(dir.path()),
            RecordStore::open(&db, 16).unwrap(),
        );
        rusqlite::Connection::open(&db)
            .unwrap()
            .execute_batch("DROP TABLE articles")
            .unwrap();

        let request = SiteRequest::new("get-blog-entries");
        let outcome = Chain::standard().dispatch(&request, &model);
        assert!(matches!(outcome, Err(SiteError::Store(_))));

        let envelope = present(outcome, &request, AppMode::Production);
        assert_eq!(envelope.to_json().unwrap(), r#"{"state":204}"#);
    }

    #[test]
    fn test_empty_chain() {
        let (_dir, model) = fixture();
        let chain = Chain::new(Vec::new());
        assert_eq!(
            chain
                .dispatch(&SiteRequest::new("get-categories"), &model)
                .unwrap(),
            Dispatch::Unhandled
        );
    }
}
