//! Request decoding and identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Decode the raw query string into a [`SiteRequest`]
//!
//! # Design Decisions
//! - Decoding never fails: unknown keys are ignored, missing keys stay `None`
//! - A repeated key keeps its last value
//! - The action stays a raw string so unknown actions reach the chain and end `Unhandled`

use std::fmt;

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The closed set of actions the chain knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetPage,
    GetCategories,
    GetBlogEntries,
}

impl Action {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "get-page" => Some(Self::GetPage),
            "get-categories" => Some(Self::GetCategories),
            "get-blog-entries" => Some(Self::GetBlogEntries),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetPage => "get-page",
            Self::GetCategories => "get-categories",
            Self::GetBlogEntries => "get-blog-entries",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One GET request to the action endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteRequest {
    pub action: Option<String>,
    pub page: Option<String>,
    pub filter: Option<String>,
    pub page_number: Option<String>,
}

impl SiteRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_page_number(mut self, page_number: impl Into<String>) -> Self {
        self.page_number = Some(page_number.into());
        self
    }

    /// Decode `a=b&c=d` (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        let mut request = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "action" => &mut request.action,
                "page" => &mut request.page,
                "filter" => &mut request.filter,
                "page-number" => &mut request.page_number,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        request
    }

    /// The recognized action, if any.
    pub fn action(&self) -> Option<Action> {
        self.action.as_deref().and_then(Action::parse)
    }

    /// Label used for logs and metrics.
    pub fn action_label(&self) -> &str {
        match self.action() {
            Some(action) => action.as_str(),
            None => "unknown",
        }
    }

    /// The present parameters as `(key, value)` pairs, for re-encoding.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("action", &self.action),
            ("page", &self.page),
            ("filter", &self.filter),
            ("page-number", &self.page_number),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

impl fmt::Display for SiteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("action", &self.action),
            ("page", &self.page),
            ("filter", &self.filter),
            ("page-number", &self.page_number),
        ];
        let mut first = true;
        for (key, value) in fields {
            if let Some(value) = value {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{key}={value}")?;
                first = false;
            }
        }
        Ok(())
    }
}
