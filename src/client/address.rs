//! Address bar parameters.
//!
//! The client keeps only what must survive a reload in the address bar:
//! the page name and, on the blog, the active filter and page number.

use std::fmt;

use url::form_urlencoded;

use crate::dispatch::handlers::parse_page_number;

/// Page shown when the address names none.
pub const DEFAULT_PAGE: &str = "blog";

/// A decoded `?key=value&...` location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    params: Vec<(String, String)>,
}

impl Address {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { params }
    }

    /// `?page=<name>`.
    pub fn page(name: &str) -> Self {
        Self {
            params: vec![("page".to_string(), name.to_string())],
        }
    }

    /// `?page=blog`, plus the filter when present and the page number when not 1.
    pub fn blog(filter: Option<&str>, page_number: i64) -> Self {
        let mut address = Self::page(DEFAULT_PAGE);
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            address.params.push(("filter".to_string(), filter.to_string()));
        }
        if page_number != 1 {
            address
                .params
                .push(("page-number".to_string(), page_number.to_string()));
        }
        address
    }

    /// First value for `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The page this address shows.
    pub fn page_name(&self) -> &str {
        self.param("page").unwrap_or(DEFAULT_PAGE)
    }

    pub fn filter(&self) -> Option<&str> {
        self.param("filter").filter(|f| !f.is_empty())
    }

    /// Page number decoded the way the server decodes it, never below 1.
    pub fn page_number(&self) -> i64 {
        parse_page_number(self.param("page-number")).max(1)
    }

    /// Encoded form with the leading `?`.
    pub fn to_query(&self) -> String {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("?{encoded}")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_address_defaults_to_blog() {
        let address = Address::parse("");
        assert_eq!(address.page_name(), "blog");
        assert_eq!(address.filter(), None);
        assert_eq!(address.page_number(), 1);
    }

    #[test]
    fn test_parse_restores_blog_view() {
        let address = Address::parse("?page=blog&filter=tech%2Cnews&page-number=3");
        assert_eq!(address.page_name(), "blog");
        assert_eq!(address.filter(), Some("tech,news"));
        assert_eq!(address.page_number(), 3);
    }

    #[test]
    fn test_page_number_is_at_least_one() {
        for (raw, expected) in [("0", 1), ("-3", 1), ("2.5", 2), ("abc", 1), (" 4 ", 4)] {
            let address = Address::parse(&format!("page=blog&page-number={raw}"));
            assert_eq!(address.page_number(), expected, "page-number {raw:?}");
        }
    }

    #[test]
    fn test_first_value_wins() {
        let address = Address::parse("page=about&page=links");
        assert_eq!(address.page_name(), "about");
    }

    #[test]
    fn test_blog_omits_defaults() {
        assert_eq!(Address::blog(None, 1).to_query(), "?page=blog");
        assert_eq!(Address::blog(Some(""), 1).to_query(), "?page=blog");
        assert_eq!(
            Address::blog(Some("tech,news"), 2).to_query(),
            "?page=blog&filter=tech%2Cnews&page-number=2"
        );
    }

    #[test]
    fn test_round_trip_through_display() {
        let address = Address::blog(Some("life"), 4);
        assert_eq!(Address::parse(&address.to_string()), address);
        assert_eq!(Address::page("about").to_string(), "?page=about");
    }
}
