//! Markup for the content regions.
//!
//! Every renderer returns the HTML together with the click bindings of the
//! elements it created, in document order.

use std::collections::BTreeSet;

use crate::model::{BlogEntry, Category};

/// Shown in the main region whenever a request fails.
pub const PLACEHOLDER: &str = r#"<p id="error-message">There is nothing in here.</p>"#;

/// What clicking a rendered element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// An entry title: open the article page.
    OpenArticle(String),
    /// A category list item: toggle it in the active filter.
    ToggleCategory(String),
}

/// HTML plus the bindings of the elements it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub bindings: Vec<Binding>,
}

impl Rendered {
    /// Markup with nothing clickable.
    pub fn plain(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            bindings: Vec::new(),
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Table rows for the blog entries region.
pub fn render_entries(entries: &[BlogEntry]) -> Rendered {
    let mut html = String::new();
    let mut bindings = Vec::with_capacity(entries.len());
    for entry in entries {
        let overview = &entry.overview;
        html.push_str(&format!(
            r#"<tr><td id="{}"><h3 class="blog-entry-title">{}</h3><details><p>{}</p><ul class="list-inline">"#,
            escape(&overview.name),
            escape(&overview.title),
            escape(&overview.intro),
        ));
        for category in &entry.categories {
            let name = escape(&category.name);
            html.push_str(&format!(
                r#"<li class="category-in-list category-{name}">{name}</li>"#
            ));
        }
        html.push_str("</ul></details></td></tr>");
        bindings.push(Binding::OpenArticle(overview.name.clone()));
    }
    Rendered { html, bindings }
}

/// List items for the category sidebar; members of `active` carry the `active` class.
pub fn render_categories(categories: &[Category], active: &BTreeSet<String>) -> Rendered {
    let mut html = String::new();
    let mut bindings = Vec::with_capacity(categories.len());
    for category in categories {
        let name = escape(&category.name);
        let state = if active.contains(&category.name) {
            " active"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<li id="{name}" class="list-group-item clickable category category-{name}{state}">{name}</li>"#
        ));
        bindings.push(Binding::ToggleCategory(category.name.clone()));
    }
    Rendered { html, bindings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArticleOverview;

    fn category(name: &str) -> Category {
        Category {
            name: name.to_string(),
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_render_entries() {
        let entries = vec![BlogEntry {
            overview: ArticleOverview {
                name: "pe-format".to_string(),
                title: "PE <format>".to_string(),
                intro: "Headers".to_string(),
            },
            categories: vec![category("tech"), category("news")],
        }];

        let rendered = render_entries(&entries);
        assert_eq!(
            rendered.html,
            concat!(
                r#"<tr><td id="pe-format"><h3 class="blog-entry-title">PE &lt;format&gt;</h3>"#,
                r#"<details><p>Headers</p><ul class="list-inline">"#,
                r#"<li class="category-in-list category-tech">tech</li>"#,
                r#"<li class="category-in-list category-news">news</li>"#,
                "</ul></details></td></tr>"
            )
        );
        assert_eq!(
            rendered.bindings,
            vec![Binding::OpenArticle("pe-format".to_string())]
        );
    }

    #[test]
    fn test_render_categories_marks_active() {
        let active = BTreeSet::from(["news".to_string()]);
        let rendered = render_categories(&[category("life"), category("news")], &active);
        assert_eq!(
            rendered.html,
            concat!(
                r#"<li id="life" class="list-group-item clickable category category-life">life</li>"#,
                r#"<li id="news" class="list-group-item clickable category category-news active">news</li>"#
            )
        );
        assert_eq!(rendered.bindings.len(), 2);
    }

    #[test]
    fn test_empty_inputs_render_nothing() {
        assert_eq!(render_entries(&[]), Rendered::default());
        assert_eq!(render_categories(&[], &BTreeSet::new()), Rendered::default());
    }
}
