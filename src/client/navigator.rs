//! Client navigation state machine.
//!
//! # Responsibilities
//! - Own the navigation state: known categories, active filter, page counter, phase
//! - Turn user actions and history pops into requests and renders
//! - Mirror the restorable part of the state into the address bar
//!
//! # Design Decisions
//! - Transitions take `&mut self`, so a later navigation can only start once the
//!   previous one finished; a stale response can never overwrite a newer render
//! - A transport failure is logged and leaves the view as it was
//! - A non-success envelope replaces the main region with the placeholder

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::address::{Address, DEFAULT_PAGE};
use crate::client::history::History;
use crate::client::render::{self, Binding, Rendered, PLACEHOLDER};
use crate::client::transport::Transport;
use crate::client::view::{Region, View};
use crate::http::request::{Action, SiteRequest};
use crate::http::response::Envelope;
use crate::model::{BlogEntry, Category};

/// Where the last transition left the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Rendered,
    Errored,
}

/// Result of a history pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// The view was rebuilt from the new location.
    Restored,
    /// The navigation counter ran out and the session unwound out of the app.
    Left,
}

pub struct Navigator<T, V, H> {
    transport: T,
    view: V,
    history: H,
    categories: Vec<Category>,
    filter: Option<String>,
    page_count: u32,
    phase: Phase,
}

impl<T, V, H> Navigator<T, V, H>
where
    T: Transport,
    V: View,
    H: History,
{
    pub fn new(transport: T, view: V, history: H) -> Self {
        Self {
            transport,
            view,
            history,
            categories: Vec::new(),
            filter: None,
            page_count: 0,
            phase: Phase::Idle,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The comma-joined filter in effect for blog requests.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Known categories named by the current filter.
    pub fn active(&self) -> BTreeSet<String> {
        let wanted: BTreeSet<&str> = self
            .filter
            .as_deref()
            .map(|f| f.split(',').map(str::trim).collect())
            .unwrap_or_default();
        self.categories
            .iter()
            .filter(|c| wanted.contains(c.name.as_str()))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Load the categories, then show whatever the address bar names.
    pub async fn start(&mut self) {
        self.filter = self.history.location().filter().map(str::to_string);
        self.load_categories().await;
        self.process_location().await;
    }

    /// Top navigation link. Entering the blog starts from a clean address.
    pub async fn navigate(&mut self, page: &str) {
        if page == DEFAULT_PAGE {
            self.history.push(Address::page(DEFAULT_PAGE));
        }
        self.load_page(page).await;
    }

    /// Click on an entry title.
    pub async fn open_article(&mut self, name: &str) {
        self.load_page(name).await;
    }

    pub async fn next_page(&mut self) {
        let page_number = self.view.page_number() + 1;
        self.turn_page(page_number).await;
    }

    /// No-op on the first page.
    pub async fn prev_page(&mut self) {
        let page_number = self.view.page_number() - 1;
        if page_number < 1 {
            return;
        }
        self.turn_page(page_number).await;
    }

    /// Flip `name` in the active filter and reload from page 1.
    pub async fn toggle_category(&mut self, name: &str) {
        if !self.categories.iter().any(|c| c.name == name) {
            tracing::debug!(category = %name, "ignoring toggle of unknown category");
            return;
        }
        let mut active = self.active();
        if !active.remove(name) {
            active.insert(name.to_string());
        }
        let joined = self
            .categories
            .iter()
            .filter(|c| active.contains(&c.name))
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let filter = (!joined.is_empty()).then_some(joined);

        self.set_filter(filter.clone());
        self.view.set_page_number(1);
        self.load_entries(filter, 1).await;
    }

    /// Run whatever a rendered element is bound to.
    pub async fn activate(&mut self, binding: Binding) {
        match binding {
            Binding::OpenArticle(name) => self.open_article(&name).await,
            Binding::ToggleCategory(name) => self.toggle_category(&name).await,
        }
    }

    /// The browser moved through history to the current location.
    ///
    /// Every load bumps the counter and every pop takes one off. Once it runs
    /// out the remaining entries are app-internal pushes, so the session
    /// steps back past all of them instead of re-rendering.
    pub async fn on_pop_state(&mut self) -> PopOutcome {
        self.page_count = self.page_count.max(1) - 1;
        if self.page_count == 0 {
            while self.history.back() {}
            return PopOutcome::Left;
        }
        self.process_location().await;
        self.page_count = self.page_count.saturating_sub(1);
        PopOutcome::Restored
    }

    /// Browser back button.
    pub async fn back(&mut self) -> PopOutcome {
        if !self.history.back() {
            return PopOutcome::Left;
        }
        self.on_pop_state().await
    }

    async fn process_location(&mut self) {
        let page = self.history.location().page_name().to_string();
        self.load_page(&page).await;
    }

    async fn load_page(&mut self, page: &str) {
        if page == DEFAULT_PAGE {
            let location = self.history.location().clone();
            self.load_blog(location.filter().map(str::to_string), location.page_number())
                .await;
        } else {
            let request = SiteRequest::new(Action::GetPage.as_str()).with_page(page);
            if let Some(envelope) = self.fetch(&request).await {
                self.show_main(envelope);
            }
            self.history.push(Address::page(page));
        }
        self.page_count += 1;
    }

    async fn load_blog(&mut self, filter: Option<String>, page_number: i64) {
        let page_number = page_number.max(1);
        self.set_filter(filter.clone());
        let request = SiteRequest::new(Action::GetPage.as_str()).with_page(DEFAULT_PAGE);
        let Some(envelope) = self.fetch(&request).await else {
            return;
        };
        self.show_main(envelope);
        self.view.set_page_number(page_number);
        self.load_entries(filter, page_number).await;
    }

    async fn load_entries(&mut self, filter: Option<String>, page_number: i64) {
        let request = entries_request(filter.as_deref(), page_number);
        if let Some(envelope) = self.fetch(&request).await {
            match decode::<Vec<BlogEntry>>(envelope) {
                Ok(entries) => {
                    self.view.render(Region::Entries, render::render_entries(&entries));
                    self.phase = Phase::Rendered;
                }
                Err(detail) => self.show_error(&detail),
            }
        }
        self.history.push(Address::blog(filter.as_deref(), page_number));
    }

    async fn turn_page(&mut self, page_number: i64) {
        let filter = self.filter.clone();
        let request = entries_request(filter.as_deref(), page_number);
        let previous = self.phase;
        let Some(envelope) = self.fetch(&request).await else {
            return;
        };
        match decode::<Vec<BlogEntry>>(envelope) {
            Ok(entries) if entries.is_empty() => {
                tracing::debug!(page_number, "no entries past the last page");
                self.phase = previous;
            }
            Ok(entries) => {
                self.view.render(Region::Entries, render::render_entries(&entries));
                self.view.set_page_number(page_number);
                self.history.push(Address::blog(filter.as_deref(), page_number));
                self.phase = Phase::Rendered;
            }
            Err(detail) => self.show_error(&detail),
        }
    }

    async fn load_categories(&mut self) {
        let previous = self.phase;
        let request = SiteRequest::new(Action::GetCategories.as_str());
        let Some(envelope) = self.fetch(&request).await else {
            return;
        };
        self.phase = previous;
        match decode::<Vec<Category>>(envelope) {
            Ok(categories) => {
                self.categories = categories;
                self.render_categories();
            }
            Err(detail) => tracing::warn!(detail = %detail, "failed to load categories"),
        }
    }

    fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.is_empty());
        if !self.categories.is_empty() {
            self.render_categories();
        }
    }

    fn render_categories(&mut self) {
        let rendered = render::render_categories(&self.categories, &self.active());
        self.view.render(Region::Categories, rendered);
    }

    fn show_main(&mut self, envelope: Envelope) {
        match decode::<String>(envelope) {
            Ok(html) => {
                self.view.render(Region::Main, Rendered::plain(html));
                self.phase = Phase::Rendered;
            }
            Err(detail) => self.show_error(&detail),
        }
    }

    fn show_error(&mut self, detail: &str) {
        tracing::warn!(detail = %detail, "request answered without content");
        self.view.render(Region::Main, Rendered::plain(PLACEHOLDER));
        self.phase = Phase::Errored;
    }

    async fn fetch(&mut self, request: &SiteRequest) -> Option<Envelope> {
        let previous = self.phase;
        self.phase = Phase::Loading;
        match self.transport.fetch(request).await {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                if !e.is_aborted() {
                    tracing::warn!(request = %request, error = %e, "request failed");
                }
                self.phase = previous;
                None
            }
        }
    }
}

fn entries_request(filter: Option<&str>, page_number: i64) -> SiteRequest {
    let request =
        SiteRequest::new(Action::GetBlogEntries.as_str()).with_page_number(page_number.to_string());
    match filter {
        Some(filter) => request.with_filter(filter),
        None => request,
    }
}

/// Body of a 200 envelope as `D`, or the text worth logging.
fn decode<D: DeserializeOwned>(envelope: Envelope) -> Result<D, String> {
    if !envelope.is_ok() {
        return Err(match envelope.body {
            Some(Value::String(detail)) => detail,
            Some(other) => other.to_string(),
            None => format!("state {}", envelope.state),
        });
    }
    serde_json::from_value(envelope.body.unwrap_or(Value::Null))
        .map_err(|e| format!("unexpected body: {e}"))
}
