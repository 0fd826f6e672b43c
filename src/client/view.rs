//! Content regions the navigator writes into.

use std::collections::HashMap;

use crate::client::render::{Binding, Rendered};

/// The designated regions of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Main content: static pages, the blog frame, or the placeholder.
    Main,
    /// Category sidebar.
    Categories,
    /// Blog entry rows. Lives inside the blog frame of `Main`.
    Entries,
}

pub trait View {
    /// Replace a region's markup and its bindings.
    fn render(&mut self, region: Region, rendered: Rendered);

    /// Show the current blog page number.
    fn set_page_number(&mut self, page_number: i64);

    /// Page number currently shown.
    fn page_number(&self) -> i64;
}

/// In-process view keeping each region's markup and bindings.
#[derive(Debug, Clone)]
pub struct MemoryView {
    regions: HashMap<Region, Rendered>,
    page_number: i64,
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            regions: HashMap::new(),
            page_number: 1,
        }
    }

    /// Markup of `region`, empty when never rendered.
    pub fn html(&self, region: Region) -> &str {
        self.regions
            .get(&region)
            .map(|r| r.html.as_str())
            .unwrap_or_default()
    }

    pub fn bindings(&self, region: Region) -> &[Binding] {
        self.regions
            .get(&region)
            .map(|r| r.bindings.as_slice())
            .unwrap_or_default()
    }

    /// The binding a click on the `index`-th element of `region` fires.
    pub fn click(&self, region: Region, index: usize) -> Option<Binding> {
        self.bindings(region).get(index).cloned()
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for MemoryView {
    fn render(&mut self, region: Region, rendered: Rendered) {
        if region == Region::Main {
            self.regions.remove(&Region::Entries);
        }
        self.regions.insert(region, rendered);
    }

    fn set_page_number(&mut self, page_number: i64) {
        self.page_number = page_number;
    }

    fn page_number(&self) -> i64 {
        self.page_number
    }
}
