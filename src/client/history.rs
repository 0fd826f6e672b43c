//! Session history.

use crate::client::address::Address;

/// The address bar plus back navigation.
pub trait History {
    /// Where the session currently is.
    fn location(&self) -> &Address;

    /// Add an entry and make it current, dropping any forward entries.
    fn push(&mut self, address: Address);

    /// Step back one entry. Returns false when already at the first entry,
    /// which means the session leaves the app.
    fn back(&mut self) -> bool;
}

/// In-process history: a stack of entries with a cursor.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<Address>,
    cursor: usize,
    left: bool,
}

impl SessionHistory {
    /// A session whose first entry is `initial`.
    pub fn new(initial: Address) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            left: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Address] {
        &self.entries
    }

    /// True once `back` was called on the first entry.
    pub fn has_left(&self) -> bool {
        self.left
    }
}

impl History for SessionHistory {
    fn location(&self) -> &Address {
        &self.entries[self.cursor]
    }

    fn push(&mut self, address: Address) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address);
        self.cursor = self.entries.len() - 1;
        self.left = false;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            self.left = true;
            return false;
        }
        self.cursor -= 1;
        true
    }
}
