//! Per-tab navigation history: a visited-URL list with a cursor.

use serde::{Deserialize, Serialize};

/// Ordered list of visited URLs with a back/forward cursor.
///
/// New navigation truncates the stale forward branch first, the contract
/// shared by conventional browsers: going back and then somewhere new erases
/// whatever was ahead. Entries are otherwise never deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    urls: Vec<String>,
    /// Cursor into `urls`; a valid index whenever `urls` is non-empty.
    pos: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new navigation.
    ///
    /// If the cursor is not at the last entry, the user had navigated
    /// backward; everything after the cursor is discarded so the new URL
    /// becomes the most recent item.
    pub fn push(&mut self, url: &str) {
        if self.pos + 1 < self.urls.len() {
            self.urls.truncate(self.pos + 1);
        }
        self.urls.push(url.to_string());
        self.pos = self.urls.len() - 1;
    }

    /// Move the cursor one step back.
    ///
    /// Returns the URL to load, or `None` when no history is available
    /// behind the cursor (the cursor stays put).
    pub fn back(&mut self) -> Option<&str> {
        if self.urls.is_empty() || self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        Some(&self.urls[self.pos])
    }

    /// Move the cursor one step forward.
    ///
    /// Returns the URL to load, or `None` when the cursor is already at the
    /// newest entry.
    pub fn forward(&mut self) -> Option<&str> {
        if self.pos + 1 >= self.urls.len() {
            return None;
        }
        self.pos += 1;
        Some(&self.urls[self.pos])
    }

    /// URL under the cursor, if any.
    pub fn current(&self) -> Option<&str> {
        self.urls.get(self.pos).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        !self.urls.is_empty() && self.pos > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.pos + 1 < self.urls.len()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// All entries, oldest first.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}
