//! Shared in-memory fakes for the capability traits.
//!
//! Unit tests drive the session core against these instead of a live UI,
//! recording enough state to assert on scroll, highlight, and navigation
//! behavior.

use skiff_types::ui::{Navigator, StatusBar, Viewport};

use crate::document::{Document, DocumentHandle};

/// Build a displayable document with the given URL and links.
pub fn make_document(url: &str, links: &[&str]) -> DocumentHandle {
    DocumentHandle::new(Document {
        url: url.to_string(),
        content: format!("contents of {url}"),
        links: links.iter().map(|s| s.to_string()).collect(),
        ..Document::default()
    })
}

/// In-memory viewport recording scroll and highlight state.
#[derive(Debug, Default)]
pub struct FakeViewport {
    pub row: i32,
    pub column: i32,
    pub highlighted: Option<String>,
    pub scroll_to_highlight_calls: usize,
    pub redraws: usize,
}

impl FakeViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A viewport already scrolled to the given offset.
    pub fn at(row: i32, column: i32) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }
}

impl Viewport for FakeViewport {
    fn scroll_offset(&self) -> (i32, i32) {
        (self.row, self.column)
    }

    fn scroll_to(&mut self, row: i32, column: i32) {
        self.row = row;
        self.column = column;
    }

    fn highlight(&mut self, id: &str) {
        self.highlighted = if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        };
    }

    fn highlights(&self) -> Vec<String> {
        self.highlighted.iter().cloned().collect()
    }

    fn scroll_to_highlight(&mut self) {
        self.scroll_to_highlight_calls += 1;
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

/// In-memory status bar.
#[derive(Debug, Default)]
pub struct FakeStatusBar {
    label: String,
    text: String,
}

impl FakeStatusBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusBar for FakeStatusBar {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Navigator recording every follow request as `(tab, base, target)`.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub requests: Vec<(usize, String, String)>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for RecordingNavigator {
    fn follow_link(&mut self, tab: usize, base: &str, target: &str) {
        self.requests.push((tab, base.to_string(), target.to_string()));
    }
}
