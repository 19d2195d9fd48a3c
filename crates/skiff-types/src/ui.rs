//! Capability traits the session core requires from its collaborators.
//!
//! The session core never draws, fetches, or resolves URLs. It drives these
//! interfaces, and unit tests substitute in-memory fakes for them.

/// Scrollable content viewport with region highlighting.
///
/// Offsets are (row, column) pairs. The column offset includes the rendered
/// left margin, so it is not a literal terminal-cell column.
pub trait Viewport {
    /// Current scroll offset.
    fn scroll_offset(&self) -> (i32, i32);

    /// Scroll to an absolute offset.
    fn scroll_to(&mut self, row: i32, column: i32);

    /// Highlight the region with the given opaque id. An empty id clears
    /// the highlight.
    fn highlight(&mut self, id: &str);

    /// Ids of the currently highlighted regions, in order.
    fn highlights(&self) -> Vec<String>;

    /// Scroll the highlighted region into view.
    fn scroll_to_highlight(&mut self);

    /// Ask the owner to redraw.
    fn request_redraw(&mut self);
}

/// The single status bar shared by every tab.
///
/// Because one bar instance serves the whole session, tabs snapshot and
/// restore its content at switch boundaries.
pub trait StatusBar {
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

/// Navigation collaborator.
///
/// Resolves `target` against `base` and starts loading the result for the
/// given tab. A successful load later replaces the tab's document through
/// the session; a failed one is never reported back to the core.
pub trait Navigator {
    fn follow_link(&mut self, tab: usize, base: &str, target: &str);
}
