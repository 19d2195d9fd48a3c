//! A browser tab: one document, its history, and its link selector.

use skiff_types::input::KeyEvent;
use skiff_types::ui::{StatusBar, Viewport};

use crate::document::{DocumentHandle, NavigationMode, PLACEHOLDER_SCHEME};
use crate::history::History;
use crate::links::{LinkSelector, SelectorAction};
use crate::reflow::ReflowGate;

/// Status bar label shown while a link is highlighted.
const LINK_LABEL: &str = "Link: ";

/// Vertical step for page up / page down: 75% of the terminal height,
/// rounded down.
fn page_step(term_height: u16) -> i32 {
    (i32::from(term_height) / 4) * 3
}

/// A request to follow a link, emitted when Enter lands on a highlighted
/// link. The session dispatches it to the navigation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowRequest {
    /// URL of the document the link came from; the resolution base.
    pub base: String,
    /// The link target, absolute or relative.
    pub target: String,
}

/// One browser tab.
///
/// Starts out displaying the empty placeholder document; the fetch/render
/// collaborator later hands it real documents through [`Tab::adopt`].
#[derive(Debug, Default)]
pub struct Tab {
    doc: DocumentHandle,
    history: History,
    selector: LinkSelector,
    mode: NavigationMode,
    reflow: ReflowGate,
    /// Saved status-bar label, restored when the tab regains focus.
    bar_label: String,
    /// Saved status-bar text.
    bar_text: String,
}

impl Tab {
    /// Create a tab displaying the empty placeholder document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the currently displayed document.
    pub fn document(&self) -> &DocumentHandle {
        &self.doc
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Gate serializing reflow work for this tab.
    pub fn reflow(&self) -> &ReflowGate {
        &self.reflow
    }

    /// Install a freshly fetched document.
    ///
    /// The previous handle is dropped here; the cache may keep that document
    /// alive under the same identity. Selection mode is left and the mirror
    /// on the new document is reset.
    pub fn adopt(&mut self, doc: DocumentHandle) {
        self.selector.reset();
        self.mode = NavigationMode::Normal;
        self.doc = doc;
        self.doc.get_mut().mode = NavigationMode::Normal;
    }

    /// Whether the tab displays a page that counts as real content.
    ///
    /// False for the placeholder document, any internal `about:` page, and
    /// empty rendered content. Gates history pushes and scroll saves.
    pub fn has_content(&self) -> bool {
        let d = self.doc.get();
        if d.url.is_empty() || d.url.starts_with(PLACEHOLDER_SCHEME) {
            return false;
        }
        !d.content.is_empty()
    }

    // ---------------------------------------------------------------
    // Scroll bookkeeping
    // ---------------------------------------------------------------

    /// Save the live viewport offset into the document.
    ///
    /// Call whenever moving away from a page (tab switch, history
    /// navigation, new load). The handle is cache-shared, so this also
    /// persists the position for future revisits.
    pub fn save_scroll(&self, viewport: &dyn Viewport) {
        let (row, column) = viewport.scroll_offset();
        let mut d = self.doc.get_mut();
        d.row = row;
        d.column = column;
    }

    /// Restore the viewport offset from the document.
    ///
    /// Only for re-displaying a page already visited (back/forward, tab
    /// switch); a freshly fetched document starts at the top.
    pub fn apply_scroll(&self, viewport: &mut dyn Viewport) {
        let d = self.doc.get();
        viewport.scroll_to(d.row, d.column);
    }

    /// Scroll up 75% of the terminal height, keeping the horizontal offset.
    pub fn page_up(&self, viewport: &mut dyn Viewport, term_height: u16) {
        let (row, column) = viewport.scroll_offset();
        viewport.scroll_to(row - page_step(term_height), column);
    }

    /// Scroll down 75% of the terminal height, keeping the horizontal
    /// offset.
    pub fn page_down(&self, viewport: &mut dyn Viewport, term_height: u16) {
        let (row, column) = viewport.scroll_offset();
        viewport.scroll_to(row + page_step(term_height), column);
    }

    // ---------------------------------------------------------------
    // Status bar bookkeeping
    // ---------------------------------------------------------------

    /// Snapshot the shared status bar into this tab.
    ///
    /// One bar instance is shared by all tabs; call on the outgoing tab at
    /// a switch boundary so its content does not leak into the next tab.
    pub fn save_bottom_bar(&mut self, bar: &dyn StatusBar) {
        self.bar_label = bar.label();
        self.bar_text = bar.text();
    }

    /// Restore the shared status bar from this tab's snapshot; call on the
    /// incoming tab at a switch boundary.
    pub fn apply_bottom_bar(&self, bar: &mut dyn StatusBar) {
        bar.set_label(&self.bar_label);
        bar.set_text(&self.bar_text);
    }

    /// Overwrite the snapshot directly, without touching the shared bar
    /// (background-tab adoption).
    pub(crate) fn set_bar_snapshot(&mut self, label: &str, text: &str) {
        self.bar_label = label.to_string();
        self.bar_text = text.to_string();
    }

    // ---------------------------------------------------------------
    // History
    // ---------------------------------------------------------------

    /// Record `url` as the newest history entry, erasing any forward
    /// branch.
    pub fn push_history(&mut self, url: &str) {
        self.history.push(url);
    }

    /// Step back in history. Saves the current scroll position first so
    /// the page resumes where it was on revisit. Returns the URL to load.
    pub fn history_back(&mut self, viewport: &dyn Viewport) -> Option<String> {
        if self.has_content() {
            self.save_scroll(viewport);
        }
        self.history.back().map(str::to_string)
    }

    /// Step forward in history; the counterpart of [`Tab::history_back`].
    pub fn history_forward(&mut self, viewport: &dyn Viewport) -> Option<String> {
        if self.has_content() {
            self.save_scroll(viewport);
        }
        self.history.forward().map(str::to_string)
    }

    // ---------------------------------------------------------------
    // Key handling
    // ---------------------------------------------------------------

    /// Feed one key event to the link selector and apply its side effects.
    ///
    /// Returns a follow request when Enter landed on a highlighted link;
    /// the caller dispatches it to the navigation collaborator. The bottom
    /// bar is re-snapshotted after every transition so highlight state
    /// survives a tab switch.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
    ) -> Option<FollowRequest> {
        self.sync_selection(viewport);
        let link_count = self.doc.get().links.len();
        let action = self.selector.handle_key(key, link_count);
        let request = self.apply_action(action, viewport, bar);
        self.mode = if self.selector.is_selecting() {
            NavigationMode::LinkSelect
        } else {
            NavigationMode::Normal
        };
        self.doc.get_mut().mode = self.mode;
        self.save_bottom_bar(bar);
        request
    }

    /// Re-seat the selector on whatever region the viewport reports as
    /// highlighted.
    ///
    /// A highlight id that does not parse as a link index falls back to
    /// link 0; widgets only produce numeric ids for link regions, so a
    /// non-numeric id here means an inconsistent collaborator.
    fn sync_selection(&mut self, viewport: &dyn Viewport) {
        if !self.selector.is_selecting() {
            return;
        }
        let Some(id) = viewport.highlights().into_iter().next() else {
            return;
        };
        let index = id.parse::<usize>().unwrap_or_else(|_| {
            log::warn!("non-numeric highlight id {id:?}, falling back to link 0");
            0
        });
        if Some(index) != self.selector.index() {
            self.selector.select(index);
        }
    }

    fn apply_action(
        &mut self,
        action: SelectorAction,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
    ) -> Option<FollowRequest> {
        match action {
            SelectorAction::None => None,
            SelectorAction::Highlight(index) => {
                self.highlight_link(index, viewport, bar);
                None
            },
            SelectorAction::Follow(index) => {
                bar.set_label("");
                let d = self.doc.get();
                let target = d.links.get(index).cloned()?;
                Some(FollowRequest {
                    base: d.url.clone(),
                    target,
                })
            },
            SelectorAction::Clear => {
                viewport.highlight("");
                bar.set_label("");
                bar.set_text(&self.doc.get().url);
                let mut d = self.doc.get_mut();
                d.selected.clear();
                d.selected_id.clear();
                None
            },
        }
    }

    /// Highlight link `index`, scroll it into view, and show its target in
    /// the status bar.
    fn highlight_link(
        &mut self,
        index: usize,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
    ) {
        let id = index.to_string();
        viewport.highlight(&id);
        viewport.scroll_to_highlight();
        let mut d = self.doc.get_mut();
        let target = d.links.get(index).cloned();
        if let Some(target) = target {
            bar.set_label(LINK_LABEL);
            bar.set_text(&target);
            d.selected = target;
            d.selected_id = id;
        }
    }
}
