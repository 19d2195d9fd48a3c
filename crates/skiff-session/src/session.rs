//! Session context: the tab collection and the state shared across tabs.
//!
//! Replaces ambient globals (active tab index, terminal size, the one
//! status bar) with an explicit object passed into navigation operations,
//! so tabs stay testable without a live UI. All mutation happens on a
//! single logical thread, driven by discrete serialized events.

use skiff_types::input::KeyEvent;
use skiff_types::ui::{Navigator, StatusBar, Viewport};

use crate::config::SessionConfig;
use crate::document::DocumentHandle;
use crate::reflow::{self, ReflowGuard};
use crate::tab::Tab;

/// Browser-wide session state: every open tab, the active tab index, and
/// the live terminal size.
#[derive(Debug)]
pub struct Session {
    tabs: Vec<Tab>,
    active: usize,
    term_width: u16,
    term_height: u16,
    config: SessionConfig,
}

impl Session {
    /// Create a session with one placeholder tab.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            tabs: vec![Tab::new()],
            active: 0,
            term_width: 80,
            term_height: 24,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of open tabs.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Index of the active tab.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Record the live terminal size (resize event). Reflow staleness and
    /// page scrolling read these.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.term_width = width;
        self.term_height = height;
    }

    pub fn term_width(&self) -> u16 {
        self.term_width
    }

    pub fn term_height(&self) -> u16 {
        self.term_height
    }

    // ---------------------------------------------------------------
    // Tab lifecycle
    // ---------------------------------------------------------------

    /// Open a new placeholder tab and return its index. Does not switch to
    /// it.
    pub fn new_tab(&mut self) -> usize {
        self.tabs.push(Tab::new());
        let index = self.tabs.len() - 1;
        log::info!("opened tab {index}");
        index
    }

    /// Close the tab at `index`, clamping the active index.
    ///
    /// The last remaining tab is never closed. When the active tab was
    /// closed, the newly active tab's bar snapshot is applied. Returns
    /// whether a tab was removed.
    pub fn close_tab(&mut self, index: usize, bar: &mut dyn StatusBar) -> bool {
        if self.tabs.len() <= 1 || index >= self.tabs.len() {
            return false;
        }
        let was_active = index == self.active;
        self.tabs.remove(index);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        } else if index < self.active {
            self.active -= 1;
        }
        if was_active {
            self.tabs[self.active].apply_bottom_bar(bar);
        }
        log::info!("closed tab {index}");
        true
    }

    /// Make `index` the active tab.
    ///
    /// Saves the outgoing tab's scroll position and status-bar snapshot,
    /// then restores both for the incoming tab, so bar content and scroll
    /// state never leak between tabs.
    pub fn switch_to(&mut self, index: usize, viewport: &mut dyn Viewport, bar: &mut dyn StatusBar) {
        if index >= self.tabs.len() || index == self.active {
            return;
        }
        {
            let outgoing = &mut self.tabs[self.active];
            if outgoing.has_content() {
                outgoing.save_scroll(viewport);
            }
            outgoing.save_bottom_bar(bar);
        }
        self.active = index;
        let incoming = &self.tabs[self.active];
        incoming.apply_bottom_bar(bar);
        incoming.apply_scroll(viewport);
        viewport.request_redraw();
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    /// Route one key event to the active tab.
    ///
    /// A resulting follow request is dispatched to the navigation
    /// collaborator with this tab's index; the loaded document comes back
    /// later through [`Session::adopt_document`].
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
        nav: &mut dyn Navigator,
    ) {
        let active = self.active;
        if let Some(req) = self.tabs[active].handle_key(key, viewport, bar) {
            log::debug!("tab {active}: following {} against {}", req.target, req.base);
            nav.follow_link(active, &req.base, &req.target);
        }
    }

    /// Scroll the active tab up 75% of the terminal height.
    pub fn page_up(&self, viewport: &mut dyn Viewport) {
        self.active_tab().page_up(viewport, self.term_height);
    }

    /// Scroll the active tab down 75% of the terminal height.
    pub fn page_down(&self, viewport: &mut dyn Viewport) {
        self.active_tab().page_down(viewport, self.term_height);
    }

    // ---------------------------------------------------------------
    // Navigation completion
    // ---------------------------------------------------------------

    /// Install a document produced by the navigation collaborator into the
    /// tab at `index`, recording it in history.
    ///
    /// The outgoing page's scroll position is saved first; the cache shares
    /// the outgoing handle, so a later revisit resumes where the user left
    /// off. The new document starts at the top. A navigation that failed is
    /// simply never reported here, leaving the previous document displayed.
    pub fn adopt_document(
        &mut self,
        index: usize,
        doc: DocumentHandle,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
    ) {
        let is_active = index == self.active;
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        if is_active && tab.has_content() {
            tab.save_scroll(viewport);
        }
        let url = doc.get().url.clone();
        tab.adopt(doc);
        if tab.has_content() {
            tab.push_history(&url);
        }
        if is_active {
            viewport.highlight("");
            viewport.scroll_to(0, 0);
            bar.set_label("");
            bar.set_text(&url);
            tab.save_bottom_bar(bar);
            viewport.request_redraw();
        } else {
            tab.set_bar_snapshot("", &url);
        }
        log::info!("tab {index}: loaded {url}");
    }

    /// Install a document revisited through back/forward.
    ///
    /// Unlike [`Session::adopt_document`] this pushes nothing to history
    /// (the cursor already moved) and restores the document's saved scroll
    /// position instead of starting at the top.
    pub fn adopt_revisited(
        &mut self,
        index: usize,
        doc: DocumentHandle,
        viewport: &mut dyn Viewport,
        bar: &mut dyn StatusBar,
    ) {
        let is_active = index == self.active;
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        let url = doc.get().url.clone();
        tab.adopt(doc);
        if is_active {
            viewport.highlight("");
            tab.apply_scroll(viewport);
            bar.set_label("");
            bar.set_text(&url);
            tab.save_bottom_bar(bar);
            viewport.request_redraw();
        } else {
            tab.set_bar_snapshot("", &url);
        }
        log::info!("tab {index}: revisited {url}");
    }

    /// Step the active tab back in history.
    ///
    /// Saves the outgoing scroll position and returns the URL the
    /// collaborator should load and hand to [`Session::adopt_revisited`],
    /// or `None` when no history is available.
    pub fn back(&mut self, viewport: &dyn Viewport) -> Option<String> {
        let active = self.active;
        self.tabs[active].history_back(viewport)
    }

    /// Step the active tab forward in history.
    pub fn forward(&mut self, viewport: &dyn Viewport) -> Option<String> {
        let active = self.active;
        self.tabs[active].history_forward(viewport)
    }

    // ---------------------------------------------------------------
    // Reflow
    // ---------------------------------------------------------------

    /// Whether the active tab's document was rendered for a width other
    /// than the live terminal width.
    pub fn needs_reflow(&self) -> bool {
        reflow::needs_reflow(self.active_tab().document(), self.term_width)
    }

    /// Begin a reflow of the active tab's document at the live width.
    ///
    /// Returns `None` while a reflow for this tab is already in flight;
    /// the caller retries on a later event.
    pub fn begin_reflow(&self) -> Option<ReflowGuard> {
        self.active_tab().reflow().begin(self.term_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NavigationMode;
    use crate::reflow::ReflowResult;
    use crate::test_utils::{FakeStatusBar, FakeViewport, RecordingNavigator, make_document};

    fn session() -> Session {
        Session::new(SessionConfig::default())
    }

    #[test]
    fn new_session_has_one_placeholder_tab() {
        let s = session();
        assert_eq!(s.tab_count(), 1);
        assert_eq!(s.active_index(), 0);
        assert!(!s.active_tab().has_content());
    }

    #[test]
    fn adopt_document_pushes_history_and_starts_at_top() {
        let mut s = session();
        let mut viewport = FakeViewport::at(50, 3);
        let mut bar = FakeStatusBar::new();

        s.adopt_document(
            0,
            make_document("gemini://example.org/", &["/a"]),
            &mut viewport,
            &mut bar,
        );

        assert_eq!(viewport.scroll_offset(), (0, 0));
        assert_eq!(bar.text(), "gemini://example.org/");
        assert_eq!(s.active_tab().history().urls(), ["gemini://example.org/"]);
        assert_eq!(viewport.redraws, 1);
    }

    #[test]
    fn placeholder_pages_are_not_recorded_in_history() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        s.adopt_document(0, make_document("about:newtab", &[]), &mut viewport, &mut bar);
        assert!(s.active_tab().history().is_empty());
    }

    #[test]
    fn adopt_saves_outgoing_scroll_through_shared_handle() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        let first = make_document("gemini://example.org/", &[]);
        let cache_copy = first.clone();
        s.adopt_document(0, first, &mut viewport, &mut bar);

        // User scrolls, then navigates on.
        viewport.scroll_to(33, 1);
        s.adopt_document(
            0,
            make_document("gemini://example.org/two", &[]),
            &mut viewport,
            &mut bar,
        );

        // The cache's copy of the first document kept the position.
        assert_eq!(cache_copy.get().row, 33);
        assert_eq!(cache_copy.get().column, 1);
    }

    #[test]
    fn back_and_revisit_resume_saved_scroll() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        let first = make_document("gemini://example.org/", &[]);
        let cached_first = first.clone();
        s.adopt_document(0, first, &mut viewport, &mut bar);
        viewport.scroll_to(33, 1);
        s.adopt_document(
            0,
            make_document("gemini://example.org/two", &[]),
            &mut viewport,
            &mut bar,
        );

        let url = s.back(&viewport).unwrap();
        assert_eq!(url, "gemini://example.org/");

        // The collaborator resolves the URL from cache and hands back the
        // very same document.
        s.adopt_revisited(0, cached_first, &mut viewport, &mut bar);
        assert_eq!(viewport.scroll_offset(), (33, 1));
        // No new history entry was recorded.
        assert_eq!(s.active_tab().history().len(), 2);
        assert_eq!(s.active_tab().history().position(), 0);
    }

    #[test]
    fn back_with_no_history_is_noop() {
        let mut s = session();
        let viewport = FakeViewport::new();
        assert_eq!(s.back(&viewport), None);
        assert_eq!(s.forward(&viewport), None);
    }

    #[test]
    fn switch_to_does_not_leak_bar_content() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        s.adopt_document(
            0,
            make_document("gemini://one.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        let second = s.new_tab();
        s.switch_to(second, &mut viewport, &mut bar);
        s.adopt_document(
            second,
            make_document("gemini://two.example/", &[]),
            &mut viewport,
            &mut bar,
        );

        s.switch_to(0, &mut viewport, &mut bar);
        assert_eq!(bar.text(), "gemini://one.example/");

        s.switch_to(second, &mut viewport, &mut bar);
        assert_eq!(bar.text(), "gemini://two.example/");
    }

    #[test]
    fn switch_to_restores_each_tabs_scroll() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        s.adopt_document(
            0,
            make_document("gemini://one.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        viewport.scroll_to(12, 0);

        let second = s.new_tab();
        s.switch_to(second, &mut viewport, &mut bar);
        s.adopt_document(
            second,
            make_document("gemini://two.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        viewport.scroll_to(90, 4);

        s.switch_to(0, &mut viewport, &mut bar);
        assert_eq!(viewport.scroll_offset(), (12, 0));

        s.switch_to(second, &mut viewport, &mut bar);
        assert_eq!(viewport.scroll_offset(), (90, 4));
    }

    #[test]
    fn switch_to_self_or_out_of_range_is_noop() {
        let mut s = session();
        let mut viewport = FakeViewport::at(5, 5);
        let mut bar = FakeStatusBar::new();
        bar.set_text("unchanged");

        s.switch_to(0, &mut viewport, &mut bar);
        s.switch_to(9, &mut viewport, &mut bar);
        assert_eq!(viewport.scroll_offset(), (5, 5));
        assert_eq!(bar.text(), "unchanged");
    }

    #[test]
    fn follow_request_is_dispatched_with_tab_index() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();
        let mut nav = RecordingNavigator::new();

        s.adopt_document(
            0,
            make_document("gemini://example.org/", &["/a", "/b"]),
            &mut viewport,
            &mut bar,
        );
        s.handle_key(KeyEvent::Enter, &mut viewport, &mut bar, &mut nav);
        s.handle_key(KeyEvent::Tab, &mut viewport, &mut bar, &mut nav);
        s.handle_key(KeyEvent::Enter, &mut viewport, &mut bar, &mut nav);

        assert_eq!(
            nav.requests,
            [(0, "gemini://example.org/".to_string(), "/b".to_string())]
        );
        assert_eq!(s.active_tab().mode(), NavigationMode::Normal);
    }

    #[test]
    fn background_adoption_leaves_shared_bar_alone() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        s.adopt_document(
            0,
            make_document("gemini://one.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        let second = s.new_tab();
        // Load into the background tab; the visible bar must not change.
        s.adopt_document(
            second,
            make_document("gemini://two.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        assert_eq!(bar.text(), "gemini://one.example/");

        // Its snapshot is applied once the tab becomes active.
        s.switch_to(second, &mut viewport, &mut bar);
        assert_eq!(bar.text(), "gemini://two.example/");
    }

    #[test]
    fn close_tab_keeps_at_least_one() {
        let mut s = session();
        let mut bar = FakeStatusBar::new();
        assert!(!s.close_tab(0, &mut bar));
        assert_eq!(s.tab_count(), 1);
    }

    #[test]
    fn close_active_tab_applies_next_snapshot() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        s.adopt_document(
            0,
            make_document("gemini://one.example/", &[]),
            &mut viewport,
            &mut bar,
        );
        let second = s.new_tab();
        s.switch_to(second, &mut viewport, &mut bar);
        s.adopt_document(
            second,
            make_document("gemini://two.example/", &[]),
            &mut viewport,
            &mut bar,
        );

        assert!(s.close_tab(second, &mut bar));
        assert_eq!(s.tab_count(), 1);
        assert_eq!(s.active_index(), 0);
        assert_eq!(bar.text(), "gemini://one.example/");
    }

    #[test]
    fn close_tab_before_active_shifts_index() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        let second = s.new_tab();
        s.switch_to(second, &mut viewport, &mut bar);
        assert!(s.close_tab(0, &mut bar));
        // The same tab stays active under its new index.
        assert_eq!(s.active_index(), 0);
        assert_eq!(s.tab_count(), 1);
    }

    #[test]
    fn resize_drives_reflow_staleness() {
        let mut s = session();
        let mut viewport = FakeViewport::new();
        let mut bar = FakeStatusBar::new();

        let doc = make_document("gemini://example.org/", &[]);
        doc.get_mut().term_width = 80;
        s.adopt_document(0, doc, &mut viewport, &mut bar);

        assert!(!s.needs_reflow());
        s.resize(120, 40);
        assert!(s.needs_reflow());

        let guard = s.begin_reflow().unwrap();
        assert!(s.begin_reflow().is_none());
        let installed = guard.commit(
            s.active_tab().document(),
            s.term_width(),
            ReflowResult {
                content: "rewrapped".to_string(),
                max_pre_cols: -1,
            },
        );
        assert!(installed);
        assert!(!s.needs_reflow());
    }
}
