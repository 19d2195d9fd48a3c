//! Link-select mode: keyboard-driven highlight cycling.

use skiff_types::input::KeyEvent;

/// State machine governing keyboard link selection.
///
/// The machine itself is pure: feeding it a key yields a [`SelectorAction`]
/// describing the side effects (highlighting, status bar, follow dispatch)
/// the owning tab must apply through the capability traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkSelector {
    /// No link highlighted. Enter begins selection when links exist.
    #[default]
    Off,
    /// Link `index` highlighted. Tab/Backtab cycle, Enter follows, Esc
    /// leaves.
    Selecting(usize),
}

/// What the owner must do after a key was fed to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    /// Nothing.
    None,
    /// Highlight the link with this index, scroll it into view, and show
    /// its target in the status bar.
    Highlight(usize),
    /// Follow the link with this index, resolved against the document URL.
    Follow(usize),
    /// Clear the highlight and restore the status bar to the document URL.
    Clear,
}

impl LinkSelector {
    pub fn new() -> Self {
        Self::Off
    }

    /// Whether a link is currently highlighted.
    pub fn is_selecting(&self) -> bool {
        matches!(self, Self::Selecting(_))
    }

    /// Currently highlighted link index, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Off => None,
            Self::Selecting(i) => Some(*i),
        }
    }

    /// Force the machine back to `Off` (used when a document is replaced).
    pub fn reset(&mut self) {
        *self = Self::Off;
    }

    /// Re-seat the highlight on `index` (the viewport reported a different
    /// highlighted region than the machine expected).
    pub fn select(&mut self, index: usize) {
        *self = Self::Selecting(index);
    }

    /// Feed one key event. `link_count` is the number of links in the
    /// displayed document.
    ///
    /// The state transition happens before the caller dispatches any side
    /// effect, so a re-entrant Enter during navigation starts from `Off`.
    pub fn handle_key(&mut self, key: KeyEvent, link_count: usize) -> SelectorAction {
        match (*self, key) {
            (Self::Off, KeyEvent::Enter) => {
                if link_count == 0 {
                    // Enter is meaningless without links.
                    return SelectorAction::None;
                }
                *self = Self::Selecting(0);
                SelectorAction::Highlight(0)
            },
            (Self::Selecting(i), KeyEvent::Enter) => {
                *self = Self::Off;
                SelectorAction::Follow(i)
            },
            (Self::Selecting(_), KeyEvent::Tab | KeyEvent::BackTab) if link_count == 0 => {
                // The document changed under the selection; leave cleanly.
                *self = Self::Off;
                SelectorAction::Clear
            },
            (Self::Selecting(i), KeyEvent::Tab) => {
                let next = (i + 1) % link_count;
                *self = Self::Selecting(next);
                SelectorAction::Highlight(next)
            },
            (Self::Selecting(i), KeyEvent::BackTab) => {
                let prev = (i + link_count - 1) % link_count;
                *self = Self::Selecting(prev);
                SelectorAction::Highlight(prev)
            },
            (Self::Selecting(_), KeyEvent::Escape) => {
                *self = Self::Off;
                SelectorAction::Clear
            },
            // Unrecognized keys are absorbed while a selection is active.
            (Self::Selecting(_), KeyEvent::Other) => SelectorAction::None,
            (Self::Off, _) => SelectorAction::None,
        }
    }
}
