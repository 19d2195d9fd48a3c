//! Document records and their cache-shared handles.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Scheme used for synthetic internal pages (new-tab page, error pages).
/// Documents with such URLs carry no real navigation state.
pub const PLACEHOLDER_SCHEME: &str = "about:";

/// Renderer selection for a document.
///
/// Classified from the media type the server reported; the literal string is
/// kept separately in [`Document::raw_mediatype`] for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mediatype {
    /// Gemtext (`text/gemini`).
    #[default]
    Gemtext,
    /// Plain text (`text/plain` and unrecognized text types).
    PlainText,
    /// Text with embedded ANSI escapes (`text/x-ansi`).
    Ansi,
}

impl Mediatype {
    /// Classify a raw media type string.
    ///
    /// Parameters such as `; charset=utf-8` do not affect classification.
    pub fn from_raw(raw: &str) -> Self {
        let base = raw.split(';').next().unwrap_or("").trim();
        match base {
            "text/gemini" => Self::Gemtext,
            "text/x-ansi" => Self::Ansi,
            _ => Self::PlainText,
        }
    }
}

/// Keyboard navigation mode.
///
/// Owned by the tab and mirrored onto its document, so a document persisted
/// by the cache round-trips together with its view state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    /// Regular browsing keys.
    #[default]
    Normal,
    /// Enter/Tab/Backtab cycle the highlight among the document's links.
    LinkSelect,
}

/// One fetched and rendered resource plus its view state.
///
/// The resource fields (`url`, `raw`, `content`, `links`, ...) are written
/// once by the fetch/render collaborator. The view-state fields (`row`,
/// `column`, `selected`, `selected_id`, `mode`) are updated by the owning
/// tab as the user scrolls and selects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique key identifying the resource.
    pub url: String,
    /// Renderer selection, independent of the raw media type string.
    pub mediatype: Mediatype,
    /// The literal media type reported by the server, for diagnostics.
    pub raw_mediatype: String,
    /// The unmodified response body.
    pub raw: String,
    /// Processed, display-ready content: style markers plus a left margin.
    pub content: String,
    /// Terminal columns taken by the longest preformatted line. -1 means no
    /// finite width constraint; content may always scroll horizontally.
    pub max_pre_cols: i32,
    /// Outgoing link URLs, absolute or relative. The position of an entry is
    /// its stable link id; ids are never renumbered while the document is
    /// displayed.
    pub links: Vec<String>,
    /// Last known vertical scroll offset.
    pub row: i32,
    /// Last known horizontal scroll offset. Includes left-margin size
    /// changes, so it is not a literal terminal-cell column.
    pub column: i32,
    /// Terminal width when `content` was produced. A mismatch with the live
    /// width means the document must be reflowed before redisplay.
    pub term_width: u16,
    /// The currently selected link or text region ("" if none).
    pub selected: String,
    /// Opaque region id of the selection: empty, a decimal link index in
    /// `[0, links.len())`, or a non-numeric id for a non-link region.
    pub selected_id: String,
    /// Navigation mode mirrored from the owning tab.
    pub mode: NavigationMode,
    /// Creation time in epoch seconds. 0 means the document is never
    /// considered stale.
    pub created_at: u64,
}

impl Document {
    /// Approximate size of the document in bytes.
    ///
    /// Sums the byte lengths of the raw body, rendered content, URL,
    /// selection fields, and every link. Deterministic and side-effect-free;
    /// a cache-accounting heuristic, not true memory usage.
    pub fn approximate_size(&self) -> usize {
        let mut n = self.raw.len()
            + self.content.len()
            + self.url.len()
            + self.selected.len()
            + self.selected_id.len();
        for link in &self.links {
            n += link.len();
        }
        n
    }

    /// Whether an eviction policy should consider this document stale at
    /// `now`, given a maximum age in seconds.
    ///
    /// A `created_at` of 0 pins the document in cache forever.
    pub fn is_stale(&self, now: u64, max_age: u64) -> bool {
        self.created_at != 0 && now.saturating_sub(self.created_at) > max_age
    }
}

/// Shared handle to a document.
///
/// The owning tab and the external cache hold clones of the same handle, so
/// scroll and selection writes through either holder are visible to both.
/// The document is dropped when the last clone goes away, whichever of tab
/// replacement and cache eviction comes later. The session core is
/// single-threaded, so borrows are never held across collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct DocumentHandle(Rc<RefCell<Document>>);

impl DocumentHandle {
    pub fn new(doc: Document) -> Self {
        Self(Rc::new(RefCell::new(doc)))
    }

    /// Immutable borrow of the document.
    pub fn get(&self) -> Ref<'_, Document> {
        self.0.borrow()
    }

    /// Mutable borrow of the document.
    pub fn get_mut(&self) -> RefMut<'_, Document> {
        self.0.borrow_mut()
    }

    /// Whether two handles alias the same document.
    pub fn same_document(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
