//! Session core for the Skiff terminal browser.
//!
//! Tracks, per tab, which document is displayed, the scroll position the user
//! left off at, the navigation history that led there, and which link (if
//! any) is currently keyboard-highlighted. Documents are cache-shared by
//! handle, so scroll and selection edits stay visible to whichever holder
//! (cache or tab) touches them.
//!
//! Fetching, gemtext rendering, terminal drawing, and URL resolution live in
//! collaborator crates; this core consumes their outputs and drives them
//! through the capability traits in `skiff_types::ui`.

pub mod config;
pub mod document;
pub mod history;
pub mod links;
pub mod reflow;
pub mod session;
pub mod tab;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use config::SessionConfig;
pub use document::{Document, DocumentHandle, Mediatype, NavigationMode, PLACEHOLDER_SCHEME};
pub use history::History;
pub use links::{LinkSelector, SelectorAction};
pub use reflow::{ReflowGate, ReflowGuard, ReflowResult};
pub use session::Session;
pub use tab::{FollowRequest, Tab};
