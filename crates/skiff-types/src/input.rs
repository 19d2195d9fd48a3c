//! Platform-agnostic key input events.
//!
//! Every terminal backend maps its native key input to this enum. The session
//! core never sees raw escape sequences, and events arrive one at a time.

use serde::{Deserialize, Serialize};

/// A key event delivered to the session core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEvent {
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Shift-Tab.
    BackTab,
    /// Any other key. Absorbed without effect while a link selection is
    /// active.
    Other,
}
