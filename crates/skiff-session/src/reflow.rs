//! Reflow coordination: at most one reflow per tab, stale results dropped.
//!
//! Recomputing a document's rendered form when the terminal width changes is
//! the render collaborator's job; this module only serializes that work. A
//! resize or navigation arriving mid-reflow retries on a later event rather
//! than interleave. There is no cancellation primitive: a reflow finishing
//! after the width moved again is detected by width comparison at commit
//! time and discarded.

use std::cell::Cell;
use std::rc::Rc;

use crate::document::DocumentHandle;

/// Whether `doc` must be reflowed before redisplay at `live_width`.
pub fn needs_reflow(doc: &DocumentHandle, live_width: u16) -> bool {
    doc.get().term_width != live_width
}

/// Non-reentrant "reflow in progress" flag, one per tab.
#[derive(Debug, Clone, Default)]
pub struct ReflowGate {
    busy: Rc<Cell<bool>>,
}

impl ReflowGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a reflow targeting `width`.
    ///
    /// Returns `None` while another reflow is in flight.
    pub fn begin(&self, width: u16) -> Option<ReflowGuard> {
        if self.busy.get() {
            return None;
        }
        self.busy.set(true);
        Some(ReflowGuard {
            busy: Rc::clone(&self.busy),
            width,
        })
    }

    /// Whether a reflow is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.busy.get()
    }
}

/// Output of the render collaborator's reflow pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflowResult {
    /// Recomputed display-ready content.
    pub content: String,
    /// Recomputed preformatted-line width, -1 for unbounded.
    pub max_pre_cols: i32,
}

/// Scoped acquisition of the reflow flag.
///
/// Dropping the guard releases the flag on every exit path, committed or
/// not.
#[derive(Debug)]
pub struct ReflowGuard {
    busy: Rc<Cell<bool>>,
    width: u16,
}

impl ReflowGuard {
    /// Width this reflow was started for.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Install the recomputed content into `doc` if the live width still
    /// matches the width the reflow was started for.
    ///
    /// A result that lost the race to a newer resize is discarded. Returns
    /// whether the result was installed.
    pub fn commit(self, doc: &DocumentHandle, live_width: u16, result: ReflowResult) -> bool {
        if live_width != self.width {
            log::debug!(
                "discarding stale reflow of {}: width {} -> {}",
                doc.get().url,
                self.width,
                live_width
            );
            return false;
        }
        let mut d = doc.get_mut();
        d.content = result.content;
        d.max_pre_cols = result.max_pre_cols;
        d.term_width = self.width;
        true
    }
}

impl Drop for ReflowGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
