//! First-row token hand-off between render passes.
//!
//! A page build may construct the same logical listing twice: once to render
//! the results (which computes real row data), and once more in a pass that
//! rebuilds the listing without executing it — a metadata or header pass that
//! therefore cannot derive row tokens itself. [`RowTokenRegistry`] is the one
//! authorized channel between the two: the first pass `capture`s the first
//! row's tokens under the display's id, the second pass `fetch`es them.
//!
//! The registry is an explicitly constructed value, owned by the application
//! context and shared by reference (typically `Rc<RefCell<_>>`) with every
//! component that needs it. There is no process-global instance.
//!
//! # Staleness
//!
//! Entries are never expired and are keyed by [`DisplayId`] alone, not by a
//! version of the underlying result set. A fetch that happens before a fresh
//! capture — say, the same display requested with different argument values —
//! reads the previous request's tokens. Callers that need a hard boundary
//! should [`clear`](RowTokenRegistry::clear) the registry between requests.

use std::collections::HashMap;

use tracing::debug;

use crate::tokens::{DisplayId, RowTokenSet};

/// Mapping of display identifier to the captured first-row token set.
///
/// Last write wins per key; keys are isolated from each other; reads never
/// remove entries.
#[derive(Debug, Clone, Default)]
pub struct RowTokenRegistry {
    captured: HashMap<DisplayId, RowTokenSet>,
}

impl RowTokenRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `tokens` under `display`, overwriting any prior value.
    pub fn capture(&mut self, display: DisplayId, tokens: RowTokenSet) {
        let display_id = &display;
        debug!(display = %display_id, tokens = tokens.len(), "captured first-row tokens");
        self.captured.insert(display, tokens);
    }

    /// Returns a copy of the latest captured set for `display`, or an empty
    /// set if nothing has been captured.
    pub fn fetch(&self, display: &DisplayId) -> RowTokenSet {
        self.captured.get(display).cloned().unwrap_or_default()
    }

    /// Returns true if a set has been captured for `display`.
    pub fn contains(&self, display: &DisplayId) -> bool {
        self.captured.contains_key(display)
    }

    /// Number of displays with a captured set.
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Returns true if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    /// Drops every captured set. Request-boundary hygiene for callers that
    /// cannot tolerate stale entries; never called by this crate.
    pub fn clear(&mut self) {
        self.captured.clear();
    }
}
