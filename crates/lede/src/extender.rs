//! Per-display facade for the page-header rendering collaborator.
//!
//! [`DisplayLede`] ties together the three per-display pieces — the
//! [`DisplayId`], the owned [`LedeConfig`], and the shared
//! [`RowTokenRegistry`] — behind the surface the page-header renderer
//! consumes: resolve the lede, capture or snapshot first-row tokens, and
//! summarize the settings for admin UIs.
//!
//! The registry is shared as `Rc<RefCell<_>>`: one instance per worker,
//! handed to every facade for every display it serves. Resolution happens on
//! a single thread per request, so the `RefCell` borrows never overlap.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::bridge;
use crate::config::LedeConfig;
use crate::error::LedeError;
use crate::listing::{GlobalTokens, ListingRender};
use crate::registry::RowTokenRegistry;
use crate::resolver::LedeResolver;
use crate::tokens::{DisplayId, RowTokenSet};

/// Category/title/value triple describing the lede settings in an admin UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsSummary {
    /// Settings category the option belongs to.
    pub category: &'static str,
    /// Option title within the category.
    pub title: &'static str,
    /// Current value summary.
    pub value: &'static str,
}

/// The lede surface of one display.
pub struct DisplayLede {
    display: DisplayId,
    config: LedeConfig,
    registry: Rc<RefCell<RowTokenRegistry>>,
}

impl DisplayLede {
    /// Creates the facade for `display` with default settings.
    pub fn new(display: DisplayId, registry: Rc<RefCell<RowTokenRegistry>>) -> Self {
        Self::with_config(display, LedeConfig::new(), registry)
    }

    /// Creates the facade with settings loaded from persisted configuration.
    pub fn with_config(
        display: DisplayId,
        config: LedeConfig,
        registry: Rc<RefCell<RowTokenRegistry>>,
    ) -> Self {
        Self {
            display,
            config,
            registry,
        }
    }

    /// The display this facade serves.
    pub fn display_id(&self) -> &DisplayId {
        &self.display
    }

    /// The current lede settings.
    pub fn config(&self) -> &LedeConfig {
        &self.config
    }

    /// Applies submitted settings-form values (permissively coerced).
    pub fn apply_submitted(&mut self, values: &Value) {
        self.config.apply_submitted(values);
    }

    /// Resolves the lede for display, or returns it raw.
    ///
    /// See [`LedeResolver::resolve`] for the pipeline and error semantics.
    pub fn lede(
        &self,
        listing: &mut dyn ListingRender,
        globals: &dyn GlobalTokens,
        raw: bool,
    ) -> Result<String, LedeError> {
        let registry = self.registry.borrow();
        LedeResolver::new(&registry, globals).resolve(&self.config, &self.display, listing, raw)
    }

    /// Captures `tokens` as this display's first-row set.
    ///
    /// Called by the render pass that computed the row data, so a later pass
    /// serving the same display can resolve the same values.
    pub fn capture_first_row(&self, tokens: RowTokenSet) {
        self.registry
            .borrow_mut()
            .capture(self.display.clone(), tokens);
    }

    /// Snapshots the first-row tokens currently cached on `listing` and
    /// captures them for this display.
    ///
    /// # Errors
    ///
    /// [`LedeError::BridgeIncompatibility`] if `listing` exposes no row
    /// cache to read from.
    pub fn snapshot_first_row(&self, listing: &dyn ListingRender) -> Result<(), LedeError> {
        let tokens = bridge::extract(listing)?;
        self.capture_first_row(tokens);
        Ok(())
    }

    /// The read-only settings summary for admin UIs.
    pub fn options_summary(&self) -> OptionsSummary {
        OptionsSummary {
            category: "Page header",
            title: "Page header",
            value: self.config.summary(),
        }
    }
}
