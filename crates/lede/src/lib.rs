//! # Lede - Templated page headers for listing displays
//!
//! A listing page's header can show a short templated summary (the "lede")
//! whose placeholders resolve from the listing's first result row — even when
//! the code asking for the header reconstructed the listing without executing
//! it. This crate provides the pieces that make that work:
//!
//! - [`LedeConfig`]: per-display settings — template text + tokenize flag
//! - [`TokenCatalog`]: the replacement patterns a display offers, for help text
//! - [`RowTokenRegistry`]: first-row token hand-off between render passes
//! - [`bridge`]: seeding/snapshotting a listing's row-token cache
//! - [`LedeResolver`]: the two-stage substitution pipeline (row tokens, then
//!   global tokens)
//! - [`DisplayLede`]: the per-display facade tying the above together
//!
//! The listing engine itself stays behind the [`ListingDisplay`],
//! [`ListingRender`] and [`GlobalTokens`] traits; [`BasicListing`] and
//! [`GlobalTokenMap`] are reference implementations.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use lede::{BasicListing, DisplayId, DisplayLede, GlobalTokenMap, LedeConfig, RowTokenRegistry};
//!
//! // One registry per worker, shared with every display facade.
//! let registry = Rc::new(RefCell::new(RowTokenRegistry::new()));
//!
//! let header = DisplayLede::with_config(
//!     DisplayId::new("recent_content.page_1"),
//!     LedeConfig::with_values("The latest pages, including {{ title }}", true),
//!     registry.clone(),
//! );
//!
//! // The pass that executed the listing captures its first row...
//! header.capture_first_row([("{{ title }}", "page 10 title")].into_iter().collect());
//!
//! // ...and a later pass resolves against a freshly built listing object.
//! let mut listing = BasicListing::new();
//! let globals = GlobalTokenMap::new();
//! let text = header.lede(&mut listing, &globals, false).unwrap();
//! assert_eq!(text, "The latest pages, including page 10 title");
//! ```
//!
//! ## Raw mode
//!
//! `lede(..., raw = true)` returns the configured text verbatim, for callers
//! that feed a downstream generator doing its own substitution.

pub mod bridge;
mod catalog;
mod config;
mod error;
mod extender;
mod listing;
mod registry;
mod resolver;
mod tokens;

pub use catalog::{TokenCatalog, TokenHelp};
pub use config::{coerce_submitted, LedeConfig, SUMMARY_CUSTOM, SUMMARY_NONE};
pub use error::LedeError;
pub use extender::{DisplayLede, OptionsSummary};
pub use listing::{BasicListing, GlobalTokenMap, GlobalTokens, ListingDisplay, ListingRender};
pub use registry::RowTokenRegistry;
pub use resolver::LedeResolver;
pub use tokens::{DisplayId, RowTokenCache, RowTokenSet, TokenEntry};
