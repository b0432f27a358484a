//! # Lede Blocks - Declarative block placement for themes
//!
//! Modules ship `block.<name>.yml` files declaring which block plugin goes in
//! which theme region. [`BlockInstaller`] reads those definitions and saves
//! one placement per definition into every target theme that exists and has
//! the requested region, under a deterministic sanitised id — so installs are
//! idempotent and re-runs overwrite instead of duplicating.
//!
//! Site specifics stay behind traits: [`ThemeRegistry`] answers what themes
//! and regions exist, [`BlockStore`] persists placements.
//!
//! ## Quick Start
//!
//! ```rust
//! use lede_blocks::{BlockDefinition, BlockInstaller, MemoryBlockStore, StaticThemes};
//!
//! let themes = StaticThemes::new()
//!     .add_theme("base", ["content_top", "sidebar"])
//!     .active("base");
//!
//! let mut installer = BlockInstaller::new(themes, MemoryBlockStore::new())
//!     .with_default_targets(["base"]);
//!
//! let header = BlockDefinition {
//!     plugin: "page_header_block".into(),
//!     region: "content_top".into(),
//!     label: Some("Page header".into()),
//!     settings: Default::default(),
//! };
//!
//! let placed = installer.install(&[header]).unwrap();
//! assert_eq!(placed, vec!["base_page_header_block"]);
//! ```

mod definition;
mod error;
mod installer;
mod sanitise;

pub use definition::{load_block_definitions, BlockDefinition, PlacedBlock};
pub use error::InstallError;
pub use installer::{BlockInstaller, BlockStore, MemoryBlockStore, StaticThemes, ThemeRegistry};
pub use sanitise::sanitise_id;
