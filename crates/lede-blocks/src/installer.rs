//! Placing declarative blocks into themes.
//!
//! The installer takes block definitions (usually loaded from a module's
//! `block.*.yml` files) and saves one placement per definition per target
//! theme. A theme is targeted when it is one of the configured defaults or
//! the active theme, and it actually exists; a placement is made only when
//! the theme has the requested region. Placement ids are deterministic —
//! `sanitise_id(theme + "_" + plugin)` — so re-running an install overwrites
//! rather than duplicates.
//!
//! Theme knowledge and block persistence stay behind the [`ThemeRegistry`]
//! and [`BlockStore`] traits; the in-memory implementations here are for
//! tests and simple hosts.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::debug;

use crate::definition::{load_block_definitions, BlockDefinition, PlacedBlock};
use crate::error::InstallError;
use crate::sanitise::sanitise_id;

/// What the installer needs to know about the site's themes.
pub trait ThemeRegistry {
    /// True if `theme` is installed.
    fn theme_exists(&self, theme: &str) -> bool;

    /// The region names `theme` defines. Unknown themes yield no regions.
    fn regions(&self, theme: &str) -> Vec<String>;

    /// The currently active theme, if any.
    fn active_theme(&self) -> Option<String>;
}

/// Persistence for block placements. Saving an existing id overwrites it.
pub trait BlockStore {
    /// Creates or overwrites the placement.
    fn save(&mut self, block: PlacedBlock) -> Result<(), InstallError>;
}

/// Installs declarative block definitions into target themes.
pub struct BlockInstaller<T, S> {
    themes: T,
    store: S,
    default_targets: Vec<String>,
    // Regions looked up once per theme per installer.
    region_cache: HashMap<String, Vec<String>>,
}

impl<T: ThemeRegistry, S: BlockStore> BlockInstaller<T, S> {
    /// Creates an installer with no default target themes.
    pub fn new(themes: T, store: S) -> Self {
        Self {
            themes,
            store,
            default_targets: Vec::new(),
            region_cache: HashMap::new(),
        }
    }

    /// Sets the themes targeted by every install, in addition to the active
    /// theme.
    pub fn with_default_targets<I>(mut self, targets: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.default_targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Loads definitions from `dir` and installs them.
    ///
    /// Returns the ids of the placements that were saved.
    pub fn install_dir(&mut self, dir: &Path) -> Result<Vec<String>, InstallError> {
        let blocks = load_block_definitions(dir)?;
        self.install(&blocks)
    }

    /// Installs `blocks` into every target theme that has their regions.
    ///
    /// Definitions whose region a theme lacks are skipped for that theme
    /// only. Returns the ids of the placements that were saved.
    pub fn install(&mut self, blocks: &[BlockDefinition]) -> Result<Vec<String>, InstallError> {
        let targets = self.target_themes();
        let mut placed = Vec::new();

        for theme in &targets {
            for block in blocks {
                if !self.theme_has_region(theme, &block.region) {
                    debug!(theme = %theme, region = %block.region, plugin = %block.plugin, "region absent, skipping");
                    continue;
                }

                let id = sanitise_id(&format!("{theme}_{}", block.plugin));
                debug!(theme = %theme, id = %id, "placing block");
                self.store.save(PlacedBlock {
                    id: id.clone(),
                    theme: theme.clone(),
                    definition: block.clone(),
                })?;
                placed.push(id);
            }
        }
        Ok(placed)
    }

    /// Consumes the installer, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Default targets plus the active theme, deduplicated, existing themes
    /// only.
    fn target_themes(&self) -> Vec<String> {
        let mut targets = self.default_targets.clone();
        if let Some(active) = self.themes.active_theme() {
            if !targets.contains(&active) {
                targets.push(active);
            }
        }
        targets.retain(|theme| self.themes.theme_exists(theme));
        targets
    }

    fn theme_has_region(&mut self, theme: &str, region: &str) -> bool {
        let regions = self
            .region_cache
            .entry(theme.to_string())
            .or_insert_with(|| self.themes.regions(theme));
        regions.iter().any(|r| r == region)
    }
}

/// Static [`ThemeRegistry`] for tests and simple hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticThemes {
    themes: HashMap<String, Vec<String>>,
    active: Option<String>,
}

impl StaticThemes {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `theme` with the given region names.
    pub fn add_theme<I>(mut self, theme: impl Into<String>, regions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.themes
            .insert(theme.into(), regions.into_iter().map(Into::into).collect());
        self
    }

    /// Marks `theme` as the active theme.
    pub fn active(mut self, theme: impl Into<String>) -> Self {
        self.active = Some(theme.into());
        self
    }
}

impl ThemeRegistry for StaticThemes {
    fn theme_exists(&self, theme: &str) -> bool {
        self.themes.contains_key(theme)
    }

    fn regions(&self, theme: &str) -> Vec<String> {
        self.themes.get(theme).cloned().unwrap_or_default()
    }

    fn active_theme(&self) -> Option<String> {
        self.active.clone()
    }
}

/// In-memory [`BlockStore`] keyed by placement id.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlockStore {
    blocks: BTreeMap<String, PlacedBlock>,
}

impl MemoryBlockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The placement stored under `id`.
    pub fn get(&self, id: &str) -> Option<&PlacedBlock> {
        self.blocks.get(id)
    }

    /// Number of stored placements.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates stored placements in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.blocks.values()
    }
}

impl BlockStore for MemoryBlockStore {
    fn save(&mut self, block: PlacedBlock) -> Result<(), InstallError> {
        self.blocks.insert(block.id.clone(), block);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_block() -> BlockDefinition {
        BlockDefinition {
            plugin: "page_header_block".into(),
            region: "content_top".into(),
            label: Some("Page header".into()),
            settings: BTreeMap::new(),
        }
    }

    fn sidebar_block() -> BlockDefinition {
        BlockDefinition {
            plugin: "related_links_block".into(),
            region: "sidebar".into(),
            label: None,
            settings: BTreeMap::new(),
        }
    }

    #[test]
    fn test_installs_into_every_theme_with_the_region() {
        let themes = StaticThemes::new()
            .add_theme("base", ["content_top", "sidebar"])
            .add_theme("scarfolk", ["content_top"]);
        let mut installer = BlockInstaller::new(themes, MemoryBlockStore::new())
            .with_default_targets(["base", "scarfolk"]);

        let placed = installer
            .install(&[header_block(), sidebar_block()])
            .unwrap();
        assert_eq!(
            placed,
            vec![
                "base_page_header_block",
                "base_related_links_block",
                "scarfolk_page_header_block",
            ]
        );

        let store = installer.into_store();
        assert_eq!(store.get("base_page_header_block").unwrap().theme, "base");
        // scarfolk has no sidebar region, so no related-links placement there.
        assert!(store.get("scarfolk_related_links_block").is_none());
    }

    #[test]
    fn test_active_theme_is_added_to_targets() {
        let themes = StaticThemes::new()
            .add_theme("base", ["content_top"])
            .add_theme("custom", ["content_top"])
            .active("custom");
        let mut installer =
            BlockInstaller::new(themes, MemoryBlockStore::new()).with_default_targets(["base"]);

        let placed = installer.install(&[header_block()]).unwrap();
        assert_eq!(
            placed,
            vec!["base_page_header_block", "custom_page_header_block"]
        );
    }

    #[test]
    fn test_active_theme_not_duplicated_when_already_a_default() {
        let themes = StaticThemes::new()
            .add_theme("base", ["content_top"])
            .active("base");
        let mut installer =
            BlockInstaller::new(themes, MemoryBlockStore::new()).with_default_targets(["base"]);

        let placed = installer.install(&[header_block()]).unwrap();
        assert_eq!(placed, vec!["base_page_header_block"]);
    }

    #[test]
    fn test_missing_themes_are_never_targeted() {
        let themes = StaticThemes::new().add_theme("base", ["content_top"]);
        let mut installer = BlockInstaller::new(themes, MemoryBlockStore::new())
            .with_default_targets(["base", "uninstalled"]);

        let placed = installer.install(&[header_block()]).unwrap();
        assert_eq!(placed, vec!["base_page_header_block"]);
    }

    #[test]
    fn test_reinstall_overwrites_by_id() {
        let themes = StaticThemes::new().add_theme("base", ["content_top"]);
        let mut installer =
            BlockInstaller::new(themes, MemoryBlockStore::new()).with_default_targets(["base"]);

        installer.install(&[header_block()]).unwrap();
        installer.install(&[header_block()]).unwrap();

        assert_eq!(installer.into_store().len(), 1);
    }

    #[test]
    fn test_ids_are_sanitised_per_theme() {
        let themes = StaticThemes::new().add_theme("My Theme!", ["content_top"]);
        let mut installer = BlockInstaller::new(themes, MemoryBlockStore::new())
            .with_default_targets(["My Theme!"]);

        let mut block = header_block();
        block.plugin = "Block".into();
        let placed = installer.install(&[block]).unwrap();
        assert_eq!(placed, vec!["my_theme_block"]);
    }

    #[test]
    fn test_no_targets_installs_nothing() {
        let themes = StaticThemes::new();
        let mut installer = BlockInstaller::new(themes, MemoryBlockStore::new());
        let placed = installer.install(&[header_block()]).unwrap();
        assert!(placed.is_empty());
    }
}
