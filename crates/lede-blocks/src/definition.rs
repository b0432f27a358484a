//! Declarative block definitions and their on-disk format.
//!
//! Modules ship block definitions as YAML files named `block.<name>.yml`
//! inside a definitions directory. Each file holds one definition: the block
//! plugin to place, the theme region to place it in, an optional label, and
//! free-form plugin settings. The placement id and target theme are not part
//! of the file — the installer derives them per theme.
//!
//! ```yaml
//! plugin: page_header_block
//! region: content_top
//! label: Page header
//! settings:
//!   label_display: false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InstallError;

/// One declarative block definition, as read from a `block.*.yml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// The block plugin to place.
    pub plugin: String,
    /// The theme region to place it in.
    pub region: String,
    /// Optional human label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form plugin settings, passed through as-is.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, serde_yaml::Value>,
}

/// A definition resolved against one concrete theme, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    /// Deterministic configuration id: `sanitise_id(theme + "_" + plugin)`.
    pub id: String,
    /// The theme this placement belongs to.
    pub theme: String,
    /// The definition being placed.
    pub definition: BlockDefinition,
}

/// True for file names the definition scan picks up: `block.<name>.yml`.
fn is_definition_file(name: &str) -> bool {
    match name.strip_suffix(".yml") {
        Some(stem) => match stem.find("block.") {
            Some(pos) => stem.len() > pos + "block.".len(),
            None => false,
        },
        None => false,
    }
}

/// Reads every block definition under `dir`.
///
/// A missing directory yields no definitions — modules without block
/// definitions are normal. Files are processed in name order so results are
/// deterministic across platforms.
///
/// # Errors
///
/// [`InstallError::Io`] if the directory or a definition file cannot be
/// read; [`InstallError::Parse`] if a definition is not valid YAML for
/// [`BlockDefinition`].
pub fn load_block_definitions(dir: &Path) -> Result<Vec<BlockDefinition>, InstallError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| InstallError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| InstallError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_definition_file);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut blocks = Vec::with_capacity(files.len());
    for path in files {
        let raw = fs::read_to_string(&path).map_err(|source| InstallError::Io {
            path: path.clone(),
            source,
        })?;
        let block = serde_yaml::from_str(&raw)
            .map_err(|source| InstallError::Parse { path, source })?;
        blocks.push(block);
    }
    Ok(blocks)
}
