//! Token and identifier types shared across the crate.
//!
//! A lede template contains replacement patterns such as `{{ title }}` or
//! `{{ arguments.term }}`. A [`RowTokenSet`] maps those patterns (verbatim,
//! including the braces) to the values a listing computed for one result row.
//! [`RowTokenCache`] is the per-row store a listing implementation keeps while
//! iterating its result set; row 0 is the "first row" everything in this crate
//! anchors to.
//!
//! Substitution is a single left-to-right pass: replaced text is never
//! re-scanned, so a token value that happens to contain another pattern is
//! emitted literally.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier for one listing+display pairing.
///
/// Two separately constructed listing objects that represent "the same"
/// display must report equal `DisplayId`s; that equality is what makes the
/// first-row hand-off in [`RowTokenRegistry`](crate::RowTokenRegistry) work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(String);

impl DisplayId {
    /// Creates an identifier from any string-ish value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DisplayId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One replacement pattern and the value it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// The pattern as it appears in lede text, e.g. `{{ title }}`.
    pub placeholder: String,
    /// The value substituted for the pattern.
    pub resolved_value: String,
}

impl TokenEntry {
    /// Creates an entry from a placeholder/value pair.
    pub fn new(placeholder: impl Into<String>, resolved_value: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            resolved_value: resolved_value.into(),
        }
    }
}

/// The token values available for one result row.
///
/// Keys are unique and insertion order is irrelevant; inserting a placeholder
/// twice keeps the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowTokenSet {
    entries: HashMap<String, String>,
}

impl RowTokenSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a placeholder/value pair, replacing any prior value.
    pub fn insert(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(placeholder.into(), value.into());
    }

    /// Looks up the value for a placeholder.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries.get(placeholder).map(String::as_str)
    }

    /// Returns true if the set holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tokens in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the set as [`TokenEntry`] values, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = TokenEntry> + '_ {
        self.entries
            .iter()
            .map(|(placeholder, value)| TokenEntry::new(placeholder.clone(), value.clone()))
    }

    /// Substitutes every known placeholder in `text`.
    ///
    /// Unknown `{{ }}`-shaped text is left untouched; this is a pattern
    /// replacement, not a template language.
    pub fn apply(&self, text: &str) -> String {
        let pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        replace_patterns(text, pairs)
    }
}

impl FromIterator<TokenEntry> for RowTokenSet {
    fn from_iter<I: IntoIterator<Item = TokenEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry.placeholder, entry.resolved_value);
        }
        set
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RowTokenSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Per-row token store kept by a listing implementation.
///
/// Rows are keyed by result-row index. The cache is private state of the
/// listing object; this crate only touches it through the capability
/// accessors on [`ListingRender`](crate::ListingRender).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTokenCache {
    rows: BTreeMap<usize, RowTokenSet>,
}

impl RowTokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the token set for a row, replacing any prior set.
    pub fn set_row(&mut self, row: usize, tokens: RowTokenSet) {
        self.rows.insert(row, tokens);
    }

    /// The token set for a row, if one has been stored.
    pub fn row(&self, row: usize) -> Option<&RowTokenSet> {
        self.rows.get(&row)
    }

    /// Discards every stored row and seats `tokens` as the sole row-0 entry.
    pub fn seed_first_row(&mut self, tokens: RowTokenSet) {
        self.rows.clear();
        self.rows.insert(0, tokens);
    }

    /// Returns true if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes all stored rows.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Single-pass pattern replacement over `text`.
///
/// Longer patterns win when two match at the same position; replaced output
/// is never re-scanned.
pub(crate) fn replace_patterns(text: &str, mut pairs: Vec<(&str, &str)>) -> String {
    pairs.retain(|(pattern, _)| !pattern.is_empty());
    if pairs.is_empty() {
        return text.to_string();
    }
    // Longest pattern first; ties broken lexicographically for determinism.
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(c) = rest.chars().next() {
        for (pattern, value) in &pairs {
            if rest.starts_with(pattern) {
                out.push_str(value);
                rest = &rest[pattern.len()..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}
