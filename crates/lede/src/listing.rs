//! Collaborator traits for the listing engine and global-token service.
//!
//! The listing/query engine itself (filtering, sorting, field evaluation) is
//! out of scope for this crate; these traits are the seams it plugs into.
//!
//! # The row-token capability
//!
//! [`ListingRender`] carries an explicit capability for its per-row token
//! cache: [`row_tokens`](ListingRender::row_tokens) and
//! [`row_tokens_mut`](ListingRender::row_tokens_mut). The default
//! implementations return `None`, meaning "this listing keeps no such cache";
//! implementations that do keep one override both. The
//! [`bridge`](crate::bridge) operations go through this capability rather
//! than through any hidden internals, so every implementing variant exposes
//! its cache intentionally or not at all.

use std::collections::HashMap;

use crate::tokens::{replace_patterns, DisplayId, RowTokenCache, RowTokenSet};

/// The field/argument handler surface of a configured display.
///
/// Used by [`TokenCatalog`](crate::TokenCatalog) to enumerate the replacement
/// patterns available to administrators. Label pairs are `(key, admin label)`
/// in configuration order.
pub trait ListingDisplay {
    /// Stable identifier for this listing+display pairing.
    fn display_id(&self) -> DisplayId;

    /// Configured field handlers: `(field key, admin label)`.
    fn field_labels(&self) -> Vec<(String, String)>;

    /// Configured contextual-argument handlers: `(argument key, admin label)`.
    fn argument_labels(&self) -> Vec<(String, String)>;
}

/// A listing object mid-render: the thing that can substitute row tokens.
pub trait ListingRender {
    /// Substitutes this listing's field/argument tokens in `text` against the
    /// given result-row index. Text with no matching tokens (or a row the
    /// listing knows nothing about) comes back unchanged.
    fn substitute_row_tokens(&self, text: &str, row: usize) -> String;

    /// Read access to the per-row token cache, if this implementation keeps
    /// one.
    fn row_tokens(&self) -> Option<&RowTokenCache> {
        None
    }

    /// Write access to the per-row token cache, if this implementation keeps
    /// one.
    fn row_tokens_mut(&mut self) -> Option<&mut RowTokenCache> {
        None
    }
}

/// Site-wide token substitution, e.g. `[site:name]`-style patterns.
///
/// Applied as the second substitution stage on every non-raw lede,
/// independent of whether row tokenization is enabled.
pub trait GlobalTokens {
    /// Substitutes global tokens in `text`.
    fn substitute_global_tokens(&self, text: &str) -> String;
}

/// Reference [`ListingRender`] implementation backed by a [`RowTokenCache`].
///
/// Substitution applies whatever token set the cache holds for the requested
/// row. This is what integration tests drive, and a reasonable starting point
/// for listing engines that compute their row tokens up front.
#[derive(Debug, Clone, Default)]
pub struct BasicListing {
    cache: RowTokenCache,
}

impl BasicListing {
    /// Creates a listing with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a listing whose cache already holds `tokens` at `row`.
    pub fn with_row(row: usize, tokens: RowTokenSet) -> Self {
        let mut cache = RowTokenCache::new();
        cache.set_row(row, tokens);
        Self { cache }
    }
}

impl ListingRender for BasicListing {
    fn substitute_row_tokens(&self, text: &str, row: usize) -> String {
        match self.cache.row(row) {
            Some(tokens) => tokens.apply(text),
            None => text.to_string(),
        }
    }

    fn row_tokens(&self) -> Option<&RowTokenCache> {
        Some(&self.cache)
    }

    fn row_tokens_mut(&mut self) -> Option<&mut RowTokenCache> {
        Some(&mut self.cache)
    }
}

/// Map-backed [`GlobalTokens`] implementation.
///
/// An empty map substitutes nothing, which doubles as the no-op collaborator.
#[derive(Debug, Clone, Default)]
pub struct GlobalTokenMap {
    patterns: HashMap<String, String>,
}

impl GlobalTokenMap {
    /// Creates an empty (no-op) map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern/value pair, e.g. `("[site:name]", "Example")`.
    pub fn insert(&mut self, pattern: impl Into<String>, value: impl Into<String>) {
        self.patterns.insert(pattern.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GlobalTokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl GlobalTokens for GlobalTokenMap {
    fn substitute_global_tokens(&self, text: &str) -> String {
        let pairs: Vec<(&str, &str)> = self
            .patterns
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        replace_patterns(text, pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_listing_substitutes_cached_row() {
        let listing = BasicListing::with_row(0, [("{{ title }}", "First")].into_iter().collect());
        assert_eq!(listing.substitute_row_tokens("On {{ title }}", 0), "On First");
    }

    #[test]
    fn test_basic_listing_unknown_row_is_identity() {
        let listing = BasicListing::new();
        assert_eq!(
            listing.substitute_row_tokens("On {{ title }}", 0),
            "On {{ title }}"
        );
    }

    #[test]
    fn test_default_capability_is_absent() {
        struct NoCache;
        impl ListingRender for NoCache {
            fn substitute_row_tokens(&self, text: &str, _row: usize) -> String {
                text.to_string()
            }
        }

        let mut listing = NoCache;
        assert!(listing.row_tokens().is_none());
        assert!(listing.row_tokens_mut().is_none());
    }

    #[test]
    fn test_global_token_map_substitutes() {
        let globals: GlobalTokenMap = [("[site:name]", "Example Council")].into_iter().collect();
        assert_eq!(
            globals.substitute_global_tokens("Welcome to [site:name]"),
            "Welcome to Example Council"
        );
    }

    #[test]
    fn test_empty_global_token_map_is_noop() {
        let globals = GlobalTokenMap::new();
        assert_eq!(globals.substitute_global_tokens("unchanged"), "unchanged");
    }
}
