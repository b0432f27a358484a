//! The two-stage lede substitution pipeline.
//!
//! Resolution is a fixed linear sequence: empty-text short-circuit, raw-mode
//! bypass, optional first-row injection from the registry, optional row-token
//! substitution, unconditional global-token substitution. No state machine,
//! no retries, nothing suspends.

use tracing::debug;

use crate::bridge;
use crate::config::LedeConfig;
use crate::error::LedeError;
use crate::listing::{GlobalTokens, ListingRender};
use crate::registry::RowTokenRegistry;
use crate::tokens::DisplayId;

/// Produces final lede text from a display's config and collaborators.
///
/// Borrows the registry and the global-token service for the duration of one
/// resolution; construct it ad hoc wherever a lede is needed.
pub struct LedeResolver<'a> {
    registry: &'a RowTokenRegistry,
    globals: &'a dyn GlobalTokens,
}

impl<'a> LedeResolver<'a> {
    /// Creates a resolver over the shared registry and global-token service.
    pub fn new(registry: &'a RowTokenRegistry, globals: &'a dyn GlobalTokens) -> Self {
        Self { registry, globals }
    }

    /// Resolves the lede for `display` against `listing`.
    ///
    /// With `raw` set, the configured text is returned verbatim — no
    /// substitution of any kind; callers use this to feed a downstream
    /// generator that does its own substitution. Otherwise any captured
    /// first-row tokens are seeded into `listing` first, row-token
    /// substitution runs if the config enables it (always against row 0, the
    /// conceptual first row), and global tokens are substituted last.
    ///
    /// Row-token substitution is gated on the tokenize flag alone; global
    /// substitution runs for every non-raw resolution. A `{{ }}`-shaped
    /// pattern in a non-tokenized lede passes through untouched.
    ///
    /// # Errors
    ///
    /// [`LedeError::BridgeIncompatibility`] if captured tokens exist for
    /// `display` but `listing` exposes no row cache to seed them into.
    pub fn resolve(
        &self,
        config: &LedeConfig,
        display: &DisplayId,
        listing: &mut dyn ListingRender,
        raw: bool,
    ) -> Result<String, LedeError> {
        if config.text().is_empty() {
            return Ok(String::new());
        }
        if raw {
            return Ok(config.text().to_string());
        }

        let captured = self.registry.fetch(display);
        if !captured.is_empty() {
            let display_id = display;
            debug!(display = %display_id, "seeding captured first-row tokens");
            bridge::inject(listing, &captured)?;
        }

        let mut lede = config.text().to_string();
        if config.tokenize() {
            lede = listing.substitute_row_tokens(&lede, 0);
        }
        Ok(self.globals.substitute_global_tokens(&lede))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{BasicListing, GlobalTokenMap};
    use crate::tokens::RowTokenSet;

    fn tokens(pairs: &[(&str, &str)]) -> RowTokenSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_text_short_circuits() {
        let mut registry = RowTokenRegistry::new();
        let id = DisplayId::new("d");
        registry.capture(id.clone(), tokens(&[("{{ t }}", "v")]));
        let globals: GlobalTokenMap = [("[site:name]", "Example")].into_iter().collect();
        let resolver = LedeResolver::new(&registry, &globals);

        for tokenize in [false, true] {
            let config = LedeConfig::with_values("", tokenize);
            let mut listing = BasicListing::new();
            let out = resolver.resolve(&config, &id, &mut listing, false).unwrap();
            assert_eq!(out, "");
        }
    }

    #[test]
    fn test_raw_bypasses_all_substitution() {
        let mut registry = RowTokenRegistry::new();
        let id = DisplayId::new("d");
        registry.capture(id.clone(), tokens(&[("{{ title }}", "captured")]));
        let globals: GlobalTokenMap = [("[site:name]", "Example")].into_iter().collect();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("{{ title }} on [site:name]", true);
        let mut listing = BasicListing::new();
        let out = resolver.resolve(&config, &id, &mut listing, true).unwrap();
        assert_eq!(out, "{{ title }} on [site:name]");
    }

    #[test]
    fn test_tokenize_disabled_still_applies_globals() {
        let registry = RowTokenRegistry::new();
        let globals: GlobalTokenMap = [("[site:name]", "Example")].into_iter().collect();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("{{ title }} on [site:name]", false);
        let mut listing =
            BasicListing::with_row(0, tokens(&[("{{ title }}", "should not appear")]));
        let out = resolver
            .resolve(&config, &DisplayId::new("d"), &mut listing, false)
            .unwrap();
        // Row stage skipped entirely; the braces survive.
        assert_eq!(out, "{{ title }} on Example");
    }

    #[test]
    fn test_tokenize_uses_listings_own_row_when_nothing_captured() {
        let registry = RowTokenRegistry::new();
        let globals = GlobalTokenMap::new();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("Featuring {{ title }}", true);
        let mut listing = BasicListing::with_row(0, tokens(&[("{{ title }}", "natural row")]));
        let out = resolver
            .resolve(&config, &DisplayId::new("d"), &mut listing, false)
            .unwrap();
        assert_eq!(out, "Featuring natural row");
    }

    #[test]
    fn test_captured_tokens_override_listing_state() {
        let mut registry = RowTokenRegistry::new();
        let id = DisplayId::new("d");
        registry.capture(id.clone(), tokens(&[("{{ title }}", "captured")]));
        let globals = GlobalTokenMap::new();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("Featuring {{ title }}", true);
        let mut listing = BasicListing::with_row(0, tokens(&[("{{ title }}", "natural")]));
        let out = resolver.resolve(&config, &id, &mut listing, false).unwrap();
        assert_eq!(out, "Featuring captured");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut registry = RowTokenRegistry::new();
        let id = DisplayId::new("d");
        registry.capture(id.clone(), tokens(&[("{{ title }}", "captured")]));
        let globals: GlobalTokenMap = [("[site:name]", "Example")].into_iter().collect();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("{{ title }} on [site:name]", true);
        let mut listing = BasicListing::new();
        let first = resolver.resolve(&config, &id, &mut listing, false).unwrap();
        let second = resolver.resolve(&config, &id, &mut listing, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bridge_incompatibility_propagates() {
        struct NoCache;
        impl ListingRender for NoCache {
            fn substitute_row_tokens(&self, text: &str, _row: usize) -> String {
                text.to_string()
            }
        }

        let mut registry = RowTokenRegistry::new();
        let id = DisplayId::new("d");
        registry.capture(id.clone(), tokens(&[("{{ t }}", "v")]));
        let globals = GlobalTokenMap::new();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("text", false);
        let mut listing = NoCache;
        let err = resolver.resolve(&config, &id, &mut listing, false).unwrap_err();
        assert!(matches!(err, LedeError::BridgeIncompatibility));
    }

    #[test]
    fn test_no_captured_tokens_skips_bridge_entirely() {
        // A cache-less listing is fine as long as nothing needs injecting.
        struct NoCache;
        impl ListingRender for NoCache {
            fn substitute_row_tokens(&self, text: &str, _row: usize) -> String {
                text.to_string()
            }
        }

        let registry = RowTokenRegistry::new();
        let globals = GlobalTokenMap::new();
        let resolver = LedeResolver::new(&registry, &globals);

        let config = LedeConfig::with_values("Plain text", true);
        let mut listing = NoCache;
        let out = resolver
            .resolve(&config, &DisplayId::new("d"), &mut listing, false)
            .unwrap();
        assert_eq!(out, "Plain text");
    }
}
