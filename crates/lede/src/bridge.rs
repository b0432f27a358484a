//! Moving token sets into and out of a listing's row cache.
//!
//! A listing object built without executing its query holds no row tokens, so
//! substitution against it would be a no-op. [`inject`] force-seeds such an
//! object's cache with a captured first-row set; [`extract`] is the other
//! direction, used by the pass that actually computed the rows to snapshot
//! them for [`RowTokenRegistry::capture`](crate::RowTokenRegistry::capture).
//!
//! Both operations go through the [`ListingRender`] row-cache capability. A
//! listing that keeps no cache fails with
//! [`LedeError::BridgeIncompatibility`]: an incompatible listing engine, not
//! a transient condition.

use tracing::trace;

use crate::error::LedeError;
use crate::listing::ListingRender;
use crate::tokens::RowTokenSet;

/// Seeds `listing`'s row cache with `tokens` as its sole row-0 entry.
///
/// Whatever rows the cache held are discarded, so subsequent substitution
/// against row 0 resolves from `tokens` regardless of the listing's natural
/// state. An empty set leaves the cache untouched: only real captured values
/// may displace a listing's own state.
///
/// # Errors
///
/// [`LedeError::BridgeIncompatibility`] if the listing exposes no row cache.
pub fn inject(listing: &mut dyn ListingRender, tokens: &RowTokenSet) -> Result<(), LedeError> {
    let cache = listing
        .row_tokens_mut()
        .ok_or(LedeError::BridgeIncompatibility)?;
    if tokens.is_empty() {
        return Ok(());
    }
    trace!(tokens = tokens.len(), "seeding first-row token cache");
    cache.seed_first_row(tokens.clone());
    Ok(())
}

/// Reads the row-0 token set currently cached on `listing`.
///
/// Returns an empty set if the cache holds nothing for row 0.
///
/// # Errors
///
/// [`LedeError::BridgeIncompatibility`] if the listing exposes no row cache.
pub fn extract(listing: &dyn ListingRender) -> Result<RowTokenSet, LedeError> {
    let cache = listing.row_tokens().ok_or(LedeError::BridgeIncompatibility)?;
    Ok(cache.row(0).cloned().unwrap_or_default())
}
