//! Error types for lede resolution.

use thiserror::Error;

/// Error type for lede resolution and catalog operations.
///
/// Only [`BridgeIncompatibility`](LedeError::BridgeIncompatibility) halts a
/// resolution; malformed settings and missing catalog entries degrade to
/// defaults or empty output instead of erroring.
#[derive(Debug, Error)]
pub enum LedeError {
    /// The listing implementation exposes no per-row token cache, so first-row
    /// tokens cannot be bridged into or out of it. This is a structural
    /// mismatch with the listing engine, not a transient condition.
    #[error("listing object does not expose a row token cache")]
    BridgeIncompatibility,

    /// The embedded token-help template failed to render.
    #[error("failed to render token help: {0}")]
    HelpRender(#[from] minijinja::Error),
}
