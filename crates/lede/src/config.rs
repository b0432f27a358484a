//! Per-display lede settings.
//!
//! A display owns exactly one [`LedeConfig`]. The config is persisted as part
//! of the display's serialized settings and edited through a settings form
//! whose submitted values arrive as loose JSON — hence the permissive
//! [`coerce_submitted`] step: malformed values never error, they fall back to
//! the defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary shown in admin UIs when lede text is configured.
pub const SUMMARY_CUSTOM: &str = "Custom lede";

/// Summary shown in admin UIs when no lede text is configured.
pub const SUMMARY_NONE: &str = "No lede";

/// Lede settings for one display: template text plus the tokenize flag.
///
/// Defaults to `("", false)`. The `tokenize` flag only controls row-token
/// substitution; global tokens are always applied to a non-raw lede.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedeConfig {
    lede: String,
    tokenize: bool,
}

impl LedeConfig {
    /// Creates a config with the defaults: empty text, tokenization off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from explicit values.
    pub fn with_values(lede: impl Into<String>, tokenize: bool) -> Self {
        Self {
            lede: lede.into(),
            tokenize,
        }
    }

    /// The lede template text.
    pub fn text(&self) -> &str {
        &self.lede
    }

    /// Whether first-row token substitution is enabled.
    pub fn tokenize(&self) -> bool {
        self.tokenize
    }

    /// Replaces both settings at once.
    pub fn set(&mut self, lede: impl Into<String>, tokenize: bool) {
        self.lede = lede.into();
        self.tokenize = tokenize;
    }

    /// Applies submitted settings-form values.
    ///
    /// Runs [`coerce_submitted`] over `values` and replaces the stored
    /// settings with whatever survives coercion.
    pub fn apply_submitted(&mut self, values: &Value) {
        let (lede, tokenize) = coerce_submitted(values);
        self.set(lede, tokenize);
    }

    /// One-line summary of this config for admin UIs.
    ///
    /// Strictly about text presence; the tokenize flag does not affect it.
    pub fn summary(&self) -> &'static str {
        if self.lede.is_empty() {
            SUMMARY_NONE
        } else {
            SUMMARY_CUSTOM
        }
    }
}

/// Permissive validation of submitted settings values.
///
/// Reads `values["lede"]` and `values["tokenize"]`; a missing or non-string
/// lede coerces to `""`, a missing or non-boolean tokenize coerces to
/// `false`. Invalid input is expected (settings forms submit loose data) and
/// never an error.
pub fn coerce_submitted(values: &Value) -> (String, bool) {
    let lede = values
        .get("lede")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let tokenize = values
        .get("tokenize")
        .and_then(Value::as_bool)
        .unwrap_or_default();
    (lede, tokenize)
}
