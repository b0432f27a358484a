//! Replacement-pattern catalog for administrator help text.
//!
//! The catalog enumerates the patterns a display's lede can use: one per
//! configured field, and a title/input pair per contextual argument. It is
//! pure and side-effect-free — nothing here participates in substitution, the
//! catalog exists only to tell administrators what they can type.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::error::LedeError;
use crate::listing::ListingDisplay;

const HELP_TEMPLATE: &str = include_str!("token_help.jinja");

/// One replacement pattern with its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenHelp {
    /// The pattern as typed into lede text, e.g. `{{ title }}`.
    pub pattern: String,
    /// Human label, e.g. `Page title` or `Term title`.
    pub label: String,
}

impl TokenHelp {
    fn new(pattern: String, label: String) -> Self {
        Self { pattern, label }
    }
}

/// The replacement patterns available to a display, grouped for help text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenCatalog {
    /// Field patterns: `{{ fieldKey }}`.
    pub fields: Vec<TokenHelp>,
    /// Argument patterns: `{{ arguments.argKey }}` and
    /// `{{ raw_arguments.argKey }}`.
    pub arguments: Vec<TokenHelp>,
}

impl TokenCatalog {
    /// Builds the catalog for a display from its configured handlers.
    ///
    /// A display with no field or argument handlers yields an empty catalog;
    /// that is not an error.
    pub fn for_display(display: &dyn ListingDisplay) -> Self {
        let fields = display
            .field_labels()
            .into_iter()
            .map(|(key, label)| TokenHelp::new(format!("{{{{ {key} }}}}"), label))
            .collect();

        let mut arguments = Vec::new();
        for (key, label) in display.argument_labels() {
            arguments.push(TokenHelp::new(
                format!("{{{{ arguments.{key} }}}}"),
                format!("{label} title"),
            ));
            arguments.push(TokenHelp::new(
                format!("{{{{ raw_arguments.{key} }}}}"),
                format!("{label} input"),
            ));
        }

        Self { fields, arguments }
    }

    /// Returns true if the display offers no replacement patterns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.arguments.is_empty()
    }

    /// Renders the catalog as help text for the settings form.
    ///
    /// An empty catalog renders to an empty string.
    pub fn render_help(&self) -> Result<String, LedeError> {
        if self.is_empty() {
            return Ok(String::new());
        }

        let mut env = Environment::new();
        env.add_template("token-help", HELP_TEMPLATE)?;
        let rendered = env.get_template("token-help")?.render(context! {
            fields => self.fields,
            arguments => self.arguments,
        })?;
        Ok(rendered)
    }
}
