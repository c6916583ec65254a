//! Stylesheet generation from a parsed theme.
//!
//! [`CssGenerator`] renders a minijinja template. The template receives:
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `scope` | Selector every rule is nested under (default `.tinct-app`) |
//! | `custom_properties` | Whether values are emitted as CSS variables |
//! | `properties` | `{ name, value }` pairs for the `:root` block |
//! | `anchor` | Link color reference, or none |
//! | `colors` | `{ role, css }` pairs, `css` being a literal or a `var()` reference |

use minijinja::Environment;
use serde::Serialize;

use super::parse::{ParsedTheme, ANCHOR_ROLE};
use crate::error::ThemeError;

/// Produces CSS text from a parsed theme.
pub trait StyleGenerator {
    fn generate(&self, theme: &ParsedTheme, custom_properties: bool) -> String;
}

impl<F> StyleGenerator for F
where
    F: Fn(&ParsedTheme, bool) -> String,
{
    fn generate(&self, theme: &ParsedTheme, custom_properties: bool) -> String {
        self(theme, custom_properties)
    }
}

/// Selector the default template nests rules under.
pub const DEFAULT_SCOPE: &str = ".tinct-app";

/// Prefix of the emitted custom properties (`--tinct-primary-base`).
pub const PROPERTY_PREFIX: &str = "--tinct-";

/// The built-in stylesheet template.
pub const DEFAULT_TEMPLATE: &str = r#"{% if custom_properties %}
:root {
{% for prop in properties %}
  {{ prop.name }}: {{ prop.value }};
{% endfor %}
}
{% endif %}
{% if anchor %}
{{ scope }} a {
  color: {{ anchor }};
}
{% endif %}
{% for color in colors %}
{{ scope }} .{{ color.role }} {
  background-color: {{ color.css }} !important;
  border-color: {{ color.css }} !important;
}
{{ scope }} .{{ color.role }}--text {
  color: {{ color.css }} !important;
  caret-color: {{ color.css }} !important;
}
{% endfor %}
"#;

#[derive(Serialize)]
struct Property<'a> {
    name: String,
    value: &'a str,
}

#[derive(Serialize)]
struct ColorRule<'a> {
    role: &'a str,
    css: String,
}

#[derive(Serialize)]
struct StyleContext<'a> {
    scope: &'a str,
    custom_properties: bool,
    properties: Vec<Property<'a>>,
    anchor: Option<String>,
    colors: Vec<ColorRule<'a>>,
}

/// The default generator, rendering a minijinja template.
///
/// # Example
///
/// ```rust
/// use tinct::{CssGenerator, ParsedTheme, StyleGenerator};
///
/// let theme = ParsedTheme::from_entries([("primary", "#1976D2")]);
/// let css = CssGenerator::new().generate(&theme, false);
///
/// assert!(css.contains(".tinct-app .primary {"));
/// assert!(css.contains("background-color: #1976D2 !important;"));
/// ```
pub struct CssGenerator {
    env: Environment<'static>,
    template: String,
    scope: String,
}

impl CssGenerator {
    /// Creates a generator using [`DEFAULT_TEMPLATE`] and [`DEFAULT_SCOPE`].
    pub fn new() -> Self {
        Self {
            env: template_env(),
            template: DEFAULT_TEMPLATE.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    /// Creates a generator from a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Template`] if the template does not compile.
    pub fn from_template(source: impl Into<String>) -> Result<Self, ThemeError> {
        let template = source.into();
        let scratch = template_env();
        scratch.template_from_str(&template)?;
        Ok(Self {
            env: template_env(),
            template,
            scope: DEFAULT_SCOPE.to_string(),
        })
    }

    /// Sets the selector rules are nested under, returning `self` for chaining.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    fn context<'a>(&'a self, theme: &'a ParsedTheme, custom_properties: bool) -> StyleContext<'a> {
        let reference = |role: &str, value: &str| {
            if custom_properties {
                format!("var({}{}-base)", PROPERTY_PREFIX, role)
            } else {
                value.to_string()
            }
        };

        let properties = if custom_properties {
            theme
                .iter()
                .map(|(role, value)| Property {
                    name: format!("{}{}-base", PROPERTY_PREFIX, role),
                    value,
                })
                .collect()
        } else {
            Vec::new()
        };

        StyleContext {
            scope: &self.scope,
            custom_properties,
            properties,
            anchor: theme
                .get(ANCHOR_ROLE)
                .map(|value| reference(ANCHOR_ROLE, value)),
            colors: theme
                .iter()
                .filter(|(role, _)| *role != ANCHOR_ROLE)
                .map(|(role, value)| ColorRule {
                    role,
                    css: reference(role, value),
                })
                .collect(),
        }
    }
}

impl Default for CssGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CssGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CssGenerator")
            .field("scope", &self.scope)
            .field("template_len", &self.template.len())
            .finish()
    }
}

impl StyleGenerator for CssGenerator {
    fn generate(&self, theme: &ParsedTheme, custom_properties: bool) -> String {
        let ctx = self.context(theme, custom_properties);
        match self.env.render_str(&self.template, ctx) {
            Ok(css) => css,
            Err(err) => {
                log::error!("stylesheet template failed to render: {}", err);
                String::new()
            }
        }
    }
}

fn template_env<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}
