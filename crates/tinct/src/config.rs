//! Plain-data engine configuration.
//!
//! [`ThemeConfig`] holds the serializable part of an engine's options and can
//! be loaded from YAML or JSON:
//!
//! ```rust
//! use tinct::ThemeConfig;
//!
//! let config = ThemeConfig::from_yaml(r##"
//! dark: true
//! cspNonce: "r4nd0m"
//! themes:
//!   light:
//!     primary: "#3F51B5"
//!   dark:
//!     primary: "#7986CB"
//!     sidebar: "#263238"
//! "##).unwrap();
//!
//! assert!(config.dark);
//! assert_eq!(config.csp_nonce.as_deref(), Some("r4nd0m"));
//! assert_eq!(config.themes.dark.unwrap().get("sidebar"), Some("#263238"));
//! ```
//!
//! Capabilities that are code rather than data (minifier, cache, parser,
//! generator, document) are set on the
//! [`ThemeEngineBuilder`](crate::ThemeEngineBuilder).

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::theme::ThemeOverrides;

/// Serializable engine options.
///
/// Every field is optional in the source document. `customProperties` and
/// `cspNonce` are accepted as aliases of the snake_case names, and
/// `disabled` as an alias of `disable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Turns the engine into a no-op.
    #[serde(alias = "disabled")]
    pub disable: bool,

    /// Initial dark-mode value.
    pub dark: bool,

    /// Per-side overrides merged over the built-in variants.
    pub themes: ThemeOverrides,

    /// Emit theme values as CSS custom properties.
    #[serde(alias = "customProperties")]
    pub custom_properties: bool,

    /// Nonce copied onto emitted and created style nodes.
    #[serde(alias = "cspNonce", skip_serializing_if = "Option::is_none")]
    pub csp_nonce: Option<String>,
}

impl ThemeConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }
}
