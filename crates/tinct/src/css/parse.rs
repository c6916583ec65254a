//! Parsed themes and the parser capability.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::theme::ColorVariant;

/// The role the default parser derives from `primary` when a variant does not set it.
pub const ANCHOR_ROLE: &str = "anchor";

/// A variant after color derivation.
///
/// The engine treats this as an opaque value: it is handed to a
/// [`StyleGenerator`](super::StyleGenerator) and used as the cache key.
/// Equality and hashing are structural over the parsed entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ParsedTheme {
    colors: BTreeMap<String, String>,
}

impl ParsedTheme {
    /// Builds a parsed theme from `(role, value)` entries.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            colors: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    /// Iterates over `(role, value)` entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Turns a [`ColorVariant`] into a [`ParsedTheme`].
pub trait ThemeParser {
    fn parse(&self, variant: &ColorVariant) -> ParsedTheme;
}

impl<F> ThemeParser for F
where
    F: Fn(&ColorVariant) -> ParsedTheme,
{
    fn parse(&self, variant: &ColorVariant) -> ParsedTheme {
        self(variant)
    }
}

/// The default parser.
///
/// Values are trimmed and otherwise copied verbatim. When the variant has no
/// `anchor` role, it is derived from `primary`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantParser;

impl ThemeParser for VariantParser {
    fn parse(&self, variant: &ColorVariant) -> ParsedTheme {
        let mut parsed = ParsedTheme::from_entries(
            variant
                .iter()
                .map(|(role, value)| (role.trim(), value.trim())),
        );
        if !parsed.colors.contains_key(ANCHOR_ROLE) {
            if let Some(primary) = parsed.colors.get("primary").cloned() {
                parsed.colors.insert(ANCHOR_ROLE.to_string(), primary);
            }
        }
        parsed
    }
}
