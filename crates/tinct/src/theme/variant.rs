//! Color variants and the resident light/dark theme set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The baseline color roles every built-in variant defines.
pub const BASELINE_ROLES: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "error",
    "info",
    "success",
    "warning",
];

const DEFAULT_LIGHT: &[(&str, &str)] = &[
    ("primary", "#1976D2"),
    ("secondary", "#424242"),
    ("accent", "#82B1FF"),
    ("error", "#FF5252"),
    ("info", "#2196F3"),
    ("success", "#4CAF50"),
    ("warning", "#FB8C00"),
];

const DEFAULT_DARK: &[(&str, &str)] = &[
    ("primary", "#2196F3"),
    ("secondary", "#424242"),
    ("accent", "#FF3F80"),
    ("error", "#FF5252"),
    ("info", "#2196F3"),
    ("success", "#4CAF50"),
    ("warning", "#FB8C00"),
];

/// A named set of color-role to color-value assignments.
///
/// Keys are role names (`primary`, `accent`, or anything else the
/// application wants). Values are passed through untouched; no format
/// validation is performed.
///
/// # Example
///
/// ```rust
/// use tinct::ColorVariant;
///
/// let brand = ColorVariant::new()
///     .with("primary", "#E91E63")
///     .with("highlight", "#FFEB3B");
///
/// assert_eq!(brand.get("primary"), Some("#E91E63"));
/// assert_eq!(brand.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorVariant {
    colors: BTreeMap<String, String>,
}

impl ColorVariant {
    /// Creates an empty variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in default variant for one side.
    pub fn builtin(dark: bool) -> Self {
        let pairs = if dark { DEFAULT_DARK } else { DEFAULT_LIGHT };
        pairs.iter().copied().collect()
    }

    /// Sets a role, returning the updated variant for chaining.
    pub fn with(mut self, role: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(role, value);
        self
    }

    /// Sets a role in place, returning the previous value if any.
    pub fn insert(&mut self, role: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.colors.insert(role.into(), value.into())
    }

    /// Looks up the value assigned to a role.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.colors.get(role).map(String::as_str)
    }

    /// Returns true if the role is assigned.
    pub fn has(&self, role: &str) -> bool {
        self.colors.contains_key(role)
    }

    /// Iterates over `(role, value)` pairs in role order.
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

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorVariant {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Merges the built-in default for one side with an optional override.
///
/// The merge is shallow and key-wise: override keys win, defaults that are
/// not overridden survive, and extra override keys are kept as-is.
pub fn fill_variant(overrides: Option<&ColorVariant>, dark: bool) -> ColorVariant {
    let mut filled = ColorVariant::builtin(dark);
    if let Some(overrides) = overrides {
        for (role, value) in overrides.iter() {
            filled.insert(role, value);
        }
    }
    filled
}

/// User overrides for either side, as supplied in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub light: Option<ColorVariant>,
    pub dark: Option<ColorVariant>,
}

/// The resident pair of fully populated light and dark variants.
///
/// Built once when an engine is constructed; changing themes requires a new
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSet {
    light: ColorVariant,
    dark: ColorVariant,
}

impl ThemeSet {
    /// Fills each side independently from its default and override.
    pub fn new(overrides: &ThemeOverrides) -> Self {
        Self {
            dark: fill_variant(overrides.dark.as_ref(), true),
            light: fill_variant(overrides.light.as_ref(), false),
        }
    }

    /// Selects the variant for the requested side.
    pub fn current(&self, dark: bool) -> &ColorVariant {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn light(&self) -> &ColorVariant {
        &self.light
    }

    pub fn dark(&self) -> &ColorVariant {
        &self.dark
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::new(&ThemeOverrides::default())
    }
}
