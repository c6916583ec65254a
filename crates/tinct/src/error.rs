//! Errors for the fallible edges of the engine.
//!
//! Applying a theme never fails. Only loading a [`ThemeConfig`](crate::ThemeConfig)
//! and compiling a custom stylesheet template can return a [`ThemeError`].

use std::fmt;

/// Error returned when loading configuration or compiling a stylesheet template.
#[derive(Debug)]
pub enum ThemeError {
    /// The configuration could not be deserialized.
    Config(String),

    /// A stylesheet template failed to compile.
    Template(String),
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::Config(msg) => write!(f, "invalid theme configuration: {}", msg),
            ThemeError::Template(msg) => write!(f, "stylesheet template error: {}", msg),
        }
    }
}

impl std::error::Error for ThemeError {}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ThemeError {
    fn from(err: serde_yaml::Error) -> Self {
        ThemeError::Config(err.to_string())
    }
}

impl From<minijinja::Error> for ThemeError {
    fn from(err: minijinja::Error) -> Self {
        ThemeError::Template(err.to_string())
    }
}
