//! Theme variants and dark-mode state.
//!
//! This module provides:
//!
//! - [`ColorVariant`]: A role-to-color map for one side of a theme
//! - [`ThemeSet`]: The fully populated light/dark pair held by an engine
//! - [`fill_variant`]: Merges a built-in default with a user override
//! - [`DarkFlag`]: Tri-state dark-mode flag (unset, light, dark)
//! - [`ColorMode`]: Light or dark color mode, with OS detection

mod adaptive;
mod variant;

pub use adaptive::{detect_color_mode, set_theme_detector, ColorMode, DarkFlag};
pub use variant::{fill_variant, ColorVariant, ThemeOverrides, ThemeSet, BASELINE_ROLES};
