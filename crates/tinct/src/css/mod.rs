//! Stylesheet production: parsing, generation and minification.
//!
//! The engine consumes these through traits so hosts can plug in their own
//! color derivation or CSS formatting:
//!
//! - [`ThemeParser`] with the default [`VariantParser`]
//! - [`StyleGenerator`] with the default template-based [`CssGenerator`]
//! - [`Minifier`], implemented by any `Fn(&str) -> String` such as [`minify_css`]

mod generate;
mod minify;
mod parse;

pub use generate::{CssGenerator, StyleGenerator, DEFAULT_SCOPE, DEFAULT_TEMPLATE, PROPERTY_PREFIX};
pub use minify::{minify_css, Minifier};
pub use parse::{ParsedTheme, ThemeParser, VariantParser, ANCHOR_ROLE};
