//! # Tinct - Runtime Light/Dark Theme Stylesheets
//!
//! `tinct` keeps a light and a dark color variant for a component toolkit,
//! turns whichever one is active into a stylesheet, and injects it either into
//! server-rendered markup or into a style node of a live document.
//!
//! ## Core Concepts
//!
//! - [`ColorVariant`]: Role-to-color map (`primary`, `accent`, ...) for one side
//! - [`ThemeSet`]: Built-in defaults merged with user overrides, per side
//! - [`ThemeEngine`]: Owns the dark-mode flag and re-applies the theme on change
//! - [`ThemeCache`]: Pluggable cache keyed by the [`ParsedTheme`]
//! - [`OutputSink`]: Writes to an [`SsrContext`] or a [`Document`] style node
//!
//! ## Server Rendering
//!
//! ```rust
//! use tinct::{SsrContext, ThemeEngine};
//!
//! let mut engine = ThemeEngine::builder().csp_nonce("abc").build();
//! let mut ctx = SsrContext::with_head("<title>App</title>");
//!
//! engine.init(Some(&mut ctx));
//!
//! assert!(ctx.head.starts_with("<title>App</title>"));
//! assert!(ctx.head.contains(r#"<style type="text/css" id="tinct-theme-stylesheet" nonce="abc">"#));
//! ```
//!
//! ## Live Documents
//!
//! ```rust
//! use tinct::{ColorVariant, Document, MemoryDocument, ThemeEngine, STYLE_ELEMENT_ID};
//!
//! let mut engine = ThemeEngine::builder()
//!     .dark_theme(ColorVariant::new().with("primary", "#BB86FC"))
//!     .document(MemoryDocument::new())
//!     .build();
//!
//! engine.init(None);
//! engine.toggle_dark();
//!
//! let doc = engine.document().unwrap();
//! assert_eq!(doc.count_by_id(STYLE_ELEMENT_ID), 1);
//! let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
//! assert!(doc.text_content(&node).unwrap().contains("#BB86FC"));
//! ```
//!
//! ## Configuration
//!
//! Plain options load from YAML or JSON through [`ThemeConfig`]; code-level
//! capabilities (minifier, cache, parser, generator, document) are set on
//! [`ThemeEngineBuilder`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade at `debug`
//! level (output transitions, cache hits) and never installs a logger itself.

pub mod cache;
pub mod config;
pub mod css;
mod engine;
mod error;
pub mod output;
pub mod theme;

pub use cache::{CacheFacade, MemoryCache, ThemeCache};
pub use config::ThemeConfig;
pub use css::{
    minify_css, CssGenerator, Minifier, ParsedTheme, StyleGenerator, ThemeParser, VariantParser,
};
pub use engine::{ThemeEngine, ThemeEngineBuilder};
pub use error::ThemeError;
pub use output::{
    style_fragment, Document, MemoryDocument, NodeId, OutputSink, SinkState, SsrContext,
    STYLE_ELEMENT_ID,
};
pub use theme::{
    detect_color_mode, fill_variant, set_theme_detector, ColorMode, ColorVariant, DarkFlag,
    ThemeOverrides, ThemeSet,
};
