//! The theme engine façade.
//!
//! [`ThemeEngine`] owns the resident light/dark variants, the dark-mode flag,
//! the stylesheet pipeline (parser, generator, optional minifier), the
//! optional cache and the output sink.
//!
//! # Lifecycle
//!
//! 1. Build the engine. The initial dark value is recorded without producing
//!    any output.
//! 2. Call [`init`](ThemeEngine::init), with an [`SsrContext`] when rendering on
//!    the server or without one when running against a live document.
//! 3. Every later [`set_dark`](ThemeEngine::set_dark) regenerates the
//!    stylesheet and rewrites the style node, even if the value is unchanged.
//!
//! # Example
//!
//! ```rust
//! use tinct::{ColorVariant, Document, MemoryDocument, ThemeEngine, STYLE_ELEMENT_ID};
//!
//! let mut engine = ThemeEngine::builder()
//!     .light_theme(ColorVariant::new().with("primary", "#3F51B5"))
//!     .document(MemoryDocument::new())
//!     .build();
//!
//! engine.init(None);
//! engine.set_dark(true);
//!
//! let doc = engine.document().unwrap();
//! let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
//! assert!(doc.text_content(&node).unwrap().contains("#2196F3"));
//! ```

use std::fmt;

use crate::cache::{CacheFacade, ThemeCache};
use crate::config::ThemeConfig;
use crate::css::{CssGenerator, Minifier, ParsedTheme, StyleGenerator, ThemeParser, VariantParser};
use crate::output::{Document, MemoryDocument, OutputSink, SinkState, SsrContext};
use crate::theme::{detect_color_mode, ColorVariant, DarkFlag, ThemeOverrides, ThemeSet};

/// Parser, generator and minifier, run in that order.
struct Pipeline {
    parser: Box<dyn ThemeParser>,
    generator: Box<dyn StyleGenerator>,
    minifier: Option<Box<dyn Minifier>>,
    custom_properties: bool,
}

impl Pipeline {
    fn render(&self, theme: &ParsedTheme) -> String {
        let css = self.generator.generate(theme, self.custom_properties);
        match &self.minifier {
            Some(minifier) => minifier.minify(&css),
            None => css,
        }
    }
}

/// Applies the active light or dark variant as a stylesheet.
///
/// See the [module documentation](self) for the lifecycle.
pub struct ThemeEngine<D: Document = MemoryDocument> {
    themes: ThemeSet,
    dark: DarkFlag,
    pipeline: Pipeline,
    cache: CacheFacade,
    sink: OutputSink<D>,
}

impl ThemeEngine {
    /// Starts building an engine.
    pub fn builder() -> ThemeEngineBuilder {
        ThemeEngineBuilder::new()
    }

    /// Builds an engine from plain configuration, without a live document.
    pub fn new(config: ThemeConfig) -> Self {
        Self::builder().config(config).build()
    }
}

impl<D: Document> ThemeEngine<D> {
    /// Returns the dark-mode value; an unset flag reads as light.
    pub fn dark(&self) -> bool {
        self.dark.is_dark()
    }

    /// Records the dark-mode value.
    ///
    /// The first write only records. Every later write re-applies the theme,
    /// whether or not the value changed.
    pub fn set_dark(&mut self, dark: bool) {
        let previous = self.dark.replace(dark);
        if previous.is_set() {
            self.apply_theme();
        }
    }

    /// Flips dark mode, re-applying the theme.
    pub fn toggle_dark(&mut self) {
        self.set_dark(!self.dark());
    }

    /// Initializes output.
    ///
    /// With a server context, appends the style fragment to its `head`. Without
    /// one, attaches to the live document (if any) and applies the theme.
    /// Disabled engines do nothing.
    pub fn init(&mut self, ssr_context: Option<&mut SsrContext>) {
        if self.is_disabled() {
            return;
        }

        match ssr_context {
            Some(context) => {
                let css = self.generated_styles();
                self.sink.init_server(context, &css);
            }
            None => {
                if self.sink.init_client() {
                    self.apply_theme();
                }
            }
        }
    }

    /// Regenerates the stylesheet and writes it to the output.
    ///
    /// A cached stylesheet for the current theme is written first as a stand-in;
    /// the stylesheet is then always regenerated and stored back in the cache.
    /// Disabled engines clear their output instead.
    pub fn apply_theme(&mut self) {
        if self.is_disabled() {
            self.clear_css();
            return;
        }

        let parsed = self.parsed_theme();
        let pipeline = &self.pipeline;
        let sink = &mut self.sink;
        let css = self
            .cache
            .refresh(&parsed, |cached| sink.write(cached), || pipeline.render(&parsed));
        sink.write(&css);
    }

    /// Empties the output stylesheet.
    pub fn clear_css(&mut self) {
        self.sink.clear();
    }

    /// Returns the stylesheet for the current theme without touching the output.
    ///
    /// A cached stylesheet is returned as-is; otherwise it is generated and
    /// stored.
    pub fn generated_styles(&self) -> String {
        let parsed = self.parsed_theme();
        self.cache.pull(&parsed, || self.pipeline.render(&parsed))
    }

    /// Returns the active variant.
    pub fn current_theme(&self) -> &ColorVariant {
        self.themes.current(self.dark())
    }

    /// Parses the active variant.
    pub fn parsed_theme(&self) -> ParsedTheme {
        self.pipeline.parser.parse(self.current_theme())
    }

    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    pub fn is_disabled(&self) -> bool {
        self.sink.is_disabled()
    }

    pub fn custom_properties(&self) -> bool {
        self.pipeline.custom_properties
    }

    pub fn output_state(&self) -> &SinkState<D::Node> {
        self.sink.state()
    }

    /// Returns the live document, if one was supplied.
    pub fn document(&self) -> Option<&D> {
        self.sink.document()
    }

    pub fn document_mut(&mut self) -> Option<&mut D> {
        self.sink.document_mut()
    }
}

impl<D: Document> fmt::Debug for ThemeEngine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("themes", &self.themes)
            .field("dark", &self.dark)
            .field("custom_properties", &self.pipeline.custom_properties)
            .field("minify", &self.pipeline.minifier.is_some())
            .field("cache", &self.cache)
            .field("output", self.sink.state())
            .finish()
    }
}

/// Builder for [`ThemeEngine`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tinct::{minify_css, MemoryCache, SsrContext, ThemeEngine};
///
/// let mut engine = ThemeEngine::builder()
///     .dark(true)
///     .custom_properties(true)
///     .minify(minify_css)
///     .cache(Arc::new(MemoryCache::new()))
///     .csp_nonce("r4nd0m")
///     .build();
///
/// let mut ctx = SsrContext::new();
/// engine.init(Some(&mut ctx));
/// assert!(ctx.head.contains(r#"nonce="r4nd0m""#));
/// assert!(ctx.head.contains("--tinct-primary-base:#2196F3;"));
/// ```
pub struct ThemeEngineBuilder<D: Document = MemoryDocument> {
    disable: bool,
    dark: bool,
    themes: ThemeOverrides,
    custom_properties: bool,
    csp_nonce: Option<String>,
    parser: Box<dyn ThemeParser>,
    generator: Box<dyn StyleGenerator>,
    minifier: Option<Box<dyn Minifier>>,
    cache: CacheFacade,
    document: Option<D>,
}

impl ThemeEngineBuilder {
    /// Creates a builder with the built-in parser and generator, no cache,
    /// no minifier and no document.
    pub fn new() -> Self {
        Self {
            disable: false,
            dark: false,
            themes: ThemeOverrides::default(),
            custom_properties: false,
            csp_nonce: None,
            parser: Box::new(VariantParser),
            generator: Box::new(CssGenerator::new()),
            minifier: None,
            cache: CacheFacade::None,
            document: None,
        }
    }
}

impl Default for ThemeEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> ThemeEngineBuilder<D> {
    /// Applies the plain-data options of a [`ThemeConfig`].
    pub fn config(self, config: ThemeConfig) -> Self {
        Self {
            disable: config.disable,
            dark: config.dark,
            themes: config.themes,
            custom_properties: config.custom_properties,
            csp_nonce: config.csp_nonce,
            ..self
        }
    }

    /// Makes every output operation a no-op.
    pub fn disable(mut self, disable: bool) -> Self {
        self.disable = disable;
        self
    }

    /// Sets the initial dark-mode value.
    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Seeds the initial dark-mode value from the color-mode detector.
    ///
    /// See [`set_theme_detector`](crate::set_theme_detector).
    pub fn detect_dark(mut self) -> Self {
        self.dark = detect_color_mode().is_dark();
        self
    }

    /// Overrides roles of the light variant.
    pub fn light_theme(mut self, overrides: ColorVariant) -> Self {
        self.themes.light = Some(overrides);
        self
    }

    /// Overrides roles of the dark variant.
    pub fn dark_theme(mut self, overrides: ColorVariant) -> Self {
        self.themes.dark = Some(overrides);
        self
    }

    pub fn themes(mut self, themes: ThemeOverrides) -> Self {
        self.themes = themes;
        self
    }

    pub fn custom_properties(mut self, enabled: bool) -> Self {
        self.custom_properties = enabled;
        self
    }

    pub fn csp_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.csp_nonce = Some(nonce.into());
        self
    }

    pub fn minify<M: Minifier + 'static>(mut self, minifier: M) -> Self {
        self.minifier = Some(Box::new(minifier));
        self
    }

    pub fn cache<C: ThemeCache + 'static>(mut self, cache: C) -> Self {
        self.cache = CacheFacade::new(cache);
        self
    }

    /// Replaces the variant parser.
    pub fn parser<P: ThemeParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Replaces the stylesheet generator.
    pub fn generator<G: StyleGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Supplies the live document used for client-side output.
    pub fn document<E: Document>(self, document: E) -> ThemeEngineBuilder<E> {
        ThemeEngineBuilder {
            disable: self.disable,
            dark: self.dark,
            themes: self.themes,
            custom_properties: self.custom_properties,
            csp_nonce: self.csp_nonce,
            parser: self.parser,
            generator: self.generator,
            minifier: self.minifier,
            cache: self.cache,
            document: Some(document),
        }
    }

    pub fn build(self) -> ThemeEngine<D> {
        let pipeline = Pipeline {
            parser: self.parser,
            generator: self.generator,
            minifier: self.minifier,
            custom_properties: self.custom_properties,
        };

        if self.disable {
            log::debug!("theme engine disabled");
            return ThemeEngine {
                themes: ThemeSet::default(),
                dark: DarkFlag::Unset,
                pipeline,
                cache: self.cache,
                sink: OutputSink::disabled(self.document),
            };
        }

        let mut engine = ThemeEngine {
            themes: ThemeSet::new(&self.themes),
            dark: DarkFlag::Unset,
            pipeline,
            cache: self.cache,
            sink: OutputSink::new(self.document, self.csp_nonce),
        };
        engine.set_dark(self.dark);
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::STYLE_ELEMENT_ID;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_generator(calls: &Rc<Cell<usize>>) -> impl StyleGenerator + 'static {
        let calls = Rc::clone(calls);
        move |theme: &ParsedTheme, _: bool| {
            calls.set(calls.get() + 1);
            format!("primary={}", theme.get("primary").unwrap_or_default())
        }
    }

    #[test]
    fn test_construction_records_dark_without_output() {
        let calls = Rc::new(Cell::new(0));
        let engine = ThemeEngine::builder()
            .dark(true)
            .generator(counting_generator(&calls))
            .document(MemoryDocument::new())
            .build();

        assert!(engine.dark());
        assert_eq!(calls.get(), 0);
        assert_eq!(engine.document().unwrap().head_len(), 0);
        assert_eq!(engine.output_state(), &SinkState::Pending);
    }

    #[test]
    fn test_current_theme_follows_dark() {
        let mut engine = ThemeEngine::builder()
            .light_theme(ColorVariant::new().with("primary", "#111111"))
            .build();

        assert_eq!(engine.current_theme().get("primary"), Some("#111111"));
        engine.set_dark(true);
        assert_eq!(engine.current_theme().get("primary"), Some("#2196F3"));
        engine.toggle_dark();
        assert!(!engine.dark());
    }

    #[test]
    fn test_set_dark_before_init_writes_when_document_exists() {
        let calls = Rc::new(Cell::new(0));
        let mut engine = ThemeEngine::builder()
            .generator(counting_generator(&calls))
            .document(MemoryDocument::new())
            .build();

        engine.set_dark(true);

        assert_eq!(calls.get(), 1);
        let doc = engine.document().unwrap();
        let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(doc.text_content(&node), Some("primary=#2196F3"));
    }

    #[test]
    fn test_minifier_runs_after_generator() {
        let engine = ThemeEngine::builder()
            .generator(|_: &ParsedTheme, _: bool| "a { color : red ; }".to_string())
            .minify(|css: &str| css.replace(' ', ""))
            .build();

        assert_eq!(engine.generated_styles(), "a{color:red;}");
    }

    #[test]
    fn test_custom_properties_reaches_generator() {
        let engine = ThemeEngine::builder()
            .custom_properties(true)
            .generator(|_: &ParsedTheme, vars: bool| vars.to_string())
            .build();

        assert!(engine.custom_properties());
        assert_eq!(engine.generated_styles(), "true");
    }

    #[test]
    fn test_custom_parser() {
        let engine = ThemeEngine::builder()
            .parser(|variant: &ColorVariant| {
                ParsedTheme::from_entries([("count", variant.len().to_string())])
            })
            .generator(|theme: &ParsedTheme, _: bool| theme.get("count").unwrap_or("").to_string())
            .build();

        assert_eq!(engine.generated_styles(), "7");
    }

    #[test]
    fn test_new_from_config() {
        let engine = ThemeEngine::new(ThemeConfig {
            dark: true,
            ..ThemeConfig::default()
        });
        assert!(engine.dark());
        assert!(!engine.is_disabled());
        assert!(engine.document().is_none());
    }

    #[test]
    fn test_disabled_engine_leaves_dark_unset() {
        let mut engine = ThemeEngine::builder().disable(true).dark(true).build();
        assert!(engine.is_disabled());
        assert!(!engine.dark());

        engine.set_dark(true);
        engine.set_dark(false);
        assert_eq!(engine.output_state(), &SinkState::Disabled);
    }

    #[test]
    fn test_debug_output() {
        let engine = ThemeEngine::builder().minify(crate::css::minify_css).build();
        let debug = format!("{:?}", engine);
        assert!(debug.contains("ThemeEngine"));
        assert!(debug.contains("minify: true"));
    }
}
