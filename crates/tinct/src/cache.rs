//! Pluggable stylesheet caching.
//!
//! A [`ThemeCache`] maps a [`ParsedTheme`] to generated CSS. The engine wraps
//! whatever cache it was given (or none) in a [`CacheFacade`], which implements
//! the two ways the engine consumes it:
//!
//! - [`CacheFacade::refresh`]: used on every full re-application. A hit is only
//!   shown as a stand-in while the stylesheet is regenerated; generation always
//!   runs and the fresh value is always written back.
//! - [`CacheFacade::pull`]: used by the side-effect free style accessor. A hit
//!   is returned as-is without generating anything.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::css::ParsedTheme;

/// Lookup/store capability keyed by a parsed theme.
///
/// Methods take `&self`; implementations shared between engines provide their
/// own interior mutability.
pub trait ThemeCache {
    fn get(&self, theme: &ParsedTheme) -> Option<String>;
    fn set(&self, theme: &ParsedTheme, css: String);
}

impl<T: ThemeCache + ?Sized> ThemeCache for Arc<T> {
    fn get(&self, theme: &ParsedTheme) -> Option<String> {
        (**self).get(theme)
    }

    fn set(&self, theme: &ParsedTheme, css: String) {
        (**self).set(theme, css)
    }
}

impl<T: ThemeCache + ?Sized> ThemeCache for Box<T> {
    fn get(&self, theme: &ParsedTheme) -> Option<String> {
        (**self).get(theme)
    }

    fn set(&self, theme: &ParsedTheme, css: String) {
        (**self).set(theme, css)
    }
}

/// An in-memory cache.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tinct::{MemoryCache, ThemeEngine};
///
/// let cache = Arc::new(MemoryCache::new());
/// let engine = ThemeEngine::builder().cache(Arc::clone(&cache)).build();
///
/// let css = engine.generated_styles();
/// assert_eq!(cache.get_css(&engine.parsed_theme()), Some(css));
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<ParsedTheme, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached CSS for a theme, if any.
    pub fn get_css(&self, theme: &ParsedTheme) -> Option<String> {
        self.get(theme)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ParsedTheme, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ThemeCache for MemoryCache {
    fn get(&self, theme: &ParsedTheme) -> Option<String> {
        self.lock().get(theme).cloned()
    }

    fn set(&self, theme: &ParsedTheme, css: String) {
        self.lock().insert(theme.clone(), css);
    }
}

/// The engine's view of its optional cache.
#[derive(Default)]
pub enum CacheFacade {
    /// No cache configured; every request generates.
    #[default]
    None,
    Cache(Box<dyn ThemeCache>),
}

impl CacheFacade {
    pub fn new<C: ThemeCache + 'static>(cache: C) -> Self {
        CacheFacade::Cache(Box::new(cache))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CacheFacade::Cache(_))
    }

    /// Full re-application path.
    ///
    /// On a hit, `fallback` receives the cached value before anything is
    /// generated. `compute` always runs and its result is always stored.
    pub fn refresh<F, G>(&self, theme: &ParsedTheme, fallback: F, compute: G) -> String
    where
        F: FnOnce(&str),
        G: FnOnce() -> String,
    {
        let CacheFacade::Cache(cache) = self else {
            return compute();
        };

        if let Some(cached) = cache.get(theme) {
            log::debug!("theme cache hit, showing cached stylesheet until regenerated");
            fallback(&cached);
        }

        let css = compute();
        cache.set(theme, css.clone());
        css
    }

    /// Side-effect free path: a hit short-circuits generation.
    pub fn pull<G>(&self, theme: &ParsedTheme, compute: G) -> String
    where
        G: FnOnce() -> String,
    {
        let CacheFacade::Cache(cache) = self else {
            return compute();
        };

        if let Some(cached) = cache.get(theme) {
            log::debug!("theme cache hit");
            return cached;
        }

        log::debug!("theme cache miss, generating stylesheet");
        let css = compute();
        cache.set(theme, css.clone());
        css
    }
}

impl std::fmt::Debug for CacheFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheFacade::None => f.write_str("CacheFacade::None"),
            CacheFacade::Cache(_) => f.write_str("CacheFacade::Cache(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn theme() -> ParsedTheme {
        ParsedTheme::from_entries([("primary", "#1976D2")])
    }

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());
        cache.set(&theme(), "a{}".to_string());
        assert_eq!(cache.get(&theme()), Some("a{}".to_string()));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert_eq!(cache.get(&theme()), None);
    }

    #[test]
    fn test_pull_without_cache_always_computes() {
        let calls = Cell::new(0);
        let facade = CacheFacade::None;
        for _ in 0..2 {
            facade.pull(&theme(), || {
                calls.set(calls.get() + 1);
                "css".to_string()
            });
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_pull_hit_skips_compute() {
        let cache = Arc::new(MemoryCache::new());
        cache.set(&theme(), "cached".to_string());
        let facade = CacheFacade::new(Arc::clone(&cache));

        let css = facade.pull(&theme(), || panic!("must not generate on a hit"));
        assert_eq!(css, "cached");
    }

    #[test]
    fn test_pull_miss_computes_and_stores() {
        let cache = Arc::new(MemoryCache::new());
        let facade = CacheFacade::new(Arc::clone(&cache));

        assert_eq!(facade.pull(&theme(), || "fresh".to_string()), "fresh");
        assert_eq!(cache.get(&theme()), Some("fresh".to_string()));
    }

    #[test]
    fn test_refresh_hit_shows_fallback_then_regenerates() {
        let cache = Arc::new(MemoryCache::new());
        cache.set(&theme(), "stale".to_string());
        let facade = CacheFacade::new(Arc::clone(&cache));

        let mut shown = Vec::new();
        let computed = Cell::new(false);
        let css = facade.refresh(
            &theme(),
            |cached| shown.push(cached.to_string()),
            || {
                computed.set(true);
                "fresh".to_string()
            },
        );

        assert!(computed.get());
        assert_eq!(shown, vec!["stale".to_string()]);
        assert_eq!(css, "fresh");
        assert_eq!(cache.get(&theme()), Some("fresh".to_string()));
    }

    #[test]
    fn test_refresh_miss_has_no_fallback() {
        let facade = CacheFacade::new(MemoryCache::new());
        let mut shown = 0;
        let css = facade.refresh(&theme(), |_| shown += 1, || "fresh".to_string());
        assert_eq!(shown, 0);
        assert_eq!(css, "fresh");
    }

    #[test]
    fn test_facade_default_is_none() {
        let facade = CacheFacade::default();
        assert!(!facade.is_enabled());
        assert!(CacheFacade::new(MemoryCache::new()).is_enabled());
    }
}
