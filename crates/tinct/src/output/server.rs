//! Server-rendered output.

use super::STYLE_ELEMENT_ID;

/// The in-progress server-rendered response.
///
/// The engine only ever appends to [`head`](SsrContext::head); earlier content
/// is never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SsrContext {
    pub head: String,
}

impl SsrContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing head markup.
    pub fn with_head(head: impl Into<String>) -> Self {
        Self { head: head.into() }
    }
}

/// Formats the `<style>` fragment emitted into server-rendered markup.
///
/// The nonce is copied verbatim into the `nonce` attribute; an empty nonce
/// leaves the attribute out.
///
/// # Example
///
/// ```rust
/// use tinct::style_fragment;
///
/// assert_eq!(
///     style_fragment("a{}", Some("abc")),
///     r#"<style type="text/css" id="tinct-theme-stylesheet" nonce="abc">a{}</style>"#
/// );
/// ```
pub fn style_fragment(css: &str, csp_nonce: Option<&str>) -> String {
    let nonce = csp_nonce
        .filter(|nonce| !nonce.is_empty())
        .map(|nonce| format!(" nonce=\"{}\"", nonce))
        .unwrap_or_default();
    format!(
        "<style type=\"text/css\" id=\"{}\"{}>{}</style>",
        STYLE_ELEMENT_ID, nonce, css
    )
}
