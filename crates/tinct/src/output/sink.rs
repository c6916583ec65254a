//! The output state machine.

use super::document::Document;
use super::server::{style_fragment, SsrContext};
use super::STYLE_ELEMENT_ID;

/// Where generated CSS currently goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkState<N> {
    /// The engine is disabled; nothing is ever written.
    Disabled,
    /// Constructed, `init` not called yet.
    Pending,
    /// Emitting into server-rendered markup; later writes are dropped.
    Server,
    /// Running against a live document, no style node yet.
    ClientUninitialized,
    /// Running against a live document and holding its style node.
    ClientAttached(N),
}

/// Sends generated CSS to a server context or a live style node.
///
/// The first write against a live document adopts an existing node with
/// [`STYLE_ELEMENT_ID`] (left behind by server rendering) or creates one.
/// Later writes only replace that node's text. A node that was removed from
/// the document behind the sink's back is looked up or created again.
#[derive(Debug)]
pub struct OutputSink<D: Document> {
    state: SinkState<D::Node>,
    document: Option<D>,
    csp_nonce: Option<String>,
}

impl<D: Document> OutputSink<D> {
    /// Creates a sink waiting for `init`.
    ///
    /// An empty nonce counts as no nonce.
    pub fn new(document: Option<D>, csp_nonce: Option<String>) -> Self {
        Self {
            state: SinkState::Pending,
            document,
            csp_nonce: csp_nonce.filter(|nonce| !nonce.is_empty()),
        }
    }

    /// Creates a permanently disabled sink.
    pub fn disabled(document: Option<D>) -> Self {
        Self {
            state: SinkState::Disabled,
            document,
            csp_nonce: None,
        }
    }

    pub fn state(&self) -> &SinkState<D::Node> {
        &self.state
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, SinkState::Disabled)
    }

    pub fn document(&self) -> Option<&D> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut D> {
        self.document.as_mut()
    }

    /// Switches to server output and appends the style fragment to `context.head`.
    pub fn init_server(&mut self, context: &mut SsrContext, css: &str) {
        if self.is_disabled() {
            return;
        }
        log::debug!("output sink: server rendering");
        self.state = SinkState::Server;
        context
            .head
            .push_str(&style_fragment(css, self.csp_nonce.as_deref()));
    }

    /// Switches to client output.
    ///
    /// Returns false when disabled or when there is no live document, in which
    /// case the state is left untouched.
    pub fn init_client(&mut self) -> bool {
        if self.is_disabled() || self.document.is_none() {
            return false;
        }
        log::debug!("output sink: client rendering");
        self.state = SinkState::ClientUninitialized;
        true
    }

    /// Replaces the current stylesheet text.
    pub fn write(&mut self, css: &str) {
        let node = match &self.state {
            SinkState::Disabled | SinkState::Server => return,
            SinkState::ClientAttached(node) if self.is_live(node) => Some(node.clone()),
            SinkState::ClientAttached(_) => {
                log::debug!("output sink: style node was detached, re-attaching");
                None
            }
            SinkState::Pending | SinkState::ClientUninitialized => None,
        };

        let Some(node) = node.or_else(|| self.attach()) else {
            return;
        };
        if let Some(document) = self.document.as_mut() {
            document.set_text_content(&node, css);
        }
    }

    /// Empties the stylesheet.
    ///
    /// A disabled sink never holds a style node, so clearing it does nothing.
    pub fn clear(&mut self) {
        match self.state {
            SinkState::Disabled => {}
            _ => self.write(""),
        }
    }

    fn is_live(&self, node: &D::Node) -> bool {
        self.document
            .as_ref()
            .is_some_and(|document| document.contains(node))
    }

    fn attach(&mut self) -> Option<D::Node> {
        let document = self.document.as_mut()?;

        let node = match document.element_by_id(STYLE_ELEMENT_ID) {
            Some(existing) => {
                log::debug!("output sink: adopting existing style node");
                existing
            }
            None => {
                log::debug!("output sink: creating style node");
                let node = document.create_element("style");
                document.set_attribute(&node, "type", "text/css");
                document.set_attribute(&node, "id", STYLE_ELEMENT_ID);
                if let Some(nonce) = &self.csp_nonce {
                    document.set_attribute(&node, "nonce", nonce);
                }
                document.append_to_head(&node);
                node
            }
        };

        self.state = SinkState::ClientAttached(node.clone());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryDocument;

    fn client_sink(nonce: Option<&str>) -> OutputSink<MemoryDocument> {
        OutputSink::new(Some(MemoryDocument::new()), nonce.map(String::from))
    }

    #[test]
    fn test_write_creates_node_once() {
        let mut sink = client_sink(None);
        assert!(sink.init_client());
        assert_eq!(sink.state(), &SinkState::ClientUninitialized);

        sink.write("a{}");
        sink.write("b{}");

        let doc = sink.document().unwrap();
        assert_eq!(doc.count_by_id(STYLE_ELEMENT_ID), 1);
        let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(doc.text_content(&node), Some("b{}"));
        assert_eq!(doc.attribute(&node, "type"), Some("text/css"));
        assert_eq!(doc.attribute(&node, "nonce"), None);
        assert!(matches!(sink.state(), SinkState::ClientAttached(_)));
    }

    #[test]
    fn test_created_node_carries_nonce() {
        let mut sink = client_sink(Some("n0nce"));
        sink.init_client();
        sink.write("a{}");

        let doc = sink.document().unwrap();
        let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(doc.attribute(&node, "nonce"), Some("n0nce"));
    }

    #[test]
    fn test_empty_nonce_is_omitted() {
        let mut sink = client_sink(Some(""));
        let mut ctx = SsrContext::new();
        sink.init_server(&mut ctx, "a{}");
        assert!(!ctx.head.contains("nonce"));

        let mut sink = client_sink(Some(""));
        sink.init_client();
        sink.write("a{}");

        let doc = sink.document().unwrap();
        let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(doc.attribute(&node, "nonce"), None);
    }

    #[test]
    fn test_adopts_server_rendered_node() {
        let mut doc = MemoryDocument::new();
        let existing = doc.create_element("style");
        doc.set_attribute(&existing, "id", STYLE_ELEMENT_ID);
        doc.append_to_head(&existing);
        doc.set_text_content(&existing, "server{}");

        let mut sink = OutputSink::new(Some(doc), None);
        sink.init_client();
        sink.write("client{}");

        let doc = sink.document().unwrap();
        assert_eq!(doc.head_len(), 1);
        assert_eq!(doc.text_content(&existing), Some("client{}"));
        assert_eq!(sink.state(), &SinkState::ClientAttached(existing));
    }

    #[test]
    fn test_reattaches_removed_node() {
        let mut sink = client_sink(None);
        sink.init_client();
        sink.write("a{}");

        let first = sink.document().unwrap().element_by_id(STYLE_ELEMENT_ID).unwrap();
        sink.document_mut().unwrap().remove(&first);

        sink.write("b{}");
        let doc = sink.document().unwrap();
        assert_eq!(doc.count_by_id(STYLE_ELEMENT_ID), 1);
        let second = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_ne!(first, second);
        assert_eq!(doc.text_content(&second), Some("b{}"));
    }

    #[test]
    fn test_write_without_document_is_noop() {
        let mut sink: OutputSink<MemoryDocument> = OutputSink::new(None, None);
        assert!(!sink.init_client());
        sink.write("a{}");
        assert_eq!(sink.state(), &SinkState::Pending);
    }

    #[test]
    fn test_server_appends_and_ignores_writes() {
        let mut sink = client_sink(Some("abc"));
        let mut ctx = SsrContext::with_head("<meta>");

        sink.init_server(&mut ctx, "a{}");
        sink.write("b{}");

        assert_eq!(
            ctx.head,
            r#"<meta><style type="text/css" id="tinct-theme-stylesheet" nonce="abc">a{}</style>"#
        );
        assert_eq!(sink.state(), &SinkState::Server);
        assert_eq!(sink.document().unwrap().head_len(), 0);
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut sink = OutputSink::disabled(Some(MemoryDocument::new()));
        let mut ctx = SsrContext::new();

        sink.init_server(&mut ctx, "a{}");
        assert!(!sink.init_client());
        sink.write("a{}");
        sink.clear();

        assert_eq!(ctx.head, "");
        assert_eq!(sink.document().unwrap().head_len(), 0);
        assert!(sink.is_disabled());
    }

    #[test]
    fn test_clear_empties_attached_node() {
        let mut sink = client_sink(None);
        sink.init_client();
        sink.write("a{}");
        sink.clear();

        let doc = sink.document().unwrap();
        let node = doc.element_by_id(STYLE_ELEMENT_ID).unwrap();
        assert_eq!(doc.text_content(&node), Some(""));
    }
}
