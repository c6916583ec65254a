//! Host document abstraction.

use std::collections::BTreeMap;
use std::fmt;

/// The operations the engine needs from a live document.
///
/// Browser bindings implement this over real DOM nodes; [`MemoryDocument`]
/// implements it in memory for non-browser hosts and tests.
pub trait Document {
    /// Handle to an element owned by the document.
    type Node: Clone + fmt::Debug;

    /// Finds an attached element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Attaches an element to the end of the head region.
    fn append_to_head(&mut self, node: &Self::Node);

    /// Replaces the element's text content.
    fn set_text_content(&mut self, node: &Self::Node, text: &str);

    /// Returns true while the element is attached to the document.
    fn contains(&self, node: &Self::Node) -> bool;
}

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
}

/// An in-memory document with a head region.
///
/// # Example
///
/// ```rust
/// use tinct::{Document, MemoryDocument};
///
/// let mut doc = MemoryDocument::new();
/// let node = doc.create_element("style");
/// doc.set_attribute(&node, "id", "site-css");
/// doc.append_to_head(&node);
/// doc.set_text_content(&node, "body{margin:0}");
///
/// assert_eq!(doc.element_by_id("site-css"), Some(node));
/// assert_eq!(doc.head_markup(), r#"<style id="site-css">body{margin:0}</style>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    head: Vec<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attached elements carrying the given `id`.
    pub fn count_by_id(&self, id: &str) -> usize {
        self.head
            .iter()
            .filter(|node| self.element(**node).attributes.get("id").map(String::as_str) == Some(id))
            .count()
    }

    pub fn text_content(&self, node: &NodeId) -> Option<&str> {
        self.elements.get(node.0).map(|el| el.text.as_str())
    }

    pub fn attribute(&self, node: &NodeId, name: &str) -> Option<&str> {
        self.elements
            .get(node.0)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    pub fn tag(&self, node: &NodeId) -> Option<&str> {
        self.elements.get(node.0).map(|el| el.tag.as_str())
    }

    /// Detaches an element from the head region.
    pub fn remove(&mut self, node: &NodeId) -> bool {
        let before = self.head.len();
        self.head.retain(|attached| attached != node);
        self.head.len() != before
    }

    /// Number of elements attached to the head region.
    pub fn head_len(&self) -> usize {
        self.head.len()
    }

    /// Serializes the head region as markup, attributes in name order.
    pub fn head_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.head {
            let el = self.element(*node);
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attributes {
                out.push_str(&format!(" {}=\"{}\"", name, value));
            }
            out.push('>');
            out.push_str(&el.text);
            out.push_str(&format!("</{}>", el.tag));
        }
        out
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.head
            .iter()
            .copied()
            .find(|node| self.element(*node).attributes.get("id").map(String::as_str) == Some(id))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.elements.push(Element {
            tag: tag.to_string(),
            ..Element::default()
        });
        NodeId(self.elements.len() - 1)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn append_to_head(&mut self, node: &NodeId) {
        if node.0 < self.elements.len() && !self.head.contains(node) {
            self.head.push(*node);
        }
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) {
        if let Some(el) = self.elements.get_mut(node.0) {
            el.text = text.to_string();
        }
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.head.contains(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_element_is_not_found() {
        let mut doc = MemoryDocument::new();
        let node = doc.create_element("style");
        doc.set_attribute(&node, "id", "x");

        assert!(!doc.contains(&node));
        assert_eq!(doc.element_by_id("x"), None);

        doc.append_to_head(&node);
        assert!(doc.contains(&node));
        assert_eq!(doc.element_by_id("x"), Some(node));
    }

    #[test]
    fn test_append_twice_attaches_once() {
        let mut doc = MemoryDocument::new();
        let node = doc.create_element("style");
        doc.append_to_head(&node);
        doc.append_to_head(&node);
        assert_eq!(doc.head_len(), 1);
    }

    #[test]
    fn test_remove_detaches() {
        let mut doc = MemoryDocument::new();
        let node = doc.create_element("style");
        doc.set_attribute(&node, "id", "x");
        doc.append_to_head(&node);

        assert!(doc.remove(&node));
        assert!(!doc.remove(&node));
        assert_eq!(doc.count_by_id("x"), 0);
    }

    #[test]
    fn test_head_markup() {
        let mut doc = MemoryDocument::new();
        let node = doc.create_element("style");
        doc.set_attribute(&node, "type", "text/css");
        doc.set_attribute(&node, "id", "x");
        doc.append_to_head(&node);
        doc.set_text_content(&node, "a{}");

        assert_eq!(
            doc.head_markup(),
            r#"<style id="x" type="text/css">a{}</style>"#
        );
    }
}
