//! XML element subtree model
//!
//! An [`Element`] is the unit handed from the streaming parser to the
//! transformer: a tag name, attributes in source order, child elements in
//! document order, and the leading text fragment if any.

use indexmap::IndexMap;

/// A fully-parsed XML element subtree
///
/// Attribute names are unique within an element and iterate in the order
/// they appeared in the source. Children preserve document order and may
/// repeat tag names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// The element tag name
    pub tag: String,
    /// Element attributes, in source order
    pub attributes: IndexMap<String, String>,
    /// Child elements, in document order
    pub children: Vec<Element>,
    /// Immediate text content before the first child, unescaped, untrimmed
    pub text: Option<String>,
}

impl Element {
    /// Create a new element with a tag name
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Get the tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the text content
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content, keeping only the first fragment seen
    ///
    /// Matches the leading-text convention: text between the element's start
    /// tag and its first child. Later fragments (tails after children) are
    /// dropped.
    pub fn set_leading_text(&mut self, text: String) {
        if self.text.is_none() && self.children.is_empty() {
            self.text = Some(text);
        }
    }

    /// Set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Check if the element has attributes
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Check if the element has children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Count all elements in this subtree, including this one
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_size).sum::<usize>()
    }

    /// Find child elements by tag name
    pub fn find_children(&self, tag: &str) -> Vec<&Element> {
        self.children.iter().filter(|e| e.tag() == tag).collect()
    }
}
