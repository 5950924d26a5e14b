//! DOM Node
//!
//! Nodes live in the tree arena and link to each other by `NodeId`
//! instead of pointers, so moving a node is a handful of index updates.

use crate::forms::{ControlState, FileEntry};
use crate::{DOMStringMap, DOMTokenList, InlineStyle, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype { name: name.into() })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may have children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are kept both as raw attributes and in parsed form;
/// every mutation goes through the methods below so the two never drift.
#[derive(Debug)]
pub struct ElementData {
    /// Lowercased tag name
    pub local_name: String,
    attrs: NamedNodeMap,
    classes: DOMTokenList,
    style: InlineStyle,
    /// Live form-control state (value property, selected files)
    pub control: ControlState,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            local_name: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            classes: DOMTokenList::new(),
            style: InlineStyle::new(),
            control: ControlState::default(),
        }
    }

    /// Check the tag name
    #[inline]
    pub fn is(&self, tag: &str) -> bool {
        self.local_name.eq_ignore_ascii_case(tag)
    }

    pub fn attributes(&self) -> &NamedNodeMap {
        &self.attrs
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Set an attribute
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if name.eq_ignore_ascii_case("class") {
            self.classes = DOMTokenList::from_string(value);
        } else if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::parse(value);
        }
        self.attrs.set_attribute(name, value);
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("class") {
            self.classes = DOMTokenList::new();
        } else if name.eq_ignore_ascii_case("style") {
            self.style = InlineStyle::new();
        }
        self.attrs.remove_attribute(name).map(|a| a.value)
    }

    /// Element id
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Class list
    pub fn class_list(&self) -> &DOMTokenList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) -> bool {
        let added = self.classes.add(class);
        if added {
            self.sync_class_attr();
        }
        added
    }

    pub fn remove_class(&mut self, class: &str) -> bool {
        let removed = self.classes.remove(class);
        if removed {
            self.sync_class_attr();
        }
        removed
    }

    /// Toggle a class, returns whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        let present = self.classes.toggle(class);
        self.sync_class_attr();
        present
    }

    fn sync_class_attr(&mut self) {
        self.attrs.set_attribute("class", &self.classes.value());
    }

    /// Inline style
    pub fn style(&self) -> &InlineStyle {
        &self.style
    }

    /// Set an inline style property (empty value removes it)
    pub fn set_style_property(&mut self, prop: &str, value: &str) {
        self.style.set_property(prop, value);
        if self.style.is_empty() {
            self.attrs.remove_attribute("style");
        } else {
            self.attrs.set_attribute("style", &self.style.css_text());
        }
    }

    /// data-* attributes
    pub fn dataset(&self) -> DOMStringMap {
        DOMStringMap::from_attributes(&self.attrs)
    }

    /// Files selected in a file input
    pub fn files(&self) -> &[FileEntry] {
        &self.control.files
    }
}
