//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so `NodeId`s
//! held by listeners and controllers stay valid for the page's lifetime.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId, Selector};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node::doctype(name))
    }

    /// Element data, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data, if `id` is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    fn element_or_err(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.nodes.get_mut(id.index()) {
            None => Err(DomError::NotFound(id)),
            Some(node) => node.as_element_mut().ok_or(DomError::InvalidNodeType(id)),
        }
    }

    /// Lowercased tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.local_name.as_str())
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Parent node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Parent, if it is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|&p| self.element(p).is_some())
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Direct children that are elements
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|&c| self.element(c).is_some())
            .collect()
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.get(id)?.next_sibling;
        while cur.is_valid() {
            if self.element(cur).is_some() {
                return Some(cur);
            }
            cur = self.get(cur)?.next_sibling;
        }
        None
    }

    /// Position among the parent's element children
    pub fn element_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.element_children(parent).iter().position(|&c| c == id)
    }

    /// All descendants in document order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(cur) = stack.pop() {
            out.push(cur);
            let first = stack.len();
            stack.extend(self.children(cur));
            stack[first..].reverse();
        }
        out
    }

    /// Whether `node` is `ancestor` or lies beneath it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if !parent_node.is_container() || matches!(child_node.data, NodeData::Document) {
            return Err(DomError::InvalidNodeType(parent));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Unlink a node from its parent; no-op when already detached
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Append a child, moving it from its current position if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_child` before `reference` (or at the end when None)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, new_child)?;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            if r == new_child {
                return Ok(new_child);
            }
        }

        self.detach(new_child);

        let (prev, next) = match reference {
            Some(r) => (self.nodes[r.index()].prev_sibling, r),
            None => (self.nodes[parent.index()].last_child, NodeId::NONE),
        };

        {
            let node = &mut self.nodes[new_child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = new_child;
        } else {
            self.nodes[parent.index()].first_child = new_child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = new_child;
        } else {
            self.nodes[parent.index()].last_child = new_child;
        }

        Ok(new_child)
    }

    /// Remove a child from a parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    // ---------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes (`textContent`)
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) | Some(NodeData::Comment(t)) => t.clone(),
            Some(_) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| self.get(d).and_then(Node::as_text))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace all children with a single text node (`textContent = ...`)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound(id))?;
        match &mut node.data {
            NodeData::Text(t) | NodeData::Comment(t) => {
                *t = text.to_string();
                return Ok(());
            }
            NodeData::Element(_) => {}
            _ => return Err(DomError::InvalidNodeType(id)),
        }

        let children: Vec<NodeId> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Attributes, classes, style
    // ---------------------------------------------------------------------

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_or_err(id)?.set_attribute(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_or_err(id)?.remove_attribute(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        Ok(self.element_or_err(id)?.add_class(class))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        Ok(self.element_or_err(id)?.remove_class(class))
    }

    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        Ok(self.element_or_err(id)?.toggle_class(class))
    }

    pub fn style_property(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.element(id)?.style().get_property(prop)
    }

    pub fn set_style_property(&mut self, id: NodeId, prop: &str, value: &str) -> DomResult<()> {
        self.element_or_err(id)?.set_style_property(prop, value);
        Ok(())
    }

    /// Hidden through an inline `display: none`
    pub fn is_display_none(&self, id: NodeId) -> bool {
        self.style_property(id, "display")
            .is_some_and(|d| d.eq_ignore_ascii_case("none"))
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Whether an element matches a selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|el| selector.matches(el))
    }

    /// All descendant elements of `scope` matching `selector`, in document order
    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// `querySelectorAll` with selector text
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(scope, &selector))
    }

    /// `querySelector` with selector text
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|&id| self.matches(id, &selector)))
    }

    /// Descendant elements with a tag name
    pub fn get_elements_by_tag_name(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|el| el.is(tag)))
            .collect()
    }

    /// Closest inclusive ancestor element with a tag name
    pub fn closest_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.element(node).is_some_and(|el| el.is(tag)) {
                return Some(node);
            }
            cur = self.parent(node);
        }
        None
    }

    /// Closest inclusive ancestor element matching a selector
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(node) = cur {
            if self.matches(node, selector) {
                return Some(node);
            }
            cur = self.parent(node);
        }
        None
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_navigate() {
        let mut tree = DomTree::new();
        let table = tree.create_element("table");
        let tbody = tree.create_element("tbody");
        let row = tree.create_element("tr");
        let text = tree.create_text("Widget A");

        tree.append_child(tree.root(), table).unwrap();
        tree.append_child(table, tbody).unwrap();
        tree.append_child(tbody, row).unwrap();
        tree.append_child(row, text).unwrap();

        assert_eq!(tree.parent(row), Some(tbody));
        assert_eq!(tree.children(table).collect::<Vec<_>>(), vec![tbody]);
        assert_eq!(tree.descendants(table), vec![tbody, row, text]);
        assert_eq!(tree.text_content(table), "Widget A");
        assert!(tree.is_connected(text));
        assert_eq!(tree.closest_tag(text, "table"), Some(table));
    }

    #[test]
    fn test_insert_before_and_move() {
        let mut tree = DomTree::new();
        let list = tree.create_element("tbody");
        tree.append_child(tree.root(), list).unwrap();
        let a = tree.create_element("tr");
        let b = tree.create_element("tr");
        let c = tree.create_element("tr");
        tree.append_child(list, a).unwrap();
        tree.append_child(list, c).unwrap();
        tree.insert_before(list, b, Some(c)).unwrap();
        assert_eq!(tree.element_children(list), vec![a, b, c]);

        // Re-appending moves the node to the end
        tree.append_child(list, a).unwrap();
        assert_eq!(tree.element_children(list), vec![b, c, a]);
        assert_eq!(tree.element_index(a), Some(2));
        assert_eq!(tree.next_element_sibling(b), Some(c));
        assert_eq!(tree.next_element_sibling(a), None);
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let text = tree.create_text("x");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { parent: inner, child: outer })
        );
        assert_eq!(tree.append_child(text, inner), Err(DomError::InvalidNodeType(text)));
        let stray = tree.create_element("span");
        assert_eq!(
            tree.insert_before(outer, text, Some(stray)),
            Err(DomError::NotAChild { parent: outer, child: stray })
        );
        assert_eq!(
            tree.remove_child(outer, stray),
            Err(DomError::NotAChild { parent: outer, child: stray })
        );
    }

    #[test]
    fn test_detach_keeps_ids_valid() {
        let mut tree = DomTree::new();
        let alert = tree.create_element("div");
        tree.append_child(tree.root(), alert).unwrap();
        tree.detach(alert);
        tree.detach(alert);

        assert!(!tree.is_connected(alert));
        assert!(tree.element(alert).is_some());
        assert!(tree.descendants(tree.root()).is_empty());
    }

    #[test]
    fn test_set_text_content() {
        let mut tree = DomTree::new();
        let label = tree.create_element("label");
        let old = tree.create_text("Choose file");
        tree.append_child(label, old).unwrap();

        tree.set_text_content(label, "stock.csv").unwrap();
        assert_eq!(tree.text_content(label), "stock.csv");
        assert_eq!(tree.children(label).count(), 1);

        tree.set_text_content(label, "").unwrap();
        assert_eq!(tree.children(label).count(), 0);
    }

    #[test]
    fn test_queries() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        tree.append_child(tree.root(), body).unwrap();
        let ok = tree.create_element("div");
        tree.set_attribute(ok, "class", "alert alert-info").unwrap();
        let keep = tree.create_element("div");
        tree.set_attribute(keep, "class", "alert alert-permanent").unwrap();
        tree.append_child(body, ok).unwrap();
        tree.append_child(body, keep).unwrap();

        let found = tree
            .query_selector_all(tree.root(), ".alert:not(.alert-permanent)")
            .unwrap();
        assert_eq!(found, vec![ok]);
        assert_eq!(tree.query_selector(tree.root(), ".alert").unwrap(), Some(ok));
        assert!(tree.query_selector_all(tree.root(), "div > p").is_err());
        assert_eq!(tree.get_elements_by_tag_name(tree.root(), "DIV"), vec![ok, keep]);
    }

    #[test]
    fn test_style_helpers() {
        let mut tree = DomTree::new();
        let row = tree.create_element("tr");
        tree.set_style_property(row, "display", "none").unwrap();
        assert!(tree.is_display_none(row));
        tree.set_style_property(row, "display", "").unwrap();
        assert!(!tree.is_display_none(row));

        let text = tree.create_text("x");
        assert_eq!(
            tree.set_style_property(text, "display", "none"),
            Err(DomError::InvalidNodeType(text))
        );
    }
}
