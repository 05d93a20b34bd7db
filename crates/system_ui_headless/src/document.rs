//! In-memory document implementing [`FocusHost`].
//!
//! Used for headless hosting (server rendering, replaying recorded interactions) and as the
//! shared harness for behavior tests. Focus follows browser rules: only focusable, connected
//! elements accept focus, and removing the focused subtree clears focus.

use serde::{Deserialize, Serialize};

use crate::{ElementTraits, FocusHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Arena index of an element in a [`MemoryDocument`].
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryNode {
    traits: ElementTraits,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
/// Arena-backed element tree with a single focus target.
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    active: Option<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a document containing only `<body>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode {
                traits: ElementTraits::new("body"),
                parent: None,
                children: Vec::new(),
            }],
            active: None,
        }
    }

    /// The document body.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, traits: ElementTraits) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            traits,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    /// Detaches `node` and its subtree from the tree.
    ///
    /// Handles stay valid but report disconnected. Focus inside the subtree is dropped.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body() {
            return;
        }
        if self.active.is_some_and(|active| self.contains(&node, &active)) {
            self.active = None;
        }
        let Some(parent) = self.nodes.get_mut(node.0).and_then(|entry| entry.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.retain(|child| *child != node);
        }
    }

    /// Current traits of `node`.
    pub fn traits(&self, node: NodeId) -> Option<&ElementTraits> {
        self.nodes.get(node.0).map(|entry| &entry.traits)
    }

    /// Mutable traits of `node`, e.g. to toggle `disabled` or `hidden` between key presses.
    pub fn traits_mut(&mut self, node: NodeId) -> Option<&mut ElementTraits> {
        self.nodes.get_mut(node.0).map(|entry| &mut entry.traits)
    }

    /// Simulates the user moving focus (pointer click, screen-reader cursor).
    ///
    /// Returns whether focus moved.
    pub fn click_focus(&mut self, node: NodeId) -> bool {
        let before = self.active;
        self.focus(&node);
        self.active != before
    }

    fn concealed_by_ancestor(&self, node: NodeId) -> bool {
        let mut cursor = self.parent(&node);
        while let Some(ancestor) = cursor {
            if self.describe(&ancestor).conceals_descendants() {
                return true;
            }
            cursor = self.parent(&ancestor);
        }
        false
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let Some(entry) = self.nodes.get(node.0) else {
            return;
        };
        for child in &entry.children {
            out.push(*child);
            self.collect_descendants(*child, out);
        }
    }
}

impl FocusHost for MemoryDocument {
    type Node = NodeId;

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn focus(&mut self, node: &NodeId) {
        if !self.is_connected(node) {
            return;
        }
        let Some(entry) = self.nodes.get(node.0) else {
            return;
        };
        if !entry.traits.is_focusable() || self.concealed_by_ancestor(*node) {
            return;
        }
        self.active = Some(*node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == self.body() {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|entry| entry.parent);
        }
        false
    }

    fn contains(&self, container: &NodeId, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *container {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|entry| entry.parent);
        }
        false
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|entry| entry.parent)
    }

    fn descendants(&self, container: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(*container, &mut out);
        out
    }

    fn describe(&self, node: &NodeId) -> ElementTraits {
        self.traits(*node).cloned().unwrap_or_default()
    }

    fn make_programmatically_focusable(&mut self, node: &NodeId) {
        if let Some(traits) = self.traits_mut(*node) {
            if traits.tabindex.is_none() {
                traits.tabindex = Some(-1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let section = doc.append(body, ElementTraits::new("section"));
        let a = doc.append(section, ElementTraits::new("div"));
        let a1 = doc.append(a, ElementTraits::new("span"));
        let b = doc.append(section, ElementTraits::new("div"));

        assert_eq!(doc.descendants(&section), vec![a, a1, b]);
    }

    #[test]
    fn focus_ignores_non_focusable_and_detached_nodes() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let div = doc.append(body, ElementTraits::new("div"));
        let button = doc.append(body, ElementTraits::new("button"));

        doc.focus(&div);
        assert_eq!(doc.active_element(), None);

        doc.remove(button);
        doc.focus(&button);
        assert_eq!(doc.active_element(), None);
        assert!(!doc.is_connected(&button));
    }

    #[test]
    fn focus_is_refused_inside_concealed_ancestors() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let drawer = doc.append(body, ElementTraits::new("div").with_hidden());
        let nested = doc.append(drawer, ElementTraits::new("div"));
        let button = doc.append(nested, ElementTraits::new("button"));

        assert!(!doc.click_focus(button));
        assert_eq!(doc.active_element(), None);

        if let Some(traits) = doc.traits_mut(drawer) {
            traits.hidden = false;
            traits.inert = true;
        }
        doc.focus(&button);
        assert_eq!(doc.active_element(), None);

        if let Some(traits) = doc.traits_mut(drawer) {
            traits.inert = false;
        }
        doc.focus(&button);
        assert_eq!(doc.active_element(), Some(button));
    }

    #[test]
    fn removing_focused_subtree_clears_focus() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let panel = doc.append(body, ElementTraits::new("div"));
        let input = doc.append(panel, ElementTraits::new("input"));

        assert!(doc.click_focus(input));
        doc.remove(panel);

        assert_eq!(doc.active_element(), None);
        assert!(!doc.is_connected(&input));
    }

    #[test]
    fn programmatic_focusability_keeps_explicit_tabindex() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let plain = doc.append(body, ElementTraits::new("div"));
        let tabbable = doc.append(body, ElementTraits::new("div").with_tabindex(0));

        doc.make_programmatically_focusable(&plain);
        doc.make_programmatically_focusable(&tabbable);

        assert_eq!(doc.describe(&plain).tabindex, Some(-1));
        assert_eq!(doc.describe(&tabbable).tabindex, Some(0));
    }
}
