//! Dom arena and tree operations
//!
//! Arena-allocated nodes, structural mutation with record emission, and
//! document-order traversal scoped to a single tree (shadow trees are
//! separate roots and are never entered by traversal).

use std::collections::{HashMap, HashSet};

use crate::node::{ElementData, Node, NodeData};
use crate::observer::{MutationKind, MutationRecord};
use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting a node into its own subtree)
    #[error("hierarchy request error")]
    HierarchyRequest,
    /// Node is not a child of the given parent
    #[error("node is not a child of the given parent")]
    NotAChild,
    /// Operation requires an element
    #[error("node is not an element")]
    NotAnElement,
    /// Host already has a shadow root
    #[error("shadow root already attached")]
    ShadowAlreadyAttached,
}

/// Arena-based DOM
#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
    document: NodeId,
    records: Vec<MutationRecord>,
    pub(crate) listeners: HashMap<NodeId, HashSet<String>>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a DOM holding only the document node
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
            records: Vec::new(),
            listeners: HashMap::new(),
        };
        dom.document = dom.alloc(Node::new(NodeData::Document));
        dom
    }

    /// The document node
    #[inline]
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_valid() {
            self.nodes.get(id.0 as usize)
        } else {
            None
        }
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_valid() {
            self.nodes.get_mut(id.0 as usize)
        } else {
            None
        }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn push_record(&mut self, record: MutationRecord) {
        self.records.push(record);
    }

    /// Drain pending mutation records in insertion order
    pub fn take_mutation_records(&mut self) -> Vec<MutationRecord> {
        let records = std::mem::take(&mut self.records);
        if !records.is_empty() {
            tracing::trace!("draining {} mutation record(s)", records.len());
        }
        records
    }

    /// Whether any mutation records are pending
    pub fn has_pending_mutations(&self) -> bool {
        !self.records.is_empty()
    }

    // ---- creation ----

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Text(content.to_string())))
    }

    // ---- structure ----

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        if let Some(r) = reference {
            let Some(node) = self.get(r) else {
                return Err(DomError::NotFound);
            };
            if node.parent != parent {
                return Err(DomError::NotAChild);
            }
        }
        // Inserting a node before itself means before its own next sibling,
        // so the node stays where it is. Relinking with the raw reference
        // would make the node its own successor.
        let reference = match reference {
            Some(r) if r == child => {
                let next = self
                    .get(child)
                    .map(|n| n.next_sibling)
                    .unwrap_or(NodeId::NONE);
                next.is_valid().then_some(next)
            }
            other => other,
        };

        // Moving an attached node first detaches it (with its own record).
        if self
            .get(child)
            .map(|n| n.parent.is_valid())
            .unwrap_or(false)
        {
            let old_parent = self.get(child).map(|n| n.parent).unwrap_or(NodeId::NONE);
            self.unlink(child);
            self.push_record(MutationRecord {
                target: old_parent,
                kind: MutationKind::ChildList {
                    added: Vec::new(),
                    removed: vec![child],
                },
            });
        }

        self.link(parent, child, reference);
        self.push_record(MutationRecord {
            target: parent,
            kind: MutationKind::ChildList {
                added: vec![child],
                removed: Vec::new(),
            },
        });
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        match self.get(child) {
            None => return Err(DomError::NotFound),
            Some(node) if node.parent != parent => return Err(DomError::NotAChild),
            Some(_) => {}
        }
        self.unlink(child);
        self.push_record(MutationRecord {
            target: parent,
            kind: MutationKind::ChildList {
                added: Vec::new(),
                removed: vec![child],
            },
        });
        Ok(child)
    }

    fn link(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let (prev, next) = match reference {
            Some(r) => {
                let prev = self.get(r).map(|n| n.prev_sibling).unwrap_or(NodeId::NONE);
                (prev, r)
            }
            None => {
                let last = self
                    .get(parent)
                    .map(|n| n.last_child)
                    .unwrap_or(NodeId::NONE);
                (last, NodeId::NONE)
            }
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            if let Some(node) = self.get_mut(prev) {
                node.next_sibling = child;
            }
        } else if let Some(node) = self.get_mut(parent) {
            node.first_child = child;
        }
        if next.is_valid() {
            if let Some(node) = self.get_mut(next) {
                node.prev_sibling = child;
            }
        } else if let Some(node) = self.get_mut(parent) {
            node.last_child = child;
        }
    }

    fn unlink(&mut self, child: NodeId) {
        let (parent, prev, next) = match self.get(child) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if prev.is_valid() {
            if let Some(node) = self.get_mut(prev) {
                node.next_sibling = next;
            }
        } else if let Some(node) = self.get_mut(parent) {
            node.first_child = next;
        }
        if next.is_valid() {
            if let Some(node) = self.get_mut(next) {
                node.prev_sibling = prev;
            }
        } else if let Some(node) = self.get_mut(parent) {
            node.last_child = prev;
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    // ---- attributes ----

    /// Get an attribute value on an element
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get(element)?.as_element()?.get_attr(name)
    }

    /// Set an attribute on an element, emitting a mutation record
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        let node = self.get_mut(element).ok_or(DomError::NotFound)?;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement)?;
        let old_value = el.set_attr(name, value);
        self.push_record(MutationRecord {
            target: element,
            kind: MutationKind::Attributes {
                name: name.to_string(),
                old_value,
            },
        });
        Ok(())
    }

    /// Remove an attribute, emitting a record when it existed
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<Option<String>> {
        let node = self.get_mut(element).ok_or(DomError::NotFound)?;
        let el = node.as_element_mut().ok_or(DomError::NotAnElement)?;
        let old_value = el.remove_attr(name);
        if old_value.is_some() {
            self.push_record(MutationRecord {
                target: element,
                kind: MutationKind::Attributes {
                    name: name.to_string(),
                    old_value: old_value.clone(),
                },
            });
        }
        Ok(old_value)
    }

    /// Tag name of an element, lowercase
    pub fn tag_of(&self, element: NodeId) -> Option<&str> {
        self.get(element)?.as_element().map(|e| e.tag.as_str())
    }

    // ---- traversal ----

    /// Whether `ancestor` is a strict ancestor of `node` within one tree
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.get(node).map(|n| n.parent).unwrap_or(NodeId::NONE);
        while cur.is_valid() {
            if cur == ancestor {
                return true;
            }
            cur = self.get(cur).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    /// Root of the tree containing `node` (document, shadow root, or a
    /// detached subtree root)
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut cur = node;
        loop {
            match self.get(cur) {
                Some(n) if n.parent.is_valid() => cur = n.parent,
                _ => return cur,
            }
        }
    }

    /// Host element of a shadow root node
    pub fn host_of(&self, node: NodeId) -> Option<NodeId> {
        match self.get(node)?.data {
            NodeData::ShadowRoot { host, .. } => Some(host),
            _ => None,
        }
    }

    /// Whether `node` is reachable from the document, piercing shadow
    /// boundaries host-ward
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cur = node;
        loop {
            let root = self.root_of(cur);
            if root == self.document {
                return true;
            }
            match self.host_of(root) {
                Some(host) => cur = host,
                None => return false,
            }
        }
    }

    /// Nearest ancestor-or-self element with `tag`, within one tree
    pub fn closest_tag(&self, element: NodeId, tag: &str) -> Option<NodeId> {
        let mut cur = element;
        while cur.is_valid() {
            let node = self.get(cur)?;
            if let Some(el) = node.as_element() {
                if el.tag.eq_ignore_ascii_case(tag) {
                    return Some(cur);
                }
            }
            cur = node.parent;
        }
        None
    }

    /// Strict descendants of `root` in document order (pre-order); never
    /// enters shadow trees
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let first = self
            .get(root)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Descendants {
            dom: self,
            root,
            next: first,
        }
    }

    /// Elements under `root` (including `root` itself when it is an element)
    /// carrying `attribute`, in document order
    pub fn elements_with_attribute(&self, root: NodeId, attribute: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.get_attribute(root, attribute).is_some() {
            out.push(root);
        }
        for id in self.descendants(root) {
            if self.get_attribute(id, attribute).is_some() {
                out.push(id);
            }
        }
        out
    }
}

/// Pre-order descendant iterator
#[derive(Debug)]
pub struct Descendants<'a> {
    dom: &'a Dom,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.dom.get(current)?;

        // Pre-order successor: first child, else next sibling, else the
        // next sibling of the nearest ancestor below the root.
        if node.first_child.is_valid() {
            self.next = node.first_child;
        } else {
            let mut cur = current;
            self.next = NodeId::NONE;
            while cur.is_valid() && cur != self.root {
                let n = self.dom.get(cur)?;
                if n.next_sibling.is_valid() {
                    self.next = n.next_sibling;
                    break;
                }
                cur = n.parent;
            }
        }
        Some(current)
    }
}
