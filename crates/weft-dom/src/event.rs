//! Synthetic events
//!
//! Event dispatch is driven by the binding engine; the Dom only provides
//! the composed propagation path and idempotent listener bookkeeping.

use std::collections::HashSet;

use crate::tree::Dom;
use crate::NodeId;

/// A dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    /// Event kind, e.g. `click` or `custom:event`
    pub kind: String,
    /// Element the event was fired at
    pub target: NodeId,
}

impl Event {
    pub fn new(kind: &str, target: NodeId) -> Self {
        Self {
            kind: kind.to_string(),
            target,
        }
    }
}

impl Dom {
    /// Record a listener for (element, kind). Returns `true` if newly added;
    /// repeated calls are no-ops, mirroring addEventListener with a shared
    /// listener function.
    pub fn ensure_listener(&mut self, element: NodeId, kind: &str) -> bool {
        self.listeners
            .entry(element)
            .or_default()
            .insert(kind.to_string())
    }

    /// Whether (element, kind) has a listener
    pub fn has_listener(&self, element: NodeId, kind: &str) -> bool {
        self.listeners
            .get(&element)
            .is_some_and(|kinds| kinds.contains(kind))
    }

    /// Drop a listener; returns `true` if one was present
    pub fn remove_listener(&mut self, element: NodeId, kind: &str) -> bool {
        self.listeners
            .get_mut(&element)
            .is_some_and(|kinds| kinds.remove(kind))
    }

    /// Number of distinct event kinds listened for on `element`
    pub fn listener_count(&self, element: NodeId) -> usize {
        self.listeners.get(&element).map_or(0, HashSet::len)
    }

    /// Composed bubble path from `target` upward: ancestor elements to the
    /// tree root, continuing from the host when the root is a shadow root.
    pub fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = target;
        while let Some(node) = self.get(cur) {
            if node.is_element() {
                path.push(cur);
            }
            if node.parent.is_valid() {
                cur = node.parent;
            } else if let Some(host) = self.host_of(cur) {
                cur = host;
            } else {
                break;
            }
        }
        path
    }
}
