//! Shadow DOM
//!
//! Shadow roots as independent trees attached to a host element.

use crate::node::{Node, NodeData};
use crate::tree::{Dom, DomError, DomResult};
use crate::NodeId;

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl Dom {
    /// Attach a shadow root to `host`, returning the shadow root node
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> DomResult<NodeId> {
        match self.get(host) {
            None => return Err(DomError::NotFound),
            Some(node) => match node.as_element() {
                None => return Err(DomError::NotAnElement),
                Some(el) if el.shadow_root.is_valid() => {
                    return Err(DomError::ShadowAlreadyAttached);
                }
                Some(_) => {}
            },
        }
        let shadow = self.alloc(Node::new(NodeData::ShadowRoot { host, mode }));
        if let Some(el) = self.get_mut(host).and_then(|n| n.as_element_mut()) {
            el.shadow_root = shadow;
        }
        tracing::debug!("attached {mode:?} shadow root {shadow:?} to {host:?}");
        Ok(shadow)
    }

    /// Shadow root attached to `element`, if any
    pub fn shadow_root(&self, element: NodeId) -> Option<NodeId> {
        let el = self.get(element)?.as_element()?;
        if el.shadow_root.is_valid() {
            Some(el.shadow_root)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_shadow() {
        let mut dom = Dom::new();
        let host = dom.create_element("c-el");
        dom.append_child(dom.document(), host).unwrap();

        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        assert_eq!(dom.shadow_root(host), Some(shadow));
        assert_eq!(dom.host_of(shadow), Some(host));

        assert_eq!(
            dom.attach_shadow(host, ShadowRootMode::Open),
            Err(DomError::ShadowAlreadyAttached)
        );
    }

    #[test]
    fn test_shadow_is_its_own_tree() {
        let mut dom = Dom::new();
        let host = dom.create_element("c-el");
        dom.append_child(dom.document(), host).unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let inner = dom.create_element("div");
        dom.append_child(shadow, inner).unwrap();

        assert_eq!(dom.root_of(inner), shadow);
        assert!(dom.is_connected(inner));

        // Light-tree traversal of the host never enters the shadow tree.
        let light: Vec<_> = dom.descendants(host).collect();
        assert!(light.is_empty());
    }

    #[test]
    fn test_attach_shadow_requires_element() {
        let mut dom = Dom::new();
        let text = dom.create_text("hi");
        assert_eq!(
            dom.attach_shadow(text, ShadowRootMode::Open),
            Err(DomError::NotAnElement)
        );
    }
}
