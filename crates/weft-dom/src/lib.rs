//! weft DOM - Headless document tree
//!
//! Arena-based DOM substrate for the weft binding engine: elements with
//! attributes, shadow roots, synthetic events, and a mutation-record log.
//! No browser required.

mod event;
mod node;
mod observer;
mod shadow;
mod token;
mod tree;

pub use event::Event;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use observer::{MutationKind, MutationRecord};
pub use shadow::ShadowRootMode;
pub use token::attr_token_contains;
pub use tree::{Descendants, Dom, DomError, DomResult};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to an actual node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
