//! Mutation records
//!
//! Every structural or attribute mutation on a `Dom` appends a record to a
//! single log, drained in insertion order by whoever is watching. This is
//! the pull-model counterpart of a MutationObserver batch.

use crate::NodeId;

/// One recorded mutation
#[derive(Debug, Clone)]
pub struct MutationRecord {
    /// For child-list changes, the parent; for attribute changes, the element
    pub target: NodeId,
    pub kind: MutationKind,
}

/// What changed
#[derive(Debug, Clone)]
pub enum MutationKind {
    /// Children added to / removed from `target`
    ChildList {
        added: Vec<NodeId>,
        removed: Vec<NodeId>,
    },
    /// An attribute on `target` was set or removed
    Attributes {
        name: String,
        old_value: Option<String>,
    },
}
