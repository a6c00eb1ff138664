//! Mutation watcher
//!
//! One shared watcher drains the Dom's mutation log once per tick (the
//! microtask/frame boundary) and keeps bindings live: added subtrees are
//! re-scanned, a changed attribute re-binds only its own element. Scan
//! state is re-derived from the tree, never persisted.

use std::collections::HashSet;

use weft_dom::{Dom, MutationKind, NodeId};

use crate::registry::TagRegistry;
use crate::scan;

/// Handle for one caller's observation; pass to `stop` to detach it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchHandle(u64);

#[derive(Debug)]
struct Watch {
    handle: WatchHandle,
    root: NodeId,
    active: bool,
}

/// Shared mutation watcher
#[derive(Debug, Default)]
pub struct MutationWatcher {
    watches: Vec<Watch>,
    next_handle: u64,
}

impl MutationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin incremental observation of `root`
    pub fn observe(&mut self, root: NodeId) -> WatchHandle {
        let handle = WatchHandle(self.next_handle);
        self.next_handle += 1;
        self.watches.push(Watch {
            handle,
            root,
            active: true,
        });
        tracing::debug!("watching {root:?} as {handle:?}");
        handle
    }

    /// Permanently detach one caller's observation. Registrations and other
    /// watches are unaffected; stopping twice is a no-op.
    pub fn stop(&mut self, handle: WatchHandle) {
        for watch in self.watches.iter_mut() {
            if watch.handle == handle {
                watch.active = false;
            }
        }
    }

    /// Whether `handle` still observes its root
    pub fn is_active(&self, handle: WatchHandle) -> bool {
        self.watches
            .iter()
            .any(|w| w.handle == handle && w.active)
    }

    /// Process pending mutation records, in delivery order. Records produced
    /// by handlers during this tick land in the log for the next tick, so
    /// re-entrant mutation cannot loop unboundedly here.
    ///
    /// Bursts coalesce: repeated writes to one (element, attribute) and
    /// repeated insertions of one subtree each produce a single re-handle
    /// per tick, always against the current tree state.
    pub fn tick(&mut self, dom: &mut Dom, registry: &mut TagRegistry) {
        let records = dom.take_mutation_records();
        if records.is_empty() {
            return;
        }
        tracing::trace!("processing {} mutation record(s)", records.len());
        let mut scanned: HashSet<NodeId> = HashSet::new();
        let mut rehandled: HashSet<(NodeId, String)> = HashSet::new();
        for record in records {
            match record.kind {
                MutationKind::ChildList { added, .. } => {
                    for node in added {
                        let is_element = dom.get(node).is_some_and(|n| n.is_element());
                        if is_element && scanned.insert(node) && self.covers(dom, node) {
                            scan::scan_subtree(dom, registry, node);
                        }
                    }
                }
                MutationKind::Attributes { ref name, .. } => {
                    // Single-element fast path: no subtree rescan.
                    if registry.is_registered(name)
                        && rehandled.insert((record.target, name.clone()))
                        && self.covers(dom, record.target)
                    {
                        scan::scan_element(dom, registry, record.target, name);
                    }
                }
            }
        }
    }

    // Shadow-including containment: walk host-ward from `node` looking for
    // any active watch root.
    fn covers(&self, dom: &Dom, node: NodeId) -> bool {
        let mut cur = node;
        loop {
            if self
                .watches
                .iter()
                .any(|w| w.active && (w.root == cur || dom.is_ancestor(w.root, cur)))
            {
                return true;
            }
            match dom.host_of(dom.root_of(cur)) {
                Some(host) => cur = host,
                None => return false,
            }
        }
    }
}
