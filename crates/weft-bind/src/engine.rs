//! Engine
//!
//! Owns the Dom and wires the registry, watcher, and consumers together.
//! This is the public surface: registration, scanning, observation, action
//! binding, target lookup, and event dispatch.

use weft_dom::{Dom, Event, NodeId};

use crate::actionable::{self, ACTION_ATTR};
use crate::controller::{ControllerClass, ControllerRegistry};
use crate::error::BindError;
use crate::parse::{parse_actions, ParseFn};
use crate::registry::{FoundFn, TagRegistry};
use crate::scan;
use crate::targetable;
use crate::watch::{MutationWatcher, WatchHandle};

/// Binding engine: one per document
pub struct Engine {
    dom: Dom,
    registry: TagRegistry,
    controllers: ControllerRegistry,
    watcher: MutationWatcher,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with `data-action` pre-registered
    pub fn new() -> Self {
        let mut registry = TagRegistry::new();
        registry
            .register(
                ACTION_ATTR,
                parse_actions,
                Box::new(actionable::install_action_listener),
            )
            .expect("fresh registry cannot hold a duplicate");
        Self {
            dom: Dom::new(),
            registry,
            controllers: ControllerRegistry::new(),
            watcher: MutationWatcher::new(),
        }
    }

    /// The underlying document
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the underlying document
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Register an attribute tag; errors on a duplicate name
    pub fn register_attribute_tag(
        &mut self,
        attribute: &str,
        parse: ParseFn,
        found: FoundFn,
    ) -> Result<(), BindError> {
        self.registry.register(attribute, parse, found)
    }

    /// Define a controller class for a custom-element tag
    pub fn define_controller(
        &mut self,
        tag: &str,
        class: ControllerClass,
    ) -> Result<(), BindError> {
        self.controllers.define(tag, class)
    }

    /// Immediate synchronous scan of `root` for all registered attributes
    pub fn scan_subtree(&mut self, root: NodeId) {
        scan::scan_subtree(&mut self.dom, &mut self.registry, root);
    }

    /// Install action bindings for a controller's current subtree and keep
    /// them live for its future subtree
    pub fn bind_actions(&mut self, controller: NodeId) -> WatchHandle {
        scan::scan_subtree(&mut self.dom, &mut self.registry, controller);
        self.watcher.observe(controller)
    }

    /// Begin incremental observation of `root`
    pub fn observe_for_changes(&mut self, root: NodeId) -> WatchHandle {
        self.watcher.observe(root)
    }

    /// Permanently detach one observation; other watches continue
    pub fn stop(&mut self, handle: WatchHandle) {
        self.watcher.stop(handle);
    }

    /// Process pending mutations: the microtask/frame boundary
    pub fn tick(&mut self) {
        self.watcher.tick(&mut self.dom, &mut self.registry);
    }

    /// Fire a synthetic event at `target` and bubble it along the composed
    /// path, running the action algorithm at every element listening for
    /// this event kind
    pub fn dispatch_event(&mut self, target: NodeId, kind: &str) -> Event {
        let event = Event::new(kind, target);
        let path = self.dom.propagation_path(target);
        tracing::debug!("dispatching `{kind}` at {target:?} along {} node(s)", path.len());
        for element in path {
            if self.dom.has_listener(element, kind) {
                actionable::dispatch_action_event(
                    &mut self.dom,
                    &mut self.controllers,
                    element,
                    &event,
                );
            }
        }
        event
    }

    /// Find the first target named `name` for `controller`
    pub fn find_target(&self, controller: NodeId, name: &str) -> Option<NodeId> {
        targetable::find_target(&self.dom, controller, name)
    }

    /// Find all targets named `name` for `controller`
    pub fn find_targets(&self, controller: NodeId, name: &str) -> Vec<NodeId> {
        targetable::find_targets(&self.dom, controller, name)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("nodes", &self.dom.len())
            .field("registry", &self.registry)
            .finish()
    }
}
