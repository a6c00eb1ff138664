//! Subtree scanning
//!
//! Walks a subtree for every registered attribute, parses current values,
//! resolves controllers, and dispatches found matches. Idempotent by
//! contract: consumers de-duplicate their own effects.

use weft_dom::{Dom, NodeId};

use crate::registry::{Found, TagRegistry};
use crate::resolve::resolve_controller;

/// Scan `root` and its descendants for all registered attributes
pub fn scan_subtree(dom: &mut Dom, registry: &mut TagRegistry, root: NodeId) {
    let attributes = registry.attribute_filter().to_vec();
    tracing::trace!("scanning subtree from {root:?} for {attributes:?}");
    for attribute in &attributes {
        for element in dom.elements_with_attribute(root, attribute) {
            scan_element(dom, registry, element, attribute);
        }
    }
}

/// Parse/resolve/dispatch one element's current attribute value. Used both
/// by the subtree scan and by the watcher's single-attribute fast path.
pub(crate) fn scan_element(
    dom: &mut Dom,
    registry: &mut TagRegistry,
    element: NodeId,
    attribute: &str,
) {
    // Always the live value, never a cached one.
    let Some(value) = dom.get_attribute(element, attribute).map(str::to_string) else {
        return;
    };
    let Some(registration) = registry.get_mut(attribute) else {
        return;
    };
    let entries = (registration.parse)(&value);
    for entry in &entries {
        let Some(controller) = resolve_controller(dom, element, &entry.tag) else {
            continue;
        };
        let found = Found {
            element,
            controller,
            attribute,
            entry,
        };
        // A faulting handler must not starve sibling bindings.
        if let Err(err) = (registration.found)(dom, &found) {
            tracing::warn!("found handler for `{attribute}` on {element:?} failed: {err}");
        }
    }
}
