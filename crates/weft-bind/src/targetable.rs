//! Target lookup (`data-target`, `data-targets`)
//!
//! Named descendant lookup by whole-token attribute matching. Shadow-root
//! matches take priority over light-DOM matches; elements owned by a nested
//! same-tag controller are never returned.

use weft_dom::{attr_token_contains, Dom, NodeId};

/// The single-target attribute name
pub const TARGET_ATTR: &str = "data-target";

/// The multi-target attribute name
pub const TARGETS_ATTR: &str = "data-targets";

/// Find the first target named `name` for `controller`: shadow-root matches
/// first, then light DOM, document order within each.
pub fn find_target(dom: &Dom, controller: NodeId, name: &str) -> Option<NodeId> {
    find_all(dom, controller, name, TARGET_ATTR).into_iter().next()
}

/// Find all targets named `name` for `controller`, shadow matches listed
/// first. Empty when nothing matches.
pub fn find_targets(dom: &Dom, controller: NodeId, name: &str) -> Vec<NodeId> {
    find_all(dom, controller, name, TARGETS_ATTR)
}

fn find_all(dom: &Dom, controller: NodeId, name: &str, attribute: &str) -> Vec<NodeId> {
    let Some(tag) = dom.tag_of(controller).map(str::to_string) else {
        return Vec::new();
    };
    // Whole-token equality against "<tag>.<name>", never substring.
    let token = format!("{tag}.{name}");
    let mut out = Vec::new();

    if let Some(shadow) = dom.shadow_root(controller) {
        for element in dom.elements_with_attribute(shadow, attribute) {
            let matches = dom
                .get_attribute(element, attribute)
                .is_some_and(|v| attr_token_contains(v, &token));
            // Skip elements owned by a nested same-tag controller within
            // the shadow tree.
            if matches && dom.closest_tag(element, &tag).is_none() {
                out.push(element);
            }
        }
    }

    for element in dom.elements_with_attribute(controller, attribute) {
        if element == controller {
            continue;
        }
        let matches = dom
            .get_attribute(element, attribute)
            .is_some_and(|v| attr_token_contains(v, &token));
        // The nearest same-tag ancestor must be the controller itself.
        if matches && dom.closest_tag(element, &tag) == Some(controller) {
            out.push(element);
        }
    }

    out
}
