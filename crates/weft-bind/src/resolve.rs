//! Shadow-piercing controller resolution
//!
//! `closest()` by tag name, retried from the shadow host whenever the local
//! tree is exhausted. O(depth) per call.

use weft_dom::{Dom, NodeId};

/// Nearest ancestor-or-self element matching `tag`, continuing the search
/// from the host when the element's tree root is a shadow root. `None` when
/// no match exists at any level.
pub fn resolve_controller(dom: &Dom, element: NodeId, tag: &str) -> Option<NodeId> {
    let mut start = element;
    loop {
        if let Some(found) = dom.closest_tag(start, tag) {
            return Some(found);
        }
        let root = dom.root_of(start);
        match dom.host_of(root) {
            Some(host) => start = host,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use weft_dom::ShadowRootMode;
    use super::*;

    #[test]
    fn test_resolves_in_local_tree() {
        let mut dom = Dom::new();
        let controller = dom.create_element("c-el");
        let div = dom.create_element("div");
        dom.append_child(dom.document(), controller).unwrap();
        dom.append_child(controller, div).unwrap();

        assert_eq!(resolve_controller(&dom, div, "c-el"), Some(controller));
    }

    #[test]
    fn test_pierces_shadow_boundary_to_host() {
        let mut dom = Dom::new();
        let host = dom.create_element("c-el");
        dom.append_child(dom.document(), host).unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let button = dom.create_element("button");
        dom.append_child(shadow, button).unwrap();

        // No matching ancestor inside the shadow tree; the host matches.
        assert_eq!(resolve_controller(&dom, button, "c-el"), Some(host));
    }

    #[test]
    fn test_pierces_nested_shadows() {
        let mut dom = Dom::new();
        let outer = dom.create_element("c-el");
        dom.append_child(dom.document(), outer).unwrap();
        let outer_shadow = dom.attach_shadow(outer, ShadowRootMode::Open).unwrap();
        let inner = dom.create_element("x-inner");
        dom.append_child(outer_shadow, inner).unwrap();
        let inner_shadow = dom.attach_shadow(inner, ShadowRootMode::Open).unwrap();
        let leaf = dom.create_element("span");
        dom.append_child(inner_shadow, leaf).unwrap();

        assert_eq!(resolve_controller(&dom, leaf, "c-el"), Some(outer));
    }

    #[test]
    fn test_local_match_wins_over_host() {
        let mut dom = Dom::new();
        let host = dom.create_element("c-el");
        dom.append_child(dom.document(), host).unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let nested = dom.create_element("c-el");
        dom.append_child(shadow, nested).unwrap();
        let button = dom.create_element("button");
        dom.append_child(nested, button).unwrap();

        assert_eq!(resolve_controller(&dom, button, "c-el"), Some(nested));
    }

    #[test]
    fn test_no_match_is_none() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        dom.append_child(dom.document(), div).unwrap();

        assert_eq!(resolve_controller(&dom, div, "c-el"), None);
    }
}
