//! Action bindings (`data-action`)
//!
//! The found handler installs one shared dispatcher per (element, event
//! kind). Dispatch always re-reads the live attribute value and re-resolves
//! the controller, so a binding can never go stale: the attribute string is
//! the single source of truth.

use weft_dom::{Dom, Event, NodeId};

use crate::controller::ControllerRegistry;
use crate::parse::{parse_actions, DEFAULT_METHOD};
use crate::registry::Found;
use crate::resolve::resolve_controller;
use crate::error::BindError;

/// The action attribute name
pub const ACTION_ATTR: &str = "data-action";

/// Found handler for `data-action`: attach the shared dispatcher at most
/// once per (element, event kind). Repeated scans are no-ops.
pub(crate) fn install_action_listener(dom: &mut Dom, found: &Found<'_>) -> Result<(), BindError> {
    let Some(event_kind) = found.entry.field(0) else {
        return Ok(());
    };
    if dom.ensure_listener(found.element, event_kind) {
        tracing::trace!(
            "listening for `{event_kind}` on {:?} (controller {:?})",
            found.element,
            found.controller
        );
    }
    Ok(())
}

/// Run the action algorithm for one element on the propagation path:
/// re-parse the element's current `data-action`, and for every entry whose
/// event matches, invoke the resolved controller's method. An enclosing
/// shadow host matching the tag is invoked independently.
pub(crate) fn dispatch_action_event(
    dom: &mut Dom,
    controllers: &mut ControllerRegistry,
    element: NodeId,
    event: &Event,
) {
    let Some(value) = dom.get_attribute(element, ACTION_ATTR).map(str::to_string) else {
        return;
    };
    for entry in parse_actions(&value) {
        if entry.field(0) != Some(event.kind.as_str()) {
            continue;
        }
        let method = entry.field(1).unwrap_or(DEFAULT_METHOD);

        let resolved = resolve_controller(dom, element, &entry.tag);
        if let Some(controller) = resolved {
            invoke_method(dom, controllers, controller, method, event);
        }

        // An enclosing shadow host can own the same action independently of
        // the light-DOM controller; skip it when piercing resolution already
        // selected it, so each entry fires a controller at most once.
        let root = dom.root_of(element);
        if let Some(host) = dom.host_of(root) {
            let host_matches = dom
                .tag_of(host)
                .is_some_and(|t| t.eq_ignore_ascii_case(&entry.tag));
            if host_matches && resolved != Some(host) {
                invoke_method(dom, controllers, host, method, event);
            }
        }
    }
}

/// Invoke `method` on the controller's class, if it is a recognized
/// controller exposing that method. Anything missing is a silent no-op:
/// partially-defined elements must be tolerated during progressive load.
fn invoke_method(
    dom: &mut Dom,
    controllers: &mut ControllerRegistry,
    controller: NodeId,
    method: &str,
    event: &Event,
) {
    let Some(tag) = dom.tag_of(controller).map(str::to_string) else {
        return;
    };
    let Some(class) = controllers.get_mut(&tag) else {
        return;
    };
    let Some(handler) = class.method_mut(method) else {
        return;
    };
    tracing::trace!("invoking `{method}` on <{tag}> {controller:?} for `{}`", event.kind);
    if let Err(err) = handler(dom, controller, event) {
        tracing::warn!("action method `{method}` on <{tag}> failed: {err}");
    }
}
