//! Action binding scenarios
//!
//! End-to-end coverage: bind, dispatch, re-parse at dispatch time, mutation
//! re-scan, duplicate registration, and fault isolation.

use std::cell::RefCell;
use std::rc::Rc;

use weft_bind::{BindError, ControllerClass, Engine};
use weft_dom::NodeId;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type CallLog = Rc<RefCell<Vec<(String, NodeId, NodeId)>>>;

/// Controller class whose methods append (method, controller, event target)
fn logging_class(log: &CallLog, methods: &[&str]) -> ControllerClass {
    let mut class = ControllerClass::new();
    for &name in methods {
        let log = Rc::clone(log);
        let method = name.to_string();
        class = class.method(name, move |_dom, controller, event| {
            log.borrow_mut()
                .push((method.clone(), controller, event.target));
            Ok(())
        });
    }
    class
}

#[test]
fn test_click_invokes_method_exactly_once() {
    // Scenario A: <c-el><div data-action="click:c-el#go"></div></c-el>
    init_tracing();
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.bind_actions(controller);

    engine.dispatch_event(div, "click");

    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ("go".to_string(), controller, div));
}

#[test]
fn test_stale_attribute_does_not_invoke() {
    // Scenario B: attribute re-pointed before the click.
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.bind_actions(controller);

    engine
        .dom_mut()
        .set_attribute(div, "data-action", "click:other-el#go")
        .unwrap();
    engine.dispatch_event(div, "click");

    assert!(log.borrow().is_empty());
}

#[test]
fn test_one_listener_per_event_kind() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go click:c-el#also change:c-el#go")
        .unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go", "also"]))
        .unwrap();
    engine.bind_actions(controller);

    // Two distinct event kinds, one listener function each.
    assert_eq!(engine.dom().listener_count(div), 2);

    // One invocation per matching entry.
    engine.dispatch_event(div, "click");
    {
        let calls = log.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "go");
        assert_eq!(calls[1].0, "also");
    }

    log.borrow_mut().clear();
    engine.dispatch_event(div, "change");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_scan_is_idempotent() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();

    engine.scan_subtree(controller);
    engine.scan_subtree(controller);
    assert_eq!(engine.dom().listener_count(div), 1);

    engine.dispatch_event(div, "click");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_reparse_picks_up_new_method() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go", "alt"]))
        .unwrap();
    engine.bind_actions(controller);

    // The live value wins over anything captured at bind time.
    engine
        .dom_mut()
        .set_attribute(div, "data-action", "click:c-el#alt")
        .unwrap();
    engine.dispatch_event(div, "click");

    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "alt");
}

#[test]
fn test_attribute_edit_rebinds_new_event_kind() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.dom_mut().take_mutation_records();
    engine.bind_actions(controller);

    engine
        .dom_mut()
        .set_attribute(div, "data-action", "hover:c-el#go")
        .unwrap();
    engine.tick();

    engine.dispatch_event(div, "hover");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_default_method_fallback() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["handle_event"]))
        .unwrap();
    engine.bind_actions(controller);

    engine.dispatch_event(div, "click");
    assert_eq!(log.borrow()[0].0, "handle_event");
}

#[test]
fn test_missing_method_is_silent_noop() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#undefined_method")
        .unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.bind_actions(controller);

    engine.dispatch_event(div, "click");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_appended_button_binds_after_tick() {
    // Scenario D: append, wait one frame, click.
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    dom.append_child(dom.document(), controller).unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.bind_actions(controller);

    let dom = engine.dom_mut();
    let button = dom.create_element("button");
    dom.set_attribute(button, "data-action", "click:c-el#go").unwrap();
    dom.append_child(controller, button).unwrap();
    engine.tick();

    engine.dispatch_event(button, "click");
    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ("go".to_string(), controller, button));
}

#[test]
fn test_duplicate_registration_errors_before_scanning() {
    // Scenario E.
    let mut engine = Engine::new();
    engine
        .register_attribute_tag("dup-tag", weft_bind::parse_tags, Box::new(|_, _| Ok(())))
        .unwrap();

    let second = engine.register_attribute_tag(
        "dup-tag",
        weft_bind::parse_tags,
        Box::new(|_, _| Ok(())),
    );
    assert_eq!(
        second,
        Err(BindError::DuplicateAttribute("dup-tag".to_string()))
    );

    // data-action is pre-registered by the engine itself.
    let action = engine.register_attribute_tag(
        "data-action",
        weft_bind::parse_actions,
        Box::new(|_, _| Ok(())),
    );
    assert!(matches!(action, Err(BindError::DuplicateAttribute(_))));
}

#[test]
fn test_shadow_host_and_local_controller_both_fire() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let host = dom.create_element("c-el");
    dom.append_child(dom.document(), host).unwrap();
    let shadow = dom
        .attach_shadow(host, weft_dom::ShadowRootMode::Open)
        .unwrap();
    let nested = dom.create_element("c-el");
    dom.append_child(shadow, nested).unwrap();
    let button = dom.create_element("button");
    dom.append_child(nested, button).unwrap();
    dom.set_attribute(button, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.scan_subtree(shadow);

    engine.dispatch_event(button, "click");

    // The local shadow-tree controller and the enclosing host each fire once.
    let controllers: Vec<NodeId> = log.borrow().iter().map(|c| c.1).collect();
    assert_eq!(controllers, vec![nested, host]);
}

#[test]
fn test_shadow_host_fires_once_when_it_is_the_resolved_controller() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let host = dom.create_element("c-el");
    dom.append_child(dom.document(), host).unwrap();
    let shadow = dom
        .attach_shadow(host, weft_dom::ShadowRootMode::Open)
        .unwrap();
    let button = dom.create_element("button");
    dom.append_child(shadow, button).unwrap();
    dom.set_attribute(button, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.scan_subtree(shadow);

    engine.dispatch_event(button, "click");
    // Piercing resolution and the host check select the same element.
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_faulting_method_does_not_starve_sibling_entries() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let div = dom.create_element("div");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, div).unwrap();
    dom.set_attribute(div, "data-action", "click:c-el#boom click:c-el#go")
        .unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    let class = logging_class(&log, &["go"]).method("boom", |_, _, _| {
        Err(BindError::Handler("kaboom".to_string()))
    });
    engine.define_controller("c-el", class).unwrap();
    engine.bind_actions(controller);

    engine.dispatch_event(div, "click");
    // `boom` faulted; `go` still ran.
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].0, "go");
}

#[test]
fn test_stopped_observation_stops_future_binds() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    dom.append_child(dom.document(), controller).unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    let watch = engine.bind_actions(controller);
    engine.stop(watch);

    let dom = engine.dom_mut();
    let button = dom.create_element("button");
    dom.set_attribute(button, "data-action", "click:c-el#go").unwrap();
    dom.append_child(controller, button).unwrap();
    engine.tick();

    engine.dispatch_event(button, "click");
    assert!(log.borrow().is_empty());
}

#[test]
fn test_bubbling_action_on_ancestor() {
    let mut engine = Engine::new();
    let dom = engine.dom_mut();
    let controller = dom.create_element("c-el");
    let wrapper = dom.create_element("div");
    let button = dom.create_element("button");
    dom.append_child(dom.document(), controller).unwrap();
    dom.append_child(controller, wrapper).unwrap();
    dom.append_child(wrapper, button).unwrap();
    dom.set_attribute(wrapper, "data-action", "click:c-el#go").unwrap();

    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    engine
        .define_controller("c-el", logging_class(&log, &["go"]))
        .unwrap();
    engine.bind_actions(controller);

    // Fired on a descendant of the bound element; bubbles up to it.
    engine.dispatch_event(button, "click");
    let calls = log.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].2, button);
}
