//! weft bind - Declarative attribute bindings
//!
//! Scans DOM trees for `data-action`/`data-target` style attributes, parses
//! their micro-syntaxes, resolves owning controllers through shadow
//! boundaries, and keeps the bindings live as the tree mutates. Bindings are
//! never cached: the attribute string is re-read at every dispatch.

mod actionable;
mod controller;
mod engine;
mod error;
mod parse;
mod registry;
mod resolve;
mod scan;
mod targetable;
mod watch;

pub use actionable::ACTION_ATTR;
pub use controller::{ControllerClass, ControllerRegistry, MethodFn};
pub use engine::Engine;
pub use error::BindError;
pub use parse::{parse_actions, parse_tags, ParseFn, TagEntry, DEFAULT_METHOD};
pub use registry::{Found, FoundFn, TagRegistry};
pub use resolve::resolve_controller;
pub use scan::scan_subtree;
pub use targetable::{find_target, find_targets, TARGET_ATTR, TARGETS_ATTR};
pub use watch::{MutationWatcher, WatchHandle};
