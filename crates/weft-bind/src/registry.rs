//! Attribute tag registry
//!
//! Process-wide table mapping an attribute name to its (parser, found
//! handler) pair. Append-only: duplicate registration is a configuration
//! error, and there is no unregister.

use std::collections::HashMap;

use weft_dom::{Dom, NodeId};

use crate::error::BindError;
use crate::parse::{ParseFn, TagEntry};

/// A match handed to a registration's found handler
#[derive(Debug)]
pub struct Found<'a> {
    /// Element carrying the attribute
    pub element: NodeId,
    /// Resolved controller (never NONE: misses are filtered before dispatch)
    pub controller: NodeId,
    /// Attribute name the match came from
    pub attribute: &'a str,
    /// The parsed entry that matched
    pub entry: &'a TagEntry,
}

/// Found handler signature: may mutate the Dom; faults are isolated upstream
pub type FoundFn = Box<dyn FnMut(&mut Dom, &Found<'_>) -> Result<(), BindError>>;

pub(crate) struct Registration {
    pub parse: ParseFn,
    pub found: FoundFn,
}

/// Registry of attribute tags
#[derive(Default)]
pub struct TagRegistry {
    entries: HashMap<String, Registration>,
    // Union of registered names, in registration order: the watcher's
    // attribute filter.
    filter: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `attribute` with its parser and found handler. Errors on a
    /// duplicate name; never silently ignores one.
    pub fn register(
        &mut self,
        attribute: &str,
        parse: ParseFn,
        found: FoundFn,
    ) -> Result<(), BindError> {
        if self.entries.contains_key(attribute) {
            return Err(BindError::DuplicateAttribute(attribute.to_string()));
        }
        self.entries
            .insert(attribute.to_string(), Registration { parse, found });
        self.filter.push(attribute.to_string());
        tracing::debug!("registered attribute tag `{attribute}`");
        Ok(())
    }

    /// Whether `attribute` has a registration
    pub fn is_registered(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    /// All registered attribute names, in registration order
    pub fn attribute_filter(&self) -> &[String] {
        &self.filter
    }

    pub(crate) fn get_mut(&mut self, attribute: &str) -> Option<&mut Registration> {
        self.entries.get_mut(attribute)
    }
}

impl std::fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRegistry")
            .field("attributes", &self.filter)
            .finish()
    }
}
