//! Controller classes
//!
//! A controller class is the behavior table for one custom-element tag: a
//! static method-name-to-handler schema supplied at definition time. The
//! registry enforces custom-element naming rules and define-once semantics.

use std::collections::HashMap;

use weft_dom::{Dom, Event, NodeId};

use crate::error::BindError;

/// Action method signature: receives the Dom, the controller element, and
/// the firing event
pub type MethodFn = Box<dyn FnMut(&mut Dom, NodeId, &Event) -> Result<(), BindError>>;

/// Behavior table for one controller tag
#[derive(Default)]
pub struct ControllerClass {
    methods: HashMap<String, MethodFn>,
}

impl ControllerClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named method (builder style)
    pub fn method(
        mut self,
        name: &str,
        handler: impl FnMut(&mut Dom, NodeId, &Event) -> Result<(), BindError> + 'static,
    ) -> Self {
        self.methods.insert(name.to_string(), Box::new(handler));
        self
    }

    /// Whether `name` is defined on this class
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub(crate) fn method_mut(&mut self, name: &str) -> Option<&mut MethodFn> {
        self.methods.get_mut(name)
    }
}

impl std::fmt::Debug for ControllerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.methods.keys().collect();
        names.sort();
        f.debug_struct("ControllerClass")
            .field("methods", &names)
            .finish()
    }
}

/// Registry of controller classes by tag name
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    classes: HashMap<String, ControllerClass>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a controller class for `tag`
    pub fn define(&mut self, tag: &str, class: ControllerClass) -> Result<(), BindError> {
        if !Self::is_valid_name(tag) {
            return Err(BindError::InvalidControllerName(tag.to_string()));
        }
        if self.classes.contains_key(tag) {
            return Err(BindError::ControllerAlreadyDefined(tag.to_string()));
        }
        tracing::debug!("defined controller <{tag}> {class:?}");
        self.classes.insert(tag.to_string(), class);
        Ok(())
    }

    /// Check if a controller is defined for `tag`
    pub fn is_defined(&self, tag: &str) -> bool {
        self.classes.contains_key(tag)
    }

    pub(crate) fn get_mut(&mut self, tag: &str) -> Option<&mut ControllerClass> {
        self.classes.get_mut(tag)
    }

    /// Validate a custom element name
    fn is_valid_name(name: &str) -> bool {
        // Must contain hyphen
        if !name.contains('-') {
            return false;
        }

        // Must start with lowercase letter
        if !name
            .chars()
            .next()
            .map(|c| c.is_ascii_lowercase())
            .unwrap_or(false)
        {
            return false;
        }

        // Reserved names
        let reserved = [
            "annotation-xml",
            "color-profile",
            "font-face",
            "font-face-src",
            "font-face-uri",
            "font-face-format",
            "font-face-name",
            "missing-glyph",
        ];
        if reserved.contains(&name) {
            return false;
        }

        true
    }
}
