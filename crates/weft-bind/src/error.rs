//! Binding errors

/// Errors raised by registration, controller definition, and consumer handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// A second registration for an attribute name already in the registry.
    /// Fatal at registration time: it indicates a host-application bug.
    #[error("attribute `{0}` is already registered")]
    DuplicateAttribute(String),

    /// Controller tag failed custom-element name validation
    #[error("invalid controller name `{0}`")]
    InvalidControllerName(String),

    /// A controller class is already defined for this tag
    #[error("controller `{0}` is already defined")]
    ControllerAlreadyDefined(String),

    /// Fault raised inside a consumer handler; isolated and logged by the
    /// engine loop, never propagated across sibling bindings or records
    #[error("handler fault: {0}")]
    Handler(String),
}
