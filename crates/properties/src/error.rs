//! Error types for property classification

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use crate::PropertyKind;
use miette::Diagnostic;
use thiserror::Error;

/// Error type for property classification and deferred validation
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// No handler is registered for a declared property kind
    #[error("No handler registered for property kind '{kind}'")]
    #[diagnostic(
        code(taskprops::properties::unknown_kind),
        help("The handler registry must be built with a handler for every kind a task declares")
    )]
    UnknownPropertyKind {
        /// The kind that could not be resolved
        kind: PropertyKind,
    },

    /// Two handlers were registered for the same kind
    #[error("More than one handler registered for property kind '{kind}'")]
    #[diagnostic(code(taskprops::properties::duplicate_handler))]
    DuplicateHandler {
        /// The kind claimed twice
        kind: PropertyKind,
    },

    /// A declared property has an empty name
    #[error("Declared property with kind '{kind}' has an empty name")]
    #[diagnostic(code(taskprops::properties::empty_name))]
    EmptyPropertyName {
        /// Kind of the unnamed property
        kind: PropertyKind,
    },

    /// Nested beans exceed the configured depth
    #[error("Nested property '{property}' exceeds the maximum nesting depth of {limit}")]
    #[diagnostic(
        code(taskprops::properties::nesting_too_deep),
        help("Nested beans must not form a cycle; raise maxNestingDepth for deep but acyclic graphs")
    )]
    NestingTooDeep {
        /// Full name of the nested property that went too deep
        property: String,
        /// The configured limit
        limit: usize,
    },

    /// A required property has no value
    #[error("No value has been specified for property '{property}'")]
    #[diagnostic(code(taskprops::properties::missing_value))]
    MissingRequiredValue {
        /// Full name of the property
        property: String,
    },

    /// A property value does not satisfy its kind's constraints
    #[error("Invalid value for property '{property}': {reason}")]
    #[diagnostic(code(taskprops::properties::invalid_value))]
    InvalidValue {
        /// Full name of the property
        property: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration or declaration error
    #[error("Configuration error: {message}")]
    #[diagnostic(code(taskprops::properties::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create a missing-value error for a property
    #[must_use]
    pub fn missing_value(property: impl Into<String>) -> Self {
        Self::MissingRequiredValue {
            property: property.into(),
        }
    }

    /// Create an invalid-value error for a property
    #[must_use]
    pub fn invalid_value(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for property operations
pub type Result<T> = std::result::Result<T, Error>;
