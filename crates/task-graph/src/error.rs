//! Error types for task property graph operations.

use thiserror::Error;

/// Result type for task property graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or validating the graph.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Two specs of one task share a name.
    #[error("Task '{task}' declares property '{property}' more than once")]
    DuplicatePropertyName {
        /// The task declaring the property.
        task: String,
        /// The repeated property name.
        property: String,
    },

    /// A dependency cycle was detected in the graph.
    #[error("Cycle detected in task graph: {message}")]
    CycleDetected {
        /// Human-readable description of the cycle.
        message: String,
    },

    /// Failed to perform topological sort.
    #[error("Failed to sort tasks topologically: {reason}")]
    TopologicalSortFailed {
        /// Reason for the failure.
        reason: String,
    },

    /// Classification or validation of a task property failed.
    #[error("Task '{task}': {source}")]
    Property {
        /// The task the property belongs to.
        task: String,
        /// The underlying property error.
        #[source]
        source: taskprops_properties::Error,
    },
}

impl Error {
    /// Wrap a property error with its task.
    #[must_use]
    pub fn property(task: impl Into<String>, source: taskprops_properties::Error) -> Self {
        Self::Property {
            task: task.into(),
            source,
        }
    }
}
