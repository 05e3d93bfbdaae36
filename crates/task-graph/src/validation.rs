//! Validation of a configured task graph.
//!
//! This is where spec values are finally read and checked against their
//! kind. Every failure is collected; nothing stops at the first one.

use crate::{Error, PropertyGraph};
use tracing::{debug, debug_span};

/// Result of graph validation.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Whether every spec is valid and the graph is acyclic.
    pub is_valid: bool,
    /// List of validation errors, if any.
    pub errors: Vec<Error>,
}

impl ValidationReport {
    /// Create a valid result.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create an invalid result with errors.
    #[must_use]
    pub fn invalid(errors: Vec<Error>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

impl PropertyGraph {
    /// Validate every task's specs and the graph structure.
    ///
    /// Checks for:
    /// - Required values that are absent
    /// - Values that do not fit their kind (missing input files, outputs
    ///   that collide with existing entries of the wrong type, suppliers that fail)
    /// - Cycles between producers and consumers
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let _span = debug_span!("property_graph.validate", tasks = self.task_count()).entered();
        let mut errors = Vec::new();

        for node in self.nodes() {
            for spec in node.properties.specs() {
                if let Err(e) = spec.validate().into_result(spec.property_name()) {
                    debug!(task = %node.name, property = spec.property_name(), error = %e, "Invalid property");
                    errors.push(Error::property(node.name.clone(), e));
                }
            }
        }

        if self.has_cycles() {
            errors.push(Error::CycleDetected {
                message: "Task property graph contains cycles".to_string(),
            });
        }

        if errors.is_empty() {
            ValidationReport::valid()
        } else {
            ValidationReport::invalid(errors)
        }
    }
}
