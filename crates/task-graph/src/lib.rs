//! Task property graph for taskprops.
//!
//! This crate sits on top of `taskprops-properties`. It walks each task's
//! declared properties into a [`TaskProperties`] set, links tasks whose
//! outputs feed other tasks' inputs, and validates the result using petgraph.
//!
//! # Key Types
//!
//! - [`PropertyGraph`]: The graph of configured tasks
//! - [`TaskPropertiesCollector`]: A visitor that gathers one task's specs
//! - [`ValidationReport`]: Every property and structure failure found by [`PropertyGraph::validate`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskprops_properties::{
//!     DeclarationFile, ProjectPathResolver, PropertyAnnotationHandlerRegistry, PropertyWalker,
//! };
//! use taskprops_task_graph::PropertyGraph;
//!
//! let walker = PropertyWalker::new(
//!     Arc::new(PropertyAnnotationHandlerRegistry::with_default_handlers()),
//!     Arc::new(ProjectPathResolver::new("/work/project")),
//! );
//!
//! let mut graph = PropertyGraph::new();
//! for task in DeclarationFile::from_toml_str(source)?.tasks {
//!     let bean = task.clone().into_bean()?;
//!     graph.configure_task(&task.name, &bean, &walker)?;
//! }
//! graph.link_producers();
//!
//! let report = graph.validate();
//! let order = graph.topological_sort()?;
//! ```

mod collector;
mod error;
mod graph;
mod traversal;
mod validation;

pub use collector::{TaskProperties, TaskPropertiesCollector};
pub use error::{Error, Result};
pub use graph::{GraphNode, PropertyGraph};
pub use traversal::{ParallelGroups, TopologicalOrder};
pub use validation::ValidationReport;
