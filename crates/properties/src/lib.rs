//! Declared task property classification for incremental builds.
//!
//! A task declares properties as inputs, outputs, internal state or nested
//! beans. This crate turns each declared property into a typed
//! [`DeclaredPropertySpec`] and reports it to a [`PropertyVisitor`], which
//! builds the task's input/output graph for staleness detection.
//!
//! # Key Types
//!
//! - [`PropertyKind`]: the closed set of declared property kinds
//! - [`PropertyAnnotationHandler`]: per-kind classification behavior
//! - [`PropertyAnnotationHandlerRegistry`]: immutable kind-to-handler table
//! - [`PropertySpecFactory`]: creates unnamed specs
//! - [`ValidatingValue`]: a deferred value, validated only when consumed
//! - [`PropertyWalker`]: runs the pipeline for one task, nested beans included
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskprops_properties::*;
//!
//! let task = DeclaredBean::new("Compile").with_property(
//!     PropertyMetadata::new("outputDir", PropertyKind::OutputDirectory),
//!     ValidatingValue::of(PropertyValue::path("build/classes")),
//! );
//!
//! let walker = PropertyWalker::new(
//!     Arc::new(PropertyAnnotationHandlerRegistry::with_default_handlers()),
//!     Arc::new(ProjectPathResolver::new("/work/project")),
//! );
//! let mut visitor = RecordingVisitor::new();
//! walker.visit_properties(&task, &mut visitor)?;
//! assert_eq!(visitor.specs()[0].property_name(), "outputDir");
//! ```

mod bean;
mod config;
mod declaration;
mod error;
pub mod handlers;
mod kind;
mod metadata;
mod path;
mod registry;
mod spec;
mod validation;
mod value;
mod visitor;
mod walker;

pub use bean::{BeanPropertyContext, DeclaredBean, DeclaredProperty, PropertyBean};
pub use config::WalkerConfig;
pub use declaration::{DeclarationFile, PropertyDeclaration, TaskDeclaration};
pub use error::{Error, Result};
pub use handlers::PropertyAnnotationHandler;
pub use kind::{PropertyKind, SpecKind};
pub use metadata::{PathSensitivity, PropertyMetadata};
pub use path::{IdentityPathResolver, PathResolver, ProjectPathResolver};
pub use registry::{PropertyAnnotationHandlerRegistry, RegistryBuilder};
pub use spec::{DeclaredPropertySpec, PropertySpecFactory};
pub use validation::ValidationResult;
pub use value::{PropertyValue, ValidatingValue};
pub use visitor::{PropertyVisitor, RecordingVisitor};
pub use walker::PropertyWalker;
