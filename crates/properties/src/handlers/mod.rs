//! Property annotation handlers.
//!
//! One handler exists per [`PropertyKind`]. A handler turns a declared
//! property into a [`DeclaredPropertySpec`](crate::DeclaredPropertySpec) and
//! reports it, or, for nested beans, hands the bean back to the walker.
//!
//! Handlers are stateless and shared across threads through the
//! [`PropertyAnnotationHandlerRegistry`](crate::PropertyAnnotationHandlerRegistry).

mod input;
mod internal;
mod nested;
mod output;
mod state;

pub use input::{InputFilesHandler, InputValueHandler};
pub use internal::InternalHandler;
pub use nested::NestedBeanHandler;
pub use output::OutputFilesHandler;
pub use state::{DestroysHandler, LocalStateHandler};

use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyVisitor,
    Result, ValidatingValue,
};
use std::fmt;
use std::sync::Arc;

/// Classifies one kind of declared property.
pub trait PropertyAnnotationHandler: Send + Sync + fmt::Debug {
    /// The kind this handler is registered for.
    fn kind(&self) -> PropertyKind;

    /// Whether `visitor` wants this handler's properties at all.
    ///
    /// Checked before every [`visit_property_value`](Self::visit_property_value)
    /// call. Must not have side effects.
    fn should_visit(&self, visitor: &dyn PropertyVisitor) -> bool;

    /// Build and report the spec for one property.
    ///
    /// Output, input, destroyable and local-state handlers make exactly one
    /// visitor callback. The value is never read here, except by the nested
    /// handler, which must see the bean to walk it.
    ///
    /// # Errors
    ///
    /// Only nesting can fail (see [`BeanPropertyContext::add_nested`]).
    fn visit_property_value(
        &self,
        property_name: &str,
        value: ValidatingValue,
        metadata: &PropertyMetadata,
        visitor: &mut dyn PropertyVisitor,
        spec_factory: &PropertySpecFactory,
        path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()>;
}

/// Declared optional, or inside a bean reached through an optional property.
pub(crate) fn is_optional(metadata: &PropertyMetadata, context: &dyn BeanPropertyContext) -> bool {
    metadata.is_optional_declared() || context.is_optional()
}

/// Every built-in handler, one per kind.
#[must_use]
pub fn default_handlers() -> Vec<Arc<dyn PropertyAnnotationHandler>> {
    vec![
        Arc::new(InputValueHandler),
        Arc::new(InputFilesHandler::file()),
        Arc::new(InputFilesHandler::files()),
        Arc::new(InputFilesHandler::directory()),
        Arc::new(OutputFilesHandler::file()),
        Arc::new(OutputFilesHandler::files()),
        Arc::new(OutputFilesHandler::directory()),
        Arc::new(OutputFilesHandler::directories()),
        Arc::new(DestroysHandler),
        Arc::new(LocalStateHandler),
        Arc::new(InternalHandler),
        Arc::new(NestedBeanHandler),
    ]
}
