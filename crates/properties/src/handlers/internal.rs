use super::PropertyAnnotationHandler;
use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyVisitor,
    Result, ValidatingValue,
};
use std::sync::Arc;
use tracing::trace;

/// Internal properties are not tracked; no visitor wants them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalHandler;

impl PropertyAnnotationHandler for InternalHandler {
    fn kind(&self) -> PropertyKind {
        PropertyKind::Internal
    }

    fn should_visit(&self, _visitor: &dyn PropertyVisitor) -> bool {
        false
    }

    fn visit_property_value(
        &self,
        property_name: &str,
        _value: ValidatingValue,
        _metadata: &PropertyMetadata,
        _visitor: &mut dyn PropertyVisitor,
        _spec_factory: &PropertySpecFactory,
        _path_resolver: &Arc<dyn PathResolver>,
        _context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        trace!(property = property_name, "Ignoring internal property");
        Ok(())
    }
}
