use super::{PropertyAnnotationHandler, is_optional};
use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyVisitor,
    Result, SpecKind, ValidatingValue,
};
use std::sync::Arc;

/// Files the task deletes. Reported so nothing else writes there concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestroysHandler;

impl PropertyAnnotationHandler for DestroysHandler {
    fn kind(&self) -> PropertyKind {
        PropertyKind::Destroys
    }

    fn should_visit(&self, visitor: &dyn PropertyVisitor) -> bool {
        !visitor.visit_output_file_properties_only()
    }

    fn visit_property_value(
        &self,
        property_name: &str,
        value: ValidatingValue,
        metadata: &PropertyMetadata,
        visitor: &mut dyn PropertyVisitor,
        spec_factory: &PropertySpecFactory,
        path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        spec_factory
            .create_file_spec(SpecKind::Destroys, value.resolved_with(Arc::clone(path_resolver)))
            .with_property_name(property_name)
            .optional(is_optional(metadata, context))
            .accept(visitor);
        Ok(())
    }
}

/// Files the task keeps between runs without publishing them as outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStateHandler;

impl PropertyAnnotationHandler for LocalStateHandler {
    fn kind(&self) -> PropertyKind {
        PropertyKind::LocalState
    }

    fn should_visit(&self, visitor: &dyn PropertyVisitor) -> bool {
        !visitor.visit_output_file_properties_only()
    }

    fn visit_property_value(
        &self,
        property_name: &str,
        value: ValidatingValue,
        metadata: &PropertyMetadata,
        visitor: &mut dyn PropertyVisitor,
        spec_factory: &PropertySpecFactory,
        path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        spec_factory
            .create_file_spec(SpecKind::LocalState, value.resolved_with(Arc::clone(path_resolver)))
            .with_property_name(property_name)
            .optional(is_optional(metadata, context))
            .accept(visitor);
        Ok(())
    }
}
