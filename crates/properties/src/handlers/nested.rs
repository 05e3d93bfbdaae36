use super::{PropertyAnnotationHandler, is_optional};
use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyValue,
    PropertyVisitor, Result, ValidatingValue,
};
use std::sync::Arc;
use tracing::debug;

/// Walks a nested bean's own declared properties under the parent's name.
///
/// A present bean produces no spec of its own. A required nested property
/// without a usable bean is reported as an input value that fails
/// validation, so the problem surfaces with the other deferred checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedBeanHandler;

impl NestedBeanHandler {
    fn report_unusable(
        property_name: &str,
        value: ValidatingValue,
        optional: bool,
        visitor: &mut dyn PropertyVisitor,
        spec_factory: &PropertySpecFactory,
    ) {
        if visitor.visit_output_file_properties_only() {
            return;
        }
        spec_factory
            .create_value_spec(value)
            .with_property_name(property_name)
            .optional(optional)
            .accept(visitor);
    }
}

impl PropertyAnnotationHandler for NestedBeanHandler {
    fn kind(&self) -> PropertyKind {
        PropertyKind::Nested
    }

    fn should_visit(&self, _visitor: &dyn PropertyVisitor) -> bool {
        true
    }

    fn visit_property_value(
        &self,
        property_name: &str,
        value: ValidatingValue,
        metadata: &PropertyMetadata,
        visitor: &mut dyn PropertyVisitor,
        spec_factory: &PropertySpecFactory,
        _path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        let optional = is_optional(metadata, context);
        match value.get() {
            Ok(Some(PropertyValue::Bean(bean))) => {
                debug!(property = property_name, bean = bean.type_name(), optional, "Queueing nested bean");
                context.add_nested(property_name, bean, optional)
            }
            Ok(None) if optional => Ok(()),
            Ok(None) => {
                Self::report_unusable(property_name, value, optional, visitor, spec_factory);
                Ok(())
            }
            Ok(Some(other)) => {
                let reason = format!("expected a nested bean but got a {}", other.type_name());
                let failing = ValidatingValue::new(move || Err(reason.clone()));
                Self::report_unusable(property_name, failing, optional, visitor, spec_factory);
                Ok(())
            }
            Err(reason) => {
                let failing = ValidatingValue::new(move || Err(reason.clone()));
                Self::report_unusable(property_name, failing, optional, visitor, spec_factory);
                Ok(())
            }
        }
    }
}
