use super::{PropertyAnnotationHandler, is_optional};
use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyVisitor,
    Result, SpecKind, ValidatingValue,
};
use std::sync::Arc;
use tracing::trace;

/// Handles file inputs: a single file, a file collection or a directory.
#[derive(Debug, Clone, Copy)]
pub struct InputFilesHandler {
    kind: SpecKind,
}

impl InputFilesHandler {
    /// Handler for [`PropertyKind::InputFile`].
    #[must_use]
    pub const fn file() -> Self {
        Self {
            kind: SpecKind::InputFile,
        }
    }

    /// Handler for [`PropertyKind::InputFiles`].
    #[must_use]
    pub const fn files() -> Self {
        Self {
            kind: SpecKind::InputFiles,
        }
    }

    /// Handler for [`PropertyKind::InputDirectory`].
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            kind: SpecKind::InputDirectory,
        }
    }
}

impl PropertyAnnotationHandler for InputFilesHandler {
    fn kind(&self) -> PropertyKind {
        self.kind.into()
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
        let optional = is_optional(metadata, context);
        let spec = spec_factory
            .create_file_spec(self.kind, value.resolved_with(Arc::clone(path_resolver)))
            .with_property_name(property_name)
            .optional(optional)
            .skip_when_empty(metadata.skip_when_empty())
            .with_path_sensitivity(metadata.path_sensitivity());
        trace!(property = property_name, kind = %self.kind, optional, "Visiting input file property");
        spec.accept(visitor);
        Ok(())
    }
}

/// Handles plain (non-file) input values.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValueHandler;

impl PropertyAnnotationHandler for InputValueHandler {
    fn kind(&self) -> PropertyKind {
        PropertyKind::Input
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
        _path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        spec_factory
            .create_value_spec(value)
            .with_property_name(property_name)
            .optional(is_optional(metadata, context))
            .accept(visitor);
        Ok(())
    }
}
