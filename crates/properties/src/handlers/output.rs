use super::{PropertyAnnotationHandler, is_optional};
use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, PropertyKind, PropertyMetadata, PropertySpecFactory, PropertyVisitor,
    Result, SpecKind, ValidatingValue,
};
use std::sync::Arc;
use tracing::trace;

/// Handles every output kind: file, files, directory and directories.
///
/// Outputs are always visited, including by output-only visitors.
#[derive(Debug, Clone, Copy)]
pub struct OutputFilesHandler {
    kind: SpecKind,
}

impl OutputFilesHandler {
    /// Handler for [`PropertyKind::OutputFile`].
    #[must_use]
    pub const fn file() -> Self {
        Self {
            kind: SpecKind::OutputFile,
        }
    }

    /// Handler for [`PropertyKind::OutputFiles`].
    #[must_use]
    pub const fn files() -> Self {
        Self {
            kind: SpecKind::OutputFiles,
        }
    }

    /// Handler for [`PropertyKind::OutputDirectory`].
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            kind: SpecKind::OutputDirectory,
        }
    }

    /// Handler for [`PropertyKind::OutputDirectories`].
    #[must_use]
    pub const fn directories() -> Self {
        Self {
            kind: SpecKind::OutputDirectories,
        }
    }

    fn create_file_spec(
        &self,
        value: ValidatingValue,
        spec_factory: &PropertySpecFactory,
    ) -> crate::DeclaredPropertySpec {
        spec_factory.create_file_spec(self.kind, value)
    }
}

impl PropertyAnnotationHandler for OutputFilesHandler {
    fn kind(&self) -> PropertyKind {
        self.kind.into()
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
        path_resolver: &Arc<dyn PathResolver>,
        context: &mut dyn BeanPropertyContext,
    ) -> Result<()> {
        let optional = is_optional(metadata, context);
        let spec = self
            .create_file_spec(value.resolved_with(Arc::clone(path_resolver)), spec_factory)
            .with_property_name(property_name)
            .optional(optional);
        trace!(property = property_name, kind = %self.kind, optional, "Visiting output property");
        spec.accept(visitor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{QueueingContext, resolver};
    use crate::{PropertyValue, RecordingVisitor};

    fn visit(
        handler: OutputFilesHandler,
        metadata: &PropertyMetadata,
        context: &mut QueueingContext,
        visitor: &mut RecordingVisitor,
    ) {
        handler
            .visit_property_value(
                metadata.name(),
                ValidatingValue::of(PropertyValue::path("build/out")),
                metadata,
                visitor,
                &PropertySpecFactory::new(),
                &resolver(),
                context,
            )
            .unwrap();
    }

    #[test]
    fn test_declared_optional_flag_is_applied() {
        let mut visitor = RecordingVisitor::new();
        let metadata = PropertyMetadata::new("report", PropertyKind::OutputFile).with_optional(true);
        visit(OutputFilesHandler::file(), &metadata, &mut QueueingContext::default(), &mut visitor);

        assert_eq!(visitor.specs().len(), 1);
        assert!(visitor.specs()[0].is_optional());
    }

    #[test]
    fn test_required_without_optional_context() {
        let mut visitor = RecordingVisitor::new();
        let metadata = PropertyMetadata::new("outputDir", PropertyKind::OutputDirectory);
        visit(OutputFilesHandler::directory(), &metadata, &mut QueueingContext::default(), &mut visitor);

        let spec = &visitor.specs()[0];
        assert_eq!(spec.property_name(), "outputDir");
        assert_eq!(spec.kind(), PropertyKind::OutputDirectory);
        assert!(!spec.is_optional());
    }

    #[test]
    fn test_optional_context_is_inherited() {
        let mut visitor = RecordingVisitor::new();
        let mut context = QueueingContext {
            optional: true,
            ..QueueingContext::default()
        };
        let metadata = PropertyMetadata::new("dirs", PropertyKind::OutputDirectories);
        visit(OutputFilesHandler::directories(), &metadata, &mut context, &mut visitor);

        assert!(visitor.specs()[0].is_optional());
    }

    #[test]
    fn test_outputs_visit_output_only_visitors() {
        let visitor = RecordingVisitor::outputs_only();
        assert!(OutputFilesHandler::files().should_visit(&visitor));
    }
}
