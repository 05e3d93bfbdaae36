//! Declared property specs and the factory that creates them.

use crate::validation::{ValidationResult, check_value};
use crate::visitor::PropertyVisitor;
use crate::{PathSensitivity, PropertyKind, SpecKind, ValidatingValue};

/// The finished description of one declared property.
///
/// A handler creates it through [`PropertySpecFactory`], names it, applies
/// effective optionality and hands it to a [`PropertyVisitor`] by value.
/// The setters are crate-private, so a visitor cannot rename a spec or
/// change its optionality after receiving it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredPropertySpec {
    property_name: String,
    optional: bool,
    kind: SpecKind,
    value: ValidatingValue,
    skip_when_empty: bool,
    path_sensitivity: PathSensitivity,
}

impl DeclaredPropertySpec {
    /// Set the full property name.
    #[must_use]
    pub(crate) fn with_property_name(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = property_name.into();
        self
    }

    /// Set the effective optionality.
    #[must_use]
    pub(crate) fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Skip the task when this input is empty.
    #[must_use]
    pub(crate) fn skip_when_empty(mut self, skip_when_empty: bool) -> Self {
        self.skip_when_empty = skip_when_empty;
        self
    }

    /// Set the input path sensitivity.
    #[must_use]
    pub(crate) fn with_path_sensitivity(mut self, path_sensitivity: PathSensitivity) -> Self {
        self.path_sensitivity = path_sensitivity;
        self
    }

    /// Full property name, including any nested prefix.
    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Effective optionality.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The spec's shape.
    #[must_use]
    pub fn spec_kind(&self) -> SpecKind {
        self.kind
    }

    /// The declared kind this spec was built for.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind.into()
    }

    /// The deferred value.
    #[must_use]
    pub fn value(&self) -> &ValidatingValue {
        &self.value
    }

    /// Whether an empty input skips the task.
    #[must_use]
    pub fn is_skip_when_empty(&self) -> bool {
        self.skip_when_empty
    }

    /// Input path sensitivity.
    #[must_use]
    pub fn path_sensitivity(&self) -> PathSensitivity {
        self.path_sensitivity
    }

    /// Validate the value against this spec's optionality and kind.
    ///
    /// Reads the value, so this must only run once configuration is final.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        self.value
            .validate_with(self.optional, |value| check_value(self.kind, value))
    }

    /// Report this spec through the visitor callback matching its shape.
    pub fn accept(self, visitor: &mut dyn PropertyVisitor) {
        match self.kind {
            SpecKind::Input => visitor.visit_input_property(self),
            SpecKind::InputFile => visitor.visit_input_file_property(self),
            SpecKind::InputFiles => visitor.visit_input_files_property(self),
            SpecKind::InputDirectory => visitor.visit_input_directory_property(self),
            SpecKind::OutputFile => visitor.visit_output_file_property(self),
            SpecKind::OutputFiles => visitor.visit_output_files_property(self),
            SpecKind::OutputDirectory => visitor.visit_output_directory_property(self),
            SpecKind::OutputDirectories => visitor.visit_output_directories_property(self),
            SpecKind::Destroys => visitor.visit_destroyable_property(self),
            SpecKind::LocalState => visitor.visit_local_state_property(self),
        }
    }
}

/// Creates unnamed, required specs. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertySpecFactory;

impl PropertySpecFactory {
    /// Create a factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Create a spec of shape `kind` around `value`.
    ///
    /// The result has an empty name and is not optional; the handler sets
    /// both before reporting it.
    #[must_use]
    pub fn create_file_spec(&self, kind: SpecKind, value: ValidatingValue) -> DeclaredPropertySpec {
        DeclaredPropertySpec {
            property_name: String::new(),
            optional: false,
            kind,
            value,
            skip_when_empty: false,
            path_sensitivity: PathSensitivity::default(),
        }
    }

    /// Create a finished spec in one step.
    ///
    /// For handlers and drivers outside this crate, which cannot reach the
    /// naming setters.
    #[must_use]
    pub fn create_named_spec(
        &self,
        kind: SpecKind,
        property_name: impl Into<String>,
        optional: bool,
        value: ValidatingValue,
    ) -> DeclaredPropertySpec {
        self.create_file_spec(kind, value)
            .with_property_name(property_name)
            .optional(optional)
    }

    /// Create a plain input value spec.
    #[must_use]
    pub fn create_value_spec(&self, value: ValidatingValue) -> DeclaredPropertySpec {
        self.create_file_spec(SpecKind::Input, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyValue;

    #[test]
    fn test_factory_creates_unnamed_required_spec() {
        let spec = PropertySpecFactory::new()
            .create_file_spec(SpecKind::OutputDirectory, ValidatingValue::absent());
        assert_eq!(spec.property_name(), "");
        assert!(!spec.is_optional());
        assert_eq!(spec.kind(), PropertyKind::OutputDirectory);
    }

    #[test]
    fn test_factory_calls_are_independent() {
        let factory = PropertySpecFactory::new();
        let value = ValidatingValue::of(PropertyValue::path("build/classes"));
        let first = factory.create_file_spec(SpecKind::OutputFile, value.clone());
        let second = factory.create_file_spec(SpecKind::OutputFile, value);
        assert_eq!(first, second);

        let named = first.with_property_name("out").optional(true);
        assert_eq!(second.property_name(), "");
        assert!(!second.is_optional());
        assert_eq!(named.property_name(), "out");
    }

    #[test]
    fn test_named_spec_is_built_in_one_step() {
        let spec = PropertySpecFactory::new().create_named_spec(
            SpecKind::LocalState,
            "cacheDir",
            true,
            ValidatingValue::absent(),
        );
        assert_eq!(spec.property_name(), "cacheDir");
        assert!(spec.is_optional());
        assert_eq!(spec.kind(), PropertyKind::LocalState);
        assert!(!spec.is_skip_when_empty());
    }

    #[test]
    fn test_validate_uses_effective_optionality() {
        let factory = PropertySpecFactory::new();
        let required = factory.create_file_spec(SpecKind::OutputFile, ValidatingValue::absent());
        assert_eq!(required.validate(), ValidationResult::MissingRequiredValue);
        assert_eq!(required.optional(true).validate(), ValidationResult::Valid);
    }
}
