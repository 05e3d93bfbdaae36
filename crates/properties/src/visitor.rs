//! The visitor contract consumed by the task graph builder.

use crate::DeclaredPropertySpec;

/// Receives finished specs, one callback per spec shape.
///
/// Every callback defaults to ignoring the spec, so a visitor only overrides
/// the shapes it cares about. Specs arrive by value; the handler that built
/// one keeps no reference to it.
#[allow(unused_variables)]
pub trait PropertyVisitor {
    /// Whether this visitor only wants output properties.
    ///
    /// Handlers for input, destroyable, local-state and nested properties
    /// skip visitors that return `true`.
    fn visit_output_file_properties_only(&self) -> bool {
        false
    }

    /// A plain input value.
    fn visit_input_property(&mut self, spec: DeclaredPropertySpec) {}

    /// A single input file.
    fn visit_input_file_property(&mut self, spec: DeclaredPropertySpec) {}

    /// An input file collection.
    fn visit_input_files_property(&mut self, spec: DeclaredPropertySpec) {}

    /// An input directory.
    fn visit_input_directory_property(&mut self, spec: DeclaredPropertySpec) {}

    /// A single output file.
    fn visit_output_file_property(&mut self, spec: DeclaredPropertySpec) {}

    /// Several output files.
    fn visit_output_files_property(&mut self, spec: DeclaredPropertySpec) {}

    /// A single output directory.
    fn visit_output_directory_property(&mut self, spec: DeclaredPropertySpec) {}

    /// Several output directories.
    fn visit_output_directories_property(&mut self, spec: DeclaredPropertySpec) {}

    /// Files the task deletes.
    fn visit_destroyable_property(&mut self, spec: DeclaredPropertySpec) {}

    /// Files the task keeps as local state.
    fn visit_local_state_property(&mut self, spec: DeclaredPropertySpec) {}
}

/// A visitor that records every spec in callback order.
///
/// Useful for tests and for callers that post-process all specs at once.
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    outputs_only: bool,
    specs: Vec<DeclaredPropertySpec>,
}

impl RecordingVisitor {
    /// Record every spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record only what output handlers report.
    #[must_use]
    pub fn outputs_only() -> Self {
        Self {
            outputs_only: true,
            specs: Vec::new(),
        }
    }

    /// Specs received so far.
    #[must_use]
    pub fn specs(&self) -> &[DeclaredPropertySpec] {
        &self.specs
    }

    /// Take ownership of the received specs.
    #[must_use]
    pub fn into_specs(self) -> Vec<DeclaredPropertySpec> {
        self.specs
    }

    /// The spec with the given full name.
    #[must_use]
    pub fn get(&self, property_name: &str) -> Option<&DeclaredPropertySpec> {
        self.specs
            .iter()
            .find(|spec| spec.property_name() == property_name)
    }
}

impl PropertyVisitor for RecordingVisitor {
    fn visit_output_file_properties_only(&self) -> bool {
        self.outputs_only
    }

    fn visit_input_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_input_file_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_input_files_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_input_directory_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_output_file_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_output_files_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_output_directory_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_output_directories_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_destroyable_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }

    fn visit_local_state_property(&mut self, spec: DeclaredPropertySpec) {
        self.specs.push(spec);
    }
}
