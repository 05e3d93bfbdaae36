//! Collects one task's specs from the property walker.

use crate::{Error, Result};
use std::collections::HashSet;
use taskprops_properties::{DeclaredPropertySpec, PropertyVisitor};
use tracing::trace;

/// Every spec one task declared, grouped by role.
#[derive(Debug, Clone, Default)]
pub struct TaskProperties {
    name: String,
    inputs: Vec<DeclaredPropertySpec>,
    outputs: Vec<DeclaredPropertySpec>,
    destroyables: Vec<DeclaredPropertySpec>,
    local_state: Vec<DeclaredPropertySpec>,
}

impl TaskProperties {
    /// An empty property set for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name of the task.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input values, files and directories.
    #[must_use]
    pub fn inputs(&self) -> &[DeclaredPropertySpec] {
        &self.inputs
    }

    /// Output files and directories.
    #[must_use]
    pub fn outputs(&self) -> &[DeclaredPropertySpec] {
        &self.outputs
    }

    /// Locations the task deletes.
    #[must_use]
    pub fn destroyables(&self) -> &[DeclaredPropertySpec] {
        &self.destroyables
    }

    /// Locations the task keeps as local state.
    #[must_use]
    pub fn local_state(&self) -> &[DeclaredPropertySpec] {
        &self.local_state
    }

    /// All specs, inputs first.
    pub fn specs(&self) -> impl Iterator<Item = &DeclaredPropertySpec> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .chain(&self.destroyables)
            .chain(&self.local_state)
    }

    /// The spec with the given full name.
    #[must_use]
    pub fn get(&self, property_name: &str) -> Option<&DeclaredPropertySpec> {
        self.specs()
            .find(|spec| spec.property_name() == property_name)
    }

    /// Total number of specs.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.destroyables.len() + self.local_state.len()
    }
}

/// A [`PropertyVisitor`] that builds a [`TaskProperties`].
///
/// Repeated names are recorded, never renamed or dropped, and reported by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct TaskPropertiesCollector {
    properties: TaskProperties,
    outputs_only: bool,
    seen: HashSet<String>,
    duplicates: Vec<String>,
}

impl TaskPropertiesCollector {
    /// Collect every spec of `task`.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            properties: TaskProperties::new(task),
            outputs_only: false,
            seen: HashSet::new(),
            duplicates: Vec::new(),
        }
    }

    /// Collect only output specs of `task`.
    pub fn outputs_only(task: impl Into<String>) -> Self {
        Self {
            outputs_only: true,
            ..Self::new(task)
        }
    }

    /// Return the collected properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePropertyName`] for the first name that was
    /// reported more than once.
    pub fn finish(self) -> Result<TaskProperties> {
        if let Some(property) = self.duplicates.into_iter().next() {
            return Err(Error::DuplicatePropertyName {
                task: self.properties.name,
                property,
            });
        }
        Ok(self.properties)
    }

    fn check_name(&mut self, spec: &DeclaredPropertySpec) {
        if !self.seen.insert(spec.property_name().to_string()) {
            trace!(task = %self.properties.name, property = spec.property_name(), "Duplicate property name");
            self.duplicates.push(spec.property_name().to_string());
        }
    }

    fn input(&mut self, spec: DeclaredPropertySpec) {
        self.check_name(&spec);
        self.properties.inputs.push(spec);
    }

    fn output(&mut self, spec: DeclaredPropertySpec) {
        self.check_name(&spec);
        self.properties.outputs.push(spec);
    }
}

impl PropertyVisitor for TaskPropertiesCollector {
    fn visit_output_file_properties_only(&self) -> bool {
        self.outputs_only
    }

    fn visit_input_property(&mut self, spec: DeclaredPropertySpec) {
        self.input(spec);
    }

    fn visit_input_file_property(&mut self, spec: DeclaredPropertySpec) {
        self.input(spec);
    }

    fn visit_input_files_property(&mut self, spec: DeclaredPropertySpec) {
        self.input(spec);
    }

    fn visit_input_directory_property(&mut self, spec: DeclaredPropertySpec) {
        self.input(spec);
    }

    fn visit_output_file_property(&mut self, spec: DeclaredPropertySpec) {
        self.output(spec);
    }

    fn visit_output_files_property(&mut self, spec: DeclaredPropertySpec) {
        self.output(spec);
    }

    fn visit_output_directory_property(&mut self, spec: DeclaredPropertySpec) {
        self.output(spec);
    }

    fn visit_output_directories_property(&mut self, spec: DeclaredPropertySpec) {
        self.output(spec);
    }

    fn visit_destroyable_property(&mut self, spec: DeclaredPropertySpec) {
        self.check_name(&spec);
        self.properties.destroyables.push(spec);
    }

    fn visit_local_state_property(&mut self, spec: DeclaredPropertySpec) {
        self.check_name(&spec);
        self.properties.local_state.push(spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskprops_properties::{PropertySpecFactory, SpecKind, ValidatingValue};

    fn spec(kind: SpecKind, name: &str) -> DeclaredPropertySpec {
        PropertySpecFactory::new().create_named_spec(kind, name, false, ValidatingValue::absent())
    }

    #[test]
    fn test_specs_are_grouped_by_role() {
        let mut collector = TaskPropertiesCollector::new("compile");
        spec(SpecKind::InputFiles, "sources").accept(&mut collector);
        spec(SpecKind::OutputDirectory, "outputDir").accept(&mut collector);
        spec(SpecKind::Destroys, "stale").accept(&mut collector);
        spec(SpecKind::LocalState, "cache").accept(&mut collector);
        spec(SpecKind::Input, "level").accept(&mut collector);

        let properties = collector.finish().unwrap();
        assert_eq!(properties.name(), "compile");
        assert_eq!(properties.inputs().len(), 2);
        assert_eq!(properties.outputs().len(), 1);
        assert_eq!(properties.destroyables().len(), 1);
        assert_eq!(properties.local_state().len(), 1);
        assert_eq!(properties.property_count(), 5);
        assert!(properties.get("outputDir").is_some());
    }

    #[test]
    fn test_duplicate_names_fail_on_finish() {
        let mut collector = TaskPropertiesCollector::new("jar");
        spec(SpecKind::OutputFile, "archive").accept(&mut collector);
        spec(SpecKind::InputFile, "archive").accept(&mut collector);

        let err = collector.finish().unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicatePropertyName { ref task, ref property } if task == "jar" && property == "archive"
        ));
    }

    #[test]
    fn test_outputs_only_flag_is_reported() {
        assert!(TaskPropertiesCollector::outputs_only("t").visit_output_file_properties_only());
        assert!(!TaskPropertiesCollector::new("t").visit_output_file_properties_only());
    }
}
