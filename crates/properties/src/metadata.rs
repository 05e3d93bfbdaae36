//! Per-property metadata supplied by the extraction collaborator.

use crate::PropertyKind;
use serde::{Deserialize, Serialize};

/// How much of an input file's path participates in staleness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSensitivity {
    /// The full absolute path
    #[default]
    Absolute,
    /// The path relative to the project root
    Relative,
    /// Only the file name
    NameOnly,
    /// Only content, never the path
    None,
}

/// Immutable description of one declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    name: String,
    kind: PropertyKind,
    optional: bool,
    skip_when_empty: bool,
    path_sensitivity: PathSensitivity,
}

impl PropertyMetadata {
    /// Metadata for a required property with default input settings.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            skip_when_empty: false,
            path_sensitivity: PathSensitivity::default(),
        }
    }

    /// Mark the property as declared optional.
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Skip the task when this input resolves to no files.
    #[must_use]
    pub fn with_skip_when_empty(mut self, skip_when_empty: bool) -> Self {
        self.skip_when_empty = skip_when_empty;
        self
    }

    /// Set the input path sensitivity.
    #[must_use]
    pub fn with_path_sensitivity(mut self, path_sensitivity: PathSensitivity) -> Self {
        self.path_sensitivity = path_sensitivity;
        self
    }

    /// The declared (unprefixed) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared kind.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Whether the property itself was declared optional.
    ///
    /// This is the raw flag. Handlers combine it with the enclosing bean
    /// context to get the effective optionality.
    #[must_use]
    pub fn is_optional_declared(&self) -> bool {
        self.optional
    }

    /// Whether an empty input skips the task.
    #[must_use]
    pub fn skip_when_empty(&self) -> bool {
        self.skip_when_empty
    }

    /// Input path sensitivity.
    #[must_use]
    pub fn path_sensitivity(&self) -> PathSensitivity {
        self.path_sensitivity
    }
}
