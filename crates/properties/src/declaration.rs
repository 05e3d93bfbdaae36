//! Serializable task property declarations.
//!
//! Declarations let tasks describe their properties in TOML or JSON instead
//! of code. Converting one yields a [`DeclaredBean`], the in-memory
//! extraction collaborator the walker consumes.

use crate::{
    DeclaredBean, Error, PathSensitivity, PropertyKind, PropertyMetadata, PropertyValue, Result,
    ValidatingValue,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file holding several task declarations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DeclarationFile {
    /// Declared tasks, in file order
    #[serde(default, rename = "task")]
    pub tasks: Vec<TaskDeclaration>,
}

impl DeclarationFile {
    /// Parse a TOML document with `[[task]]` tables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed input.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source)
            .map_err(|e| Error::configuration(format!("Invalid task declarations: {e}")))
    }
}

/// The declared properties of one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDeclaration {
    /// Task name
    pub name: String,

    /// Declared properties
    #[serde(default, rename = "property")]
    pub properties: Vec<PropertyDeclaration>,
}

impl TaskDeclaration {
    /// Parse a single JSON task declaration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed input.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map_err(|e| Error::configuration(format!("Invalid task declaration: {e}")))
    }

    /// Build the bean the walker consumes.
    ///
    /// # Errors
    ///
    /// Fails if a property sets more than one of `path`, `paths`, `value`
    /// and `nested`, or sets `nested` on a non-nested kind.
    pub fn into_bean(self) -> Result<DeclaredBean> {
        build_bean(&self.name, self.properties)
    }
}

/// One declared property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    /// Property name within its bean
    pub name: String,

    /// Declared kind
    pub kind: PropertyKind,

    /// Declared optional
    #[serde(default)]
    pub optional: bool,

    /// Skip the task when this input is empty
    #[serde(default)]
    pub skip_when_empty: bool,

    /// Input path sensitivity
    #[serde(default)]
    pub path_sensitivity: PathSensitivity,

    /// Single location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Several locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<PathBuf>>,

    /// Plain value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    /// Properties of a nested bean
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<PropertyDeclaration>>,
}

impl PropertyDeclaration {
    fn metadata(&self) -> PropertyMetadata {
        PropertyMetadata::new(self.name.clone(), self.kind)
            .with_optional(self.optional)
            .with_skip_when_empty(self.skip_when_empty)
            .with_path_sensitivity(self.path_sensitivity)
    }

    fn into_value(self) -> Result<ValidatingValue> {
        let set = [
            self.path.is_some(),
            self.paths.is_some(),
            self.value.is_some(),
            self.nested.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count();
        if set > 1 {
            return Err(Error::configuration(format!(
                "Property '{}' sets more than one of path, paths, value and nested",
                self.name
            )));
        }
        if self.nested.is_some() && self.kind != PropertyKind::Nested {
            return Err(Error::configuration(format!(
                "Property '{}' has nested properties but kind '{}'",
                self.name, self.kind
            )));
        }

        let value = if let Some(path) = self.path {
            Some(PropertyValue::Path(path))
        } else if let Some(paths) = self.paths {
            Some(PropertyValue::Paths(paths))
        } else if let Some(value) = self.value {
            Some(PropertyValue::Scalar(value))
        } else if let Some(nested) = self.nested {
            Some(PropertyValue::bean(build_bean(&self.name, nested)?))
        } else {
            None
        };

        Ok(value.map_or_else(ValidatingValue::absent, ValidatingValue::of))
    }
}

fn build_bean(type_name: &str, properties: Vec<PropertyDeclaration>) -> Result<DeclaredBean> {
    properties
        .into_iter()
        .try_fold(DeclaredBean::new(type_name), |bean, declaration| {
            let metadata = declaration.metadata();
            Ok(bean.with_property(metadata, declaration.into_value()?))
        })
}
