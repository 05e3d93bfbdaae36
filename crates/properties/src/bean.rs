//! Beans: objects that declare properties.
//!
//! A task is the root bean. Properties of kind
//! [`Nested`](crate::PropertyKind::Nested) hold further beans, which are
//! walked through the same pipeline under a prefixed name.

use crate::{PropertyMetadata, Result, ValidatingValue};
use std::fmt;
use std::sync::Arc;

/// One declared property, as produced by metadata extraction.
#[derive(Debug, Clone)]
pub struct DeclaredProperty {
    /// Full name, prefixed with enclosing nested property names
    pub property_name: String,
    /// Deferred value
    pub value: ValidatingValue,
    /// Declared metadata; `metadata.kind()` selects the handler
    pub metadata: PropertyMetadata,
}

impl DeclaredProperty {
    /// A top-level property named after its metadata.
    #[must_use]
    pub fn new(metadata: PropertyMetadata, value: ValidatingValue) -> Self {
        Self {
            property_name: metadata.name().to_string(),
            value,
            metadata,
        }
    }

    /// Re-home this property under `parent`.
    #[must_use]
    pub fn prefixed(mut self, parent: &str, separator: &str) -> Self {
        self.property_name = format!("{parent}{separator}{}", self.property_name);
        self
    }
}

/// The metadata-extraction collaborator for one object.
pub trait PropertyBean: Send + Sync + fmt::Debug {
    /// Name of the bean's type, for diagnostics.
    fn type_name(&self) -> &str;

    /// The properties this bean declares, names unique within the bean.
    fn declared_properties(&self) -> Vec<DeclaredProperty>;
}

/// Lets a nested-bean handler hand work back to the walker.
pub trait BeanPropertyContext {
    /// Whether the bean being walked was reached through an optional property.
    fn is_optional(&self) -> bool;

    /// Queue `bean` so its declared properties are visited as
    /// `<property_name><separator><child>`.
    ///
    /// # Errors
    ///
    /// Fails when nesting exceeds the configured depth.
    fn add_nested(
        &mut self,
        property_name: &str,
        bean: Arc<dyn PropertyBean>,
        optional: bool,
    ) -> Result<()>;
}

/// An in-memory bean built from explicit metadata/value pairs.
#[derive(Debug, Clone)]
pub struct DeclaredBean {
    type_name: String,
    properties: Vec<(PropertyMetadata, ValidatingValue)>,
}

impl DeclaredBean {
    /// An empty bean.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a property.
    #[must_use]
    pub fn with_property(mut self, metadata: PropertyMetadata, value: ValidatingValue) -> Self {
        self.properties.push((metadata, value));
        self
    }

    /// Number of properties declared directly on this bean.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the bean declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PropertyBean for DeclaredBean {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn declared_properties(&self) -> Vec<DeclaredProperty> {
        self.properties
            .iter()
            .map(|(metadata, value)| DeclaredProperty::new(metadata.clone(), value.clone()))
            .collect()
    }
}
