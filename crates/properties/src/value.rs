//! Deferred property values.
//!
//! A [`ValidatingValue`] wraps a supplier that is only called when someone
//! reads the value. Classification never reads it, so every task can be
//! classified before any of its inputs exist on disk.

use crate::PropertyBean;
use crate::path::PathResolver;
use crate::validation::ValidationResult;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The resolved value of a declared property.
#[derive(Clone)]
pub enum PropertyValue {
    /// A single file or directory
    Path(PathBuf),
    /// Several files or directories
    Paths(Vec<PathBuf>),
    /// A plain value
    Scalar(serde_json::Value),
    /// An object with its own declared properties
    Bean(Arc<dyn PropertyBean>),
}

impl PropertyValue {
    /// A single path value.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// A multi-path value.
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::Paths(paths.into_iter().map(Into::into).collect())
    }

    /// A plain value.
    pub fn scalar(value: impl Into<serde_json::Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// A nested bean value.
    pub fn bean(bean: impl PropertyBean + 'static) -> Self {
        Self::Bean(Arc::new(bean))
    }

    /// The paths this value names, or `None` for scalars and beans.
    #[must_use]
    pub fn file_paths(&self) -> Option<Vec<&Path>> {
        match self {
            Self::Path(p) => Some(vec![p.as_path()]),
            Self::Paths(ps) => Some(ps.iter().map(PathBuf::as_path).collect()),
            Self::Scalar(_) | Self::Bean(_) => None,
        }
    }

    /// Short name of the variant, for messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Paths(_) => "path list",
            Self::Scalar(_) => "value",
            Self::Bean(_) => "nested bean",
        }
    }

    fn map_paths(self, resolver: &dyn PathResolver) -> Self {
        match self {
            Self::Path(p) => Self::Path(resolver.resolve(&p)),
            Self::Paths(ps) => Self::Paths(ps.iter().map(|p| resolver.resolve(p)).collect()),
            other => other,
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Paths(ps) => f.debug_tuple("Paths").field(ps).finish(),
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Bean(b) => f.debug_tuple("Bean").field(&b.type_name()).finish(),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Path(a), Self::Path(b)) => a == b,
            (Self::Paths(a), Self::Paths(b)) => a == b,
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Bean(a), Self::Bean(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

type Supplier = dyn Fn() -> Result<Option<PropertyValue>, String> + Send + Sync;

/// A lazily evaluated, possibly absent property value.
///
/// Cloning shares the supplier. Two values compare equal only when they share
/// one supplier, since suppliers cannot be compared by content.
#[derive(Clone)]
pub struct ValidatingValue {
    supplier: Arc<Supplier>,
}

impl ValidatingValue {
    /// Wrap a supplier. It is not called here.
    pub fn new<F>(supplier: F) -> Self
    where
        F: Fn() -> Result<Option<PropertyValue>, String> + Send + Sync + 'static,
    {
        Self {
            supplier: Arc::new(supplier),
        }
    }

    /// A value that is already known.
    #[must_use]
    pub fn of(value: PropertyValue) -> Self {
        Self::new(move || Ok(Some(value.clone())))
    }

    /// A value that was never set.
    #[must_use]
    pub fn absent() -> Self {
        Self::new(|| Ok(None))
    }

    /// Call the supplier.
    ///
    /// # Errors
    ///
    /// Returns the supplier's reason if the value cannot be computed.
    pub fn get(&self) -> Result<Option<PropertyValue>, String> {
        (self.supplier)()
    }

    /// Whether the supplier currently yields a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }

    /// Check presence against the property's optionality.
    #[must_use]
    pub fn validate(&self, optional: bool) -> ValidationResult {
        self.validate_with(optional, |_| Ok(()))
    }

    /// Check presence, then run `check` on a present value.
    pub fn validate_with<F>(&self, optional: bool, check: F) -> ValidationResult
    where
        F: FnOnce(&PropertyValue) -> Result<(), String>,
    {
        match self.get() {
            Err(reason) => ValidationResult::InvalidValue(reason),
            Ok(None) if optional => ValidationResult::Valid,
            Ok(None) => ValidationResult::MissingRequiredValue,
            Ok(Some(value)) => match check(&value) {
                Ok(()) => ValidationResult::Valid,
                Err(reason) => ValidationResult::InvalidValue(reason),
            },
        }
    }

    /// A value whose paths pass through `resolver` when read.
    #[must_use]
    pub fn resolved_with(&self, resolver: Arc<dyn PathResolver>) -> Self {
        let inner = Arc::clone(&self.supplier);
        Self::new(move || Ok(inner()?.map(|value| value.map_paths(resolver.as_ref()))))
    }
}

impl fmt::Debug for ValidatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingValue").finish_non_exhaustive()
    }
}

impl PartialEq for ValidatingValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.supplier, &other.supplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::ProjectPathResolver;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_supplier_not_called_on_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = ValidatingValue::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        });
        let _resolved = value.resolved_with(Arc::new(ProjectPathResolver::new("/p")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(!value.is_present());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_presence() {
        assert_eq!(
            ValidatingValue::absent().validate(false),
            ValidationResult::MissingRequiredValue
        );
        assert_eq!(
            ValidatingValue::absent().validate(true),
            ValidationResult::Valid
        );
        assert_eq!(
            ValidatingValue::of(PropertyValue::path("a")).validate(false),
            ValidationResult::Valid
        );
    }

    #[test]
    fn test_supplier_error_is_invalid_value() {
        let value = ValidatingValue::new(|| Err("not configured yet".to_string()));
        assert_eq!(
            value.validate(true),
            ValidationResult::InvalidValue("not configured yet".to_string())
        );
    }

    #[test]
    fn test_resolved_with_maps_paths_only() {
        let resolver: Arc<dyn PathResolver> = Arc::new(ProjectPathResolver::new("/p"));
        let paths = ValidatingValue::of(PropertyValue::paths(["a", "b/c"]))
            .resolved_with(Arc::clone(&resolver));
        assert_eq!(
            paths.get().unwrap(),
            Some(PropertyValue::paths(["/p/a", "/p/b/c"]))
        );

        let scalar = ValidatingValue::of(PropertyValue::scalar("x")).resolved_with(resolver);
        assert_eq!(scalar.get().unwrap(), Some(PropertyValue::scalar("x")));
    }

    #[test]
    fn test_clones_are_equal_fresh_values_are_not() {
        let value = ValidatingValue::of(PropertyValue::path("a"));
        assert_eq!(value.clone(), value);
        assert_ne!(ValidatingValue::of(PropertyValue::path("a")), value);
    }
}
