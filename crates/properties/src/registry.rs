//! Immutable mapping from property kind to handler.

use crate::handlers::{PropertyAnnotationHandler, default_handlers};
use crate::{Error, PropertyKind, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Resolves the handler for a property kind.
///
/// Built once, then only read. Share it between configuration threads with
/// an `Arc`; lookups take no locks.
#[derive(Debug, Clone)]
pub struct PropertyAnnotationHandlerRegistry {
    handlers: HashMap<PropertyKind, Arc<dyn PropertyAnnotationHandler>>,
}

impl PropertyAnnotationHandlerRegistry {
    /// Start an empty registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry holding a handler for every [`PropertyKind`].
    #[must_use]
    pub fn with_default_handlers() -> Self {
        let handlers = default_handlers()
            .into_iter()
            .map(|handler| (handler.kind(), handler))
            .collect();
        Self { handlers }
    }

    /// The handler registered for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPropertyKind`] if nothing is registered.
    pub fn resolve(&self, kind: PropertyKind) -> Result<&dyn PropertyAnnotationHandler> {
        self.handlers
            .get(&kind)
            .map(|handler| handler.as_ref())
            .ok_or(Error::UnknownPropertyKind { kind })
    }

    /// Whether a handler is registered for `kind`.
    #[must_use]
    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<PropertyKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for PropertyAnnotationHandlerRegistry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}

/// Collects handlers for a [`PropertyAnnotationHandlerRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    handlers: Vec<Arc<dyn PropertyAnnotationHandler>>,
}

impl RegistryBuilder {
    /// Add a handler.
    #[must_use]
    pub fn register(mut self, handler: Arc<dyn PropertyAnnotationHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Freeze the registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateHandler`] if two handlers claim one kind.
    pub fn build(self) -> Result<PropertyAnnotationHandlerRegistry> {
        let mut handlers = HashMap::with_capacity(self.handlers.len());
        for handler in self.handlers {
            let kind = handler.kind();
            if handlers.insert(kind, handler).is_some() {
                return Err(Error::DuplicateHandler { kind });
            }
        }
        debug!(handler_count = handlers.len(), "Built property handler registry");
        Ok(PropertyAnnotationHandlerRegistry { handlers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{InternalHandler, OutputFilesHandler};

    #[test]
    fn test_default_registry_resolves_every_kind() {
        let registry = PropertyAnnotationHandlerRegistry::with_default_handlers();
        for kind in PropertyKind::ALL {
            assert_eq!(registry.resolve(kind).unwrap().kind(), kind);
        }
        assert_eq!(registry.kinds(), PropertyKind::ALL.to_vec());
    }

    #[test]
    fn test_unregistered_kind_fails() {
        let registry = PropertyAnnotationHandlerRegistry::builder()
            .register(Arc::new(OutputFilesHandler::file()))
            .build()
            .unwrap();

        assert!(registry.contains(PropertyKind::OutputFile));
        let err = registry.resolve(PropertyKind::Nested).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownPropertyKind {
                kind: PropertyKind::Nested
            }
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = PropertyAnnotationHandlerRegistry::builder()
            .register(Arc::new(InternalHandler))
            .register(Arc::new(InternalHandler))
            .build();

        assert_eq!(
            result.unwrap_err(),
            Error::DuplicateHandler {
                kind: PropertyKind::Internal
            }
        );
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PropertyAnnotationHandlerRegistry>();

        let registry = Arc::new(PropertyAnnotationHandlerRegistry::with_default_handlers());
        std::thread::scope(|scope| {
            for kind in PropertyKind::ALL {
                let registry = Arc::clone(&registry);
                scope.spawn(move || {
                    assert_eq!(registry.resolve(kind).unwrap().kind(), kind);
                });
            }
        });
    }
}
