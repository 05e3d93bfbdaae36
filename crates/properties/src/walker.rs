//! Drives the classification pipeline for one task.
//!
//! For each declared property the walker resolves the handler for its kind,
//! asks whether the visitor wants it, and lets the handler build and report
//! the spec. Nested beans are queued by the nested handler and walked on the
//! calling thread once the current bean is done.

use crate::path::PathResolver;
use crate::{
    BeanPropertyContext, DeclaredProperty, Error, PropertyAnnotationHandlerRegistry, PropertyBean,
    PropertySpecFactory, PropertyVisitor, Result, WalkerConfig,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

/// Walks a task's declared properties and reports specs to a visitor.
///
/// A walker holds only shared, immutable state and can be used from many
/// configuration threads at once.
#[derive(Debug, Clone)]
pub struct PropertyWalker {
    registry: Arc<PropertyAnnotationHandlerRegistry>,
    spec_factory: PropertySpecFactory,
    path_resolver: Arc<dyn PathResolver>,
    config: WalkerConfig,
}

impl PropertyWalker {
    /// Create a walker with the default configuration.
    #[must_use]
    pub fn new(
        registry: Arc<PropertyAnnotationHandlerRegistry>,
        path_resolver: Arc<dyn PathResolver>,
    ) -> Self {
        Self {
            registry,
            spec_factory: PropertySpecFactory::new(),
            path_resolver,
            config: WalkerConfig::default(),
        }
    }

    /// Replace the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` does not validate.
    pub fn with_config(mut self, config: WalkerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// The registry handlers are resolved from.
    #[must_use]
    pub fn registry(&self) -> &PropertyAnnotationHandlerRegistry {
        &self.registry
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Visit every property `task` declares, including nested ones.
    ///
    /// # Errors
    ///
    /// Fails on the first property with an empty name, an unregistered
    /// kind, or nesting deeper than the configured limit. Nothing is
    /// rolled back; the caller decides what a failure means for the task.
    pub fn visit_properties(
        &self,
        task: &dyn PropertyBean,
        visitor: &mut dyn PropertyVisitor,
    ) -> Result<()> {
        self.visit_declared_properties(task.type_name(), task.declared_properties(), visitor)
    }

    /// Visit an already extracted property list, as if declared by a bean
    /// named `type_name`.
    ///
    /// # Errors
    ///
    /// See [`visit_properties`](Self::visit_properties).
    pub fn visit_declared_properties(
        &self,
        type_name: &str,
        properties: impl IntoIterator<Item = DeclaredProperty>,
        visitor: &mut dyn PropertyVisitor,
    ) -> Result<()> {
        let span = debug_span!("property_walker.visit", bean = type_name);
        let _guard = span.enter();

        let mut context = NestedBeans::new(self.config.max_nesting_depth);
        let mut visited = self.visit_all(properties, &mut context, visitor)?;

        while let Some(node) = context.next_bean() {
            trace!(prefix = %node.prefix, depth = node.depth, "Walking nested bean");
            let separator = self.config.nested_separator.as_str();
            let properties = node
                .bean
                .declared_properties()
                .into_iter()
                .map(|property| property.prefixed(&node.prefix, separator));
            visited += self.visit_all(properties, &mut context, visitor)?;
        }

        debug!(visited, "Visited declared properties");
        Ok(())
    }

    fn visit_all(
        &self,
        properties: impl IntoIterator<Item = DeclaredProperty>,
        context: &mut NestedBeans,
        visitor: &mut dyn PropertyVisitor,
    ) -> Result<usize> {
        let mut visited = 0;
        for property in properties {
            if self.visit_property(property, context, visitor)? {
                visited += 1;
            }
        }
        Ok(visited)
    }

    fn visit_property(
        &self,
        property: DeclaredProperty,
        context: &mut NestedBeans,
        visitor: &mut dyn PropertyVisitor,
    ) -> Result<bool> {
        let kind = property.metadata.kind();
        if property.metadata.name().is_empty() || property.property_name.is_empty() {
            return Err(Error::EmptyPropertyName { kind });
        }

        let handler = self.registry.resolve(kind)?;
        if !handler.should_visit(visitor) {
            trace!(property = %property.property_name, %kind, "Handler skipped for this visitor");
            return Ok(false);
        }

        handler.visit_property_value(
            &property.property_name,
            property.value,
            &property.metadata,
            visitor,
            &self.spec_factory,
            &self.path_resolver,
            context,
        )?;
        Ok(true)
    }
}

struct BeanNode {
    prefix: String,
    bean: Arc<dyn PropertyBean>,
    optional: bool,
    depth: usize,
}

/// Breadth-first queue of nested beans still to walk.
struct NestedBeans {
    queue: VecDeque<BeanNode>,
    current_optional: bool,
    current_depth: usize,
    max_depth: usize,
}

impl NestedBeans {
    fn new(max_depth: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            current_optional: false,
            current_depth: 0,
            max_depth,
        }
    }

    fn next_bean(&mut self) -> Option<BeanNode> {
        let node = self.queue.pop_front()?;
        self.current_optional = node.optional;
        self.current_depth = node.depth;
        Some(node)
    }
}

impl BeanPropertyContext for NestedBeans {
    fn is_optional(&self) -> bool {
        self.current_optional
    }

    fn add_nested(
        &mut self,
        property_name: &str,
        bean: Arc<dyn PropertyBean>,
        optional: bool,
    ) -> Result<()> {
        let depth = self.current_depth + 1;
        if depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                property: property_name.to_string(),
                limit: self.max_depth,
            });
        }
        self.queue.push_back(BeanNode {
            prefix: property_name.to_string(),
            bean,
            optional,
            depth,
        });
        Ok(())
    }
}
