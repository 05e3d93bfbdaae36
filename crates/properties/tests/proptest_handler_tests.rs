//! Property-based tests for handler contracts.
//!
//! These verify the behavioral contracts of classification:
//! - Every spec-bearing property yields exactly one spec with its own name
//! - Effective optionality is the declared flag ORed with the bean context
//! - Nested beans yield one prefixed spec per child

use proptest::prelude::*;
use std::sync::Arc;
use taskprops_properties::{
    DeclaredBean, IdentityPathResolver, PropertyAnnotationHandlerRegistry, PropertyKind,
    PropertyMetadata, PropertySpecFactory, PropertyValue, PropertyWalker, RecordingVisitor,
    ValidatingValue,
};

// =============================================================================
// Strategies
// =============================================================================

/// A kind that always produces a spec.
fn spec_kind_strategy() -> impl Strategy<Value = PropertyKind> {
    proptest::sample::select(
        PropertyKind::ALL
            .into_iter()
            .filter(|kind| kind.spec_kind().is_some())
            .collect::<Vec<_>>(),
    )
}

/// A property name (camelCase identifier).
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,12}".prop_map(String::from)
}

/// Unique (name, kind, optional) triples.
fn properties_strategy(max: usize) -> impl Strategy<Value = Vec<(String, PropertyKind, bool)>> {
    proptest::collection::vec((name_strategy(), spec_kind_strategy(), any::<bool>()), 0..=max)
        .prop_map(|props| {
            props
                .into_iter()
                .enumerate()
                .map(|(i, (name, kind, optional))| (format!("{name}{i}"), kind, optional))
                .collect()
        })
}

fn build_bean(type_name: &str, props: &[(String, PropertyKind, bool)]) -> DeclaredBean {
    props.iter().fold(DeclaredBean::new(type_name), |bean, (name, kind, optional)| {
        bean.with_property(
            PropertyMetadata::new(name.clone(), *kind).with_optional(*optional),
            ValidatingValue::of(PropertyValue::path(name.as_str())),
        )
    })
}

fn walker() -> PropertyWalker {
    PropertyWalker::new(
        Arc::new(PropertyAnnotationHandlerRegistry::with_default_handlers()),
        Arc::new(IdentityPathResolver),
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// Contract: one spec per declared property, named after it, optional
    /// exactly when declared optional at the top level.
    #[test]
    fn one_spec_per_property(props in properties_strategy(12)) {
        let task = build_bean("Task", &props);
        let mut visitor = RecordingVisitor::new();
        walker().visit_properties(&task, &mut visitor).unwrap();

        prop_assert_eq!(visitor.specs().len(), props.len());
        for ((name, kind, optional), spec) in props.iter().zip(visitor.specs()) {
            prop_assert_eq!(spec.property_name(), name.as_str());
            prop_assert_eq!(spec.kind(), *kind);
            prop_assert_eq!(spec.is_optional(), *optional);
        }
    }

    /// Contract: nested children are all reported, prefixed with the parent,
    /// and optional whenever the parent is.
    #[test]
    fn nested_children_are_prefixed(
        parent in name_strategy(),
        parent_optional in any::<bool>(),
        props in properties_strategy(8),
    ) {
        let child = build_bean("Child", &props);
        let task = DeclaredBean::new("Task").with_property(
            PropertyMetadata::new(parent.clone(), PropertyKind::Nested).with_optional(parent_optional),
            ValidatingValue::of(PropertyValue::bean(child)),
        );
        let mut visitor = RecordingVisitor::new();
        walker().visit_properties(&task, &mut visitor).unwrap();

        prop_assert_eq!(visitor.specs().len(), props.len());
        for ((name, _, optional), spec) in props.iter().zip(visitor.specs()) {
            prop_assert_eq!(spec.property_name(), format!("{parent}.{name}"));
            prop_assert_eq!(spec.is_optional(), *optional || parent_optional);
        }
    }

    /// Contract: the factory shares no state between calls.
    #[test]
    fn factory_is_idempotent(kind in spec_kind_strategy(), path in name_strategy()) {
        let factory = PropertySpecFactory::new();
        let spec_kind = kind.spec_kind().unwrap();
        let value = ValidatingValue::of(PropertyValue::path(path));

        let first = factory.create_file_spec(spec_kind, value.clone());
        let second = factory.create_file_spec(spec_kind, value);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.property_name(), "");
        prop_assert!(!first.is_optional());
    }
}
