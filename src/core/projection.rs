//! Selecting one element out of a collection-valued path step
//!
//! Localized entities keep their translated fields in a child collection,
//! e.g. `product.translations[*].name`. Sorting by `translations.name` picks
//! the element matching an equality condition (by default the element whose
//! language code equals the current locale) and reads one more member from
//! it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::field::FieldValue;
use crate::core::guard::NullGuardBuilder;
use crate::core::reflect::{MemberType, Node, Reflect, TypeInfo};
use crate::core::resolver::{PathResolver, ResolvedStep, accessor};

/// Picks a single element out of a collection step by member equality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualityCondition {
    /// Member of the element type to compare
    pub property: String,

    /// Value the member must equal
    pub value: FieldValue,
}

impl EqualityCondition {
    pub fn new(property: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

type Predicate = Arc<dyn Fn(&dyn Reflect) -> bool + Send + Sync>;

fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&dyn Reflect) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Builds the filter / first / project read for a collection step
pub struct CollectionProjector<'a> {
    /// Member compared against the locale when no condition is given
    pub locale_member: &'a str,

    /// Locale the default condition matches
    pub locale: &'a str,

    /// Caller-supplied condition, overriding the locale default
    pub equality: Option<&'a EqualityCondition>,
}

impl CollectionProjector<'_> {
    /// Extend `base`, whose chain ends on a collection of `element_type`,
    /// with the element selection and a read of `next_segment`.
    ///
    /// When `next_segment` does not resolve on the element type the chain
    /// ends on the selected element itself.
    pub fn project(
        &self,
        resolver: &mut PathResolver,
        base: NullGuardBuilder,
        element_type: fn() -> &'static TypeInfo,
        next_segment: &str,
    ) -> NullGuardBuilder {
        let element = element_type();
        let target = resolver.resolve(element, next_segment);
        let filter = self.filter(resolver, element, target.as_ref());

        let select = accessor(move |node| match node {
            Node::Collection(items) => items
                .into_iter()
                .find(|item| filter.as_ref().is_none_or(|matches| matches(*item)))
                .map_or(Node::Null, Node::Object),
            _ => Node::Null,
        });

        let selected = base.then_with(select, MemberType::Object(element_type), "[first]");

        match target {
            Some(step) => selected.then(&step),
            None => {
                tracing::warn!(
                    element = element.name,
                    segment = next_segment,
                    "Segment after collection does not resolve, sorting by selected element"
                );
                selected
            }
        }
    }

    fn filter(
        &self,
        resolver: &mut PathResolver,
        element: &'static TypeInfo,
        target: Option<&ResolvedStep>,
    ) -> Option<Predicate> {
        if let Some(condition) = self.equality {
            return explicit_filter(resolver, element, condition);
        }

        let locale_step = resolver.resolve(element, self.locale_member)?;
        if target.is_some_and(|t| t.name() == locale_step.name()) {
            tracing::debug!(
                element = element.name,
                "Sorting by the locale member itself, locale filter skipped"
            );
            return None;
        }

        let locale = FieldValue::String(self.locale.to_string());
        Some(equals(locale_step, locale))
    }
}

fn explicit_filter(
    resolver: &mut PathResolver,
    element: &'static TypeInfo,
    condition: &EqualityCondition,
) -> Option<Predicate> {
    let Some(step) = resolver.resolve(element, &condition.property) else {
        tracing::warn!(
            element = element.name,
            property = %condition.property,
            "Equality property not found on collection element, no filter applied"
        );
        return None;
    };

    let MemberType::Scalar(kind) = step.result_type() else {
        tracing::warn!(
            element = element.name,
            property = %condition.property,
            "Equality property is not a scalar, no filter applied"
        );
        return None;
    };

    match condition.value.coerce_to(kind) {
        Some(expected) => Some(equals(step, expected)),
        None => {
            tracing::warn!(
                element = element.name,
                property = %condition.property,
                value = ?condition.value,
                "Equality value cannot be compared with {:?}, no element will match",
                kind
            );
            Some(predicate(|_| false))
        }
    }
}

fn equals(step: ResolvedStep, expected: FieldValue) -> Predicate {
    let read = step.accessor;
    predicate(move |item| match read(Node::Object(item)) {
        Node::Scalar(value) => value == expected,
        Node::Null => expected.is_null(),
        _ => false,
    })
}
