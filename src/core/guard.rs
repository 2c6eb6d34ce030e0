//! Null-guarded accessor chains
//!
//! A chain starts at the root entity and appends one member read per
//! resolved segment. Once any read yields `Null` the rest of the chain is
//! skipped, and [`NullGuardBuilder::finish`] substitutes the default value of
//! the terminal member type. A compiled key therefore never fails on absent
//! data.

use std::sync::Arc;

use crate::core::field::{FieldValue, default_for};
use crate::core::reflect::{MemberType, Node, Reflect};
use crate::core::resolver::{Accessor, ResolvedStep, accessor};

/// Produces the sort key for one root entity
pub type KeyFn = Arc<dyn Fn(&dyn Reflect) -> FieldValue + Send + Sync>;

fn key_fn<F>(f: F) -> KeyFn
where
    F: Fn(&dyn Reflect) -> FieldValue + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Builds a guarded accessor chain one step at a time
#[derive(Clone)]
pub struct NullGuardBuilder {
    chain: Accessor,
    result_type: MemberType,
    members: Vec<&'static str>,
}

impl NullGuardBuilder {
    /// Start at a root entity of type `T` with the identity accessor
    pub fn new<T: Reflect>() -> Self {
        Self {
            chain: accessor(|node| node),
            result_type: MemberType::Object(T::type_info),
            members: Vec::new(),
        }
    }

    /// Number of reads in the chain
    pub fn depth(&self) -> usize {
        self.members.len()
    }

    /// Names of the reads so far, root first
    pub fn members(&self) -> &[&'static str] {
        &self.members
    }

    /// Declared type of the value the chain currently produces
    pub fn result_type(&self) -> MemberType {
        self.result_type
    }

    /// Append a guarded read of `step`
    pub fn then(self, step: &ResolvedStep) -> Self {
        self.then_with(step.accessor.clone(), step.result_type(), step.name())
    }

    /// Append a guarded custom read producing a value of `result_type`
    pub fn then_with(self, read: Accessor, result_type: MemberType, label: &'static str) -> Self {
        let mut members = self.members;
        members.push(label);
        Self {
            chain: guarded(self.chain, read),
            result_type,
            members,
        }
    }

    /// Close the chain into a key function.
    ///
    /// `object_key` is the member used as the key when the chain ends on an
    /// object, resolved by the caller against the terminal type. Objects
    /// without one are keyed by presence alone.
    pub fn finish(self, object_key: Option<ResolvedStep>) -> KeyFn {
        let chain = self.chain;
        let default = default_for(self.result_type);

        match self.result_type {
            MemberType::Scalar(_) => key_fn(move |root| match chain(Node::Object(root)) {
                Node::Scalar(value) if !value.is_null() => value,
                _ => default.clone(),
            }),
            MemberType::Object(_) => {
                let object_key = object_key.map(|step| {
                    let fallback = default_for(step.result_type());
                    (step.accessor, fallback)
                });
                key_fn(move |root| match chain(Node::Object(root)) {
                    object @ Node::Object(_) => match &object_key {
                        Some((read, fallback)) => match read(object) {
                            Node::Scalar(value) if !value.is_null() => value,
                            _ => fallback.clone(),
                        },
                        None => FieldValue::Boolean(true),
                    },
                    _ => default.clone(),
                })
            }
            MemberType::Collection(_) => key_fn(move |root| match chain(Node::Object(root)) {
                Node::Collection(items) => {
                    FieldValue::Integer(i64::try_from(items.len()).unwrap_or(i64::MAX))
                }
                _ => default.clone(),
            }),
        }
    }
}

fn guarded(prev: Accessor, next: Accessor) -> Accessor {
    accessor(move |node| match prev(node) {
        Node::Null => Node::Null,
        reached => next(reached),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::PathResolver;

    struct Engine {
        serial: Option<String>,
        power: Option<i32>,
    }

    struct Car {
        id: i64,
        engine: Option<Engine>,
    }

    struct Garage {
        cars: Vec<Car>,
    }

    crate::impl_reflect!(Engine, "Engine", {
        scalar serial: Option<String>,
        scalar power: Option<i32>,
    });

    crate::impl_reflect!(Car, "Car", {
        scalar id: i64,
        object engine: Option<Engine>,
    });

    crate::impl_reflect!(Garage, "Garage", {
        collection cars: Vec<Car>,
    });

    fn chain_for(path: &[&str]) -> NullGuardBuilder {
        let mut resolver = PathResolver::new();
        let mut builder = NullGuardBuilder::new::<Car>();
        for segment in path {
            let step = resolver
                .resolve_in(builder.result_type(), segment)
                .expect("segment should resolve");
            builder = builder.then(&step);
        }
        builder
    }

    #[test]
    fn test_scalar_read_through_present_object() {
        let key = chain_for(&["engine", "power"]).finish(None);
        let car = Car {
            id: 1,
            engine: Some(Engine {
                serial: None,
                power: Some(150),
            }),
        };
        assert_eq!(key(&car), FieldValue::Integer(150));
    }

    #[test]
    fn test_missing_intermediate_yields_default() {
        let power = chain_for(&["engine", "power"]).finish(None);
        let serial = chain_for(&["engine", "serial"]).finish(None);
        let car = Car { id: 1, engine: None };

        assert_eq!(power(&car), FieldValue::Integer(0));
        assert_eq!(serial(&car), FieldValue::String(String::new()));
    }

    #[test]
    fn test_null_leaf_yields_default() {
        let key = chain_for(&["engine", "power"]).finish(None);
        let car = Car {
            id: 1,
            engine: Some(Engine {
                serial: None,
                power: None,
            }),
        };
        assert_eq!(key(&car), FieldValue::Integer(0));
    }

    #[test]
    fn test_object_terminal_keys() {
        let builder = chain_for(&["engine"]);
        assert_eq!(builder.depth(), 1);
        assert_eq!(builder.members(), ["engine"]);

        let key = builder.finish(None);
        let with_engine = Car {
            id: 1,
            engine: Some(Engine {
                serial: None,
                power: None,
            }),
        };
        let without_engine = Car { id: 2, engine: None };

        assert_eq!(key(&with_engine), FieldValue::Boolean(true));
        assert_eq!(key(&without_engine), FieldValue::Null);
    }

    #[test]
    fn test_object_terminal_uses_object_key() {
        let mut resolver = PathResolver::new();
        let serial = resolver
            .resolve(Engine::type_info(), "serial")
            .expect("should resolve");
        let key = chain_for(&["engine"]).finish(Some(serial));

        let car = Car {
            id: 1,
            engine: Some(Engine {
                serial: Some("X-1".to_string()),
                power: None,
            }),
        };
        assert_eq!(key(&car), FieldValue::String("X-1".to_string()));
    }

    #[test]
    fn test_collection_terminal_counts_items() {
        let mut resolver = PathResolver::new();
        let step = resolver
            .resolve(Garage::type_info(), "cars")
            .expect("should resolve");
        let key = NullGuardBuilder::new::<Garage>().then(&step).finish(None);

        let garage = Garage {
            cars: vec![Car { id: 1, engine: None }, Car { id: 2, engine: None }],
        };
        assert_eq!(key(&garage), FieldValue::Integer(2));
    }
}
