//! Case-insensitive member lookup on sortable types

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::reflect::{MemberInfo, MemberType, Node, TypeInfo};

/// Reads one member from an object node
pub type Accessor = Arc<dyn for<'a> Fn(Node<'a>) -> Node<'a> + Send + Sync>;

/// Wrap a closure as an [`Accessor`]
pub fn accessor<F>(f: F) -> Accessor
where
    F: for<'a> Fn(Node<'a>) -> Node<'a> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A path segment resolved against a concrete type
#[derive(Clone)]
pub struct ResolvedStep {
    /// Type the member was found on
    pub container: &'static TypeInfo,

    /// The matched member
    pub member: &'static MemberInfo,

    /// Reads the member from an instance of `container`
    pub accessor: Accessor,
}

impl ResolvedStep {
    pub fn name(&self) -> &'static str {
        self.member.name
    }

    pub fn result_type(&self) -> MemberType {
        self.member.ty
    }
}

/// Normalize a member name for lookup.
///
/// Lookup ignores ASCII case and `_` separators, so `languageCode`,
/// `LanguageCode` and `language_code` are the same member.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Resolves path segments to members
///
/// A resolver lives for a single compilation. The first lookup on a type
/// indexes its members by normalized name; later lookups on the same type
/// reuse that index.
#[derive(Default)]
pub struct PathResolver {
    index: HashMap<usize, HashMap<String, usize>>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `segment` on `container`, or `None` when no member matches
    pub fn resolve(&mut self, container: &'static TypeInfo, segment: &str) -> Option<ResolvedStep> {
        let members = self
            .index
            .entry(std::ptr::from_ref(container) as usize)
            .or_insert_with(|| {
                let mut by_name = HashMap::with_capacity(container.members.len());
                for (position, member) in container.members.iter().enumerate() {
                    by_name.entry(normalize(member.name)).or_insert(position);
                }
                by_name
            });

        let position = *members.get(&normalize(segment))?;
        let member = &container.members[position];
        let name = member.name;

        Some(ResolvedStep {
            container,
            member,
            accessor: accessor(move |node| match node {
                Node::Object(object) => object.member(name).unwrap_or(Node::Null),
                _ => Node::Null,
            }),
        })
    }

    /// Resolve `segment` on whatever a value of `ty` exposes.
    ///
    /// Scalars and collections expose no members.
    pub fn resolve_in(&mut self, ty: MemberType, segment: &str) -> Option<ResolvedStep> {
        let container = ty.container()?;
        self.resolve(container, segment)
    }

    /// Number of distinct types indexed so far
    #[cfg(test)]
    pub(crate) fn indexed_types(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reflect::Reflect;
    use crate::core::field::{FieldValue, ScalarKind};

    struct Translation {
        language_code: String,
        name: Option<String>,
    }

    crate::impl_reflect!(Translation, "Translation", {
        scalar language_code: String,
        scalar name: Option<String>,
    });

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("LanguageCode"), "languagecode");
        assert_eq!(normalize("language_code"), "languagecode");
        assert_eq!(normalize("ID"), "id");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let mut resolver = PathResolver::new();
        let info = Translation::type_info();

        for spelling in ["name", "Name", "NAME"] {
            let step = resolver.resolve(info, spelling).expect("should resolve");
            assert_eq!(step.name(), "name");
            assert!(matches!(
                step.result_type(),
                MemberType::Scalar(ScalarKind::String)
            ));
        }

        let step = resolver
            .resolve(info, "languageCode")
            .expect("camelCase should resolve");
        assert_eq!(step.name(), "language_code");
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let mut resolver = PathResolver::new();
        assert!(resolver.resolve(Translation::type_info(), "missing").is_none());
        assert!(resolver.resolve(Translation::type_info(), "").is_none());
    }

    #[test]
    fn test_index_built_once_per_type() {
        let mut resolver = PathResolver::new();
        let info = Translation::type_info();
        resolver.resolve(info, "name");
        resolver.resolve(info, "language_code");
        resolver.resolve(info, "nope");
        assert_eq!(resolver.indexed_types(), 1);
    }

    #[test]
    fn test_resolve_in_scalar_is_none() {
        let mut resolver = PathResolver::new();
        assert!(
            resolver
                .resolve_in(MemberType::Scalar(ScalarKind::Integer), "anything")
                .is_none()
        );
    }

    #[test]
    fn test_accessor_reads_member() {
        let mut resolver = PathResolver::new();
        let step = resolver
            .resolve(Translation::type_info(), "Name")
            .expect("should resolve");

        let value = Translation {
            language_code: "en-US".to_string(),
            name: Some("Chair".to_string()),
        };
        match (step.accessor)(Node::Object(&value)) {
            Node::Scalar(FieldValue::String(s)) => assert_eq!(s, "Chair"),
            _ => panic!("expected a string scalar"),
        }
        assert!((step.accessor)(Node::Null).is_null());
    }
}
