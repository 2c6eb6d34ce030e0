//! Runtime type model for sortable entities
//!
//! Sort paths arrive as strings at request time, so the compiler needs to
//! walk an entity's type graph without knowing the concrete types. Each
//! sortable type publishes a static [`TypeInfo`] describing its members and
//! answers [`Reflect::member`] lookups with a [`Node`].
//!
//! Implementations are normally generated with [`impl_reflect!`](crate::impl_reflect).

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::field::{FieldValue, ScalarKind};

/// Static description of a sortable type
#[derive(Debug)]
pub struct TypeInfo {
    /// Type name used in error messages (e.g. "Product")
    pub name: &'static str,

    /// Members visible to sort paths, in declaration order
    pub members: &'static [MemberInfo],
}

/// Static description of one member of a sortable type
#[derive(Debug)]
pub struct MemberInfo {
    /// Member name as declared in Rust (e.g. "language_code")
    pub name: &'static str,

    /// Declared type of the member
    pub ty: MemberType,
}

/// Declared type of a member
#[derive(Debug, Clone, Copy)]
pub enum MemberType {
    /// A leaf value
    Scalar(ScalarKind),

    /// A nested (possibly absent) object
    Object(fn() -> &'static TypeInfo),

    /// A collection of objects of the given element type
    Collection(fn() -> &'static TypeInfo),
}

impl MemberType {
    pub fn is_collection(&self) -> bool {
        matches!(self, MemberType::Collection(_))
    }

    /// The type whose members can be read from a value of this type
    pub fn container(&self) -> Option<&'static TypeInfo> {
        match self {
            MemberType::Object(info) => Some(info()),
            MemberType::Scalar(_) | MemberType::Collection(_) => None,
        }
    }
}

/// A value reached while walking a sort path
pub enum Node<'a> {
    Null,
    Scalar(FieldValue),
    Object(&'a dyn Reflect),
    Collection(Vec<&'a dyn Reflect>),
}

impl Node<'_> {
    pub fn is_null(&self) -> bool {
        match self {
            Node::Null => true,
            Node::Scalar(value) => value.is_null(),
            Node::Object(_) | Node::Collection(_) => false,
        }
    }
}

/// Trait for types whose members can be addressed by sort paths
pub trait Reflect: Send + Sync {
    /// Static description of this type
    fn type_info() -> &'static TypeInfo
    where
        Self: Sized;

    /// Read a member by its declared name.
    ///
    /// Returns `None` when the type has no such member. Absent values are
    /// reported as `Some(Node::Null)`.
    fn member(&self, name: &str) -> Option<Node<'_>>;
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }

    fn member(&self, name: &str) -> Option<Node<'_>> {
        (**self).member(name)
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn type_info() -> &'static TypeInfo {
        T::type_info()
    }

    fn member(&self, name: &str) -> Option<Node<'_>> {
        (**self).member(name)
    }
}

// =============================================================================
// Member adapters
// =============================================================================

/// Rust types usable as scalar members
pub trait ScalarMember {
    const KIND: ScalarKind;

    fn to_field_value(&self) -> FieldValue;
}

impl ScalarMember for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ScalarMember for &'static str {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String((*self).to_string())
    }
}

macro_rules! integer_scalar {
    ($($int:ty),*) => {
        $(
            impl ScalarMember for $int {
                const KIND: ScalarKind = ScalarKind::Integer;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_integer_scalar {
    ($($int:ty),*) => {
        $(
            impl ScalarMember for $int {
                const KIND: ScalarKind = ScalarKind::Integer;

                // Saturates values beyond i64::MAX
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::try_from(*self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

wide_integer_scalar!(u64, usize);

impl ScalarMember for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ScalarMember for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ScalarMember for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ScalarMember for Uuid {
    const KIND: ScalarKind = ScalarKind::Uuid;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl ScalarMember for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::DateTime;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl<S: ScalarMember> ScalarMember for Option<S> {
    const KIND: ScalarKind = S::KIND;

    fn to_field_value(&self) -> FieldValue {
        self.as_ref()
            .map_or(FieldValue::Null, ScalarMember::to_field_value)
    }
}

/// Optional nested objects
pub trait ObjectMember {
    type Target: Reflect;

    fn target_type_info() -> &'static TypeInfo {
        <Self::Target as Reflect>::type_info()
    }

    fn as_node(&self) -> Node<'_>;
}

impl<T: Reflect> ObjectMember for Option<T> {
    type Target = T;

    fn as_node(&self) -> Node<'_> {
        match self {
            Some(value) => Node::Object(value),
            None => Node::Null,
        }
    }
}

/// Collections of nested objects
pub trait CollectionMember {
    type Item: Reflect;

    fn item_type_info() -> &'static TypeInfo {
        <Self::Item as Reflect>::type_info()
    }

    fn as_node(&self) -> Node<'_>;
}

impl<T: Reflect> CollectionMember for Vec<T> {
    type Item = T;

    fn as_node(&self) -> Node<'_> {
        Node::Collection(self.iter().map(|item| item as &dyn Reflect).collect())
    }
}

impl<T: Reflect> CollectionMember for VecDeque<T> {
    type Item = T;

    fn as_node(&self) -> Node<'_> {
        Node::Collection(self.iter().map(|item| item as &dyn Reflect).collect())
    }
}

impl<T: Reflect> CollectionMember for Option<Vec<T>> {
    type Item = T;

    fn as_node(&self) -> Node<'_> {
        match self {
            Some(items) => CollectionMember::as_node(items),
            None => Node::Null,
        }
    }
}

/// Read an embedded (always present) object member
pub fn embedded_node<T: Reflect>(value: &T) -> Node<'_> {
    Node::Object(value)
}
