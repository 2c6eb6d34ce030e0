//! Macros for reducing boilerplate when describing sortable entities
//!
//! These macros generate the [`Reflect`](crate::core::reflect::Reflect)
//! implementation a type needs so that sort paths can reach its members.

/// Implement [`Reflect`](crate::core::reflect::Reflect) for a struct
///
/// Each listed member is prefixed with its kind:
///
/// - `scalar`: a leaf value (`String`, integers, floats, `bool`, `Uuid`,
///   `DateTime<Utc>`, or an `Option` of any of these)
/// - `object`: an optional nested entity (`Option<T>` where `T: Reflect`)
/// - `embedded`: an always present nested entity (`T`, `Box<T>`, `Arc<T>`)
/// - `collection`: nested entities (`Vec<T>`, `VecDeque<T>`, `Option<Vec<T>>`)
///
/// Only listed members are visible to sort paths.
///
/// # Example
///
/// ```rust,ignore
/// use sortkey::prelude::*;
///
/// struct Translation {
///     language_code: String,
///     name: String,
/// }
///
/// struct Product {
///     id: Uuid,
///     price: Option<f64>,
///     translations: Vec<Translation>,
/// }
///
/// impl_reflect!(Translation, "Translation", {
///     scalar language_code: String,
///     scalar name: String,
/// });
///
/// impl_reflect!(Product, "Product", {
///     scalar id: Uuid,
///     scalar price: Option<f64>,
///     collection translations: Vec<Translation>,
/// });
/// ```
#[macro_export]
macro_rules! impl_reflect {
    (
        $type:ty,
        $name:expr,
        { $($kind:ident $field:ident : $fty:ty),* $(,)? }
    ) => {
        impl $crate::core::reflect::Reflect for $type {
            fn type_info() -> &'static $crate::core::reflect::TypeInfo {
                static INFO: $crate::core::reflect::TypeInfo = $crate::core::reflect::TypeInfo {
                    name: $name,
                    members: &[
                        $(
                            $crate::core::reflect::MemberInfo {
                                name: stringify!($field),
                                ty: $crate::impl_reflect!(@type $kind $fty),
                            },
                        )*
                    ],
                };
                &INFO
            }

            #[allow(unused_variables)]
            fn member(&self, name: &str) -> Option<$crate::core::reflect::Node<'_>> {
                $(
                    if name == stringify!($field) {
                        return Some($crate::impl_reflect!(@read $kind $fty, &self.$field));
                    }
                )*
                None
            }
        }
    };

    (@type scalar $fty:ty) => {
        $crate::core::reflect::MemberType::Scalar(
            <$fty as $crate::core::reflect::ScalarMember>::KIND,
        )
    };
    (@type object $fty:ty) => {
        $crate::core::reflect::MemberType::Object(
            <$fty as $crate::core::reflect::ObjectMember>::target_type_info,
        )
    };
    (@type embedded $fty:ty) => {
        $crate::core::reflect::MemberType::Object(
            <$fty as $crate::core::reflect::Reflect>::type_info,
        )
    };
    (@type collection $fty:ty) => {
        $crate::core::reflect::MemberType::Collection(
            <$fty as $crate::core::reflect::CollectionMember>::item_type_info,
        )
    };

    (@read scalar $fty:ty, $value:expr) => {
        $crate::core::reflect::Node::Scalar(
            <$fty as $crate::core::reflect::ScalarMember>::to_field_value($value),
        )
    };
    (@read object $fty:ty, $value:expr) => {
        <$fty as $crate::core::reflect::ObjectMember>::as_node($value)
    };
    (@read embedded $fty:ty, $value:expr) => {
        $crate::core::reflect::embedded_node::<$fty>($value)
    };
    (@read collection $fty:ty, $value:expr) => {
        <$fty as $crate::core::reflect::CollectionMember>::as_node($value)
    };
}
