//! Compiling dotted property paths into sort keys
//!
//! [`PathCompiler`] walks a path such as `translations.name` over the type
//! graph of the root entity:
//!
//! - an empty path, or one whose first segment is unknown, orders by the
//!   configured `Id` member; if that is missing too, compilation fails
//! - a segment that resolves is read through a null guard
//! - a segment that does not resolve after at least one match ends the walk,
//!   and the entity is ordered by the deepest value reached
//! - a collection-valued segment that is not last selects one element (see
//!   [`CollectionProjector`]) and reads exactly one more segment from it;
//!   anything after that is ignored

use std::fmt;
use std::marker::PhantomData;

use crate::config::SortConfig;
use crate::core::error::{ConfigurationError, SortResult};
use crate::core::field::FieldValue;
use crate::core::guard::{KeyFn, NullGuardBuilder};
use crate::core::projection::{CollectionProjector, EqualityCondition};
use crate::core::reflect::{MemberType, Reflect};
use crate::core::resolver::PathResolver;

/// A sort path split into segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Split on `.`; `None`, empty and whitespace-only input give an empty path
    pub fn parse(path: Option<&str>) -> Self {
        let segments = match path.map(str::trim) {
            Some(p) if !p.is_empty() => p.split('.').map(|s| s.trim().to_string()).collect(),
            _ => Vec::new(),
        };
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Per-request sort options
#[derive(Debug, Clone, PartialEq)]
pub struct SortOptions {
    /// Ascending (default) or descending order
    pub ascending: bool,

    /// Condition picking the element of the first collection step
    pub equality: Option<EqualityCondition>,

    /// Locale for the default collection condition; falls back to the
    /// configured default locale
    pub locale: Option<String>,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            ascending: true,
            equality: None,
            locale: None,
        }
    }
}

impl SortOptions {
    pub fn ascending() -> Self {
        Self::default()
    }

    pub fn descending() -> Self {
        Self {
            ascending: false,
            ..Self::default()
        }
    }

    pub fn with_equality(
        mut self,
        property: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.equality = Some(EqualityCondition::new(property, value));
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// A compiled sort key for entities of type `T`
///
/// Carries whether evaluating the key needs the whole sequence in memory.
/// Selectors are independent values; nothing about one compilation is
/// visible to another.
pub struct CompiledSelector<T> {
    type_name: &'static str,
    members: Vec<&'static str>,
    key: KeyFn,
    requires_materialization: bool,
    used_fallback: bool,
    _entity: PhantomData<fn(&T)>,
}

impl<T> Clone for CompiledSelector<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            members: self.members.clone(),
            key: self.key.clone(),
            requires_materialization: self.requires_materialization,
            used_fallback: self.used_fallback,
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for CompiledSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSelector")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .field("requires_materialization", &self.requires_materialization)
            .field("used_fallback", &self.used_fallback)
            .finish()
    }
}

impl<T: Reflect> CompiledSelector<T> {
    /// Evaluate the key for one entity
    pub fn key(&self, entity: &T) -> FieldValue {
        (self.key)(entity as &dyn Reflect)
    }
}

impl<T> CompiledSelector<T> {
    /// Whether the key selects from or counts a collection and so cannot be
    /// evaluated by a query backend
    pub fn requires_materialization(&self) -> bool {
        self.requires_materialization
    }

    /// Member names read by the key, root first, including the id read of a
    /// path ending on an object.
    ///
    /// For selectors that do not require materialization this is a plain
    /// member chain a backend can translate (e.g. `["category", "name"]`).
    pub fn members(&self) -> &[&'static str] {
        &self.members
    }

    /// Whether the key fell back to the `Id` member
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Name of the root entity type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Compiles paths for one request
pub struct PathCompiler<'a> {
    config: &'a SortConfig,
    options: &'a SortOptions,
    resolver: PathResolver,
}

impl<'a> PathCompiler<'a> {
    pub fn new(config: &'a SortConfig, options: &'a SortOptions) -> Self {
        Self {
            config,
            options,
            resolver: PathResolver::new(),
        }
    }

    /// Compile `path` into a key selector for `T`
    pub fn compile<T: Reflect>(mut self, path: &Path) -> SortResult<CompiledSelector<T>> {
        let config = self.config;
        let options = self.options;
        let root = T::type_info();
        let segments = path.segments();
        let mut builder = NullGuardBuilder::new::<T>();

        for (index, segment) in segments.iter().enumerate() {
            let Some(step) = self.resolver.resolve_in(builder.result_type(), segment) else {
                if builder.depth() > 0 {
                    tracing::warn!(
                        entity = root.name,
                        path = %path,
                        segment = %segment,
                        "Sort segment not found, ordering by deepest resolved value"
                    );
                }
                break;
            };

            builder = builder.then(&step);

            if let MemberType::Collection(element) = step.result_type() {
                let Some(next_segment) = segments.get(index + 1) else {
                    break;
                };

                if segments.len() > index + 2 {
                    tracing::debug!(
                        entity = root.name,
                        path = %path,
                        "Only one segment after a collection is resolved, remainder ignored"
                    );
                }

                let projector = CollectionProjector {
                    locale_member: &config.locale_member,
                    locale: options.locale.as_deref().unwrap_or(&config.default_locale),
                    equality: options.equality.as_ref(),
                };
                builder = projector.project(&mut self.resolver, builder, element, next_segment);
                return Ok(self.finish(builder, true, false));
            }
        }

        if builder.depth() > 0 {
            return Ok(self.finish(builder, false, false));
        }

        let Some(id) = self.resolver.resolve(root, &config.id_member) else {
            return Err(ConfigurationError::NotFoundProperty {
                type_name: root.name.to_string(),
            }
            .into());
        };

        if !path.is_empty() {
            tracing::debug!(
                entity = root.name,
                path = %path,
                "Sort path root not found, ordering by {}",
                id.name()
            );
        }

        let builder = NullGuardBuilder::new::<T>().then(&id);
        Ok(self.finish(builder, false, true))
    }

    fn finish<T: Reflect>(
        mut self,
        builder: NullGuardBuilder,
        requires_materialization: bool,
        used_fallback: bool,
    ) -> CompiledSelector<T> {
        let object_key = match builder.result_type() {
            MemberType::Object(info) => self.resolver.resolve(info(), &self.config.id_member),
            _ => None,
        };
        // Element counts have no member-chain form
        let requires_materialization =
            requires_materialization || builder.result_type().is_collection();

        let mut members = builder.members().to_vec();
        if let Some(step) = &object_key {
            members.push(step.name());
        }

        tracing::debug!(
            entity = T::type_info().name,
            members = ?members,
            requires_materialization,
            "Compiled sort key"
        );

        CompiledSelector {
            type_name: T::type_info().name,
            members,
            key: builder.finish(object_key),
            requires_materialization,
            used_fallback,
            _entity: PhantomData,
        }
    }
}
