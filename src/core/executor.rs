//! Ordering sequences with compiled selectors

use std::cmp::Reverse;

use crate::config::SortConfig;
use crate::core::compiler::{CompiledSelector, Path, PathCompiler, SortOptions};
use crate::core::error::SortResult;
use crate::core::field::SortKey;
use crate::core::reflect::Reflect;

/// A sequence that can be ordered
///
/// Deferred sources (e.g. a query against a store) may order themselves when
/// the selector is a plain member chain; everything else is pulled into
/// memory first.
pub trait OrderSource<T>: Sized {
    /// Enumerate the whole sequence into memory
    fn materialize(self) -> Vec<T>;

    /// Order without enumerating into the caller first.
    ///
    /// Only called for selectors that do not require materialization.
    /// Returns the source back when it cannot handle the selector.
    fn order_deferred(self, selector: &CompiledSelector<T>, ascending: bool) -> Result<Vec<T>, Self> {
        let _ = (selector, ascending);
        Err(self)
    }
}

impl<T> OrderSource<T> for Vec<T> {
    fn materialize(self) -> Vec<T> {
        self
    }
}

/// Applies compiled selectors to sources
pub struct OrderExecutor;

impl OrderExecutor {
    /// Order `source` by `selector`.
    ///
    /// Selectors that pick elements out of collections always run in memory.
    /// The sort is stable in both directions.
    pub fn order<T, S>(source: S, selector: &CompiledSelector<T>, ascending: bool) -> Vec<T>
    where
        T: Reflect,
        S: OrderSource<T>,
    {
        if selector.requires_materialization() {
            tracing::trace!(
                entity = selector.type_name(),
                "Selector requires materialization, ordering in memory"
            );
            return Self::sort_in_memory(source.materialize(), selector, ascending);
        }

        match source.order_deferred(selector, ascending) {
            Ok(ordered) => ordered,
            Err(source) => Self::sort_in_memory(source.materialize(), selector, ascending),
        }
    }

    /// Stable in-memory sort, evaluating the key once per element
    pub fn sort_in_memory<T: Reflect>(
        mut items: Vec<T>,
        selector: &CompiledSelector<T>,
        ascending: bool,
    ) -> Vec<T> {
        if ascending {
            items.sort_by_cached_key(|item| SortKey(selector.key(item)));
        } else {
            items.sort_by_cached_key(|item| Reverse(SortKey(selector.key(item))));
        }
        items
    }
}

/// Compiles and applies sort paths with a given configuration
#[derive(Debug, Clone, Default)]
pub struct Sorter {
    config: SortConfig,
}

impl Sorter {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Compile `path` for entities of type `T`
    pub fn compile<T: Reflect>(
        &self,
        path: Option<&str>,
        options: &SortOptions,
    ) -> SortResult<CompiledSelector<T>> {
        PathCompiler::new(&self.config, options).compile(&Path::parse(path))
    }

    /// Order `source` by the member at `path`
    pub fn order_by_property<T, S>(
        &self,
        source: S,
        path: Option<&str>,
        options: &SortOptions,
    ) -> SortResult<Vec<T>>
    where
        T: Reflect,
        S: OrderSource<T>,
    {
        let selector = self.compile::<T>(path, options)?;
        Ok(OrderExecutor::order(source, &selector, options.ascending))
    }
}

/// Order `source` by the member at `path` using the default configuration
///
/// # Example
/// ```rust,ignore
/// let sorted = order_by_property(
///     products,
///     Some("translations.name"),
///     &SortOptions::descending().with_locale("pt-BR"),
/// )?;
/// ```
pub fn order_by_property<T, S>(source: S, path: Option<&str>, options: &SortOptions) -> SortResult<Vec<T>>
where
    T: Reflect,
    S: OrderSource<T>,
{
    Sorter::default().order_by_property(source, path, options)
}
