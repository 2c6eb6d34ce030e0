//! Store traits for sorting

use crate::config::SortConfig;
use crate::core::compiler::SortOptions;
use crate::core::error::SortResult;
use crate::core::executor::Sorter;
use crate::core::query::SortExpression;
use crate::core::reflect::Reflect;

/// Trait for stores that support sorting by request-supplied paths
///
/// Implement this trait for stores whose entities implement [`Reflect`]; the
/// sorting itself is provided.
pub trait QueryableStore<T: Reflect>: Send + Sync {
    /// Get all entities (unsorted)
    fn list_all(&self) -> Vec<T>;

    /// Sort conventions for this store's entities
    fn sort_config(&self) -> &SortConfig;

    /// Apply sorting to a collection of entities
    ///
    /// # Parameters
    /// - `data`: Collection of entities to sort
    /// - `sort`: Sort expression (e.g., "field:asc" or "translations.name:desc")
    ///
    /// # Returns
    /// Sorted collection
    fn apply_sort(&self, data: Vec<T>, sort: &str) -> SortResult<Vec<T>> {
        let expression = SortExpression::parse(sort)?;
        let options = SortOptions {
            ascending: expression.ascending,
            ..Default::default()
        };
        Sorter::new(self.sort_config().clone()).order_by_property(
            data,
            expression.path(),
            &options,
        )
    }
}
