//! In-memory entity store for testing and development

use crate::config::SortConfig;
use crate::core::compiler::{CompiledSelector, SortOptions};
use crate::core::error::SortResult;
use crate::core::executor::{OrderSource, Sorter};
use crate::core::field::SortKey;
use crate::core::query::SortExpression;
use crate::core::reflect::Reflect;
use crate::core::store::QueryableStore;
use indexmap::IndexMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// In-memory store keeping entities in insertion order
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    items: Arc<RwLock<IndexMap<Uuid, T>>>,
    config: SortConfig,
}

impl<T: Reflect + Clone> InMemoryStore<T> {
    /// Create a new store with the default sort configuration
    pub fn new() -> Self {
        Self::with_config(SortConfig::default())
    }

    /// Create a new store with custom sort conventions
    pub fn with_config(config: SortConfig) -> Self {
        Self {
            items: Arc::new(RwLock::new(IndexMap::new())),
            config,
        }
    }

    /// Insert or replace an entity, keeping its original position on replace
    pub fn insert(&self, id: Uuid, item: T) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, item);
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Remove an entity, preserving the order of the others
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A deferred query over the current contents
    pub fn query(&self) -> StoreQuery<T> {
        StoreQuery {
            items: Arc::clone(&self.items),
        }
    }

    /// All entities ordered by a `path[:direction]` expression
    pub fn ordered(&self, sort: &str) -> SortResult<Vec<T>> {
        let expression = SortExpression::parse(sort)?;
        let options = SortOptions {
            ascending: expression.ascending,
            ..Default::default()
        };
        Sorter::new(self.config.clone()).order_by_property(self.query(), expression.path(), &options)
    }
}

impl<T: Reflect + Clone> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reflect + Clone> QueryableStore<T> for InMemoryStore<T> {
    fn list_all(&self) -> Vec<T> {
        self.query().materialize()
    }

    fn sort_config(&self) -> &SortConfig {
        &self.config
    }
}

/// Deferred query over an [`InMemoryStore`]
///
/// Nothing is read until the query is ordered or materialized. Plain member
/// selectors are evaluated under the store's read lock and only the ordered
/// result is cloned out.
pub struct StoreQuery<T> {
    items: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: Reflect + Clone> OrderSource<T> for StoreQuery<T> {
    fn materialize(self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn order_deferred(self, selector: &CompiledSelector<T>, ascending: bool) -> Result<Vec<T>, Self> {
        if selector.requires_materialization() {
            return Err(self);
        }

        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let mut keyed: Vec<(SortKey, &T)> = items
            .values()
            .map(|item| (SortKey(selector.key(item)), item))
            .collect();

        if ascending {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        } else {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        }

        tracing::trace!(
            entity = selector.type_name(),
            members = ?selector.members(),
            "Ordered in store"
        );
        Ok(keyed.into_iter().map(|(_, item)| item.clone()).collect())
    }
}
