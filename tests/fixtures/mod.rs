//! Shared entity types and sources for the integration tests
#![allow(dead_code)]

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use sortkey::prelude::*;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (set `RUST_LOG` to see it)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub age: Option<i32>,
}

impl_reflect!(Person, "Person", {
    scalar id: i64,
    scalar age: Option<i32>,
});

pub fn person(id: i64, age: Option<i32>) -> Person {
    Person { id, age }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub language_code: String,
    pub name: String,
}

impl_reflect!(Translation, "Translation", {
    scalar language_code: String,
    scalar name: String,
});

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent: Option<Box<Category>>,
}

impl_reflect!(Category, "Category", {
    scalar id: Uuid,
    scalar name: String,
    object parent: Option<Box<Category>>,
});

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub price: Option<f64>,
    pub released_at: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub translations: Vec<Translation>,
}

impl_reflect!(Product, "Product", {
    scalar id: i64,
    scalar price: Option<f64>,
    scalar released_at: Option<DateTime<Utc>>,
    object category: Option<Category>,
    collection translations: Vec<Translation>,
});

/// Entity without an `id` member
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub text: String,
}

impl_reflect!(Note, "Note", {
    scalar text: String,
});

pub fn translation(language_code: &str, name: &str) -> Translation {
    Translation {
        language_code: language_code.to_string(),
        name: name.to_string(),
    }
}

pub fn category(name: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        parent: None,
    }
}

/// A small catalogue with localized names and some absent values
pub fn catalogue() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            price: Some(30.0),
            released_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            category: Some(category("Office")),
            translations: vec![translation("en-US", "Desk"), translation("pt-BR", "Mesa")],
        },
        Product {
            id: 2,
            price: None,
            released_at: None,
            category: None,
            translations: vec![translation("en-US", "Chair"), translation("pt-BR", "Cadeira")],
        },
        Product {
            id: 3,
            price: Some(10.0),
            released_at: Some(Utc.with_ymd_and_hms(2023, 7, 15, 0, 0, 0).unwrap()),
            category: Some(category("Lighting")),
            translations: vec![translation("en-US", "Lamp")],
        },
        Product {
            id: 4,
            price: Some(20.0),
            released_at: Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()),
            category: Some(category("Bedroom")),
            translations: vec![translation("pt-BR", "Armario"), translation("en-US", "Wardrobe")],
        },
    ]
}

pub fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

/// Vec-backed source that records how it was ordered
pub struct RecordingSource<'a> {
    pub items: Vec<Product>,
    pub deferred: &'a AtomicUsize,
    pub materialized: &'a AtomicUsize,
}

impl OrderSource<Product> for RecordingSource<'_> {
    fn materialize(self) -> Vec<Product> {
        self.materialized.fetch_add(1, Ordering::SeqCst);
        self.items
    }

    fn order_deferred(
        self,
        selector: &CompiledSelector<Product>,
        ascending: bool,
    ) -> Result<Vec<Product>, Self> {
        self.deferred.fetch_add(1, Ordering::SeqCst);
        Ok(OrderExecutor::sort_in_memory(self.items, selector, ascending))
    }
}
