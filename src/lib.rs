//! # SortKey-RS
//!
//! Dynamic ordering of typed entity collections by request-supplied property
//! paths, in Rust.
//!
//! ## Features
//!
//! - **Dotted Paths**: Sort by `price`, `category.name` or `translations.name`
//! - **Null-Safe Navigation**: Missing intermediate objects sort as defaults instead of panicking
//! - **Localized Collections**: Pick the element matching the current locale, or any member/value pair
//! - **Safe Fallback**: Unknown paths fall back to the entity's `id` member
//! - **Push-Down**: Plain member selectors are handed to deferred sources untouched
//! - **Configuration-Based**: Member conventions via YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sortkey::prelude::*;
//!
//! #[derive(Clone)]
//! struct Translation {
//!     language_code: String,
//!     name: String,
//! }
//!
//! #[derive(Clone)]
//! struct Product {
//!     id: i64,
//!     translations: Vec<Translation>,
//! }
//!
//! impl_reflect!(Translation, "Translation", {
//!     scalar language_code: String,
//!     scalar name: String,
//! });
//!
//! impl_reflect!(Product, "Product", {
//!     scalar id: i64,
//!     collection translations: Vec<Translation>,
//! });
//!
//! let sorted = order_by_property(
//!     products,
//!     Some("translations.name"),
//!     &SortOptions::ascending().with_locale("pt-BR"),
//! )?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        compiler::{CompiledSelector, Path, PathCompiler, SortOptions},
        error::{ConfigError, ConfigurationError, SortError, SortResult, ValidationError},
        executor::{OrderExecutor, OrderSource, Sorter, order_by_property},
        field::{FieldValue, ScalarKind, SortKey},
        projection::EqualityCondition,
        query::{QueryParams, SortExpression},
        reflect::{MemberInfo, MemberType, Node, Reflect, TypeInfo},
        store::QueryableStore,
    };

    // === Macros ===
    pub use crate::impl_reflect;

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::{InMemoryStore, StoreQuery};

    // === Config ===
    pub use crate::config::SortConfig;

    // === External dependencies ===
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
