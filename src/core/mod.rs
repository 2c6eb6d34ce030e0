//! Core module containing the sort path compiler and its building blocks

pub mod compiler;
pub mod error;
pub mod executor;
pub mod field;
pub mod guard;
pub mod projection;
pub mod query;
pub mod reflect;
pub mod resolver;
pub mod store;

pub use compiler::{CompiledSelector, Path, PathCompiler, SortOptions};
pub use error::{ConfigError, ConfigurationError, SortError, SortResult, ValidationError};
pub use executor::{OrderExecutor, OrderSource, Sorter, order_by_property};
pub use field::{FieldValue, ScalarKind, SortKey};
pub use projection::EqualityCondition;
pub use query::{QueryParams, SortExpression};
pub use reflect::{MemberInfo, MemberType, Node, Reflect, TypeInfo};
pub use resolver::PathResolver;
pub use store::QueryableStore;
