//! Macros for describing entities to the sorter

pub mod macros;
