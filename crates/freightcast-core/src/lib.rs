//! Freightcast Core - Core types and definitions for the freight delay predictor
//!
//! This crate provides the fundamental types used across the freightcast crates:
//! - Value types for tabular cells
//! - Records and columnar datasets (with a CSV reader)
//! - The required trip schema and the frozen feature schema
//! - Dataset and single-record validation
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{
    validate_dataset, validate_record, Column, ColumnType, Dataset, FeatureColumn, FeatureSchema,
    Record, ValidationReport, Value, NA_TOKENS,
};
