//! Type system for freightcast
//!
//! This module contains the tabular data model including:
//! - Value types
//! - Records and columnar datasets
//! - Required-column and feature schemas
//! - Validators

pub mod dataset;
pub mod schema;
pub mod validator;
pub mod value;

pub use dataset::{Column, ColumnType, Dataset, Record};
pub use schema::{FeatureColumn, FeatureSchema};
pub use validator::{validate_dataset, validate_record, ValidationReport};
pub use value::{Value, NA_TOKENS};
