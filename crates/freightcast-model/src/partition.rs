//! Feature partitioning
//!
//! Classifies every non-excluded dataset column as categorical or numerical
//! from its observed dtype. The result is computed fresh for each training run.

use freightcast_core::types::schema::EXCLUDED_COLUMNS;
use freightcast_core::{ColumnType, Dataset, FeatureColumn, FeatureSchema};

/// Partition the dataset's feature columns, preserving column order.
pub fn partition_features(dataset: &Dataset) -> FeatureSchema {
    let columns = dataset
        .columns()
        .iter()
        .filter(|c| !EXCLUDED_COLUMNS.contains(&c.name.as_str()))
        .map(|c| match c.dtype() {
            ColumnType::Numeric => FeatureColumn::Numerical(c.name.clone()),
            ColumnType::Text => FeatureColumn::Categorical(c.name.clone()),
        })
        .collect();

    FeatureSchema::new(columns)
}
