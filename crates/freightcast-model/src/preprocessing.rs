//! Preprocessing pipeline
//!
//! Numerical columns are standardized, categorical columns one-hot encoded, and
//! the two blocks concatenated (numerical first) into one dense matrix. Every
//! statistic is learned in [`Preprocessor::fit`] and never re-estimated.

use std::collections::BTreeSet;

use freightcast_core::{Dataset, FeatureSchema, Value};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Per-column standardization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Learn mean and population standard deviation per column. Values are
    /// divided by the column's largest magnitude before summing, so finite
    /// inputs near `f64::MAX` still give finite statistics.
    pub fn fit(dataset: &Dataset, columns: &[String]) -> Result<Self> {
        let mut means = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());

        for name in columns {
            let observed: Vec<f64> = dataset
                .column(name)
                .map(|c| c.values.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default();

            let magnitude = observed.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
            if magnitude == 0.0 {
                means.push(0.0);
                scales.push(1.0);
                continue;
            }

            let n = observed.len() as f64;
            let mean = observed.iter().map(|x| x / magnitude).sum::<f64>() / n;
            let variance = observed
                .iter()
                .map(|x| (x / magnitude - mean).powi(2))
                .sum::<f64>()
                / n;

            let mean = mean * magnitude;
            let std = variance.sqrt() * magnitude;
            if !mean.is_finite() || !std.is_finite() {
                return Err(ModelError::OutOfRange(format!(
                    "column '{}' has no finite mean and standard deviation",
                    name
                )));
            }

            means.push(mean);
            scales.push(if std > 0.0 { std } else { 1.0 });
        }

        Ok(Self {
            columns: columns.to_vec(),
            means,
            scales,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Standardized value of `value` for column `index`; missing or
    /// non-numeric input is imputed with the mean.
    fn scale(&self, index: usize, value: Option<&Value>) -> f64 {
        match value.and_then(Value::as_f64) {
            Some(x) => {
                let (mean, scale) = (self.means[index], self.scales[index]);
                let z = (x - mean) / scale;
                // x - mean overflows when the two sit near opposite ends of f64
                if z.is_finite() {
                    z
                } else {
                    x / scale - mean / scale
                }
            }
            None => 0.0,
        }
    }
}

/// Indicator encoding with a fixed, sorted vocabulary per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn fit(dataset: &Dataset, columns: &[String]) -> Self {
        let categories = columns
            .iter()
            .map(|name| {
                let vocabulary: BTreeSet<String> = dataset
                    .column(name)
                    .map(|c| c.values.iter().filter_map(Value::category_label).collect())
                    .unwrap_or_default();
                vocabulary.into_iter().collect()
            })
            .collect();

        Self {
            columns: columns.to_vec(),
            categories,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Total number of indicator columns produced
    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Output names in encoder order: `<column>_<category>`
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.categories)
            .flat_map(|(column, cats)| cats.iter().map(move |cat| format!("{}_{}", column, cat)))
            .collect()
    }

    /// Position of `value` in column `index`'s vocabulary. Unseen values and
    /// nulls have no position and encode as all zeros.
    fn position(&self, index: usize, value: Option<&Value>) -> Option<usize> {
        let label = value.and_then(Value::category_label)?;
        self.categories[index].binary_search(&label).ok()
    }
}

/// Fitted numerical + categorical transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    scaler: StandardScaler,
    encoder: OneHotEncoder,
}

impl Preprocessor {
    /// Learn scaling statistics and vocabularies from `dataset`
    pub fn fit(dataset: &Dataset, schema: &FeatureSchema) -> Result<Self> {
        Ok(Self {
            scaler: StandardScaler::fit(dataset, &schema.numerical())?,
            encoder: OneHotEncoder::fit(dataset, &schema.categorical()),
        })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    /// Width of the transformed matrix
    pub fn n_outputs(&self) -> usize {
        self.scaler.columns.len() + self.encoder.width()
    }

    /// Transform every row of `dataset`. Columns the dataset lacks are treated
    /// as entirely missing.
    pub fn transform(&self, dataset: &Dataset) -> Array2<f64> {
        let n_rows = dataset.n_rows();
        let n_numeric = self.scaler.columns.len();
        let mut matrix = Array2::<f64>::zeros((n_rows, self.n_outputs()));

        for (j, name) in self.scaler.columns.iter().enumerate() {
            let column = dataset.column(name);
            for i in 0..n_rows {
                let value = column.and_then(|c| c.values.get(i));
                matrix[[i, j]] = self.scaler.scale(j, value);
            }
        }

        let mut offset = n_numeric;
        for (k, name) in self.encoder.columns.iter().enumerate() {
            let column = dataset.column(name);
            for i in 0..n_rows {
                let value = column.and_then(|c| c.values.get(i));
                if let Some(pos) = self.encoder.position(k, value) {
                    matrix[[i, offset + pos]] = 1.0;
                }
            }
            offset += self.encoder.categories[k].len();
        }

        matrix
    }

    /// Output feature names aligned with the transformed columns, or `None`
    /// when they cannot be recovered (no categorical block, or a width that
    /// disagrees with `expected`).
    pub fn feature_names(&self, expected: usize) -> Option<Vec<String>> {
        if self.encoder.columns.is_empty() {
            return None;
        }

        let mut names = self.scaler.columns.clone();
        names.extend(self.encoder.feature_names());

        (names.len() == expected).then_some(names)
    }
}
