//! Bootstrap-aggregated random forest classifier
//!
//! Trees are grown in parallel. Each tree draws its own seed from the forest
//! seed up front, so a fit is reproducible regardless of thread scheduling.

mod tree;

pub use tree::{DecisionTree, Node};

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            seed: 42,
        }
    }
}

/// Fitted forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_features: usize,
    trees: Vec<DecisionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Fit on a transformed matrix and a 0/1 target (1 = delayed)
    pub fn fit(x: &Array2<f64>, y: &[u8], params: &ForestParams) -> Result<Self> {
        let n_samples = x.nrows();
        if n_samples == 0 || n_samples != y.len() {
            return Err(ModelError::ShapeMismatch {
                expected: n_samples,
                actual: y.len(),
            });
        }
        if params.n_estimators == 0 {
            return Err(ModelError::Internal(
                "forest needs at least one tree".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let seeds: Vec<u64> = (0..params.n_estimators).map(|_| rng.gen()).collect();

        let fitted: Vec<(DecisionTree, Vec<f64>)> = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let bootstrap = (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                DecisionTree::fit(x, y, bootstrap, params, &mut rng)
            })
            .collect();

        let n_features = x.ncols();
        let mut importances = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(fitted.len());
        for (tree, raw) in fitted {
            let total: f64 = raw.iter().sum();
            if total > 0.0 {
                for (acc, v) in importances.iter_mut().zip(&raw) {
                    *acc += v / total;
                }
            }
            trees.push(tree);
        }
        normalize(&mut importances);

        tracing::debug!(
            n_trees = trees.len(),
            n_samples,
            n_features,
            "Fitted random forest"
        );

        Ok(Self {
            params: params.clone(),
            n_features,
            trees,
            importances,
        })
    }

    /// P(delayed) per row
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: x.ncols(),
            });
        }

        let n_trees = self.trees.len() as f64;
        Ok(x.rows()
            .into_iter()
            .map(|row| self.trees.iter().map(|t| t.predict_proba(row)).sum::<f64>() / n_trees)
            .collect())
    }

    /// Mean decrease in impurity per input column, summing to 1 (or all zeros
    /// when no tree ever split)
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }
}

fn normalize(values: &mut [f64]) {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter_mut().for_each(|v| *v /= total);
    }
}
