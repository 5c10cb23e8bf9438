//! Single CART classification tree (binary target, Gini impurity)

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::ForestParams;

/// Tree node, stored in a flat arena and addressed by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Terminal node holding P(delayed) of its training samples
    Leaf { proba: f64 },
    /// `x[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    impurity: f64,
    n_left: usize,
}

fn gini(n: usize, n_pos: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = n_pos as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

struct Builder<'a> {
    x: &'a Array2<f64>,
    y: &'a [u8],
    params: &'a ForestParams,
    max_features: usize,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl Builder<'_> {
    fn build(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let n = samples.len();
        let n_pos = samples.iter().filter(|&&i| self.y[i] == 1).count();
        let proba = if n == 0 { 0.0 } else { n_pos as f64 / n as f64 };

        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf { proba });

        let pure = n_pos == 0 || n_pos == n;
        if pure || depth >= self.params.max_depth || n < self.params.min_samples_split {
            return node_id;
        }

        let parent = gini(n, n_pos);
        let Some(best) = self.best_split(samples) else {
            return node_id;
        };

        let decrease = n as f64 * parent - best.impurity;
        if decrease <= f64::EPSILON {
            return node_id;
        }
        self.importances[best.feature] += decrease;

        let x = self.x;
        samples.sort_by(|&a, &b| x[[a, best.feature]].total_cmp(&x[[b, best.feature]]));
        let (left_samples, right_samples) = samples.split_at_mut(best.n_left);

        let left = self.build(left_samples, depth + 1);
        let right = self.build(right_samples, depth + 1);
        self.nodes[node_id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_id
    }

    fn best_split(&mut self, samples: &[usize]) -> Option<BestSplit> {
        let n = samples.len();
        let n_pos = samples.iter().filter(|&&i| self.y[i] == 1).count();
        let min_leaf = self.params.min_samples_leaf.max(1);
        let n_features = self.x.ncols();
        let x = self.x;

        let candidates = index::sample(&mut *self.rng, n_features, self.max_features);
        let mut sorted = samples.to_vec();
        let mut best: Option<BestSplit> = None;

        for feature in candidates.iter() {
            sorted.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

            let mut left_pos = 0;
            for i in 0..n - 1 {
                if self.y[sorted[i]] == 1 {
                    left_pos += 1;
                }
                let n_left = i + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let lo = x[[sorted[i], feature]];
                let hi = x[[sorted[i + 1], feature]];
                if lo >= hi {
                    continue;
                }

                let impurity = n_left as f64 * gini(n_left, left_pos)
                    + n_right as f64 * gini(n_right, n_pos - left_pos);

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mid = lo + (hi - lo) / 2.0;
                    best = Some(BestSplit {
                        feature,
                        threshold: if mid < hi { mid } else { lo },
                        impurity,
                        n_left,
                    });
                }
            }
        }

        best
    }
}

impl DecisionTree {
    /// Grow a tree on `samples` (row indices into `x`, duplicates allowed).
    /// Returns the tree and its unnormalized impurity decrease per feature.
    pub fn fit(
        x: &Array2<f64>,
        y: &[u8],
        samples: Vec<usize>,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> (Self, Vec<f64>) {
        let n_features = x.ncols();
        let max_features = ((n_features as f64).sqrt() as usize).clamp(1, n_features.max(1));

        let mut builder = Builder {
            x,
            y,
            params,
            max_features,
            rng,
            nodes: Vec::new(),
            importances: vec![0.0; n_features],
        };

        let mut samples = samples;
        if n_features == 0 {
            let n_pos = samples.iter().filter(|&&i| y[i] == 1).count();
            let proba = if samples.is_empty() { 0.0 } else { n_pos as f64 / samples.len() as f64 };
            builder.nodes.push(Node::Leaf { proba });
        } else {
            builder.build(&mut samples, 0);
        }

        (Self { nodes: builder.nodes }, builder.importances)
    }

    /// P(delayed) for one transformed row
    pub fn predict_proba(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}
