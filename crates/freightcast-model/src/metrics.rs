//! Held-out evaluation metrics

use serde::{Deserialize, Serialize};

/// Metrics of one training run, computed on the test split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub accuracy: f64,
    /// ROC AUC of P(delayed); `None` when the test split holds a single class
    pub auc: Option<f64>,
    /// Rows are the true class, columns the predicted class, order `[on_time, delayed]`
    pub confusion_matrix: [[u64; 2]; 2],
    pub train_size: usize,
    pub test_size: usize,
}

impl TrainingMetrics {
    pub fn evaluate(y_true: &[u8], proba: &[f64], train_size: usize) -> Self {
        let predicted: Vec<u8> = proba.iter().map(|&p| u8::from(p > 0.5)).collect();
        Self {
            accuracy: accuracy(y_true, &predicted),
            auc: roc_auc(y_true, proba),
            confusion_matrix: confusion_matrix(y_true, &predicted),
            train_size,
            test_size: y_true.len(),
        }
    }
}

pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    hits as f64 / y_true.len() as f64
}

pub fn confusion_matrix(y_true: &[u8], y_pred: &[u8]) -> [[u64; 2]; 2] {
    let mut matrix = [[0u64; 2]; 2];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        matrix[usize::from(t == 1)][usize::from(p == 1)] += 1;
    }
    matrix
}

/// Area under the ROC curve via the Mann-Whitney U statistic with tied
/// scores given their average rank.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> Option<f64> {
    let n_pos = y_true.iter().filter(|&&y| y == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // 1-based ranks i+1..=j+1 share their mean
        let avg = (i + j) as f64 / 2.0 + 1.0;
        for &k in &order[i..=j] {
            ranks[k] = avg;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = (0..y_true.len())
        .filter(|&k| y_true[k] == 1)
        .map(|k| ranks[k])
        .sum();
    let u = pos_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0;
    Some(u / (n_pos * n_neg) as f64)
}
