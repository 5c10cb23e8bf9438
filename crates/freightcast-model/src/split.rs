//! Stratified train/test split

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ModelError, Result};

/// Row indices of each side of a split, sorted ascending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split `labels` (0/1) so both sides keep the overall class ratio.
///
/// The test side holds `ceil(test_fraction * n)` rows, apportioned across the
/// two classes by their share. Each class must keep at least one row on each
/// side.
pub fn stratified_split(labels: &[u8], test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ModelError::Internal(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n = labels.len();
    let positives: Vec<usize> = (0..n).filter(|&i| labels[i] == 1).collect();
    let negatives: Vec<usize> = (0..n).filter(|&i| labels[i] != 1).collect();

    if positives.len() < 2 || negatives.len() < 2 {
        return Err(ModelError::InsufficientData(format!(
            "stratified split needs at least 2 rows of each class, found {} delayed and {} on_time",
            positives.len(),
            negatives.len()
        )));
    }

    let n_test = (test_fraction * n as f64).ceil() as usize;
    let pos_test = (n_test as f64 * positives.len() as f64 / n as f64).round() as usize;
    let neg_test = n_test.saturating_sub(pos_test);

    let fits = |take: usize, total: usize| take >= 1 && take < total;
    if !fits(pos_test, positives.len()) || !fits(neg_test, negatives.len()) {
        return Err(ModelError::InsufficientData(format!(
            "cannot place {} test rows across {} delayed and {} on_time rows",
            n_test,
            positives.len(),
            negatives.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n - n_test);
    let mut test = Vec::with_capacity(n_test);

    for (mut class, take) in [(negatives, neg_test), (positives, pos_test)] {
        class.shuffle(&mut rng);
        test.extend_from_slice(&class[..take]);
        train.extend_from_slice(&class[take..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    Ok(SplitIndices { train, test })
}
