//! Random forest regression over dense feature vectors

use crate::error::{ForecastError, Result};
use crate::model::{FittedRegressor, Regressor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tuning parameters for the random forest
#[derive(Debug, Clone, Copy)]
pub struct RandomForestParams {
    /// Number of trees in the ensemble
    pub num_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum number of training rows on each side of a split
    pub min_leaf_size: usize,
    /// Upper bound on candidate split thresholds per feature. Must be large
    /// enough that high-cardinality categorical indices (thousands of stock
    /// codes) keep one threshold per distinct value.
    pub max_bins: usize,
    /// Seed for bootstrap sampling and per-split feature selection
    pub seed: u64,
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self {
            num_trees: 20,
            max_depth: 5,
            min_leaf_size: 1,
            max_bins: 4000,
            seed: 42,
        }
    }
}

/// Random forest regressor: bootstrap-aggregated variance-reduction trees
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    /// Name of the model
    name: String,
    /// Tuning parameters
    params: RandomForestParams,
}

/// Trained random forest
#[derive(Debug, Clone)]
pub struct FittedRandomForest {
    /// Name of the model
    name: String,
    /// The fitted trees
    trees: Vec<TreeNode>,
    /// Width of the feature vectors the forest was fit on
    num_features: usize,
}

impl RandomForestRegressor {
    /// Create a new random forest regressor.
    pub fn new(params: RandomForestParams) -> Result<Self> {
        if params.num_trees == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of trees must be positive".to_string(),
            ));
        }
        if params.max_depth == 0 {
            return Err(ForecastError::InvalidParameter(
                "Maximum depth must be positive".to_string(),
            ));
        }
        if params.min_leaf_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Minimum leaf size must be positive".to_string(),
            ));
        }
        if params.max_bins < 2 {
            return Err(ForecastError::InvalidParameter(
                "Number of bins must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Random Forest (trees={}, depth={})",
                params.num_trees, params.max_depth
            ),
            params,
        })
    }
}

impl Regressor for RandomForestRegressor {
    type Fitted = FittedRandomForest;

    fn fit(&self, features: &[Vec<f64>], labels: &[f64]) -> Result<FittedRandomForest> {
        if features.is_empty() {
            return Err(ForecastError::Data(
                "Cannot fit on an empty training set".to_string(),
            ));
        }
        if features.len() != labels.len() {
            return Err(ForecastError::Data(format!(
                "Features length ({}) doesn't match labels length ({})",
                features.len(),
                labels.len()
            )));
        }

        let num_features = features[0].len();
        if num_features == 0 {
            return Err(ForecastError::Data(
                "Feature vectors must not be empty".to_string(),
            ));
        }
        if let Some(row) = features.iter().find(|row| row.len() != num_features) {
            return Err(ForecastError::Data(format!(
                "Inconsistent feature vector length: expected {}, got {}",
                num_features,
                row.len()
            )));
        }

        let builder = TreeBuilder {
            features,
            labels,
            params: self.params,
            // One third of the features per split, at least one
            features_per_split: ((num_features + 2) / 3).max(1),
        };

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let mut trees = Vec::with_capacity(self.params.num_trees);
        for _ in 0..self.params.num_trees {
            let sample: Vec<usize> = (0..features.len())
                .map(|_| rng.gen_range(0..features.len()))
                .collect();
            trees.push(builder.build(&sample, 0, &mut rng));
        }

        Ok(FittedRandomForest {
            name: self.name.clone(),
            trees,
            num_features,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedRegressor for FittedRandomForest {
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<f64>> {
        let mut predictions = Vec::with_capacity(features.len());
        for row in features {
            if row.len() != self.num_features {
                return Err(ForecastError::Model(format!(
                    "Expected {} features, got {}",
                    self.num_features,
                    row.len()
                )));
            }
            let sum: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
            predictions.push(sum / self.trees.len() as f64);
        }
        Ok(predictions)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One node of a fitted regression tree
#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn predict(&self, row: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.predict(row)
                } else {
                    right.predict(row)
                }
            }
        }
    }
}

/// Running sum of squared errors for one side of a candidate split
#[derive(Default)]
struct SseAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl SseAccumulator {
    fn add(&mut self, label: f64) {
        self.count += 1;
        self.sum += label;
        self.sum_sq += label * label;
    }

    fn sse(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum_sq - self.sum * self.sum / self.count as f64
    }
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [f64],
    params: RandomForestParams,
    features_per_split: usize,
}

impl TreeBuilder<'_> {
    /// Grow a tree over the given bootstrap rows. `rows` is never empty.
    fn build(&self, rows: &[usize], depth: usize, rng: &mut StdRng) -> TreeNode {
        let mean = rows.iter().map(|&r| self.labels[r]).sum::<f64>() / rows.len() as f64;

        if depth >= self.params.max_depth
            || rows.len() < 2 * self.params.min_leaf_size
            || self.is_pure(rows)
        {
            return TreeNode::Leaf { value: mean };
        }

        match self.best_split(rows, rng) {
            Some((feature, threshold)) => {
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                    .iter()
                    .copied()
                    .partition(|&r| self.features[r][feature] <= threshold);
                TreeNode::Split {
                    feature,
                    threshold,
                    left: Box::new(self.build(&left_rows, depth + 1, rng)),
                    right: Box::new(self.build(&right_rows, depth + 1, rng)),
                }
            }
            None => TreeNode::Leaf { value: mean },
        }
    }

    fn is_pure(&self, rows: &[usize]) -> bool {
        let first = self.labels[rows[0]];
        rows.iter().all(|&r| self.labels[r] == first)
    }

    /// Lowest-SSE split over a random subset of the features, or `None` when
    /// no candidate leaves both sides at the minimum leaf size.
    fn best_split(&self, rows: &[usize], rng: &mut StdRng) -> Option<(usize, f64)> {
        let num_features = self.features[rows[0]].len();
        let candidates = sample_features(num_features, self.features_per_split, rng);

        let mut best: Option<(usize, f64, f64)> = None;
        for feature in candidates {
            let mut values: Vec<f64> = rows.iter().map(|&r| self.features[r][feature]).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();
            if values.len() < 2 {
                continue;
            }

            for threshold in thresholds(&values, self.params.max_bins) {
                if let Some(score) = self.split_score(rows, feature, threshold) {
                    if best.map_or(true, |(_, _, s)| score < s) {
                        best = Some((feature, threshold, score));
                    }
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }

    fn split_score(&self, rows: &[usize], feature: usize, threshold: f64) -> Option<f64> {
        let mut left = SseAccumulator::default();
        let mut right = SseAccumulator::default();

        for &r in rows {
            if self.features[r][feature] <= threshold {
                left.add(self.labels[r]);
            } else {
                right.add(self.labels[r]);
            }
        }

        if left.count < self.params.min_leaf_size || right.count < self.params.min_leaf_size {
            return None;
        }
        Some(left.sse() + right.sse())
    }
}

/// Candidate thresholds for one feature: midpoints between consecutive
/// distinct values, evenly thinned when there are more than `max_bins`.
fn thresholds(distinct: &[f64], max_bins: usize) -> Vec<f64> {
    let cuts: Vec<f64> = distinct.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    if cuts.len() <= max_bins {
        return cuts;
    }

    let stride = cuts.len() as f64 / max_bins as f64;
    (0..max_bins)
        .map(|i| cuts[((i as f64 * stride) as usize).min(cuts.len() - 1)])
        .collect()
}

/// Pick `k` distinct feature indices by partial Fisher-Yates shuffle.
fn sample_features(num_features: usize, k: usize, rng: &mut StdRng) -> Vec<usize> {
    let k = k.min(num_features);
    let mut indices: Vec<usize> = (0..num_features).collect();
    for i in 0..k {
        let j = rng.gen_range(i..num_features);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}
