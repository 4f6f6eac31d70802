//! Random forest regressor (bagged CART trees).
//!
//! Each tree is grown on a bootstrap sample of the training rows with
//! squared-error splits over every feature. Prediction is the mean of the
//! tree outputs.
//!
//! # Tree Traversal
//!
//! - Start at node 0 (root)
//! - A `Leaf` returns its value
//! - A `Split` sends the row left when `row[feature] <= threshold`, right
//!   otherwise (NaN goes right)

use crate::stats::mean;
use cacao_core::analysis::error::ForecastError;
use cacao_core::config::ForecastConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Forest hyper-parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    /// Number of trees.
    pub n_estimators: usize,
    /// Seed of the bootstrap sampler.
    pub seed: u64,
    /// Nodes with fewer rows become leaves.
    pub min_samples_split: usize,
    /// Depth limit; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self::from(&ForecastConfig::default())
    }
}

impl From<&ForecastConfig> for ForestParams {
    fn from(config: &ForecastConfig) -> Self {
        Self {
            n_estimators: config.n_estimators,
            seed: config.seed,
            min_samples_split: config.min_samples_split.max(2),
            max_depth: config.max_depth,
        }
    }
}

/// A node of a fitted tree, stored in pre-order.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Best split found for a node.
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

/// A single CART regression tree.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grows a tree on the rows listed in `sample` (duplicates allowed).
    fn fit(x: &[Vec<f64>], y: &[f64], sample: Vec<usize>, params: &ForestParams) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(x, y, sample, 0, params);
        tree
    }

    fn grow(
        &mut self,
        x: &[Vec<f64>],
        y: &[f64],
        rows: Vec<usize>,
        depth: usize,
        params: &ForestParams,
    ) -> usize {
        let node_idx = self.nodes.len();
        let value = mean(rows.iter().map(|&r| y[r])).unwrap_or(0.0);
        self.nodes.push(Node::Leaf { value });

        let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
        if rows.len() < params.min_samples_split || depth_reached || is_pure(y, &rows) {
            return node_idx;
        }

        let Some(split) = best_split(x, y, &rows) else {
            return node_idx;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| x[r][split.feature] <= split.threshold);

        let left = self.grow(x, y, left_rows, depth + 1, params);
        let right = self.grow(x, y, right_rows, depth + 1, params);
        self.nodes[node_idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_idx
    }

    /// Predicts one row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let v = row.get(*feature).copied().unwrap_or(f64::NAN);
                    idx = if v <= *threshold { *left } else { *right };
                }
                None => return f64::NAN,
            }
        }
    }

    /// Number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn is_pure(y: &[f64], rows: &[usize]) -> bool {
    match rows.first() {
        Some(&first) => rows.iter().all(|&r| y[r] == y[first]),
        None => true,
    }
}

/// Finds the split maximising `sum_l^2 / n_l + sum_r^2 / n_r`, which is the
/// split with the lowest total squared error.
fn best_split(x: &[Vec<f64>], y: &[f64], rows: &[usize]) -> Option<SplitCandidate> {
    let n_features = rows.first().and_then(|&r| x.get(r)).map_or(0, Vec::len);
    let total: f64 = rows.iter().map(|&r| y[r]).sum();
    let mut best: Option<SplitCandidate> = None;
    let mut sorted = rows.to_vec();

    for feature in 0..n_features {
        sorted.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0;
        let mut left_n = 0.0;
        let mut right_n: f64 = sorted.iter().map(|_| 1.0).sum();

        for pair in sorted.windows(2) {
            let (cur, next) = (pair[0], pair[1]);
            left_sum += y[cur];
            left_n += 1.0;
            right_n -= 1.0;

            let (a, b) = (x[cur][feature], x[next][feature]);
            if a >= b {
                continue;
            }

            let right_sum = total - left_sum;
            let score = left_sum * left_sum / left_n + right_sum * right_sum / right_n;
            if best.as_ref().is_none_or(|s| score > s.score) {
                let mid = a + (b - a) / 2.0;
                // Adjacent floats: the midpoint may round onto b
                let threshold = if mid >= b { a } else { mid };
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}

/// Bagged ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// # Summary
    /// Fits `params.n_estimators` trees on bootstrap samples of (x, y).
    ///
    /// # Logic
    /// 1. Validate shapes: same row count, at least one row, equal widths.
    /// 2. Seed one `StdRng` from `params.seed`.
    /// 3. For every tree draw `n` row indices with replacement and grow it.
    ///
    /// # Errors
    /// `ForecastError::InsufficientData` for no rows,
    /// `ForecastError::Training` for inconsistent input or zero trees.
    pub fn fit(x: &[Vec<f64>], y: &[f64], params: &ForestParams) -> Result<Self, ForecastError> {
        if x.is_empty() {
            return Err(ForecastError::InsufficientData { rows: 0 });
        }
        if x.len() != y.len() {
            return Err(ForecastError::Training(format!(
                "{} feature rows but {} targets",
                x.len(),
                y.len()
            )));
        }
        let width = x[0].len();
        if width == 0 || x.iter().any(|row| row.len() != width) {
            return Err(ForecastError::Training("ragged or empty feature rows".into()));
        }
        if params.n_estimators == 0 {
            return Err(ForecastError::Training("n_estimators must be positive".into()));
        }

        let n = x.len();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_estimators)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(x, y, sample, params)
            })
            .collect();

        Ok(Self { trees })
    }

    /// Mean of the tree predictions for one row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        mean(self.trees.iter().map(|t| t.predict(row))).unwrap_or(f64::NAN)
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(n_estimators: usize) -> ForestParams {
        ForestParams {
            n_estimators,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_single_tree_learns_step_function() {
        let x: Vec<Vec<f64>> = (0..10i32).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<f64> = (0..10i32).map(|i| if i < 5 { 1.0 } else { 9.0 }).collect();

        let tree = RegressionTree::fit(&x, &y, (0..10).collect(), &params(1));
        assert_eq!(tree.predict(&[2.0]), 1.0);
        assert_eq!(tree.predict(&[7.0]), 9.0);
        // root split plus two pure leaves
        assert_eq!(tree.node_count(), 3);
        match &tree.nodes[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, 4.5),
            other => panic!("unexpected root: {:?}", other),
        }
    }

    #[test]
    fn test_constant_target_predicts_constant() {
        let x: Vec<Vec<f64>> = (0..20i32).map(|i| vec![f64::from(i), f64::from(i * i)]).collect();
        let y = vec![42.0; 20];

        let forest = RandomForest::fit(&x, &y, &params(10)).unwrap();
        assert_eq!(forest.trees().len(), 10);
        assert_eq!(forest.predict(&[3.0, 9.0]), 42.0);
    }

    #[test]
    fn test_forest_tracks_linear_trend() {
        let x: Vec<Vec<f64>> = (0..100i32).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<f64> = (0..100i32).map(|i| 2.0 * f64::from(i)).collect();

        let forest = RandomForest::fit(&x, &y, &params(25)).unwrap();
        let pred = forest.predict(&[50.0]);
        assert!((pred - 100.0).abs() < 10.0, "prediction {} too far from 100", pred);
    }

    #[test]
    fn test_same_seed_same_prediction() {
        let x: Vec<Vec<f64>> = (0..30i32)
            .map(|i| vec![f64::from(i), f64::from((i * 7) % 11)])
            .collect();
        let y: Vec<f64> = (0..30i32).map(|i| f64::from((i * 13) % 17)).collect();

        let a = RandomForest::fit(&x, &y, &params(15)).unwrap();
        let b = RandomForest::fit(&x, &y, &params(15)).unwrap();
        assert_eq!(a.predict(&[12.5, 3.0]), b.predict(&[12.5, 3.0]));
    }

    #[test]
    fn test_max_depth_limits_tree() {
        let x: Vec<Vec<f64>> = (0..16i32).map(|i| vec![f64::from(i)]).collect();
        let y: Vec<f64> = (0..16i32).map(f64::from).collect();
        let shallow = ForestParams {
            max_depth: Some(1),
            ..params(1)
        };

        let tree = RegressionTree::fit(&x, &y, (0..16).collect(), &shallow);
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_constant_features_yield_single_leaf() {
        let x = vec![vec![1.0, 1.0]; 5];
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let tree = RegressionTree::fit(&x, &y, (0..5).collect(), &params(1));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[1.0, 1.0]), 3.0);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            RandomForest::fit(&[], &[], &params(5)),
            Err(ForecastError::InsufficientData { rows: 0 })
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0]], &[1.0, 2.0], &params(5)),
            Err(ForecastError::Training(_))
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0], vec![1.0, 2.0]], &[1.0, 2.0], &params(5)),
            Err(ForecastError::Training(_))
        ));
        assert!(matches!(
            RandomForest::fit(&[vec![1.0]], &[1.0], &params(0)),
            Err(ForecastError::Training(_))
        ));
    }
}
