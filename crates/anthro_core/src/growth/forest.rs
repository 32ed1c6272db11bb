//! Bagged regression trees with seeded randomness
//!
//! Same seed + same training data = same model, same predictions. Trees are
//! grown with variance-reduction splits over quantile threshold candidates;
//! each tree sees its own bootstrap resample. Every feature is considered at
//! every split, the usual default for regression forests; tree diversity
//! comes from the bootstrap alone.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Candidate thresholds evaluated per feature at each split
const SPLIT_CANDIDATES: usize = 16;

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        value: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

/// One fitted regression tree, nodes stored flat with index links
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    pub fn predict(&self, features: &[f32]) -> f32 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Forest hyperparameters
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 8,
            min_samples_leaf: 5,
        }
    }
}

/// Fitted regression forest. Prediction is the mean over trees.
#[derive(Debug, Clone)]
pub struct RegressionForest {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RegressionForest {
    /// Fit on row-major samples. `x` and `y` must be the same length and
    /// non-empty; rows must all have the same width.
    pub fn fit(x: &[Vec<f32>], y: &[f32], params: &ForestParams, rng: &mut ChaCha8Rng) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(!x.is_empty());
        let n_features = x[0].len();
        let n_samples = x.len();

        let mut trees = Vec::with_capacity(params.n_trees);
        for _ in 0..params.n_trees {
            let indices: Vec<usize> =
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let mut builder = TreeBuilder {
                x,
                y,
                params,
                n_features,
                nodes: Vec::new(),
            };
            builder.grow(&indices, 0);
            trees.push(RegressionTree {
                nodes: builder.nodes,
            });
        }

        Self { trees, n_features }
    }

    pub fn predict(&self, features: &[f32]) -> f32 {
        debug_assert_eq!(features.len(), self.n_features);
        let sum: f32 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f32
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

struct TreeBuilder<'a> {
    x: &'a [Vec<f32>],
    y: &'a [f32],
    params: &'a ForestParams,
    n_features: usize,
    nodes: Vec<TreeNode>,
}

impl TreeBuilder<'_> {
    /// Grow a subtree over `indices`, returning its node index
    fn grow(&mut self, indices: &[usize], depth: usize) -> usize {
        let mean = self.mean(indices);
        if depth >= self.params.max_depth || indices.len() < 2 * self.params.min_samples_leaf {
            return self.push(TreeNode::Leaf { value: mean });
        }

        let Some((feature, threshold)) = self.best_split(indices) else {
            return self.push(TreeNode::Leaf { value: mean });
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.x[i][feature] <= threshold);
        if left_idx.len() < self.params.min_samples_leaf
            || right_idx.len() < self.params.min_samples_leaf
        {
            return self.push(TreeNode::Leaf { value: mean });
        }

        // Reserve the split slot before recursing so child links stay stable
        let node = self.push(TreeNode::Leaf { value: mean });
        let left = self.grow(&left_idx, depth + 1);
        let right = self.grow(&right_idx, depth + 1);
        self.nodes[node] = TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        };
        node
    }

    fn push(&mut self, node: TreeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn mean(&self, indices: &[usize]) -> f32 {
        let sum: f32 = indices.iter().map(|&i| self.y[i]).sum();
        sum / indices.len() as f32
    }

    fn sse(&self, indices: &[usize]) -> f32 {
        let mean = self.mean(indices);
        indices
            .iter()
            .map(|&i| {
                let d = self.y[i] - mean;
                d * d
            })
            .sum()
    }

    /// Best (feature, threshold) by sum-of-squared-error reduction, or None
    /// when no split improves on the parent.
    fn best_split(&self, indices: &[usize]) -> Option<(usize, f32)> {
        let parent_sse = self.sse(indices);
        let mut best: Option<(usize, f32, f32)> = None;

        for feature in 0..self.n_features {
            let mut values: Vec<f32> = indices.iter().map(|&i| self.x[i][feature]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();
            if values.len() < 2 {
                continue;
            }
            let step = (values.len() / SPLIT_CANDIDATES).max(1);
            for pair in values.windows(2).step_by(step) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| self.x[i][feature] <= threshold);
                if left.is_empty() || right.is_empty() {
                    continue;
                }
                let gain = parent_sse - self.sse(&left) - self.sse(&right);
                match best {
                    Some((_, _, best_gain)) if gain <= best_gain => {}
                    _ if gain > 1e-9 => best = Some((feature, threshold, gain)),
                    _ => {}
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn step_data() -> (Vec<Vec<f32>>, Vec<f32>) {
        // y depends only on the first feature: below 0.5 -> 1.0, above -> 2.0
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..200 {
            let v = i as f32 / 200.0;
            x.push(vec![v, 0.0, 1.0]);
            y.push(if v < 0.5 { 1.0 } else { 2.0 });
        }
        (x, y)
    }

    #[test]
    fn learns_a_step_function() {
        let (x, y) = step_data();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let forest = RegressionForest::fit(&x, &y, &ForestParams::default(), &mut rng);
        assert!((forest.predict(&[0.2, 0.0, 1.0]) - 1.0).abs() < 0.15);
        assert!((forest.predict(&[0.8, 0.0, 1.0]) - 2.0).abs() < 0.15);
    }

    #[test]
    fn same_seed_same_predictions() {
        let (x, y) = step_data();
        let params = ForestParams {
            n_trees: 20,
            ..ForestParams::default()
        };
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        let forest_a = RegressionForest::fit(&x, &y, &params, &mut rng_a);
        let forest_b = RegressionForest::fit(&x, &y, &params, &mut rng_b);
        for probe in [[0.1, 0.0, 1.0], [0.5, 0.0, 1.0], [0.9, 0.0, 1.0]] {
            assert_eq!(forest_a.predict(&probe), forest_b.predict(&probe));
        }
    }

    #[test]
    fn prediction_stays_within_target_range() {
        let (x, y) = step_data();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let forest = RegressionForest::fit(&x, &y, &ForestParams::default(), &mut rng);
        for i in 0..20 {
            let v = i as f32 / 20.0;
            let pred = forest.predict(&[v, 0.0, 1.0]);
            assert!((1.0..=2.0).contains(&pred), "prediction {pred} out of range");
        }
    }
}
