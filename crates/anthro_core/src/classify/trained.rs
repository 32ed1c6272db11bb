//! Classification forest trained on ladder-derived labels
//!
//! Labels for the historical rows are produced by the threshold ladder
//! itself, so the fitted model is an approximation of the rule table rather
//! than of any ground truth. That bootstrap is inherited behavior and is
//! kept as-is. All randomness is seeded; a fixed config and dataset always
//! produce the same model.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::{Classification, ClassifierInput, SportClassifier, ThresholdLadder};
use crate::dataset::{DatasetError, HistoricalDataset, HistoricalRecord};

const SPLIT_CANDIDATES: usize = 16;
const N_FEATURES: usize = 6;

#[derive(Debug, Clone, Copy)]
pub struct TrainedClassifierConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for TrainedClassifierConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_leaf: 3,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum TreeNode {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct ClassTree {
    nodes: Vec<TreeNode>,
}

impl ClassTree {
    fn predict(&self, features: &[f32; N_FEATURES]) -> usize {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { class } => return *class,
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

/// Forest classifier over the ladder's label set, majority vote
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    trees: Vec<ClassTree>,
    labels: Vec<String>,
}

impl TrainedClassifier {
    /// Fit on the historical dataset, labeling each row with `ladder` first.
    pub fn fit(
        dataset: &HistoricalDataset,
        ladder: &ThresholdLadder,
        config: &TrainedClassifierConfig,
    ) -> Result<Self, DatasetError> {
        if dataset.is_empty() {
            return Err(DatasetError::Empty);
        }

        // Class ids follow ladder order, fallback last
        let labels: Vec<String> = ladder
            .rules()
            .iter()
            .map(|r| r.label.to_string())
            .chain(std::iter::once(ladder.fallback().to_string()))
            .collect();
        let class_of = |label: &str| -> usize {
            labels.iter().position(|l| l == label).unwrap_or(labels.len() - 1)
        };

        let x: Vec<[f32; N_FEATURES]> = dataset
            .records()
            .iter()
            .map(historical_features)
            .collect();
        let y: Vec<usize> = dataset
            .records()
            .iter()
            .map(|r| class_of(ladder.label_for(&input_from_historical(r))))
            .collect();

        let n_samples = x.len();
        let n_classes = labels.len();
        // sqrt(features) per node, the usual classification heuristic
        let features_per_split = (N_FEATURES as f32).sqrt().floor() as usize;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        for _ in 0..config.n_trees {
            let indices: Vec<usize> =
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
            let mut builder = ClassTreeBuilder {
                x: &x,
                y: &y,
                config,
                features_per_split,
                n_classes,
                nodes: Vec::new(),
            };
            builder.grow(&indices, 0, &mut rng);
            trees.push(ClassTree {
                nodes: builder.nodes,
            });
        }

        info!(
            samples = n_samples,
            classes = n_classes,
            trees = trees.len(),
            "sport classifier fitted on ladder-derived labels"
        );
        Ok(Self { trees, labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn vote(&self, features: &[f32; N_FEATURES]) -> usize {
        let mut counts = vec![0usize; self.labels.len()];
        for tree in &self.trees {
            counts[tree.predict(features)] += 1;
        }
        // Ties break toward the earlier (higher-priority) ladder label
        counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(class, _)| class)
            .unwrap_or(self.labels.len() - 1)
    }
}

impl SportClassifier for TrainedClassifier {
    fn classify(&self, input: &ClassifierInput) -> Classification {
        let class = self.vote(&input_features(input));
        Classification {
            label: self.labels[class].clone(),
            justification: None,
        }
    }
}

fn input_features(input: &ClassifierInput) -> [f32; N_FEATURES] {
    [
        input.age,
        input.weight_kg,
        input.height_m,
        input.vertical_jump_m,
        input.cooper_distance_m,
        input.flexibility_cm,
    ]
}

fn input_from_historical(r: &HistoricalRecord) -> ClassifierInput {
    ClassifierInput {
        age: r.age,
        weight_kg: r.weight_kg,
        height_m: r.height_m,
        vertical_jump_m: r.vertical_jump_m,
        cooper_distance_m: r.cooper_distance_m,
        flexibility_cm: r.flexibility_cm,
    }
}

fn historical_features(r: &HistoricalRecord) -> [f32; N_FEATURES] {
    [
        r.age,
        r.weight_kg,
        r.height_m,
        r.vertical_jump_m,
        r.cooper_distance_m,
        r.flexibility_cm,
    ]
}

struct ClassTreeBuilder<'a> {
    x: &'a [[f32; N_FEATURES]],
    y: &'a [usize],
    config: &'a TrainedClassifierConfig,
    features_per_split: usize,
    n_classes: usize,
    nodes: Vec<TreeNode>,
}

impl ClassTreeBuilder<'_> {
    fn grow(&mut self, indices: &[usize], depth: usize, rng: &mut ChaCha8Rng) -> usize {
        let majority = self.majority(indices);
        if depth >= self.config.max_depth
            || indices.len() < 2 * self.config.min_samples_leaf
            || self.is_pure(indices)
        {
            return self.push(TreeNode::Leaf { class: majority });
        }

        let Some((feature, threshold)) = self.best_split(indices, rng) else {
            return self.push(TreeNode::Leaf { class: majority });
        };

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .copied()
            .partition(|&i| self.x[i][feature] <= threshold);
        if left_idx.len() < self.config.min_samples_leaf
            || right_idx.len() < self.config.min_samples_leaf
        {
            return self.push(TreeNode::Leaf { class: majority });
        }

        let node = self.push(TreeNode::Leaf { class: majority });
        let left = self.grow(&left_idx, depth + 1, rng);
        let right = self.grow(&right_idx, depth + 1, rng);
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

    fn counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.y[i]] += 1;
        }
        counts
    }

    fn majority(&self, indices: &[usize]) -> usize {
        self.counts(indices)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .map(|(class, _)| class)
            .unwrap_or(0)
    }

    fn is_pure(&self, indices: &[usize]) -> bool {
        self.counts(indices).iter().filter(|&&c| c > 0).count() <= 1
    }

    fn gini(&self, indices: &[usize]) -> f32 {
        let counts = self.counts(indices);
        let total = indices.len() as f32;
        1.0 - counts
            .iter()
            .map(|&c| {
                let p = c as f32 / total;
                p * p
            })
            .sum::<f32>()
    }

    /// Best split by weighted gini reduction over a random feature subset
    fn best_split(&self, indices: &[usize], rng: &mut ChaCha8Rng) -> Option<(usize, f32)> {
        let mut features: Vec<usize> = (0..N_FEATURES).collect();
        features.shuffle(rng);
        features.truncate(self.features_per_split.max(1));

        let parent_gini = self.gini(indices);
        let total = indices.len() as f32;
        let mut best: Option<(usize, f32, f32)> = None;

        for &feature in &features {
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
                let weighted = (left.len() as f32 / total) * self.gini(&left)
                    + (right.len() as f32 / total) * self.gini(&right);
                let gain = parent_gini - weighted;
                match best {
                    Some((_, _, best_gain)) if gain <= best_gain => {}
                    _ if gain > 1e-7 => best = Some((feature, threshold, gain)),
                    _ => {}
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}
