//! Serialized tree-ensemble regressor artifacts.
//!
//! One artifact shape covers both models: each target's prediction is
//! `base + tree_weight * sum(tree(x))`, which expresses a mean-of-trees
//! forest (`base 0`, `tree_weight 1/n`) and a boosted ensemble
//! (`base = prior`, `tree_weight = learning rate`) through the same data.
//! The `algorithm` field is informational only - evaluation never branches
//! on it.
//!
//! Structural validation happens once at load: node indices must be
//! in-bounds and strictly forward-pointing, so tree walks terminate without
//! a visited set, and evaluation itself cannot fail.

use serde::{Deserialize, Serialize};

/// Artifact format version this build reads.
pub const ARTIFACT_VERSION: u32 = 1;

/// A complete serialized regressor: one tree ensemble per target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressorArtifact {
    /// Format version for forward compatibility.
    pub version: u32,
    /// Producing algorithm, informational (`random_forest`,
    /// `gradient_boosting`, ...).
    pub algorithm: String,
    /// Input feature keys, in the order the trees index them.
    pub feature_names: Vec<String>,
    /// Output target keys, aligned to `ensembles`.
    pub target_names: Vec<String>,
    /// One ensemble per target.
    pub ensembles: Vec<TargetEnsemble>,
}

/// The trees predicting a single target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEnsemble {
    /// Additive prior (0 for a plain forest).
    pub base: f64,
    /// Weight applied to the summed tree outputs (1/n for a mean-of-trees
    /// forest, the learning rate for a boosted ensemble).
    pub tree_weight: f64,
    /// Regression trees, summed during evaluation.
    pub trees: Vec<DecisionTree>,
}

/// A single regression tree stored as a flat node arena; node 0 is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// One tree node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: `x[feature] <= threshold` descends left.
    Branch {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal value.
    Leaf { value: f64 },
}

impl DecisionTree {
    /// Structural check: every branch stays in-bounds, points strictly
    /// forward, and carries a finite threshold; every leaf is finite.
    fn check(&self, tree_idx: usize, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("tree {tree_idx} has no nodes"));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Branch {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(format!(
                            "tree {tree_idx} node {i} splits on feature {feature}, artifact has {n_features}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!(
                            "tree {tree_idx} node {i} has non-finite threshold {threshold}"
                        ));
                    }
                    if left <= i || right <= i || left >= self.nodes.len() || right >= self.nodes.len() {
                        return Err(format!(
                            "tree {tree_idx} node {i} has out-of-order children ({left}, {right})"
                        ));
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!(
                            "tree {tree_idx} node {i} has non-finite leaf value {value}"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk the tree for one input row. Terminates because children always
    /// point forward (checked at load).
    pub fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Branch {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

impl RegressorArtifact {
    /// Validate internal consistency. Alignment with the advisor's canonical
    /// feature/target orders is the adapter's concern, not the artifact's.
    pub fn check(&self) -> Result<(), String> {
        if self.ensembles.len() != self.target_names.len() {
            return Err(format!(
                "{} ensembles for {} targets",
                self.ensembles.len(),
                self.target_names.len()
            ));
        }
        for (t, ensemble) in self.ensembles.iter().enumerate() {
            if !ensemble.base.is_finite() || !ensemble.tree_weight.is_finite() {
                return Err(format!(
                    "ensemble for target '{}' has non-finite base or tree_weight",
                    self.target_names[t]
                ));
            }
            if ensemble.trees.is_empty() {
                return Err(format!(
                    "ensemble for target '{}' has no trees",
                    self.target_names[t]
                ));
            }
            for (i, tree) in ensemble.trees.iter().enumerate() {
                tree.check(i, self.feature_names.len())
                    .map_err(|reason| format!("target '{}': {reason}", self.target_names[t]))?;
            }
        }
        Ok(())
    }

    /// Evaluate every target ensemble for one input row.
    ///
    /// `row` must be aligned to `feature_names`; the adapter guarantees this.
    pub fn predict(&self, row: &[f64]) -> Vec<f64> {
        self.ensembles
            .iter()
            .map(|ensemble| {
                let sum: f64 = ensemble.trees.iter().map(|t| t.evaluate(row)).sum();
                ensemble.base + ensemble.tree_weight * sum
            })
            .collect()
    }

    /// Total tree count across all ensembles (for startup logging).
    pub fn tree_count(&self) -> usize {
        self.ensembles.iter().map(|e| e.trees.len()).sum()
    }
}
