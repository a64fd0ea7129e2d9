// ============================================================
// Layer 5 — Classifiers
// ============================================================
// The decision half of the pipeline. Takes the dense feature
// vector the column transformer produced and returns the
// positive-class probability; the label is 1 when that
// probability is strictly above the model's threshold.
//
// Two model families can sit at the end of a pipeline:
//
//   gradient_boosting — additive regression trees
//                       margin = base_score + Σ leaf(tree, x)
//                       p      = logistic(margin)
//
//   logistic          — linear model
//                       p      = logistic(w · x + b)
//
// Trees are stored as flat node arrays. A split sends x to
// `left` when x[feature] <= threshold, otherwise to `right`.
// Children always sit after their parent in the array, which
// validate() enforces, so walking a tree always terminates.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// The classifier at the end of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    GradientBoosting(TreeEnsemble),
    Logistic(LogisticModel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_threshold")]
    pub threshold:  f64,
    pub trees:      Vec<Tree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept:    f64,
    #[serde(default = "default_threshold")]
    pub threshold:    f64,
}

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Tree {
    fn validate(&self, index: usize, width: usize) -> Result<()> {
        ensure!(!self.nodes.is_empty(), "Tree {index} has no nodes");
        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split { feature, left, right, .. } = *node {
                ensure!(
                    feature < width,
                    "Tree {index} node {i} splits on feature {feature}, but the input has {width} features"
                );
                ensure!(
                    left > i && left < len && right > i && right < len,
                    "Tree {index} node {i} has child indices ({left}, {right}) outside {}..{len}",
                    i + 1
                );
            }
        }
        Ok(())
    }

    /// Leaf value reached by `x`
    fn leaf_value(&self, x: &[f64]) -> f64 {
        let mut i = 0usize;
        loop {
            match self.nodes[i] {
                TreeNode::Leaf { leaf } => return leaf,
                TreeNode::Split { feature, threshold, left, right } => {
                    i = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

impl TreeEnsemble {
    /// Raw additive score before the logistic link
    pub fn margin(&self, x: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.leaf_value(x)).sum::<f64>()
    }
}

impl LogisticModel {
    pub fn margin(&self, x: &[f64]) -> f64 {
        self.intercept
            + self.coefficients.iter().zip(x).map(|(w, v)| w * v).sum::<f64>()
    }
}

impl ClassifierModel {
    pub fn threshold(&self) -> f64 {
        match self {
            ClassifierModel::GradientBoosting(m) => m.threshold,
            ClassifierModel::Logistic(m) => m.threshold,
        }
    }

    /// Check the model can be evaluated on vectors of `width` features
    pub fn validate(&self, width: usize) -> Result<()> {
        match self {
            ClassifierModel::GradientBoosting(m) => {
                ensure!(!m.trees.is_empty(), "Gradient boosting model has no trees");
                for (index, tree) in m.trees.iter().enumerate() {
                    tree.validate(index, width)?;
                }
            }
            ClassifierModel::Logistic(m) => {
                ensure!(
                    m.coefficients.len() == width,
                    "Logistic model has {} coefficients, but the preprocessor emits {width} features",
                    m.coefficients.len()
                );
            }
        }
        Ok(())
    }

    /// Positive-class probability for one feature vector
    pub fn probability(&self, x: &[f64]) -> Result<f64> {
        let margin = match self {
            ClassifierModel::GradientBoosting(m) => {
                ensure!(
                    m.trees.iter().all(|t| t.nodes.iter().all(|n| match n {
                        TreeNode::Split { feature, .. } => *feature < x.len(),
                        TreeNode::Leaf { .. } => true,
                    })),
                    "Feature vector of length {} is too short for this model",
                    x.len()
                );
                m.margin(x)
            }
            ClassifierModel::Logistic(m) => {
                ensure!(
                    m.coefficients.len() == x.len(),
                    "Feature vector has {} values, model expects {}",
                    x.len(), m.coefficients.len()
                );
                m.margin(x)
            }
        };
        Ok(sigmoid(margin))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::Label;

    /// Label 1 when the probability is above the threshold
    fn label(model: &ClassifierModel, x: &[f64]) -> Label {
        if model.probability(x).unwrap() > model.threshold() {
            Label::POSITIVE
        } else {
            Label::NEGATIVE
        }
    }

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Split { feature, threshold, left: 1, right: 2 },
                TreeNode::Leaf { leaf: left },
                TreeNode::Leaf { leaf: right },
            ],
        }
    }

    fn ensemble() -> ClassifierModel {
        ClassifierModel::GradientBoosting(TreeEnsemble {
            base_score: 0.0,
            threshold:  0.5,
            trees: vec![stump(0, 0.0, -1.5, 1.5), stump(1, 2.0, 0.5, -2.5)],
        })
    }

    #[test]
    fn test_sigmoid_is_symmetric_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(3.0) + sigmoid(-3.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
    }

    #[test]
    fn test_trees_sum_their_leaves() {
        let ClassifierModel::GradientBoosting(m) = ensemble() else { unreachable!() };
        assert_eq!(m.margin(&[1.0, 0.0]), 2.0);
        assert_eq!(m.margin(&[-1.0, 3.0]), -4.0);
    }

    #[test]
    fn test_label_follows_threshold() {
        let model = ensemble();
        assert_eq!(label(&model, &[1.0, 0.0]), Label::POSITIVE);
        assert_eq!(label(&model, &[-1.0, 0.0]), Label::NEGATIVE);
    }

    #[test]
    fn test_probability_exactly_at_threshold_is_negative() {
        let model = ClassifierModel::Logistic(LogisticModel {
            coefficients: vec![0.0, 0.0],
            intercept:    0.0,
            threshold:    0.5,
        });
        assert_eq!(model.probability(&[3.0, 4.0]).unwrap(), 0.5);
        assert_eq!(label(&model, &[3.0, 4.0]), Label::NEGATIVE);
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        let err = ensemble().validate(1).unwrap_err();
        assert!(err.to_string().contains("feature 1"));
    }

    #[test]
    fn test_validate_rejects_backward_children() {
        let model = ClassifierModel::GradientBoosting(TreeEnsemble {
            base_score: 0.0,
            threshold:  0.5,
            trees: vec![Tree {
                nodes: vec![
                    TreeNode::Split { feature: 0, threshold: 0.0, left: 0, right: 1 },
                    TreeNode::Leaf { leaf: 1.0 },
                ],
            }],
        });
        assert!(model.validate(1).is_err());
    }

    #[test]
    fn test_validate_rejects_logistic_width_mismatch() {
        let model = ClassifierModel::Logistic(LogisticModel {
            coefficients: vec![1.0, 2.0],
            intercept:    0.0,
            threshold:    0.5,
        });
        assert!(model.validate(3).is_err());
        assert!(model.validate(2).is_ok());
        assert!(model.probability(&[1.0]).is_err());
    }

    #[test]
    fn test_deserialises_nodes_and_defaults() {
        let json = r#"{
            "kind": "gradient_boosting",
            "trees": [ { "nodes": [
                { "feature": 0, "threshold": 1.0, "left": 1, "right": 2 },
                { "leaf": -0.5 },
                { "leaf": 0.5 }
            ] } ]
        }"#;
        let model: ClassifierModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.threshold(), 0.5);
        assert!(model.validate(1).is_ok());
        assert_eq!(label(&model, &[2.0]), Label::POSITIVE);
    }
}
