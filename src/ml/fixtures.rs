// Small hand-built pipelines shared by the ml, application and web tests.
//
// Columns: koi_period, koi_prad, koi_model_snr (standardised) then
// koi_tce_delivname (one-hot over three deliveries). Width 6.
//
//   tree 0: snr  <= 20 → -1.5 | > 20 → +1.5
//   tree 1: prad <=  4 → +0.5 | >  4 → -2.5
//
// So a strong signal on a small planet is the only positive.

use crate::ml::classifier::{ClassifierModel, LogisticModel, Tree, TreeEnsemble, TreeNode};
use crate::ml::pipeline::{PipelineArtifact, FORMAT_VERSION};
use crate::ml::transform::{
    ColumnTransformer, HandleUnknown, StageEncoder, StandardScaler, TransformerStage,
};

pub const DELIVERIES: [&str; 3] = ["q1_q16_tce", "q1_q17_dr24_tce", "q1_q17_dr25_tce"];

pub fn categorical() -> Vec<String> {
    vec!["koi_tce_delivname".to_string()]
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

pub fn artifact() -> PipelineArtifact {
    PipelineArtifact {
        format_version: FORMAT_VERSION,
        preprocessor: ColumnTransformer {
            transformers: vec![
                TransformerStage {
                    name:    "num".into(),
                    columns: vec!["koi_period".into(), "koi_prad".into(), "koi_model_snr".into()],
                    encoder: StageEncoder::Numeric {
                        scale: Some(StandardScaler {
                            mean:  vec![10.0, 2.0, 20.0],
                            scale: vec![5.0, 1.0, 10.0],
                        }),
                    },
                },
                TransformerStage {
                    name:    "cat".into(),
                    columns: vec!["koi_tce_delivname".into()],
                    encoder: StageEncoder::OneHot {
                        categories:     vec![DELIVERIES.iter().map(|s| s.to_string()).collect()],
                        handle_unknown: HandleUnknown::Ignore,
                    },
                },
            ],
        },
        classifier: ClassifierModel::GradientBoosting(TreeEnsemble {
            base_score: 0.0,
            threshold:  0.5,
            trees: vec![stump(2, 0.0, -1.5, 1.5), stump(1, 2.0, 0.5, -2.5)],
        }),
    }
}

/// Same pipeline, but an unseen delivery name fails the request
pub fn strict_artifact() -> PipelineArtifact {
    let mut a = artifact();
    if let StageEncoder::OneHot { handle_unknown, .. } = &mut a.preprocessor.transformers[1].encoder {
        *handle_unknown = HandleUnknown::Error;
    }
    a
}

/// Same preprocessing feeding a linear model over the six features
pub fn logistic_artifact(coefficients: [f64; 6]) -> PipelineArtifact {
    let mut a = artifact();
    a.classifier = ClassifierModel::Logistic(LogisticModel {
        coefficients: coefficients.to_vec(),
        intercept:    0.0,
        threshold:    0.5,
    });
    a
}
