//! Random-forest artifact adapter
//!
//! Loads a JSON-serialized tree ensemble exported by the training process and
//! predicts by majority vote. Ties break toward the earlier class in the
//! artifact's class list.

use super::Classifier;
use crate::error::{EvServeError, Result};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Leaf node holding a class index into `classes`
    Leaf { class: usize },
    /// Internal split: route left when `x[feature] <= threshold`
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Serialized random-forest classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    classes: Vec<String>,
    n_features: usize,
    trees: Vec<TreeNode>,
}

impl RandomForest {
    /// Parse a model artifact and validate its internal consistency
    pub fn from_json(text: &str) -> Result<Self> {
        let forest: Self = serde_json::from_str(text)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Load a model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EvServeError::ArtifactError(format!("cannot read model at {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(EvServeError::ArtifactError(
                "model has no classes".to_string(),
            ));
        }
        if self.trees.is_empty() {
            return Err(EvServeError::ArtifactError(
                "model has no trees".to_string(),
            ));
        }
        for tree in &self.trees {
            self.validate_node(tree)?;
        }
        Ok(())
    }

    fn validate_node(&self, node: &TreeNode) -> Result<()> {
        match node {
            TreeNode::Leaf { class } => {
                if *class >= self.classes.len() {
                    return Err(EvServeError::ArtifactError(format!(
                        "leaf references class {} but model has {} classes",
                        class,
                        self.classes.len()
                    )));
                }
            }
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => {
                if *feature >= self.n_features {
                    return Err(EvServeError::ArtifactError(format!(
                        "split references feature {} but model expects {} features",
                        feature, self.n_features
                    )));
                }
                self.validate_node(left)?;
                self.validate_node(right)?;
            }
        }
        Ok(())
    }

    fn route(node: &TreeNode, features: &ArrayView1<'_, f64>) -> usize {
        match node {
            TreeNode::Leaf { class } => *class,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if features[*feature] <= *threshold {
                    Self::route(left, features)
                } else {
                    Self::route(right, features)
                }
            }
        }
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: ArrayView1<'_, f64>) -> Result<String> {
        if features.len() != self.n_features {
            return Err(EvServeError::InferenceError(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            votes[Self::route(tree, &features)] += 1;
        }

        let mut winner = 0usize;
        for (class, count) in votes.iter().enumerate() {
            if *count > votes[winner] {
                winner = class;
            }
        }
        Ok(self.classes[winner].clone())
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
