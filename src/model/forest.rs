//! Random forest regressor
//!
//! Trees are exported in flattened form: parallel arrays indexed by
//! node id, leaves marked by a negative child index. Evaluation walks
//! each tree from the root and averages the leaf values.

use crate::model::{FeatureMatrix, Scorer};
use crate::{FinishlineError, Result};
use serde::{Deserialize, Serialize};

/// One regression tree in flattened array form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i32>,
    pub children_right: Vec<i32>,
    pub feature: Vec<i32>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    /// Walk from the root to a leaf
    ///
    /// Indexing is unchecked here; `validate` proves every child and
    /// feature index in range (and strictly descending order, so the
    /// walk terminates) before a tree is ever evaluated.
    fn predict(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left < 0 {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }

    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, index: usize, n_features: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            return Err(FinishlineError::Artifact(format!("Tree {} is empty", index)));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(FinishlineError::Artifact(format!(
                "Tree {} has ragged node arrays",
                index
            )));
        }

        for node in 0..n {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if (left < 0) != (right < 0) {
                return Err(FinishlineError::Artifact(format!(
                    "Tree {} node {} has only one child",
                    index, node
                )));
            }
            if left < 0 {
                continue;
            }
            if left as usize >= n || right as usize >= n || left as usize <= node || right as usize <= node
            {
                return Err(FinishlineError::Artifact(format!(
                    "Tree {} node {} has child indices out of order",
                    index, node
                )));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(FinishlineError::Artifact(format!(
                    "Tree {} node {} splits on feature {} of {}",
                    index, node, feature, n_features
                )));
            }
        }

        Ok(())
    }
}

/// Averaged ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Check every tree is well-formed; runs once at bundle load
    pub(crate) fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(FinishlineError::Artifact(
                "Forest has no trees".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Scorer for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn score(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.width() != self.n_features {
            return Err(FinishlineError::Schema(format!(
                "feature length mismatch: got {}, expected {}",
                features.width(),
                self.n_features
            )));
        }

        Ok((0..features.rows())
            .map(|i| {
                let row = features.row(i);
                let total: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
                total / self.trees.len() as f64
            })
            .collect())
    }
}
