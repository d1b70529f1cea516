//! Dense feed-forward network
//!
//! Weights are exported at training time; evaluation is a plain
//! forward pass over the layer chain.

use crate::model::{FeatureMatrix, Scorer};
use crate::{FinishlineError, Result};
use serde::{Deserialize, Serialize};

/// Activation applied after a layer's affine transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Identity,
}

impl Activation {
    fn apply(&self, x: f64) -> f64 {
        match self {
            Activation::Relu => x.max(0.0),
            Activation::Identity => x,
        }
    }
}

/// One fully-connected layer, weights stored row-per-output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + bias)
            })
            .collect()
    }

    fn inputs(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }

    fn outputs(&self) -> usize {
        self.weights.len()
    }
}

/// Feed-forward regressor producing one score per feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNet {
    pub layers: Vec<DenseLayer>,
}

impl NeuralNet {
    /// Check the layer chain is well-formed; runs once at bundle load
    pub(crate) fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(FinishlineError::Artifact(
                "Network has no layers".to_string(),
            ));
        }

        let mut width = self.layers[0].inputs();
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.weights.is_empty() || layer.biases.len() != layer.outputs() {
                return Err(FinishlineError::Artifact(format!(
                    "Layer {} has {} weight rows but {} biases",
                    i,
                    layer.outputs(),
                    layer.biases.len()
                )));
            }
            if layer.weights.iter().any(|row| row.len() != width) {
                return Err(FinishlineError::Artifact(format!(
                    "Layer {} expects {} inputs but a weight row disagrees",
                    i, width
                )));
            }
            width = layer.outputs();
        }

        if width != 1 {
            return Err(FinishlineError::Artifact(format!(
                "Network output layer has {} units, expected 1",
                width
            )));
        }

        Ok(())
    }

    fn forward(&self, input: &[f64]) -> f64 {
        let mut activations = input.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        // Validated to a single output unit at load
        activations[0]
    }
}

impl Scorer for NeuralNet {
    fn n_features(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::inputs)
    }

    fn score(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.width() != self.n_features() {
            return Err(FinishlineError::Schema(format!(
                "feature length mismatch: got {}, expected {}",
                features.width(),
                self.n_features()
            )));
        }

        Ok((0..features.rows())
            .map(|i| self.forward(features.row(i)))
            .collect())
    }
}
