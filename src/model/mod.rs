//! Pre-trained scoring models
//!
//! Models are trained offline and shipped as JSON bundles. Two scorer
//! families are evaluated for every prediction:
//! - NeuralNet: dense feed-forward regressor
//! - RandomForest: averaged regression trees

pub mod bundle;
pub mod forest;
pub mod network;
pub mod schema;

pub use bundle::ModelBundle;
pub use forest::RandomForest;
pub use network::NeuralNet;
pub use schema::FeatureSchema;

use crate::Result;

/// Row-major matrix of encoded feature rows
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    pub fn new(width: usize) -> Self {
        FeatureMatrix {
            width,
            data: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.width);
        self.data.extend_from_slice(row);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.width..(i + 1) * self.width]
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A trained model assigning each feature row a predicted finishing
/// score, lower meaning a better expected finish
pub trait Scorer {
    /// Width of the feature rows this model was trained on
    fn n_features(&self) -> usize;

    /// Score every row of the matrix
    fn score(&self, features: &FeatureMatrix) -> Result<Vec<f64>>;
}
