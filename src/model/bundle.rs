//! Model bundle loading
//!
//! A bundle file carries one prediction mode's full artifact set: the
//! feature schema plus both trained scorers, exported to JSON at
//! training time. Everything is validated up front so scoring never
//! hits a malformed artifact mid-prediction.

use crate::model::{FeatureSchema, NeuralNet, RandomForest, Scorer};
use crate::{FinishlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One prediction mode's schema and trained scorers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub schema: FeatureSchema,
    pub network: NeuralNet,
    pub forest: RandomForest,
}

impl ModelBundle {
    /// Load and validate a bundle from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            FinishlineError::Artifact(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a bundle from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: ModelBundle = serde_json::from_str(json)
            .map_err(|e| FinishlineError::Artifact(format!("Malformed model bundle: {}", e)))?;
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.forest.validate()?;

        let width = self.schema.width();
        if self.network.n_features() != width {
            return Err(FinishlineError::Artifact(format!(
                "Schema encodes {} features but the network expects {}",
                width,
                self.network.n_features()
            )));
        }
        if self.forest.n_features() != width {
            return Err(FinishlineError::Artifact(format!(
                "Schema encodes {} features but the forest expects {}",
                width,
                self.forest.n_features()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE_JSON: &str = r#"{
        "schema": {
            "columns": [
                {"name": "Grid", "encoding": "numeric"},
                {"name": "Team", "encoding": {"one_hot": {"categories": ["Red Bull", "McLaren"]}}}
            ]
        },
        "network": {
            "layers": [
                {"weights": [[1.0, 0.5, -0.5]], "biases": [0.1], "activation": "identity"}
            ]
        },
        "forest": {
            "n_features": 3,
            "trees": [
                {
                    "children_left": [-1],
                    "children_right": [-1],
                    "feature": [-2],
                    "threshold": [-2.0],
                    "value": [3.0]
                }
            ]
        }
    }"#;

    #[test]
    fn test_load_bundle_from_json() {
        let bundle = ModelBundle::from_json(BUNDLE_JSON).unwrap();
        assert_eq!(bundle.schema.width(), 3);
        assert_eq!(bundle.network.n_features(), 3);
        assert_eq!(bundle.forest.n_features(), 3);
    }

    #[test]
    fn test_malformed_json_fails() {
        let result = ModelBundle::from_json("{\"schema\": 12}");
        assert!(matches!(result, Err(FinishlineError::Artifact(_))));
    }

    #[test]
    fn test_schema_scorer_width_mismatch_fails() {
        let narrowed = BUNDLE_JSON.replace(
            r#"{"name": "Grid", "encoding": "numeric"},"#,
            "",
        );
        let result = ModelBundle::from_json(&narrowed);
        assert!(matches!(result, Err(FinishlineError::Artifact(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ModelBundle::load("models/no_such_bundle.json");
        assert!(matches!(result, Err(FinishlineError::Artifact(_))));
    }
}
