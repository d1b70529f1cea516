//! Team name normalization
//!
//! Qualifying pages list constructor entries ("Red Bull Racing Honda
//! RBPT"), historical data uses older team names ("Toro Rosso"). Both
//! must collapse to the names the models were trained on.

use std::collections::HashMap;

/// Maps raw team names to their canonical form
pub struct TeamNormalizer {
    map: HashMap<String, String>,
}

impl TeamNormalizer {
    pub fn new() -> Self {
        TeamNormalizer {
            map: Self::default_team_map(),
        }
    }

    /// Build a normalizer from explicit raw/canonical pairs
    pub fn with_mapping<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        TeamNormalizer {
            map: pairs.into_iter().collect(),
        }
    }

    /// Build the default team name mapping
    fn default_team_map() -> HashMap<String, String> {
        let mut map = HashMap::new();

        for name in [
            "Red Bull Racing",
            "RB F1 Team",
            "Red Bull Racing Honda RBPT",
            "RB Honda RBPT",
        ] {
            map.insert(name.to_string(), "Red Bull".to_string());
        }
        for name in ["Toro Rosso", "AlphaTauri Honda RBPT"] {
            map.insert(name.to_string(), "Racing Bulls".to_string());
        }
        for name in ["Alpine F1 Team", "Alpine Renault"] {
            map.insert(name.to_string(), "Alpine".to_string());
        }
        for name in ["Racing Point", "Aston Martin Aramco Mercedes"] {
            map.insert(name.to_string(), "Aston Martin".to_string());
        }
        {
            let name = "Haas F1 Team";
            map.insert(name.to_string(), "Haas".to_string());
        }
        {
            // Customer entry folded into its engine supplier, as trained
            let name = "Haas Ferrari";
            map.insert(name.to_string(), "Ferrari".to_string());
        }
        {
            let name = "McLaren Mercedes";
            map.insert(name.to_string(), "McLaren".to_string());
        }
        {
            let name = "Williams Mercedes";
            map.insert(name.to_string(), "Williams".to_string());
        }

        map
    }

    /// Normalize a team name
    ///
    /// Unmapped names pass through unchanged, so canonical names and
    /// teams that never changed sponsor survive as-is.
    pub fn canonical(&self, raw: &str) -> String {
        match self.map.get(raw) {
            Some(name) => name.clone(),
            None => raw.to_string(),
        }
    }
}

impl Default for TeamNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
