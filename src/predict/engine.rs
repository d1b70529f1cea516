//! Race outcome prediction
//!
//! Scores every race entry with both trained models and orders the
//! field by combined score.

use crate::data::Roster;
use crate::features::{self, RaceEntry, TeamNormalizer};
use crate::model::{ModelBundle, Scorer};
use crate::{Config, DriverCode, QualifyingRecord, Result, TrackId};
use std::cmp::Ordering;

/// Prediction engine holding the roster and both mode bundles
pub struct PredictionEngine {
    roster: Roster,
    teams: TeamNormalizer,
    pre: ModelBundle,
    post: ModelBundle,
}

impl PredictionEngine {
    pub fn new(roster: Roster, teams: TeamNormalizer, pre: ModelBundle, post: ModelBundle) -> Self {
        PredictionEngine {
            roster,
            teams,
            pre,
            post,
        }
    }

    /// Load roster and model bundles from configured paths
    pub fn load(config: &Config) -> Result<Self> {
        let roster = Roster::load(&config.data.roster_path)?;
        log::info!("Loaded {} drivers from {}", roster.len(), config.data.roster_path);

        let pre = ModelBundle::load(&config.data.pre_model_path)?;
        let post = ModelBundle::load(&config.data.post_model_path)?;
        log::info!(
            "Loaded model bundles ({} pre, {} post features)",
            pre.schema.width(),
            post.schema.width()
        );

        Ok(Self::new(roster, TeamNormalizer::new(), pre, post))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Predict a finishing order from roster data alone
    pub fn predict_pre(&self, track: TrackId) -> Result<Vec<DriverCode>> {
        let entries = features::entry::assemble_pre(&self.roster, &self.teams, track);
        self.rank(&self.pre, &entries)
    }

    /// Predict a finishing order from qualifying session results
    ///
    /// Drivers without a complete qualifying row are left out of the
    /// ranking entirely.
    pub fn predict_post(
        &self,
        track: TrackId,
        qualifying: &[QualifyingRecord],
    ) -> Result<Vec<DriverCode>> {
        let entries = features::entry::assemble_post(&self.roster, &self.teams, track, qualifying);
        if entries.len() < self.roster.len() {
            log::warn!(
                "Scoring {} of {} drivers, the rest have incomplete qualifying data",
                entries.len(),
                self.roster.len()
            );
        }
        self.rank(&self.post, &entries)
    }

    /// Score entries with both models and order by summed score,
    /// lowest first
    fn rank(&self, bundle: &ModelBundle, entries: &[RaceEntry]) -> Result<Vec<DriverCode>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let features = bundle.schema.transform(entries)?;
        let from_network = bundle.network.score(&features)?;
        let from_forest = bundle.forest.score(&features)?;

        let combined: Vec<f64> = from_network
            .iter()
            .zip(&from_forest)
            .map(|(n, f)| n + f)
            .collect();

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| {
            combined[a]
                .partial_cmp(&combined[b])
                .unwrap_or(Ordering::Equal)
        });

        Ok(order.iter().map(|&i| entries[i].code.clone()).collect())
    }
}
