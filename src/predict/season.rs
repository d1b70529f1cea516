//! Season projection
//!
//! Replays every remaining race through the prediction engine and
//! accrues championship points on top of the live standings.

use crate::data::TrackTable;
use crate::predict::PredictionEngine;
use crate::{DriverCode, Result, StandingEntry};

/// Points paid to the top ten finishers, winner first
pub const DEFAULT_POINTS: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Championship standings, seeded from the live table and updated with
/// simulated race results
#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    entries: Vec<StandingEntry>,
}

impl Standings {
    pub fn new(entries: Vec<StandingEntry>) -> Self {
        Standings { entries }
    }

    pub fn entries(&self) -> &[StandingEntry] {
        &self.entries
    }

    pub fn points(&self, code: &DriverCode) -> Option<u32> {
        self.entries.iter().find(|e| &e.code == code).map(|e| e.points)
    }

    /// Add points to a driver's tally
    ///
    /// Codes outside the table (a predicted driver who has not scored
    /// an official classification yet) are left untouched.
    fn award(&mut self, code: &DriverCode, points: u32) {
        match self.entries.iter_mut().find(|e| &e.code == code) {
            Some(entry) => entry.points += points,
            None => log::debug!("{} not in standings, no points awarded", code),
        }
    }

    /// Order by points, best first, ties broken by driver code
    fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.code.cmp(&b.code)));
    }
}

/// Projects final championship standings from the remaining calendar
pub struct SeasonSimulator<'a> {
    engine: &'a PredictionEngine,
    points: Vec<u32>,
}

impl<'a> SeasonSimulator<'a> {
    pub fn new(engine: &'a PredictionEngine, points: Vec<u32>) -> Self {
        SeasonSimulator { engine, points }
    }

    /// Simulate every race after `today` (a day-of-year) and return the
    /// projected final standings
    ///
    /// Races on or before `today` already count inside the seed
    /// standings. A failed prediction abandons the whole projection.
    pub fn project(
        &self,
        seed: Vec<StandingEntry>,
        tracks: &TrackTable,
        today: u32,
    ) -> Result<Standings> {
        let mut standings = Standings::new(seed);

        for track in tracks.iter() {
            if track.day <= today {
                continue;
            }

            log::info!("Simulating {} (day {})", track.name, track.day);
            let ranking = self.engine.predict_pre(track.id)?;

            for (position, code) in ranking.iter().take(self.points.len()).enumerate() {
                standings.award(code, self.points[position]);
            }
        }

        standings.sort();
        Ok(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Roster;
    use crate::features::TeamNormalizer;
    use crate::model::forest::{DecisionTree, RandomForest};
    use crate::model::network::{Activation, DenseLayer, NeuralNet};
    use crate::model::schema::{ColumnEncoding, ColumnSpec, FeatureSchema};
    use crate::model::ModelBundle;

    const ROSTER_CSV: &str = "\
Code,Name,Team,Experience
VER,Max Verstappen,Red Bull Racing Honda RBPT,10
NOR,Lando Norris,McLaren Mercedes,6
HAM,Lewis Hamilton,Ferrari,18
";

    const TRACKS_TOML: &str = r#"
[[tracks]]
id = 10
name = "Hungaroring"
day = 214

[[tracks]]
id = 11
name = "Monza"
day = 250
"#;

    /// Engine whose pre-qualifying ranking is ascending experience:
    /// NOR, VER, HAM
    fn engine() -> PredictionEngine {
        let bundle = ModelBundle {
            schema: FeatureSchema {
                columns: vec![ColumnSpec {
                    name: "Experience".to_string(),
                    encoding: ColumnEncoding::Numeric,
                }],
            },
            network: NeuralNet {
                layers: vec![DenseLayer {
                    weights: vec![vec![1.0]],
                    biases: vec![0.0],
                    activation: Activation::Identity,
                }],
            },
            forest: RandomForest {
                n_features: 1,
                trees: vec![DecisionTree {
                    children_left: vec![-1],
                    children_right: vec![-1],
                    feature: vec![-2],
                    threshold: vec![-2.0],
                    value: vec![0.0],
                }],
            },
        };
        let roster = Roster::from_reader(ROSTER_CSV.as_bytes()).unwrap();
        PredictionEngine::new(roster, TeamNormalizer::new(), bundle.clone(), bundle)
    }

    fn seed() -> Vec<StandingEntry> {
        vec![
            StandingEntry {
                code: DriverCode::from("VER"),
                points: 100,
            },
            StandingEntry {
                code: DriverCode::from("NOR"),
                points: 80,
            },
            StandingEntry {
                code: DriverCode::from("HAM"),
                points: 60,
            },
        ]
    }

    #[test]
    fn test_project_accrues_remaining_races() {
        let engine = engine();
        let tracks = TrackTable::parse(TRACKS_TOML).unwrap();
        let simulator = SeasonSimulator::new(&engine, DEFAULT_POINTS.to_vec());

        // Both races remain: NOR +50, VER +36, HAM +30
        let standings = simulator.project(seed(), &tracks, 150).unwrap();

        assert_eq!(standings.points(&DriverCode::from("VER")), Some(136));
        assert_eq!(standings.points(&DriverCode::from("NOR")), Some(130));
        assert_eq!(standings.points(&DriverCode::from("HAM")), Some(90));
        assert_eq!(standings.entries()[0].code, DriverCode::from("VER"));
    }

    #[test]
    fn test_project_skips_races_already_run() {
        let engine = engine();
        let tracks = TrackTable::parse(TRACKS_TOML).unwrap();
        let simulator = SeasonSimulator::new(&engine, DEFAULT_POINTS.to_vec());

        // Day 214 already counted in the seed, day 250 still ahead
        let standings = simulator.project(seed(), &tracks, 214).unwrap();

        assert_eq!(standings.points(&DriverCode::from("NOR")), Some(105));
        assert_eq!(standings.points(&DriverCode::from("VER")), Some(118));
    }

    #[test]
    fn test_project_ignores_codes_outside_standings() {
        let engine = engine();
        let tracks = TrackTable::parse(TRACKS_TOML).unwrap();
        let simulator = SeasonSimulator::new(&engine, DEFAULT_POINTS.to_vec());

        let partial = vec![StandingEntry {
            code: DriverCode::from("VER"),
            points: 100,
        }];
        let standings = simulator.project(partial, &tracks, 150).unwrap();

        assert_eq!(standings.entries().len(), 1);
        assert_eq!(standings.points(&DriverCode::from("VER")), Some(136));
        assert_eq!(standings.points(&DriverCode::from("NOR")), None);
    }

    #[test]
    fn test_points_table_length_caps_scorers() {
        let engine = engine();
        let tracks = TrackTable::parse(TRACKS_TOML).unwrap();
        let simulator = SeasonSimulator::new(&engine, vec![10, 5]);

        let standings = simulator.project(seed(), &tracks, 220).unwrap();

        // Only Monza remains; HAM finishes third and scores nothing
        assert_eq!(standings.points(&DriverCode::from("NOR")), Some(90));
        assert_eq!(standings.points(&DriverCode::from("VER")), Some(105));
        assert_eq!(standings.points(&DriverCode::from("HAM")), Some(60));
    }

    #[test]
    fn test_standings_ties_break_by_code() {
        let mut standings = Standings::new(vec![
            StandingEntry {
                code: DriverCode::from("VER"),
                points: 50,
            },
            StandingEntry {
                code: DriverCode::from("NOR"),
                points: 50,
            },
            StandingEntry {
                code: DriverCode::from("HAM"),
                points: 80,
            },
        ]);
        standings.sort();

        let codes: Vec<String> = standings
            .entries()
            .iter()
            .map(|e| e.code.to_string())
            .collect();
        assert_eq!(codes, vec!["HAM", "NOR", "VER"]);
    }
}
