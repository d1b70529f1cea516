//! Race entry assembly
//!
//! A race entry is one driver's raw feature row for a single race,
//! built from the roster plus (post-qualifying) scraped session data.

use crate::data::Roster;
use crate::features::TeamNormalizer;
use crate::{DriverCode, QualifyingRecord, TrackId};
use std::collections::HashMap;

/// A raw feature value before encoding
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Category(String),
}

/// One driver's inputs for a single race
#[derive(Debug, Clone, PartialEq)]
pub struct RaceEntry {
    pub code: DriverCode,
    /// Canonical team name
    pub team: String,
    /// Career race starts
    pub experience: u32,
    pub track: TrackId,
    pub grid: Option<u32>,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
}

impl RaceEntry {
    /// Look up a raw value by schema column name
    ///
    /// Absent here means either an unknown column name or a session
    /// field this entry does not carry (pre-qualifying entries have no
    /// grid or lap times).
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "Team" => Some(FieldValue::Category(self.team.clone())),
            "TrackId" => Some(FieldValue::Number(self.track.0 as f64)),
            "Experience" => Some(FieldValue::Number(self.experience as f64)),
            "Grid" => self.grid.map(|g| FieldValue::Number(g as f64)),
            "Q1" => self.q1.map(FieldValue::Number),
            "Q2" => self.q2.map(FieldValue::Number),
            "Q3" => self.q3.map(FieldValue::Number),
            _ => None,
        }
    }
}

/// Build pre-qualifying entries for the whole roster, in roster order
pub fn assemble_pre(roster: &Roster, teams: &TeamNormalizer, track: TrackId) -> Vec<RaceEntry> {
    roster
        .drivers()
        .iter()
        .map(|driver| RaceEntry {
            code: driver.code.clone(),
            team: teams.canonical(&driver.team),
            experience: driver.experience,
            track,
            grid: None,
            q1: None,
            q2: None,
            q3: None,
        })
        .collect()
}

/// Build post-qualifying entries by joining the roster against session
/// results on driver code
///
/// Drivers without a complete session row (absent from the results or
/// missing any field) are dropped; the models need every field
/// populated. Result codes outside the roster are ignored.
pub fn assemble_post(
    roster: &Roster,
    teams: &TeamNormalizer,
    track: TrackId,
    qualifying: &[QualifyingRecord],
) -> Vec<RaceEntry> {
    let by_code: HashMap<&DriverCode, &QualifyingRecord> =
        qualifying.iter().map(|rec| (&rec.code, rec)).collect();

    let mut entries = Vec::new();

    for driver in roster.drivers() {
        let record = match by_code.get(&driver.code) {
            Some(rec) => rec,
            None => {
                log::debug!("No qualifying row for {}, dropping", driver.code);
                continue;
            }
        };

        let (grid, q1, q2, q3) = match (record.grid, record.q1, record.q2, record.q3) {
            (Some(grid), Some(q1), Some(q2), Some(q3)) => (grid, q1, q2, q3),
            _ => {
                log::debug!("Incomplete qualifying row for {}, dropping", driver.code);
                continue;
            }
        };

        entries.push(RaceEntry {
            code: driver.code.clone(),
            team: teams.canonical(&driver.team),
            experience: driver.experience,
            track,
            grid: Some(grid),
            q1: Some(q1),
            q2: Some(q2),
            q3: Some(q3),
        });
    }

    entries
}
