//! Driver roster loading
//!
//! The roster is the static CSV of drivers eligible for prediction,
//! read once at startup and immutable afterwards.

use crate::{Driver, DriverCode, FinishlineError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// One row of the roster file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RosterRow {
    code: String,
    name: String,
    team: String,
    experience: u32,
}

/// The full driver roster
#[derive(Debug, Clone)]
pub struct Roster {
    drivers: Vec<Driver>,
}

impl Roster {
    /// Load the roster from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            FinishlineError::Roster(format!(
                "Failed to read roster file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_reader(file)
    }

    /// Parse roster rows from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let code_pattern = Regex::new(r"^[A-Z]{3}$").unwrap();
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut drivers = Vec::new();
        let mut seen = HashSet::new();

        for row in csv_reader.deserialize() {
            let row: RosterRow = row?;
            if !code_pattern.is_match(&row.code) {
                return Err(FinishlineError::Roster(format!(
                    "Invalid driver code {:?} for {}",
                    row.code, row.name
                )));
            }
            if !seen.insert(row.code.clone()) {
                return Err(FinishlineError::Roster(format!(
                    "Duplicate driver code {}",
                    row.code
                )));
            }
            drivers.push(Driver {
                code: DriverCode(row.code),
                name: row.name,
                team: row.team,
                experience: row.experience,
            });
        }

        Ok(Roster { drivers })
    }

    /// Drivers in roster file order
    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
