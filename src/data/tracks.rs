//! Season calendar configuration
//!
//! Tracks are configured in a static TOML table; file order is the
//! calendar order the season simulator walks.

use crate::{FinishlineError, Result, Track};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TrackFile {
    tracks: Vec<Track>,
}

/// All configured tracks for the season
#[derive(Debug, Clone)]
pub struct TrackTable {
    tracks: Vec<Track>,
}

impl TrackTable {
    /// Load the track table from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FinishlineError::Config(format!(
                "Failed to read track table {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse a track table from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let file: TrackFile = toml::from_str(content)
            .map_err(|e| FinishlineError::Config(format!("Failed to parse track table: {}", e)))?;
        Ok(TrackTable {
            tracks: file.tracks,
        })
    }

    /// Find a track by display name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Tracks in calendar order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
