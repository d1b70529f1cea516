//! F1 race outcome prediction from pre-trained ensemble models
//!
//! Ranks the driver field for a race, before or after qualifying, and
//! projects end-of-season championship standings.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Three-letter driver code, the join key across roster, qualifying and
/// standings data
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverCode(pub String);

impl fmt::Display for DriverCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DriverCode {
    fn from(code: &str) -> Self {
        DriverCode(code.to_string())
    }
}

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track({})", self.0)
    }
}

/// Prediction mode selecting which model pair and feature layout to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionMode {
    PreQualifying,
    PostQualifying,
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionMode::PreQualifying => write!(f, "pre-qualifying"),
            PredictionMode::PostQualifying => write!(f, "post-qualifying"),
        }
    }
}

/// External page a scraper reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSource {
    Qualifying,
    Standings,
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSource::Qualifying => write!(f, "qualifying results"),
            PageSource::Standings => write!(f, "championship standings"),
        }
    }
}

/// A driver as listed in the roster file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub code: DriverCode,
    pub name: String,
    /// Team name as written in the roster; canonicalized during feature
    /// assembly
    pub team: String,
    /// Career race starts, the numeric static feature the models consume
    pub experience: u32,
}

/// A race on the season calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    /// Scheduled day-of-year of the race
    pub day: u32,
    /// Location of the qualifying results page, once published
    pub qualifying_url: Option<String>,
}

/// Per-driver qualifying data extracted from a results page
///
/// Lap times are fractional seconds; a field is `None` when the page cell
/// was empty or unparseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingRecord {
    pub code: DriverCode,
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
    pub grid: Option<u32>,
}

/// One driver's accumulated championship points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub code: DriverCode,
    pub points: u32,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FinishlineError {
    #[error("Scrape failed for {page}: {message}")]
    Scrape { page: PageSource, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("Unknown track: {0}")]
    UnknownTrack(String),

    #[error("No qualifying results link configured for {0}")]
    NoQualifyingLink(String),

    #[error("Qualifying results for {track} are not available before race day {day}")]
    QualifyingUnavailable { track: String, day: u32 },

    #[error("Model artifact error: {0}")]
    Artifact(String),

    #[error("Feature schema mismatch: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FinishlineError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub standings: StandingsConfig,
    pub scoring: ScoringConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub roster_path: String,
    pub tracks_path: String,
    pub pre_model_path: String,
    pub post_model_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points awarded per finishing position, best first
    pub points: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                roster_path: "data/drivers.csv".to_string(),
                tracks_path: "data/tracks.toml".to_string(),
                pre_model_path: "models/pre_qualifying.json".to_string(),
                post_model_path: "models/post_qualifying.json".to_string(),
            },
            standings: StandingsConfig {
                url: "https://www.formula1.com/en/results/2025/drivers".to_string(),
            },
            scoring: ScoringConfig {
                points: predict::season::DEFAULT_POINTS.to_vec(),
            },
            http: HttpConfig {
                timeout_secs: 30,
                user_agent: "finishline/0.1".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FinishlineError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FinishlineError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FinishlineError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
