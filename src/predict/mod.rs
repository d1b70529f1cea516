//! Prediction and season projection
//!
//! Load trained bundles and generate race rankings and season
//! standings.

pub mod engine;
pub mod season;

pub use engine::PredictionEngine;
pub use season::{SeasonSimulator, Standings};
