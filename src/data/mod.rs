//! Data ingestion
//!
//! Driver roster and track calendar files, plus scrapers for live pages.

pub mod roster;
pub mod scrapers;
pub mod tracks;

pub use roster::Roster;
pub use tracks::TrackTable;
