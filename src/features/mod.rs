//! Feature assembly
//!
//! Converts roster and qualifying data into model-ready race entries.

pub mod entry;
pub mod teams;

pub use entry::{FieldValue, RaceEntry};
pub use teams::TeamNormalizer;
