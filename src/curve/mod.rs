//! Equivalence curve generation.
//!
//! Responsibilities:
//!
//! - sample lifter 1's lifts over a range
//! - solve lifter 2's equivalent lift for each sample (parallel)
//! - round, normalize scores into color fractions, and build hover text

pub mod annotate;
pub mod generator;

pub use annotate::{hover_text, rounded_score_bounds, segment_fractions};
pub use generator::*;
