//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - lifter inputs (`Sex`, `MassUnit`, `LifterProfile`)
//! - formula configuration (`ScoreCoefficients`, `Bracket`, `LiftRange`)
//! - curve outputs (`EquivalencePoint`, `Curve`) and the run config

pub mod types;

pub use types::*;
