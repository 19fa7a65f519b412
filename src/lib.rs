//! `dots-curves` library crate.
//!
//! The binary (`dots`) is a thin wrapper around this library so that:
//!
//! - the scoring engine is testable without spawning processes
//! - the engine is reusable by other front ends (a web chart, notebooks, etc.)
//! - code stays easy to navigate as the project grows
//!
//! Core pipeline: `models` (DOTS score) -> `solve` (required lift) ->
//! `curve` (sampled equivalence curve).

pub mod app;
pub mod cli;
pub mod curve;
pub mod domain;
pub mod error;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod solve;
pub mod tui;
