//! Scoring model.
//!
//! The model is a small, pure function so that the solver and the curve
//! sampler can call it freely from any thread.

pub mod score;

pub use score::*;
