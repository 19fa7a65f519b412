//! Score inversion: which lift reaches a given DOTS score.

pub mod equivalence;

pub use equivalence::*;
