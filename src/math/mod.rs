//! Numerical utilities: polynomial evaluation and bracketed root finding.

pub mod brent;
pub mod poly;

pub use brent::*;
pub use poly::*;
