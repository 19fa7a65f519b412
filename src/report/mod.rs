//! Reporting utilities: one-line results, curve summaries and tables.

pub mod format;

pub use format::*;
