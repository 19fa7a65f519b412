//! Terminal rendering helpers shared by the CLI and the TUI.

pub mod ascii;
pub mod colorscale;

pub use ascii::*;
pub use colorscale::*;
