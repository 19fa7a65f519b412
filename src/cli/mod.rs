//! Command-line parsing for the DOTS equivalence tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring/solver code.

use clap::{Args, Parser, Subcommand};

use crate::domain::{MassUnit, Sex};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dots", version, about = "DOTS strength comparison between two lifters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the DOTS score of a single lift.
    Score(ScoreArgs),
    /// Find the lift needed to reach a target DOTS score.
    Lift(LiftArgs),
    /// Find the lift lifter 2 needs to match one lift of lifter 1.
    Equiv(EquivArgs),
    /// Sample the full equivalence curve, print a table and plot (or JSON).
    Curve(CurveArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same curve pipeline as `dots curve`, but renders the result
    /// in a terminal UI using Ratatui.
    Tui(CurveArgs),
}

/// Mass unit shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct UnitArgs {
    /// Unit for lifts and bodyweights.
    #[arg(long, value_enum, env = "DOTS_UNIT", default_value_t = MassUnit::Pound)]
    pub unit: MassUnit,
}

/// Root-finding bracket for the required lift.
#[derive(Debug, Args, Clone)]
pub struct BracketArgs {
    /// Lower end of the required-lift search bracket.
    #[arg(long, default_value_t = 50.0)]
    pub bracket_lo: f64,

    /// Upper end of the required-lift search bracket.
    #[arg(long, default_value_t = 2000.0)]
    pub bracket_hi: f64,
}

/// The two lifters being compared.
#[derive(Debug, Args, Clone)]
pub struct PairArgs {
    /// Lifter 1 bodyweight.
    #[arg(long, default_value_t = 170.0)]
    pub bw1: f64,

    /// Lifter 1 sex (male/m, female/f).
    #[arg(long, value_enum, default_value_t = Sex::Female)]
    pub sex1: Sex,

    /// Lifter 2 bodyweight.
    #[arg(long, default_value_t = 225.0)]
    pub bw2: f64,

    /// Lifter 2 sex (male/m, female/f).
    #[arg(long, value_enum, default_value_t = Sex::Male)]
    pub sex2: Sex,
}

#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// Weight lifted.
    #[arg(short, long)]
    pub lift: f64,

    /// Lifter bodyweight.
    #[arg(short, long)]
    pub bodyweight: f64,

    /// Lifter sex (male/m, female/f).
    #[arg(short, long, value_enum)]
    pub sex: Sex,

    #[command(flatten)]
    pub unit: UnitArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct LiftArgs {
    /// Target DOTS score.
    #[arg(long)]
    pub score: f64,

    /// Lifter bodyweight.
    #[arg(short, long)]
    pub bodyweight: f64,

    /// Lifter sex (male/m, female/f).
    #[arg(short, long, value_enum)]
    pub sex: Sex,

    #[command(flatten)]
    pub bracket: BracketArgs,

    #[command(flatten)]
    pub unit: UnitArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct EquivArgs {
    /// Lifter 1's lift.
    #[arg(short, long)]
    pub lift: f64,

    #[command(flatten)]
    pub pair: PairArgs,

    #[command(flatten)]
    pub bracket: BracketArgs,

    #[command(flatten)]
    pub unit: UnitArgs,
}

/// Options for curve sampling and display.
#[derive(Debug, Parser, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Smallest sampled lift for lifter 1.
    #[arg(long, default_value_t = 100.0)]
    pub lift_min: f64,

    /// Largest sampled lift for lifter 1.
    #[arg(long, default_value_t = 800.0)]
    pub lift_max: f64,

    /// Sampling step.
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,

    #[command(flatten)]
    pub bracket: BracketArgs,

    #[command(flatten)]
    pub unit: UnitArgs,

    /// Evaluate samples on a single thread.
    #[arg(long)]
    pub sequential: bool,

    /// Number of table rows to print (evenly spaced).
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Print the whole curve as JSON instead of the table and plot.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn curve_defaults_match_reference_lifters() {
        let cli = Cli::parse_from(["dots", "curve"]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.pair.bw1, 170.0);
        assert_eq!(args.pair.sex1, Sex::Female);
        assert_eq!(args.pair.bw2, 225.0);
        assert_eq!(args.pair.sex2, Sex::Male);
        assert_eq!((args.lift_min, args.lift_max, args.step), (100.0, 800.0, 1.0));
        assert_eq!((args.bracket.bracket_lo, args.bracket.bracket_hi), (50.0, 2000.0));
    }

    #[test]
    fn sex_and_unit_aliases_parse() {
        let cli = Cli::parse_from(["dots", "score", "-l", "300", "-b", "90", "-s", "m", "--unit", "kg"]);
        let Command::Score(args) = cli.command else {
            panic!("expected score");
        };
        assert_eq!(args.sex, Sex::Male);
        assert_eq!(args.unit.unit, MassUnit::Kilogram);
    }
}
