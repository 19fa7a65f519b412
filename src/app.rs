//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs scoring / solving / curve sampling
//! - prints results, tables and plots (or JSON)

use std::io::IsTerminal;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{BracketArgs, Command, CurveArgs, EquivArgs, LiftArgs, ScoreArgs};
use crate::domain::{Bracket, CurveConfig, LiftRange, LifterProfile};
use crate::error::AppError;
use crate::models::ScoreModel;
use crate::solve::EquivalenceSolver;

pub mod pipeline;

/// Environment variable holding the log filter (e.g. `debug`, `dots_curves=trace`).
pub const LOG_ENV: &str = "DOTS_LOG";

/// Entry point for the `dots` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    // We want `dots` and `dots --bw1 150` to behave like `dots tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Lift(args) => handle_lift(args),
        Command::Equiv(args) => handle_equiv(args),
        Command::Curve(args) => handle_curve(args),
        Command::Tui(args) => handle_tui(args),
    }
}

/// Install a stderr `tracing` subscriber filtered by `DOTS_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let lifter = LifterProfile::new(args.bodyweight, args.sex)?;
    let model = ScoreModel::new(args.unit.unit);
    let score = model.score(args.lift, lifter.bodyweight, lifter.sex)?;

    println!(
        "{}",
        crate::report::format_score(args.lift, &lifter, args.unit.unit, score)
    );
    Ok(())
}

fn handle_lift(args: LiftArgs) -> Result<(), AppError> {
    let lifter = LifterProfile::new(args.bodyweight, args.sex)?;
    let solver = EquivalenceSolver::for_unit(args.unit.unit).with_bracket(bracket_from_args(&args.bracket)?);
    let lift = pipeline::required_lift_with_retry(&solver, args.score, &lifter)?;

    println!(
        "{}",
        crate::report::format_required_lift(args.score, &lifter, args.unit.unit, lift)
    );
    Ok(())
}

fn handle_equiv(args: EquivArgs) -> Result<(), AppError> {
    let lifter1 = LifterProfile::new(args.pair.bw1, args.pair.sex1)?;
    let lifter2 = LifterProfile::new(args.pair.bw2, args.pair.sex2)?;
    let solver = EquivalenceSolver::for_unit(args.unit.unit).with_bracket(bracket_from_args(&args.bracket)?);
    let (score, target) = pipeline::run_equivalence(&solver, args.lift, &lifter1, &lifter2)?;

    println!(
        "{}",
        crate::report::format_equivalence(args.lift, &lifter1, &lifter2, args.unit.unit, score, target)
    );
    Ok(())
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let config = curve_config_from_args(&args)?;
    info!(
        bw1 = config.lifter1.bodyweight,
        bw2 = config.lifter2.bodyweight,
        step = config.step,
        "generating curve"
    );
    let run = pipeline::run_curve(&config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.curve)
            .map_err(|e| AppError::new(4, format!("Failed to serialize curve JSON: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let mut shown = config.clone();
    shown.bracket = run.bracket;
    println!("{}", crate::report::format_curve_summary(&run.curve, &shown));
    if run.retried {
        println!("(bracket widened to [{}, {}] to reach every sample)\n", run.bracket.lo, run.bracket.hi);
    }
    println!("{}", crate::report::format_curve_table(&run.curve, config.rows));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.curve, config.plot_width, config.plot_height, None);
        println!("{plot}");
    }

    Ok(())
}

fn handle_tui(args: CurveArgs) -> Result<(), AppError> {
    let config = curve_config_from_args(&args)?;
    crate::tui::run(config)
}

fn bracket_from_args(args: &BracketArgs) -> Result<Bracket, AppError> {
    Ok(Bracket::new(args.bracket_lo, args.bracket_hi)?)
}

pub fn curve_config_from_args(args: &CurveArgs) -> Result<CurveConfig, AppError> {
    Ok(CurveConfig {
        lifter1: LifterProfile::new(args.pair.bw1, args.pair.sex1)?,
        lifter2: LifterProfile::new(args.pair.bw2, args.pair.sex2)?,
        unit: args.unit.unit,
        range: LiftRange::new(args.lift_min, args.lift_max)?,
        step: args.step,
        bracket: bracket_from_args(&args.bracket)?,
        parallel: !args.sequential,
        rows: args.rows,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    })
}

/// Rewrite argv so `dots` defaults to `dots tui`.
///
/// Rules:
/// - `dots`                      -> `dots tui`
/// - `dots --bw1 150 ...`        -> `dots tui --bw1 150 ...`
/// - `dots --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "score" | "lift" | "equiv" | "curve" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
