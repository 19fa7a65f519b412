//! Shared "curve pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate config -> sample curve -> (one widened-bracket retry if unsolvable)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::warn;

use crate::curve::CurveGenerator;
use crate::domain::{Bracket, Curve, CurveConfig, LifterProfile};
use crate::error::DotsError;
use crate::solve::EquivalenceSolver;

/// All computed outputs of a single curve run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub curve: Curve,
    /// Bracket that produced the curve (the widened one if the retry was needed).
    pub bracket: Bracket,
    pub retried: bool,
}

/// Generate the curve described by `config`.
///
/// If any sample is unreachable within the configured bracket the whole curve
/// is retried once with `bracket.widened()`. A second failure is returned.
pub fn run_curve(config: &CurveConfig) -> Result<RunOutput, DotsError> {
    config.lifter1.validate()?;
    config.lifter2.validate()?;
    config.bracket.validate()?;

    let generator = CurveGenerator::from_config(config);
    match generator.generate(&config.lifter1, &config.lifter2) {
        Ok(curve) => Ok(RunOutput {
            curve,
            bracket: config.bracket,
            retried: false,
        }),
        Err(err @ DotsError::UnsolvableEquivalence { .. }) => {
            let wider = config.bracket.widened();
            warn!(%err, lo = wider.lo, hi = wider.hi, "retrying curve with a widened bracket");
            let curve = generator
                .with_bracket(wider)
                .generate(&config.lifter1, &config.lifter2)?;
            Ok(RunOutput {
                curve,
                bracket: wider,
                retried: true,
            })
        }
        Err(err) => Err(err),
    }
}

/// Single-point equivalence with the same one-shot retry as [`run_curve`].
///
/// Returns `(score, required_lift)`.
pub fn run_equivalence(
    solver: &EquivalenceSolver,
    lift: f64,
    lifter1: &LifterProfile,
    lifter2: &LifterProfile,
) -> Result<(f64, f64), DotsError> {
    lifter1.validate()?;
    lifter2.validate()?;
    let score = solver.model().score(lift, lifter1.bodyweight, lifter1.sex)?;
    let target = required_lift_with_retry(solver, score, lifter2)?;
    Ok((score, target))
}

/// `required_lift`, retried once in the widened bracket when unsolvable.
pub fn required_lift_with_retry(
    solver: &EquivalenceSolver,
    score: f64,
    lifter: &LifterProfile,
) -> Result<f64, DotsError> {
    match solver.required_lift(score, lifter.bodyweight, lifter.sex) {
        Err(err @ DotsError::UnsolvableEquivalence { .. }) => {
            let wider = solver.bracket().widened();
            warn!(%err, lo = wider.lo, hi = wider.hi, "retrying with a widened bracket");
            solver.required_lift_in(score, lifter.bodyweight, lifter.sex, wider)
        }
        other => other,
    }
}
