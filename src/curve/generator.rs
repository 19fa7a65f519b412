//! Equivalence curve sampling.
//!
//! For every sampled lift `l` of lifter 1:
//! - `s = score(l, lifter1)`
//! - `t = required_lift(s, lifter2)`
//!
//! Samples are independent, so they are evaluated on the rayon pool when
//! `parallel` is set. A failure on any sample aborts the whole curve; a curve
//! with silently dropped points would misrepresent the comparison.

use rayon::prelude::*;
use tracing::debug;

use crate::curve::annotate::annotate;
use crate::domain::{Bracket, Curve, CurveConfig, EquivalencePoint, LiftRange, LifterProfile, MassUnit};
use crate::error::DotsError;
use crate::solve::EquivalenceSolver;

/// Relative slack so `hi` survives float steps like `0.1`.
const STEP_SLACK: f64 = 1e-9;

/// Upper bound on the number of sampled lifts in one curve.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Sample lifts `lo, lo + step, ...` up to the last value `<= hi`.
pub fn sample_lifts(range: LiftRange, step: f64) -> Result<Vec<f64>, DotsError> {
    range.validate()?;
    if !(step.is_finite() && step > 0.0) {
        return Err(DotsError::invalid(format!("step must be finite and > 0 (got {step})")));
    }

    let n_steps = ((range.hi - range.lo) / step + STEP_SLACK).floor();
    if !n_steps.is_finite() || n_steps >= MAX_SAMPLES as f64 {
        return Err(DotsError::invalid(format!(
            "lift range [{}, {}] with step {step} exceeds {MAX_SAMPLES} samples",
            range.lo, range.hi
        )));
    }
    let n_steps = n_steps as usize;
    Ok((0..=n_steps).map(|i| range.lo + step * i as f64).collect())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGenerator {
    solver: EquivalenceSolver,
    range: LiftRange,
    step: f64,
    parallel: bool,
}

impl Default for CurveGenerator {
    fn default() -> Self {
        Self::new(EquivalenceSolver::default())
    }
}

impl CurveGenerator {
    pub fn new(solver: EquivalenceSolver) -> Self {
        Self {
            solver,
            range: LiftRange::default(),
            step: 1.0,
            parallel: true,
        }
    }

    pub fn from_config(config: &CurveConfig) -> Self {
        Self::new(EquivalenceSolver::for_unit(config.unit).with_bracket(config.bracket))
            .with_range(config.range)
            .with_step(config.step)
            .with_parallel(config.parallel)
    }

    pub fn with_range(mut self, range: LiftRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_bracket(mut self, bracket: Bracket) -> Self {
        self.solver = self.solver.with_bracket(bracket);
        self
    }

    pub fn solver(&self) -> &EquivalenceSolver {
        &self.solver
    }

    pub fn unit(&self) -> MassUnit {
        self.solver.model().unit()
    }

    /// Sample the full curve mapping lifter 1's lifts onto lifter 2.
    pub fn generate(&self, lifter1: &LifterProfile, lifter2: &LifterProfile) -> Result<Curve, DotsError> {
        lifter1.validate()?;
        lifter2.validate()?;
        let lifts = sample_lifts(self.range, self.step)?;

        let points: Vec<EquivalencePoint> = if self.parallel {
            lifts
                .par_iter()
                .map(|&l| self.point(l, lifter1, lifter2))
                .collect::<Result<_, _>>()?
        } else {
            lifts
                .iter()
                .map(|&l| self.point(l, lifter1, lifter2))
                .collect::<Result<_, _>>()?
        };

        debug!(
            n = points.len(),
            lo = self.range.lo,
            hi = self.range.hi,
            step = self.step,
            parallel = self.parallel,
            "curve sampled"
        );

        let unit = self.unit();
        let notes = annotate(lifter1, lifter2, unit, &points);

        Ok(Curve {
            lifter1: *lifter1,
            lifter2: *lifter2,
            unit,
            points,
            score_min: notes.score_min,
            score_max: notes.score_max,
            segment_fractions: notes.fractions,
            hover_text: notes.hover,
        })
    }

    fn point(&self, lift: f64, lifter1: &LifterProfile, lifter2: &LifterProfile) -> Result<EquivalencePoint, DotsError> {
        let score = self.solver.model().score(lift, lifter1.bodyweight, lifter1.sex)?;
        let target = self.solver.required_lift(score, lifter2.bodyweight, lifter2.sex)?;
        Ok(EquivalencePoint {
            source_lift: lift,
            source_score: score,
            target_lift: target,
        })
    }
}
