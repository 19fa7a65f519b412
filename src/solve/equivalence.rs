//! Required-lift solver.
//!
//! Given a target score, a bodyweight and a sex, find the lift whose DOTS
//! score equals the target. The score is strictly increasing in the lift for
//! any bodyweight where the formula is defined, so
//!
//! `f(lift) = score(lift) - target`
//!
//! has exactly one root in a bracket with `f(lo) < 0 < f(hi)`. That sign
//! condition is checked up front rather than assumed.

use tracing::{debug, error};

use crate::domain::{Bracket, MassUnit, Sex};
use crate::error::DotsError;
use crate::math::{BrentError, BrentOptions, brentq};
use crate::models::ScoreModel;

/// Relative score tolerance accepted after convergence.
const SCORE_RTOL: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalenceSolver {
    model: ScoreModel,
    bracket: Bracket,
    options: BrentOptions,
}

impl Default for EquivalenceSolver {
    fn default() -> Self {
        Self::new(ScoreModel::default())
    }
}

impl EquivalenceSolver {
    pub fn new(model: ScoreModel) -> Self {
        Self {
            model,
            bracket: Bracket::default(),
            options: BrentOptions::default(),
        }
    }

    pub fn for_unit(unit: MassUnit) -> Self {
        Self::new(ScoreModel::new(unit))
    }

    pub fn with_bracket(mut self, bracket: Bracket) -> Self {
        self.bracket = bracket;
        self
    }

    pub fn with_options(mut self, options: BrentOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    pub fn bracket(&self) -> Bracket {
        self.bracket
    }

    /// Lift needed to reach `target_score`, searched in the configured bracket.
    pub fn required_lift(&self, target_score: f64, bodyweight: f64, sex: Sex) -> Result<f64, DotsError> {
        self.required_lift_in(target_score, bodyweight, sex, self.bracket)
    }

    /// Lift needed to reach `target_score`, searched in `bracket`.
    pub fn required_lift_in(
        &self,
        target_score: f64,
        bodyweight: f64,
        sex: Sex,
        bracket: Bracket,
    ) -> Result<f64, DotsError> {
        bracket.validate()?;
        if !target_score.is_finite() {
            return Err(DotsError::invalid(format!(
                "target score must be finite (got {target_score})"
            )));
        }

        let f = |lift: f64| -> Result<f64, DotsError> {
            Ok(self.model.score(lift, bodyweight, sex)? - target_score)
        };

        let f_lo = f(bracket.lo)?;
        let f_hi = f(bracket.hi)?;
        if !(f_lo < 0.0 && f_hi > 0.0) {
            return Err(unsolvable(target_score, bracket));
        }

        let root = brentq(f, bracket.lo, bracket.hi, self.options).map_err(|e| match e {
            BrentError::Eval(inner) => inner,
            BrentError::NoSignChange { .. } => unsolvable(target_score, bracket),
            BrentError::NotConverged { iterations, last } => {
                error!(target_score, bodyweight, %sex, iterations, last, "required-lift search hit the iteration cap");
                DotsError::NumericNonConvergence { iterations }
            }
            BrentError::NonFinite { x, iterations } => {
                error!(target_score, bodyweight, %sex, x, iterations, "non-finite score during required-lift search");
                DotsError::NumericNonConvergence { iterations }
            }
        })?;

        debug!(
            target_score,
            bodyweight,
            %sex,
            lift = root.root,
            iterations = root.iterations,
            calls = root.function_calls,
            "required lift solved"
        );

        let lift = root.root;
        let residual = self.model.score(lift, bodyweight, sex)? - target_score;
        let in_bracket = lift >= bracket.lo && lift <= bracket.hi;
        if !in_bracket || residual.abs() > SCORE_RTOL * target_score.abs().max(1.0) {
            error!(target_score, lift, residual, "required lift failed its post-check");
            return Err(DotsError::NumericNonConvergence {
                iterations: root.iterations,
            });
        }

        Ok(lift)
    }
}

fn unsolvable(target_score: f64, bracket: Bracket) -> DotsError {
    DotsError::UnsolvableEquivalence {
        target_score,
        lo: bracket.lo,
        hi: bracket.hi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn solver() -> EquivalenceSolver {
        EquivalenceSolver::for_unit(MassUnit::Pound)
    }

    #[test]
    fn female_170_to_male_225() {
        let s = solver();
        let target = s.model().score(170.0, 170.0, Sex::Female).unwrap();
        let lift = s.required_lift(target, 225.0, Sex::Male).unwrap();

        // Same score means lift scales with the denominator ratio.
        let den_f = s.model().denominator(170.0, Sex::Female).unwrap();
        let den_m = s.model().denominator(225.0, Sex::Male).unwrap();
        let expected = 170.0 * den_m / den_f;
        assert!((lift - expected).abs() / expected < 1e-9, "{lift} vs {expected}");
    }

    #[test]
    fn round_trip_same_lifter() {
        let s = solver();
        for &(lift, bw, sex) in &[(100.0, 100.0, Sex::Female), (550.0, 198.0, Sex::Male), (1200.0, 400.0, Sex::Male)] {
            let score = s.model().score(lift, bw, sex).unwrap();
            let back = s.required_lift(score, bw, sex).unwrap();
            assert!((back - lift).abs() / lift < 1e-9, "{back} vs {lift}");
        }
    }

    #[test]
    fn score_too_high_is_unsolvable() {
        let err = solver().required_lift(10_000.0, 225.0, Sex::Male).unwrap_err();
        assert_eq!(
            err,
            DotsError::UnsolvableEquivalence {
                target_score: 10_000.0,
                lo: 50.0,
                hi: 2000.0
            }
        );
    }

    #[test]
    fn score_too_low_is_unsolvable() {
        assert!(matches!(
            solver().required_lift(1.0, 225.0, Sex::Male),
            Err(DotsError::UnsolvableEquivalence { .. })
        ));
    }

    #[test]
    fn target_at_bracket_edge_is_unsolvable() {
        // Strict sign check: f(lo) == 0 does not count as bracketed.
        let s = solver();
        let at_lo = s.model().score(50.0, 225.0, Sex::Male).unwrap();
        assert!(matches!(
            s.required_lift(at_lo, 225.0, Sex::Male),
            Err(DotsError::UnsolvableEquivalence { .. })
        ));
    }

    #[test]
    fn widened_bracket_recovers_out_of_range_target() {
        let s = solver();
        let target = s.model().score(3000.0, 225.0, Sex::Male).unwrap();
        assert!(s.required_lift(target, 225.0, Sex::Male).is_err());
        let lift = s
            .required_lift_in(target, 225.0, Sex::Male, Bracket::default().widened())
            .unwrap();
        assert!((lift - 3000.0).abs() < 1e-6);
    }

    #[test]
    fn domain_error_propagates_from_score() {
        assert!(matches!(
            solver().required_lift(100.0, 20.0, Sex::Male),
            Err(DotsError::DomainError { .. })
        ));
    }

    #[test]
    fn tiny_iteration_budget_reports_non_convergence() {
        let s = solver().with_options(BrentOptions {
            xtol: 0.0,
            rtol: 0.0,
            max_iter: 1,
        });
        let target = s.model().score(333.3, 181.0, Sex::Female).unwrap();
        assert!(matches!(
            s.required_lift(target, 181.0, Sex::Female),
            Err(DotsError::NumericNonConvergence { iterations: 1 })
        ));
    }

    #[test]
    fn invalid_bracket_is_rejected() {
        let bad = Bracket { lo: 500.0, hi: 100.0 };
        assert!(matches!(
            solver().required_lift_in(100.0, 200.0, Sex::Male, bad),
            Err(DotsError::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn required_lift_inverts_score(
            lift in 60.0f64..1900.0,
            bw in 100.0f64..400.0,
            male in any::<bool>(),
        ) {
            let sex = if male { Sex::Male } else { Sex::Female };
            let s = solver();
            let score = s.model().score(lift, bw, sex).unwrap();
            let back = s.required_lift(score, bw, sex).unwrap();
            prop_assert!((back - lift).abs() / lift < 1e-3);
        }
    }
}
