//! DOTS score evaluation.
//!
//! `score = lift_kg · 500 / (A·bw⁴ + B·bw³ + C·bw² + D·bw + E)` with `bw` the
//! bodyweight in kilograms and `(A..E)` picked by sex.
//!
//! The denominator is a quartic that is only positive over a band of
//! realistic bodyweights (roughly 20–300 kg depending on sex). Outside that band
//! the score is meaningless, so it is reported as a `DomainError` instead of
//! being returned.

use crate::domain::{MassUnit, ScoreCoefficients, Sex};
use crate::error::DotsError;
use crate::math::horner;

/// Scale factor applied to the lift before dividing by the denominator.
const DOTS_SCALE: f64 = 500.0;

/// Raw quartic denominator for a bodyweight in kilograms (unchecked).
pub fn dots_denominator_kg(bodyweight_kg: f64, sex: Sex) -> f64 {
    horner(&ScoreCoefficients::for_sex(sex).as_descending(), bodyweight_kg)
}

/// Closed-form DOTS score with both masses in kilograms (unchecked).
pub fn dots_score_kg(lift_kg: f64, bodyweight_kg: f64, sex: Sex) -> f64 {
    lift_kg * DOTS_SCALE / dots_denominator_kg(bodyweight_kg, sex)
}

/// DOTS scoring in the caller's mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreModel {
    unit: MassUnit,
}

impl ScoreModel {
    pub const fn new(unit: MassUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> MassUnit {
        self.unit
    }

    /// Checked denominator for a bodyweight in the model's unit.
    pub fn denominator(&self, bodyweight: f64, sex: Sex) -> Result<f64, DotsError> {
        if !(bodyweight.is_finite() && bodyweight > 0.0) {
            return Err(DotsError::invalid(format!(
                "bodyweight must be finite and > 0 (got {bodyweight})"
            )));
        }

        let denominator = dots_denominator_kg(self.unit.to_kg(bodyweight), sex);
        if denominator <= 0.0 {
            return Err(DotsError::DomainError {
                bodyweight,
                sex,
                denominator,
            });
        }
        Ok(denominator)
    }

    /// DOTS score for `lift` at `bodyweight` (both in the model's unit).
    pub fn score(&self, lift: f64, bodyweight: f64, sex: Sex) -> Result<f64, DotsError> {
        if !(lift.is_finite() && lift > 0.0) {
            return Err(DotsError::invalid(format!("lift must be finite and > 0 (got {lift})")));
        }
        let denominator = self.denominator(bodyweight, sex)?;
        Ok(self.unit.to_kg(lift) * DOTS_SCALE / denominator)
    }
}
