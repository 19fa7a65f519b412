//! Shared domain types.
//!
//! These types are intentionally kept small, `Copy` where possible and
//! serializable so they can be:
//!
//! - passed freely between rayon workers during curve sampling
//! - printed as JSON for an external chart layer
//! - rebuilt from CLI flags on every run (nothing is retained between runs)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DotsError;

/// Pounds to kilograms.
pub const LB_TO_KG: f64 = 0.45359237;

/// Lifter sex; selects the DOTS coefficient tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[value(alias = "m")]
    Male,
    #[value(alias = "f")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Noun used in hover text ("225 lb man needs to lift ...").
    pub fn noun(self) -> &'static str {
        match self {
            Sex::Male => "man",
            Sex::Female => "woman",
        }
    }

    pub fn toggled(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// Mass unit used for both lifts and bodyweights at the API boundary.
///
/// The polynomial itself is always evaluated in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    #[value(name = "lb", alias = "lbs")]
    #[serde(rename = "lb")]
    Pound,
    #[value(name = "kg", alias = "kgs")]
    #[serde(rename = "kg")]
    Kilogram,
}

impl MassUnit {
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            MassUnit::Pound => value * LB_TO_KG,
            MassUnit::Kilogram => value,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MassUnit::Pound => "lb",
            MassUnit::Kilogram => "kg",
        }
    }
}

/// Quartic denominator coefficients `(A, B, C, D, E)`:
///
/// `A·bw⁴ + B·bw³ + C·bw² + D·bw + E` with `bw` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

const MALE_COEFFICIENTS: ScoreCoefficients = ScoreCoefficients {
    a: -0.000001093,
    b: 0.0007391293,
    c: -0.1918759221,
    d: 24.0900756,
    e: -307.75076,
};

const FEMALE_COEFFICIENTS: ScoreCoefficients = ScoreCoefficients {
    a: -0.0000010706,
    b: 0.0005158568,
    c: -0.1126655495,
    d: 13.6175032,
    e: -57.96288,
};

impl ScoreCoefficients {
    pub fn for_sex(sex: Sex) -> &'static ScoreCoefficients {
        match sex {
            Sex::Male => &MALE_COEFFICIENTS,
            Sex::Female => &FEMALE_COEFFICIENTS,
        }
    }

    /// Coefficients ordered from the highest power down (Horner order).
    pub fn as_descending(&self) -> [f64; 5] {
        [self.a, self.b, self.c, self.d, self.e]
    }
}

/// One lifter: bodyweight (caller's unit) and sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifterProfile {
    pub bodyweight: f64,
    pub sex: Sex,
}

impl LifterProfile {
    pub fn new(bodyweight: f64, sex: Sex) -> Result<Self, DotsError> {
        let profile = Self { bodyweight, sex };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), DotsError> {
        if !(self.bodyweight.is_finite() && self.bodyweight > 0.0) {
            return Err(DotsError::invalid(format!(
                "bodyweight must be finite and > 0 (got {})",
                self.bodyweight
            )));
        }
        Ok(())
    }
}

/// Root-finding search interval for the required lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub lo: f64,
    pub hi: f64,
}

impl Default for Bracket {
    fn default() -> Self {
        Self { lo: 50.0, hi: 2000.0 }
    }
}

impl Bracket {
    pub fn new(lo: f64, hi: f64) -> Result<Self, DotsError> {
        let bracket = Self { lo, hi };
        bracket.validate()?;
        Ok(bracket)
    }

    pub fn validate(&self) -> Result<(), DotsError> {
        if !(self.lo.is_finite() && self.hi.is_finite() && self.lo > 0.0 && self.hi > self.lo) {
            return Err(DotsError::invalid(format!(
                "invalid bracket [{}, {}] (must be finite, > 0, and hi > lo)",
                self.lo, self.hi
            )));
        }
        Ok(())
    }

    /// The bracket used for the single retry after an unsolvable search.
    pub fn widened(&self) -> Bracket {
        Bracket {
            lo: self.lo / 4.0,
            hi: self.hi * 4.0,
        }
    }
}

/// Sampling range for lifter 1's lifts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftRange {
    pub lo: f64,
    pub hi: f64,
}

impl Default for LiftRange {
    fn default() -> Self {
        Self { lo: 100.0, hi: 800.0 }
    }
}

impl LiftRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, DotsError> {
        let range = Self { lo, hi };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), DotsError> {
        if !(self.lo.is_finite() && self.hi.is_finite() && self.lo > 0.0 && self.hi >= self.lo) {
            return Err(DotsError::invalid(format!(
                "invalid lift range [{}, {}] (must be finite, > 0, and hi >= lo)",
                self.lo, self.hi
            )));
        }
        Ok(())
    }
}

/// One sampled row of an equivalence curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalencePoint {
    /// Lifter 1's lift.
    pub source_lift: f64,
    /// DOTS score of that lift (shared by both lifters).
    pub source_score: f64,
    /// Lift lifter 2 needs for the same score.
    pub target_lift: f64,
}

impl EquivalencePoint {
    /// Whole-number view used for hover text and color normalization.
    pub fn rounded(&self) -> RoundedPoint {
        RoundedPoint {
            source_lift: self.source_lift.round() as i64,
            source_score: self.source_score.round() as i64,
            target_lift: self.target_lift.round() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedPoint {
    pub source_lift: i64,
    pub source_score: i64,
    pub target_lift: i64,
}

/// A fully computed equivalence curve.
///
/// `score_min` / `score_max` are taken over the *rounded* scores, the same
/// values that drive `segment_fractions` and `hover_text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub lifter1: LifterProfile,
    pub lifter2: LifterProfile,
    pub unit: MassUnit,
    pub points: Vec<EquivalencePoint>,
    pub score_min: f64,
    pub score_max: f64,
    /// One value in `[0, 1]` per adjacent pair of points.
    pub segment_fractions: Vec<f64>,
    /// One description per point.
    pub hover_text: Vec<String>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rounded(&self) -> impl Iterator<Item = RoundedPoint> + '_ {
        self.points.iter().map(EquivalencePoint::rounded)
    }

    /// `(min, max)` of the target lifts, or `None` for an empty curve.
    pub fn target_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for p in &self.points {
            lo = lo.min(p.target_lift);
            hi = hi.max(p.target_lift);
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct CurveConfig {
    pub lifter1: LifterProfile,
    pub lifter2: LifterProfile,
    pub unit: MassUnit,
    pub range: LiftRange,
    pub step: f64,
    pub bracket: Bracket,
    /// Evaluate samples on the rayon pool.
    pub parallel: bool,

    pub rows: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            lifter1: LifterProfile {
                bodyweight: 170.0,
                sex: Sex::Female,
            },
            lifter2: LifterProfile {
                bodyweight: 225.0,
                sex: Sex::Male,
            },
            unit: MassUnit::Pound,
            range: LiftRange::default(),
            step: 1.0,
            bracket: Bracket::default(),
            parallel: true,
            rows: 15,
            plot: true,
            plot_width: 100,
            plot_height: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pound_conversion_uses_exact_factor() {
        assert_eq!(MassUnit::Pound.to_kg(1.0), 0.45359237);
        assert_eq!(MassUnit::Kilogram.to_kg(82.5), 82.5);
    }

    #[test]
    fn coefficient_table_is_keyed_by_sex() {
        assert_eq!(ScoreCoefficients::for_sex(Sex::Male).e, -307.75076);
        assert_eq!(ScoreCoefficients::for_sex(Sex::Female).d, 13.6175032);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        let p = EquivalencePoint {
            source_lift: 100.5,
            source_score: 43.49,
            target_lift: 157.5,
        };
        assert_eq!(
            p.rounded(),
            RoundedPoint {
                source_lift: 101,
                source_score: 43,
                target_lift: 158
            }
        );
    }

    #[test]
    fn invalid_profiles_and_ranges_are_rejected() {
        assert!(LifterProfile::new(0.0, Sex::Male).is_err());
        assert!(LifterProfile::new(f64::NAN, Sex::Female).is_err());
        assert!(LiftRange::new(800.0, 100.0).is_err());
        assert!(LiftRange::new(100.0, 100.0).is_ok());
        assert!(Bracket::new(100.0, 100.0).is_err());
    }

    #[test]
    fn widened_bracket_contains_original() {
        let b = Bracket::default().widened();
        assert!(b.lo < 50.0 && b.hi > 2000.0);
    }

    #[test]
    fn units_serialize_as_labels() {
        let json = serde_json::to_string(&MassUnit::Pound).unwrap();
        assert_eq!(json, "\"lb\"");
        let json = serde_json::to_string(&Sex::Female).unwrap();
        assert_eq!(json, "\"female\"");
    }
}
