//! Presentation data derived from sampled points.
//!
//! Everything here works on the rounded view of each point so the color of a
//! segment and the text shown for its endpoints agree.

use crate::domain::{EquivalencePoint, LifterProfile, MassUnit, RoundedPoint};

/// `(min, max)` of the rounded scores. `(0, 0)` for an empty slice.
pub fn rounded_score_bounds(rounded: &[RoundedPoint]) -> (f64, f64) {
    let mut iter = rounded.iter().map(|p| p.source_score);
    let Some(first) = iter.next() else {
        return (0.0, 0.0);
    };
    let (lo, hi) = iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
    (lo as f64, hi as f64)
}

/// Normalized color fraction for every adjacent pair of points.
///
/// A segment is represented by the mean of its two rounded scores. When all
/// scores round to the same value the fraction is 0.
pub fn segment_fractions(rounded: &[RoundedPoint], score_min: f64, score_max: f64) -> Vec<f64> {
    let span = score_max - score_min;
    rounded
        .windows(2)
        .map(|pair| {
            if span <= 0.0 {
                return 0.0;
            }
            let avg = (pair[0].source_score + pair[1].source_score) as f64 / 2.0;
            ((avg - score_min) / span).clamp(0.0, 1.0)
        })
        .collect()
}

/// Two-line description of one point.
pub fn hover_text(
    lifter1: &LifterProfile,
    lifter2: &LifterProfile,
    unit: MassUnit,
    point: &RoundedPoint,
) -> String {
    let u = unit.label();
    format!(
        "{} {u} {} lifting {} {u} = {} DOTS score\n{} {u} {} needs to lift {} {u} for the same score",
        fmt_mass(lifter1.bodyweight),
        lifter1.sex.noun(),
        point.source_lift,
        point.source_score,
        fmt_mass(lifter2.bodyweight),
        lifter2.sex.noun(),
        point.target_lift,
    )
}

/// Round every point and derive bounds, fractions and hover text in one pass.
pub(crate) fn annotate(
    lifter1: &LifterProfile,
    lifter2: &LifterProfile,
    unit: MassUnit,
    points: &[EquivalencePoint],
) -> Annotations {
    let rounded: Vec<RoundedPoint> = points.iter().map(EquivalencePoint::rounded).collect();
    let (score_min, score_max) = rounded_score_bounds(&rounded);
    let fractions = segment_fractions(&rounded, score_min, score_max);
    let hover = rounded
        .iter()
        .map(|p| hover_text(lifter1, lifter2, unit, p))
        .collect();

    Annotations {
        score_min,
        score_max,
        fractions,
        hover,
    }
}

pub(crate) struct Annotations {
    pub score_min: f64,
    pub score_max: f64,
    pub fractions: Vec<f64>,
    pub hover: Vec<String>,
}

/// Whole numbers print without a decimal point; anything else keeps one decimal.
fn fmt_mass(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sex;
    use pretty_assertions::assert_eq;

    fn rp(score: i64) -> RoundedPoint {
        RoundedPoint {
            source_lift: 0,
            source_score: score,
            target_lift: 0,
        }
    }

    #[test]
    fn fractions_use_segment_means() {
        let rounded = [rp(40), rp(50), rp(60)];
        let (lo, hi) = rounded_score_bounds(&rounded);
        assert_eq!((lo, hi), (40.0, 60.0));
        assert_eq!(segment_fractions(&rounded, lo, hi), vec![0.25, 0.75]);
    }

    #[test]
    fn flat_scores_give_zero_fraction() {
        let rounded = [rp(44), rp(44), rp(44)];
        let (lo, hi) = rounded_score_bounds(&rounded);
        let fractions = segment_fractions(&rounded, lo, hi);
        assert_eq!(fractions, vec![0.0, 0.0]);
    }

    #[test]
    fn single_point_has_no_segments() {
        let rounded = [rp(44)];
        let (lo, hi) = rounded_score_bounds(&rounded);
        assert!(segment_fractions(&rounded, lo, hi).is_empty());
    }

    #[test]
    fn hover_text_embeds_rounded_values() {
        let l1 = LifterProfile {
            bodyweight: 170.0,
            sex: Sex::Female,
        };
        let l2 = LifterProfile {
            bodyweight: 225.0,
            sex: Sex::Male,
        };
        let point = RoundedPoint {
            source_lift: 170,
            source_score: 74,
            target_lift: 267,
        };
        assert_eq!(
            hover_text(&l1, &l2, MassUnit::Pound, &point),
            "170 lb woman lifting 170 lb = 74 DOTS score\n225 lb man needs to lift 267 lb for the same score"
        );
    }

    #[test]
    fn fractional_bodyweight_keeps_one_decimal() {
        assert_eq!(fmt_mass(82.5), "82.5");
        assert_eq!(fmt_mass(100.0), "100");
    }
}
