//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/solver code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{Curve, CurveConfig, LifterProfile, MassUnit};

/// One-line result of `dots score`.
pub fn format_score(lift: f64, lifter: &LifterProfile, unit: MassUnit, score: f64) -> String {
    let u = unit.label();
    format!(
        "{} {u} {} lifting {} {u} = {score:.2} DOTS",
        fmt_num(lifter.bodyweight),
        lifter.sex.noun(),
        fmt_num(lift),
    )
}

/// One-line result of `dots lift`.
pub fn format_required_lift(score: f64, lifter: &LifterProfile, unit: MassUnit, lift: f64) -> String {
    let u = unit.label();
    format!(
        "{} {u} {} needs to lift {lift:.2} {u} for {score:.2} DOTS",
        fmt_num(lifter.bodyweight),
        lifter.sex.noun(),
    )
}

/// Two-line result of `dots equiv`.
pub fn format_equivalence(
    lift: f64,
    lifter1: &LifterProfile,
    lifter2: &LifterProfile,
    unit: MassUnit,
    score: f64,
    target: f64,
) -> String {
    let u = unit.label();
    format!(
        "{}\n{} {u} {} needs to lift {target:.2} {u} for the same score",
        format_score(lift, lifter1, unit, score),
        fmt_num(lifter2.bodyweight),
        lifter2.sex.noun(),
    )
}

/// Header block for `dots curve`.
pub fn format_curve_summary(curve: &Curve, config: &CurveConfig) -> String {
    let u = curve.unit.label();
    let mut out = String::new();

    out.push_str("=== dots - DOTS Equivalence Curve ===\n");
    out.push_str(&format!(
        "Lifter 1: {} {u} {}\n",
        fmt_num(curve.lifter1.bodyweight),
        curve.lifter1.sex.display_name()
    ));
    out.push_str(&format!(
        "Lifter 2: {} {u} {}\n",
        fmt_num(curve.lifter2.bodyweight),
        curve.lifter2.sex.display_name()
    ));
    out.push_str(&format!(
        "Samples: n={} | lift=[{}, {}] {u} step {}\n",
        curve.len(),
        fmt_num(config.range.lo),
        fmt_num(config.range.hi),
        fmt_num(config.step),
    ));
    out.push_str(&format!(
        "Bracket: [{}, {}] {u}\n",
        fmt_num(config.bracket.lo),
        fmt_num(config.bracket.hi)
    ));
    if let Some((lo, hi)) = curve.target_range() {
        out.push_str(&format!("Equivalent: [{lo:.2}, {hi:.2}] {u}\n"));
    }
    out.push_str(&format!("DOTS: [{:.0}, {:.0}]\n", curve.score_min, curve.score_max));

    out
}

/// Table of up to `rows` evenly spaced points (always including both ends).
pub fn format_curve_table(curve: &Curve, rows: usize) -> String {
    let u = curve.unit.label();
    let mut out = String::new();

    let lift1 = format!("{} lift ({u})", curve.lifter1.sex.display_name());
    let lift2 = format!("{} lift ({u})", curve.lifter2.sex.display_name());
    out.push_str(format!("{lift1:>18} {:>10} {lift2:>18}\n", "DOTS").trim_end());
    out.push('\n');
    out.push_str(format!("{:->18} {:->10} {:->18}\n", "", "", "").trim_end());
    out.push('\n');

    for idx in pick_rows(curve.len(), rows) {
        let p = &curve.points[idx];
        out.push_str(&format!(
            "{:>18} {:>10.2} {:>18.2}\n",
            fmt_num(p.source_lift),
            p.source_score,
            p.target_lift
        ));
    }

    out
}

/// Evenly spaced indices into `0..len`, at most `rows` of them.
pub fn pick_rows(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 || rows == 0 {
        return Vec::new();
    }
    if rows >= len {
        return (0..len).collect();
    }
    if rows == 1 {
        return vec![0];
    }
    let mut out: Vec<usize> = (0..rows)
        .map(|i| ((i as f64 * (len - 1) as f64) / (rows - 1) as f64).round() as usize)
        .collect();
    out.dedup();
    out
}

/// Whole numbers without a decimal point, everything else with two.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EquivalencePoint, Sex};
    use pretty_assertions::assert_eq;

    fn female_170() -> LifterProfile {
        LifterProfile {
            bodyweight: 170.0,
            sex: Sex::Female,
        }
    }

    fn male_225() -> LifterProfile {
        LifterProfile {
            bodyweight: 225.0,
            sex: Sex::Male,
        }
    }

    #[test]
    fn score_line() {
        let line = format_score(170.0, &female_170(), MassUnit::Pound, 74.024287);
        assert_eq!(line, "170 lb woman lifting 170 lb = 74.02 DOTS");
    }

    #[test]
    fn equivalence_lines() {
        let txt = format_equivalence(170.0, &female_170(), &male_225(), MassUnit::Pound, 74.024287, 267.4513);
        assert_eq!(
            txt,
            "170 lb woman lifting 170 lb = 74.02 DOTS\n225 lb man needs to lift 267.45 lb for the same score"
        );
    }

    #[test]
    fn required_lift_line() {
        let line = format_required_lift(100.0, &male_225(), MassUnit::Kilogram, 361.3);
        assert_eq!(line, "225 kg man needs to lift 361.30 kg for 100.00 DOTS");
    }

    #[test]
    fn pick_rows_includes_both_ends() {
        assert_eq!(pick_rows(141, 5), vec![0, 35, 70, 105, 140]);
        assert_eq!(pick_rows(3, 10), vec![0, 1, 2]);
        assert_eq!(pick_rows(10, 1), vec![0]);
        assert!(pick_rows(0, 4).is_empty());
    }

    #[test]
    fn table_snapshot() {
        let curve = Curve {
            lifter1: female_170(),
            lifter2: male_225(),
            unit: MassUnit::Pound,
            points: vec![
                EquivalencePoint {
                    source_lift: 100.0,
                    source_score: 43.543698,
                    target_lift: 157.324,
                },
                EquivalencePoint {
                    source_lift: 105.0,
                    source_score: 45.720883,
                    target_lift: 165.19,
                },
            ],
            score_min: 44.0,
            score_max: 46.0,
            segment_fractions: vec![0.5],
            hover_text: vec![String::new(), String::new()],
        };
        let expected = concat!(
            "  Female lift (lb)       DOTS     Male lift (lb)\n",
            "------------------ ---------- ------------------\n",
            "               100      43.54             157.32\n",
            "               105      45.72             165.19\n",
        );
        assert_eq!(format_curve_table(&curve, 10), expected);
    }
}
