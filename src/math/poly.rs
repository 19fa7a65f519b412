//! Polynomial evaluation.

/// Evaluate a polynomial with coefficients ordered from the highest power down.
///
/// `horner(&[a, b, c], x) == a·x² + b·x + c`. An empty slice evaluates to 0.
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}
