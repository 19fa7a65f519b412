//! Brent's method for bracketed scalar root finding.
//!
//! This follows the classic `brentq` formulation (the one SciPy ships):
//!
//! - keep a bracketing "contrapoint" `xblk` with `f(xblk)` of opposite sign
//! - try inverse quadratic interpolation (or a secant step when only two
//!   distinct points are known)
//! - fall back to bisection whenever the interpolated step is not trusted
//!
//! The function being solved may itself fail (e.g. a formula evaluated
//! outside its domain); such failures are passed through untouched as
//! `BrentError::Eval`.

use std::cell::Cell;

/// Stopping rules for [`brentq`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentOptions {
    /// Absolute x tolerance.
    pub xtol: f64,
    /// Relative x tolerance (scaled by `|x|`).
    pub rtol: f64,
    /// Hard iteration cap.
    pub max_iter: usize,
}

impl Default for BrentOptions {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentRoot {
    pub root: f64,
    pub iterations: usize,
    pub function_calls: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrentError<E> {
    /// `f(lo)` and `f(hi)` have the same (non-zero) sign.
    NoSignChange { f_lo: f64, f_hi: f64 },
    /// The iteration cap was reached; `last` is the best estimate so far.
    NotConverged { iterations: usize, last: f64 },
    /// `f` returned a non-finite value at `x` during iteration `iterations`.
    NonFinite { x: f64, iterations: usize },
    Eval(E),
}

/// Find a root of `f` in `[lo, hi]`.
///
/// Requires `f(lo)` and `f(hi)` to bracket a root (opposite signs, or one of
/// them exactly zero).
pub fn brentq<E, F>(mut f: F, lo: f64, hi: f64, opts: BrentOptions) -> Result<BrentRoot, BrentError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let calls = Cell::new(0usize);
    let iters = Cell::new(0usize);
    let mut eval = |x: f64| -> Result<f64, BrentError<E>> {
        calls.set(calls.get() + 1);
        let y = f(x).map_err(BrentError::Eval)?;
        if !y.is_finite() {
            return Err(BrentError::NonFinite {
                x,
                iterations: iters.get(),
            });
        }
        Ok(y)
    };

    let mut xpre = lo;
    let mut xcur = hi;
    let mut xblk = 0.0;
    let mut fpre = eval(xpre)?;
    let mut fcur = eval(xcur)?;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    if fpre * fcur > 0.0 {
        return Err(BrentError::NoSignChange { f_lo: fpre, f_hi: fcur });
    }
    if fpre == 0.0 {
        return Ok(BrentRoot { root: xpre, iterations: 0, function_calls: calls.get() });
    }
    if fcur == 0.0 {
        return Ok(BrentRoot { root: xcur, iterations: 0, function_calls: calls.get() });
    }

    for iteration in 0..opts.max_iter {
        iters.set(iteration + 1);
        if fpre * fcur < 0.0 {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (opts.xtol + opts.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(BrentRoot {
                root: xcur,
                iterations: iteration,
                function_calls: calls.get(),
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = eval(xcur)?;
    }

    Err(BrentError::NotConverged {
        iterations: opts.max_iter,
        last: xcur,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(x: f64) -> Result<f64, ()> {
        Ok(x)
    }

    #[test]
    fn finds_sqrt_two() {
        let root = brentq(|x| ok(x * x - 2.0), 0.0, 2.0, BrentOptions::default()).unwrap();
        assert!((root.root - 2.0_f64.sqrt()).abs() < 1e-10, "got {}", root.root);
        assert!(root.iterations < 20);
    }

    #[test]
    fn works_for_decreasing_functions() {
        let root = brentq(|x| ok(3.0 - x), 0.0, 10.0, BrentOptions::default()).unwrap();
        assert!((root.root - 3.0).abs() < 1e-10);
    }

    #[test]
    fn endpoint_root_is_returned_immediately() {
        let root = brentq(|x| ok(x - 1.0), 1.0, 5.0, BrentOptions::default()).unwrap();
        assert_eq!(root.root, 1.0);
        assert_eq!(root.iterations, 0);
    }

    #[test]
    fn same_sign_is_rejected() {
        let err = brentq(|x| ok(x * x + 1.0), -1.0, 1.0, BrentOptions::default()).unwrap_err();
        assert!(matches!(err, BrentError::NoSignChange { .. }));
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let opts = BrentOptions {
            xtol: 0.0,
            rtol: 0.0,
            max_iter: 3,
        };
        let err = brentq(|x| ok(x.powi(3) - 0.3), 0.0, 1.0, opts).unwrap_err();
        assert!(matches!(err, BrentError::NotConverged { iterations: 3, .. }));
    }

    #[test]
    fn evaluation_errors_pass_through() {
        let err = brentq(
            |x| if x > 1.5 { Err("out of domain") } else { Ok(x - 1.0) },
            0.0,
            2.0,
            BrentOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, BrentError::Eval("out of domain"));
    }

    #[test]
    fn non_finite_value_reports_its_iteration() {
        // Endpoints, one finite interior step, then NaN on the second step.
        let mut calls = 0;
        let err = brentq(
            |x| {
                calls += 1;
                match calls {
                    1 | 2 => ok(x - 1.5),
                    3 => ok(0.1),
                    _ => ok(f64::NAN),
                }
            },
            0.0,
            2.0,
            BrentOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BrentError::NonFinite { iterations: 2, .. }), "{err:?}");
    }
}
