//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - equivalence curve, lifter 1's lift on x and lifter 2's lift on y
//! - each segment shaded by its color fraction (low → high DOTS score)
//! - optional highlighted point: `o`

use crate::domain::Curve;

/// Shading ramp from lowest to highest score.
const RAMP: [char; 6] = ['.', '-', '=', '+', '*', '#'];

/// Render an equivalence curve, optionally marking the point at `marker`.
pub fn render_ascii_plot(curve: &Curve, width: usize, height: usize, marker: Option<usize>) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = source_range(curve).unwrap_or_else(|| {
        let x = curve.points.first().map(|p| p.source_lift).unwrap_or(0.0);
        (x - 0.5, x + 0.5)
    });
    let (y_min, y_max) = match curve.target_range() {
        Some((lo, hi)) if hi > lo => pad_range(lo, hi, 0.05),
        Some((lo, _)) => (lo - 0.5, lo + 0.5),
        None => (0.0, 1.0),
    };

    let mut grid = vec![vec![' '; width]; height];
    let cells: Vec<(usize, usize)> = curve
        .points
        .iter()
        .map(|p| {
            (
                map_x(p.source_lift, x_min, x_max, width),
                map_y(p.target_lift, y_min, y_max, height),
            )
        })
        .collect();

    if let [(x, y)] = cells.as_slice() {
        grid[*y][*x] = RAMP[0];
    }
    for (i, pair) in cells.windows(2).enumerate() {
        let fraction = curve.segment_fractions.get(i).copied().unwrap_or(0.0);
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, shade(fraction));
    }

    if let Some(&(x, y)) = marker.and_then(|i| cells.get(i)) {
        grid[y][x] = 'o';
    }

    let u = curve.unit.label();
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} lift=[{x_min:.0}, {x_max:.0}] {u} | {} lift=[{y_min:.1}, {y_max:.1}] {u} | DOTS=[{:.0}, {:.0}]\n",
        curve.lifter1.sex.noun(),
        curve.lifter2.sex.noun(),
        curve.score_min,
        curve.score_max,
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!("Shade: {} low DOTS -> {} high DOTS\n", RAMP[0], RAMP[RAMP.len() - 1]));

    out
}

fn shade(fraction: f64) -> char {
    let f = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    RAMP[(f * (RAMP.len() - 1) as f64).round() as usize]
}

fn source_range(curve: &Curve) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in &curve.points {
        min_x = min_x.min(p.source_lift);
        max_x = max_x.max(p.source_lift);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Never overwrites a filled cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
