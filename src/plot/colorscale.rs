//! Viridis colorscale sampling.
//!
//! The curve only produces a fraction in `[0, 1]` per segment; this maps such a
//! fraction to RGB by linear interpolation between ten evenly spaced Viridis
//! anchors (the same anchors Plotly uses for its `Viridis` scale).

const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

/// Sample Viridis at `fraction` (clamped to `[0, 1]`; NaN maps to the low end).
pub fn viridis(fraction: f64) -> (u8, u8, u8) {
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let pos = f * (VIRIDIS.len() - 1) as f64;
    let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let u = pos - i as f64;

    let (r0, g0, b0) = VIRIDIS[i];
    let (r1, g1, b1) = VIRIDIS[i + 1];
    (lerp(r0, r1, u), lerp(g0, g1, u), lerp(b0, b1, u))
}

fn lerp(a: u8, b: u8, u: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * u).round().clamp(0.0, 255.0) as u8
}
