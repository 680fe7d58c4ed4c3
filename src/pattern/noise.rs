//! Smooth pseudo-noise shared by the flow field.
//!
//! Three sine/cosine products at 1x, 2x and 3x frequency with amplitudes
//! 1, 0.5 and 0.25. The higher octaves are phase shifted by 10 and 20 so the
//! sum doesn't line up along the axes. Band limited and continuous, but not
//! statistically uniform.

/// Sum of the octave amplitudes; `sample` never leaves `[-NOISE_BOUND, NOISE_BOUND]`.
pub const NOISE_BOUND: f32 = 1.75;

/// Samples the field. Pure: identical inputs give bit-identical outputs.
pub fn sample(x: f32, y: f32) -> f32 {
    let a = x.sin() * y.cos();
    let b = 0.5 * (2.0 * x + 10.0).sin() * (2.0 * y + 10.0).cos();
    let c = 0.25 * (3.0 * x + 20.0).sin() * (3.0 * y + 20.0).cos();
    a + b + c
}
