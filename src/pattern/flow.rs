use super::RandomSource;
use super::noise;
use super::params::{ColorMode, FlowFieldParameters};
use crate::canvas::{StrokeStyle, Surface};
use crate::color::{BACKGROUND, Hsl};
use std::f32::consts::PI;

/// Opacity of the backdrop wash laid over the previous frame. Trails fade
/// instead of being cleared.
pub const FADE_ALPHA: f32 = 0.05;
const LINE_WIDTH: f32 = 1.0;
const SATURATION: f32 = 80.0;
const LIGHTNESS: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
}

impl Particle {
    pub fn spawn(width: usize, height: usize, rng: &mut dyn RandomSource) -> Self {
        Self {
            x: wrap(rng.next_f32() * width as f32, width as f32),
            y: wrap(rng.next_f32() * height as f32, height as f32),
        }
    }

    /// Moves one step along the field and wraps toroidally.
    ///
    /// Returns the unwrapped target so callers can stroke the step without a
    /// segment spanning the whole surface when the particle crosses an edge.
    pub fn step(
        &mut self,
        params: &FlowFieldParameters,
        width: usize,
        height: usize,
        rng: &mut dyn RandomSource,
    ) -> (f32, f32) {
        let n = noise::sample(self.x * params.noise_scale, self.y * params.noise_scale);
        let mut angle = n * 4.0 * PI;
        if params.jitter > 0.0 {
            angle += (rng.next_f32() - 0.5) * params.jitter;
        }
        let tx = self.x + angle.cos() * params.flow_strength;
        let ty = self.y + angle.sin() * params.flow_strength;
        self.x = wrap(tx, width as f32);
        self.y = wrap(ty, height as f32);
        (tx, ty)
    }
}

/// Positions after each of `params.step_count` steps from `start`.
pub fn trace(
    start: Particle,
    params: &FlowFieldParameters,
    width: usize,
    height: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Particle> {
    let mut p = start;
    (0..params.step_count)
        .map(|_| {
            p.step(params, width, height, rng);
            p
        })
        .collect()
}

pub fn generate(
    surface: &mut dyn Surface,
    width: usize,
    height: usize,
    params: &FlowFieldParameters,
    color: &ColorMode,
    rng: &mut dyn RandomSource,
) {
    if width == 0 || height == 0 {
        return;
    }
    surface.fill_rect(0.0, 0.0, width as f32, height as f32, BACKGROUND, FADE_ALPHA);

    let steps = params.step_count;
    for _ in 0..params.particle_count {
        let mut p = Particle::spawn(width, height, rng);
        for step in 0..steps {
            let (x0, y0) = (p.x, p.y);
            let (x1, y1) = p.step(params, width, height, rng);

            let hsl = if color.rainbow {
                Hsl::new(
                    color.base_hue + step as f32 / steps as f32 * 360.0,
                    SATURATION,
                    LIGHTNESS,
                )
            } else {
                Hsl::new(color.base_hue, SATURATION, LIGHTNESS)
            };

            surface.begin_path();
            surface.move_to(x0, y0);
            surface.line_to(x1, y1);
            surface.stroke(&StrokeStyle::solid(hsl, LINE_WIDTH).with_alpha(params.alpha));
        }
    }
}

/// Wraps `v` into `[0, size)`.
pub fn wrap(v: f32, size: f32) -> f32 {
    let r = v.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs.
    if r >= size { 0.0 } else { r }
}
