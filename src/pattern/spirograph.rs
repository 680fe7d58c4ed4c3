use super::params::{ColorMode, SpirographParameters};
use crate::canvas::{LineCap, Paint, StrokeStyle, Surface};
use crate::color::{BACKGROUND, Hsl};
use std::f32::consts::PI;

/// Ten full turns regardless of the radius ratio, so some curves stay open.
const SWEEP: f32 = 20.0 * PI;
const LINE_WIDTH: f32 = 2.0;
const GLOW_BLUR: f32 = 15.0;
const SATURATION: f32 = 80.0;
const LIGHTNESS: f32 = 60.0;

/// Curve samples `0..=iterations` around `(cx, cy)`.
///
/// `inner_radius` must be non-zero; validation rejects it before it gets here.
pub fn sample_points(cx: f32, cy: f32, params: &SpirographParameters) -> Vec<(f32, f32)> {
    let big_r = params.outer_radius;
    let r = params.inner_radius;
    let d = params.offset;
    let diff = big_r - r;
    let ratio = diff / r;
    let n = params.iterations.max(1);

    (0..=n)
        .map(|i| {
            let t = (i as f32 / n as f32) * SWEEP;
            let x = cx + diff * t.cos() + d * (ratio * t).cos();
            let y = cy + diff * t.sin() - d * (ratio * t).sin();
            (x, y)
        })
        .collect()
}

pub fn generate(
    surface: &mut dyn Surface,
    width: usize,
    height: usize,
    params: &SpirographParameters,
    color: &ColorMode,
) {
    surface.clear(BACKGROUND);

    let points = sample_points(width as f32 / 2.0, height as f32 / 2.0, params);
    let Some((&first, rest)) = points.split_first() else {
        return;
    };

    surface.begin_path();
    surface.move_to(first.0, first.1);
    for &(x, y) in rest {
        surface.line_to(x, y);
    }

    let paint = if color.rainbow {
        Paint::HueSweep {
            from: color.base_hue,
            to: color.base_hue + 360.0,
            s: SATURATION,
            l: LIGHTNESS,
        }
    } else {
        Paint::Solid(Hsl::new(color.base_hue, SATURATION, LIGHTNESS))
    };
    let style = StrokeStyle {
        paint,
        width: LINE_WIDTH,
        cap: LineCap::Round,
        alpha: 1.0,
        glow: None,
    };
    surface.stroke(&style);
    surface.stroke(&style.with_glow(GLOW_BLUR));
}
