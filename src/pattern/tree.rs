use super::params::{ColorMode, TreeParameters};
use crate::canvas::{StrokeStyle, Surface};
use crate::color::{BACKGROUND, Hsl};
use std::f32::consts::PI;

/// Levels this close to the trunk get a glow pass.
const GLOW_LEVELS: i64 = 3;
const GLOW_BLUR: f32 = 10.0;
const CHILD_THICKNESS: f32 = 0.7;
const BASE_MARGIN: f32 = 50.0;

struct Branch {
    x: f32,
    y: f32,
    length: f32,
    angle: f32,
    depth: u32,
    thickness: f32,
}

pub fn generate(
    surface: &mut dyn Surface,
    width: usize,
    height: usize,
    params: &TreeParameters,
    color: &ColorMode,
) {
    surface.clear(BACKGROUND);

    let trunk = Branch {
        x: width as f32 / 2.0,
        y: height as f32 - BASE_MARGIN,
        length: height as f32 / 4.0,
        angle: PI / 2.0,
        depth: params.depth,
        thickness: params.thickness,
    };
    draw_branch(surface, params, color, trunk);
}

fn draw_branch(surface: &mut dyn Surface, params: &TreeParameters, color: &ColorMode, b: Branch) {
    let end_x = b.x + b.length * b.angle.cos();
    let end_y = b.y - b.length * b.angle.sin();

    let style = StrokeStyle::solid(branch_color(params.depth, b.depth, color), b.thickness);
    surface.begin_path();
    surface.move_to(b.x, b.y);
    surface.line_to(end_x, end_y);
    surface.stroke(&style);

    if b.depth as i64 > params.depth as i64 - GLOW_LEVELS {
        surface.stroke(&style.with_glow(GLOW_BLUR));
    }

    if b.depth == 0 {
        return;
    }

    let length = b.length * params.length_ratio;
    let thickness = b.thickness * CHILD_THICKNESS;
    let step = params.branch_angle_degrees * PI / 180.0;
    let center = (params.branch_count as f32 - 1.0) / 2.0;
    for i in 0..params.branch_count {
        draw_branch(
            surface,
            params,
            color,
            Branch {
                x: end_x,
                y: end_y,
                length,
                angle: b.angle + step * (i as f32 - center),
                depth: b.depth - 1,
                thickness,
            },
        );
    }
}

/// Stroke color for a branch `remaining` levels above the leaves.
pub fn branch_color(total_depth: u32, remaining: u32, color: &ColorMode) -> Hsl {
    // A depth-0 tree is a lone trunk; treat it as fully grown.
    let frac = if total_depth == 0 {
        1.0
    } else {
        remaining as f32 / total_depth as f32
    };
    if color.rainbow {
        Hsl::new(color.base_hue + frac * 120.0, 70.0, 50.0 + remaining as f32 * 2.0)
    } else {
        Hsl::new(color.base_hue, 60.0, 30.0 + frac * 50.0)
    }
}

/// Segments a tree with these parameters strokes, glow passes excluded.
pub fn segment_count(params: &TreeParameters) -> u64 {
    let b = params.branch_count as u64;
    let mut level = 1u64;
    let mut total = 0u64;
    for _ in 0..=params.depth {
        total = total.saturating_add(level);
        level = level.saturating_mul(b);
    }
    total
}
