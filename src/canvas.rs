use crate::color::{Hsl, Rgb};
use std::fmt;

/// Largest canvas edge we agree to allocate.
pub const MAX_DIMENSION: usize = 8192;

const GLOW_GAIN: f32 = 0.55;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Hsl),
    /// Hue runs linearly from `from` to `to` across the segments of the stroked path.
    HueSweep { from: f32, to: f32, s: f32, l: f32 },
}

impl Paint {
    /// Color of segment `idx` out of `count` segments.
    pub fn color_at(&self, idx: usize, count: usize) -> Rgb {
        match *self {
            Self::Solid(hsl) => hsl.to_rgb(),
            Self::HueSweep { from, to, s, l } => {
                let frac = if count == 0 { 0.0 } else { idx as f32 / count as f32 };
                Hsl::new(from + (to - from) * frac, s, l).to_rgb()
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub paint: Paint,
    pub width: f32,
    pub cap: LineCap,
    pub alpha: f32,
    /// Blur radius of a soft halo drawn around the stroke.
    pub glow: Option<f32>,
}

impl StrokeStyle {
    pub fn solid(color: Hsl, width: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            cap: LineCap::Round,
            alpha: 1.0,
            glow: None,
        }
    }

    pub fn with_glow(self, blur: f32) -> Self {
        Self {
            glow: Some(blur),
            ..self
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid surface dimensions {width}x{height} (each side must be 1..={MAX_DIMENSION})"
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Drawing operations the pattern generators emit.
///
/// Paths follow the usual 2-D canvas model: `begin_path` discards the current
/// path, `move_to` starts a sub-path, `line_to` extends it, and `stroke` paints
/// the current path without consuming it, so a second `stroke` re-paints the
/// identical geometry.
pub trait Surface {
    fn size(&self) -> (usize, usize);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn stroke(&mut self, style: &StrokeStyle);

    fn clear(&mut self, color: Rgb) {
        let (w, h) = self.size();
        self.fill_rect(0.0, 0.0, w as f32, h as f32, color, 1.0);
    }
}

#[derive(Default)]
struct PathBuilder {
    subpaths: Vec<Vec<(f32, f32)>>,
}

impl PathBuilder {
    fn clear(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        match self.subpaths.last_mut() {
            Some(sp) => sp.push((x, y)),
            // A bare line_to acts as move_to, as on an HTML canvas.
            None => self.subpaths.push(vec![(x, y)]),
        }
    }

    fn segment_count(&self) -> usize {
        self.subpaths
            .iter()
            .map(|sp| sp.len().saturating_sub(1))
            .sum()
    }
}

/// RGBA8 raster surface, row-major, 4 bytes per pixel.
///
/// Drawing happens in logical units: every coordinate and stroke width is
/// multiplied by `scale` before it reaches the pixel grid, so a small
/// terminal-sized buffer can host patterns laid out for a larger area.
pub struct Canvas {
    w: usize,
    h: usize,
    scale: f32,
    pixels: Vec<u8>,
    path: PathBuilder,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Result<Self, SurfaceError> {
        check_dimensions(w, h)?;
        Ok(Self {
            w,
            h,
            scale: 1.0,
            pixels: opaque_black(w * h),
            path: PathBuilder::default(),
        })
    }

    /// Reallocates the buffer. Existing pixels are discarded.
    pub fn resize(&mut self, w: usize, h: usize) -> Result<(), SurfaceError> {
        check_dimensions(w, h)?;
        if w != self.w || h != self.h {
            self.w = w;
            self.h = h;
            self.pixels = opaque_black(w * h);
        }
        Ok(())
    }

    /// Pixels per logical unit. Non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 && scale.is_finite() {
            self.scale = scale;
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn pixels_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = (y * self.w + x) * 4;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    #[inline]
    fn blend(&mut self, x: usize, y: usize, c: Rgb, a: f32) {
        if a <= 0.0 {
            return;
        }
        let a = a.min(1.0);
        let i = (y * self.w + x) * 4;
        let px = &mut self.pixels[i..i + 4];
        px[0] = mix(px[0], c.r, a);
        px[1] = mix(px[1], c.g, a);
        px[2] = mix(px[2], c.b, a);
        px[3] = 255;
    }

    fn stroke_segment(&mut self, p0: (f32, f32), p1: (f32, f32), c: Rgb, style: &StrokeStyle) {
        let r = (style.width * self.scale * 0.5).max(0.5);
        let blur = style.glow.unwrap_or(0.0).max(0.0) * self.scale;
        let reach = r + blur + 1.0;

        let min_x = (p0.0.min(p1.0) - reach).floor().max(0.0);
        let min_y = (p0.1.min(p1.1) - reach).floor().max(0.0);
        let max_x = (p0.0.max(p1.0) + reach).ceil().min(self.w as f32);
        let max_y = (p0.1.max(p1.1) + reach).ceil().min(self.h as f32);
        if !(min_x < max_x && min_y < max_y) {
            return;
        }

        for y in min_y as usize..max_y as usize {
            for x in min_x as usize..max_x as usize {
                let (d, t) = segment_distance((x as f32 + 0.5, y as f32 + 0.5), p0, p1);
                if style.cap == LineCap::Butt && !(0.0..=1.0).contains(&t) {
                    continue;
                }
                let core = (r + 0.5 - d).clamp(0.0, 1.0);
                let cov = if blur > 0.0 && core < 1.0 {
                    let halo = ((r + blur - d) / blur).clamp(0.0, 1.0);
                    core.max(halo * halo * GLOW_GAIN)
                } else {
                    core
                };
                self.blend(x, y, c, cov * style.alpha);
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (usize, usize) {
        (
            (self.w as f32 / self.scale).round().max(1.0) as usize,
            (self.h as f32 / self.scale).round().max(1.0) as usize,
        )
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let k = self.scale;
        let (x, y, w, h) = (x * k, y * k, w * k, h * k);
        let x0 = x.max(0.0).floor() as usize;
        let y0 = y.max(0.0).floor() as usize;
        let x1 = ((x + w).ceil().max(0.0) as usize).min(self.w);
        let y1 = ((y + h).ceil().max(0.0) as usize).min(self.h);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color, alpha);
            }
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x * self.scale, y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x * self.scale, y * self.scale);
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let count = self.path.segment_count();
        let subpaths = std::mem::take(&mut self.path.subpaths);
        let mut idx = 0usize;
        for sp in &subpaths {
            if sp.len() == 1 {
                // Zero-length sub-path: round caps still leave a dot.
                if style.cap == LineCap::Round {
                    let c = style.paint.color_at(idx, count);
                    self.stroke_segment(sp[0], sp[0], c, style);
                }
                continue;
            }
            for pair in sp.windows(2) {
                let c = style.paint.color_at(idx, count);
                self.stroke_segment(pair[0], pair[1], c, style);
                idx += 1;
            }
        }
        self.path.subpaths = subpaths;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
        alpha: f32,
    },
    Stroke {
        subpaths: Vec<Vec<(f32, f32)>>,
        style: StrokeStyle,
    },
}

/// Surface that keeps the command stream instead of pixels.
pub struct RecordingSurface {
    w: usize,
    h: usize,
    path: PathBuilder,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            path: PathBuilder::default(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Vec<(f32, f32)>], &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { subpaths, style } => Some((subpaths.as_slice(), style)),
            DrawCommand::FillRect { .. } => None,
        })
    }

    /// Strokes without a glow halo.
    pub fn plain_stroke_count(&self) -> usize {
        self.strokes().filter(|(_, s)| s.glow.is_none()).count()
    }

    pub fn glow_stroke_count(&self) -> usize {
        self.strokes().filter(|(_, s)| s.glow.is_some()).count()
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            subpaths: self.path.subpaths.clone(),
            style: *style,
        });
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn opaque_black(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n * 4];
    for px in buf.chunks_exact_mut(4) {
        px[3] = 255;
    }
    buf
}

#[inline]
fn mix(dst: u8, src: u8, a: f32) -> u8 {
    let out = (dst as f32 + (src as f32 - dst as f32) * a).round().clamp(0.0, 255.0) as u8;
    // Faint washes still move one step, so fades reach the target color.
    if out == dst && dst != src && a > 0.0 {
        if src > dst { dst + 1 } else { dst - 1 }
    } else {
        out
    }
}

/// Distance from `p` to segment `a..b`, plus the unclamped projection parameter.
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 <= f32::EPSILON {
        0.0
    } else {
        ((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2
    };
    let tc = t.clamp(0.0, 1.0);
    let (cx, cy) = (a.0 + dx * tc, a.1 + dy * tc);
    (((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt(), t)
}
