use crate::color::luma_u8;
use crate::render::{Frame, Renderer, text_frame_begin, text_frame_end, write_bg_rgb, write_fg_rgb};
use std::io::Write;

/// Cells with less luma spread than this render as a flat block of their mean color.
const MIN_CONTRAST: u8 = 12;

/// 2x4 canvas pixels per cell. Bright pixels become raised dots colored with
/// their mean; the rest set the cell background.
pub struct BrailleRenderer {
    last_fg: Option<(u8, u8, u8)>,
    last_bg: Option<(u8, u8, u8)>,
}

impl BrailleRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for BrailleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Acc {
    r: u32,
    g: u32,
    b: u32,
    n: u32,
}

impl Acc {
    fn add(&mut self, (r, g, b): (u8, u8, u8)) {
        self.r += r as u32;
        self.g += g as u32;
        self.b += b as u32;
        self.n += 1;
    }

    fn mean(&self) -> Option<(u8, u8, u8)> {
        (self.n > 0).then(|| {
            (
                (self.r / self.n) as u8,
                (self.g / self.n) as u8,
                (self.b / self.n) as u8,
            )
        })
    }
}

impl Renderer for BrailleRenderer {
    fn name(&self) -> &'static str {
        "braille"
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w, _h)) = text_frame_begin(frame, 2, 4, out)? else {
            return Ok(());
        };

        self.last_fg = None;
        self.last_bg = None;

        // Unicode braille bit for dot (dy * 2 + dx).
        const DOT_BITS: [u8; 8] = [0x01, 0x08, 0x02, 0x10, 0x04, 0x20, 0x40, 0x80];

        for row in 0..visual_rows {
            for col in 0..cols {
                let mut rgb = [(0u8, 0u8, 0u8); 8];
                let mut lum = [0u8; 8];
                for dy in 0..4usize {
                    for dx in 0..2usize {
                        let i = dy * 2 + dx;
                        let idx = ((row * 4 + dy) * w + col * 2 + dx) * 4;
                        let px = &frame.pixels_rgba[idx..idx + 3];
                        rgb[i] = (px[0], px[1], px[2]);
                        lum[i] = luma_u8(px[0], px[1], px[2]);
                    }
                }

                let lo = lum.iter().copied().min().unwrap_or(0);
                let hi = lum.iter().copied().max().unwrap_or(0);

                let mut bits = 0u8;
                let mut on = Acc::default();
                let mut off = Acc::default();
                if hi - lo >= MIN_CONTRAST {
                    let thr = lo + (hi - lo) / 2;
                    for i in 0..8 {
                        if lum[i] > thr {
                            bits |= DOT_BITS[i];
                            on.add(rgb[i]);
                        } else {
                            off.add(rgb[i]);
                        }
                    }
                } else {
                    rgb.iter().for_each(|&c| off.add(c));
                }

                let bg = off.mean().unwrap_or((0, 0, 0));
                let (fg, ch) = match on.mean() {
                    Some(fg) => (fg, char::from_u32(0x2800 + bits as u32).unwrap_or(' ')),
                    None => (bg, ' '),
                };

                if self.last_fg != Some(fg) {
                    write_fg_rgb(out, fg.0, fg.1, fg.2)?;
                    self.last_fg = Some(fg);
                }
                if self.last_bg != Some(bg) {
                    write_bg_rgb(out, bg.0, bg.1, bg.2)?;
                    self.last_bg = Some(bg);
                }
                write!(out, "{ch}")?;
            }
            out.write_all(b"\r\n")?;
        }

        text_frame_end(frame, cols, visual_rows, out)
    }
}
