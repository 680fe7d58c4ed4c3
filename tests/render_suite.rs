use tui_patterns::app::fit_scale;
use tui_patterns::canvas::Canvas;
use tui_patterns::config::PatternKind;
use tui_patterns::pattern::Scene;
use tui_patterns::render::{AsciiRenderer, BrailleRenderer, Frame, HalfBlockRenderer, Renderer};

/// Build a solid-color RGBA pixel buffer.
fn solid_pixels(w: usize, h: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for px in buf.chunks_exact_mut(4) {
        px[0] = r;
        px[1] = g;
        px[2] = b;
        px[3] = 255;
    }
    buf
}

/// Build a gradient pixel buffer (varies across x).
fn gradient_pixels(w: usize, h: usize) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) * 4;
            let t = (x as f32 / w.max(1) as f32 * 255.0) as u8;
            buf[i] = t;
            buf[i + 1] = 128;
            buf[i + 2] = 255 - t;
            buf[i + 3] = 255;
        }
    }
    buf
}

/// Alternating black and white columns.
fn stripe_pixels(w: usize, h: usize) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for (i, px) in buf.chunks_exact_mut(4).enumerate() {
        let v = if (i % w) % 2 == 1 { 255 } else { 0 };
        px[0] = v;
        px[1] = v;
        px[2] = v;
        px[3] = 255;
    }
    buf
}

fn make_frame<'a>(
    cols: u16,
    visual_rows: u16,
    pw: usize,
    ph: usize,
    pixels: &'a [u8],
    sync: bool,
) -> Frame<'a> {
    Frame {
        term_cols: cols,
        term_rows: visual_rows + 1,
        visual_rows,
        pixel_width: pw,
        pixel_height: ph,
        pixels_rgba: pixels,
        hud: "Tree |  60.0 fps | t 0.25",
        hud_rows: 1,
        overlay: None,
        sync_updates: sync,
    }
}

// ── ASCII renderer ──────────────────────────────────────────────────────────

#[test]
fn ascii_renders_solid_frame() {
    let cols = 10u16;
    let rows = 5u16;
    let pixels = solid_pixels(cols as usize, rows as usize, 200, 200, 200);
    let frame = make_frame(cols, rows, cols as usize, rows as usize, &pixels, false);
    let mut out = Vec::new();
    let mut renderer = AsciiRenderer::new();
    renderer.render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[H"), "missing home cursor");
    assert!(s.contains("\x1b[?7l"), "missing autowrap-off");
    assert!(s.contains("\x1b[?7h"), "missing autowrap-on");
    assert!(s.contains("38;2;200;200;200"), "missing FG color");
    assert!(s.contains("60.0 fps"), "HUD text missing");
    assert!(!s.contains("\x1b[?2026h"), "sync disabled but begin marker written");
}

#[test]
fn ascii_maps_dark_to_space_and_bright_to_dense() {
    let pixels = [solid_pixels(1, 1, 0, 0, 0), solid_pixels(1, 1, 255, 255, 255)].concat();
    let frame = Frame {
        hud_rows: 0,
        ..make_frame(2, 1, 2, 1, &pixels, false)
    };
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("m @") || s.contains(" \x1b[38;2;255;255;255m@"), "ramp ends wrong: {s:?}");
}

#[test]
fn ascii_name() {
    assert_eq!(AsciiRenderer::new().name(), "ascii");
}

#[test]
fn ascii_skips_zero_size() {
    let pixels = solid_pixels(1, 1, 0, 0, 0);
    let frame = make_frame(0, 0, 0, 0, &pixels, false);
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for zero-size frame");
}

#[test]
fn short_pixel_buffer_reports_instead_of_panicking() {
    let pixels = solid_pixels(2, 2, 9, 9, 9);
    let frame = make_frame(4, 4, 4, 4, &pixels, false);
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("pixel buffer too small"), "got {s:?}");
}

// ── HalfBlock renderer ─────────────────────────────────────────────────────

#[test]
fn halfblock_renders_gradient_frame() {
    let cols = 8u16;
    let rows = 4u16;
    let pw = cols as usize;
    let ph = (rows as usize) * 2;
    let pixels = gradient_pixels(pw, ph);
    let frame = make_frame(cols, rows, pw, ph, &pixels, true);
    let mut out = Vec::new();
    let mut renderer = HalfBlockRenderer::new();
    renderer.render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[?2026h"), "missing sync-begin");
    assert!(s.contains("\x1b[?2026l"), "missing sync-end");
    assert!(s.contains("\u{2580}"), "missing half-block char");
    assert!(s.contains("38;2;"), "missing FG escape");
    assert!(s.contains("48;2;"), "missing BG escape");
    assert_eq!(s.matches('\u{2580}').count(), 8 * 4);
}

#[test]
fn halfblock_name() {
    assert_eq!(HalfBlockRenderer::new().name(), "halfblock");
}

#[test]
fn halfblock_skips_dimension_mismatch() {
    // pixel_height should be visual_rows*2, but give visual_rows*1
    let pixels = solid_pixels(4, 4, 100, 100, 100);
    let frame = make_frame(4, 4, 4, 4, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty(), "expected empty output for dimension mismatch");
}

#[test]
fn halfblock_resets_color_cache_each_frame() {
    let (cols, rows, pw, ph) = (4u16, 2u16, 4, 4);

    let pixels1 = solid_pixels(pw, ph, 255, 0, 0);
    let frame1 = make_frame(cols, rows, pw, ph, &pixels1, false);
    let mut out1 = Vec::new();
    let mut renderer = HalfBlockRenderer::new();
    renderer.render(&frame1, &mut out1).unwrap();
    assert!(String::from_utf8_lossy(&out1).contains("38;2;255;0;0"));

    let pixels2 = solid_pixels(pw, ph, 0, 0, 255);
    let frame2 = make_frame(cols, rows, pw, ph, &pixels2, false);
    let mut out2 = Vec::new();
    renderer.render(&frame2, &mut out2).unwrap();
    assert!(String::from_utf8_lossy(&out2).contains("38;2;0;0;255"));

    // Same colors again: the cache is per frame, so the escape is re-emitted.
    let mut out3 = Vec::new();
    renderer.render(&frame2, &mut out3).unwrap();
    assert!(String::from_utf8_lossy(&out3).contains("38;2;0;0;255"));
}

// ── Braille renderer ────────────────────────────────────────────────────────

#[test]
fn braille_raises_dots_on_bright_pixels() {
    let cols = 6u16;
    let rows = 3u16;
    let pw = (cols as usize) * 2;
    let ph = (rows as usize) * 4;
    let pixels = stripe_pixels(pw, ph);
    let frame = make_frame(cols, rows, pw, ph, &pixels, false);
    let mut out = Vec::new();
    BrailleRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    // Right-hand column of every cell lit: dots 4, 5, 6 and 8.
    assert_eq!(s.matches('\u{28B8}').count(), 6 * 3);
    assert!(s.contains("38;2;255;255;255"));
    assert!(s.contains("60.0 fps"), "HUD text missing");
}

#[test]
fn braille_flat_cells_are_blank() {
    let pixels = solid_pixels(4, 4, 40, 80, 120);
    let frame = make_frame(2, 1, 4, 4, &pixels, false);
    let mut out = Vec::new();
    BrailleRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(!s.chars().any(|c| ('\u{2800}'..='\u{28FF}').contains(&c)));
    assert!(s.contains("48;2;40;80;120"));
}

#[test]
fn braille_name() {
    assert_eq!(BrailleRenderer::new().name(), "braille");
}

// ── Overlay ─────────────────────────────────────────────────────────────────

#[test]
fn ascii_renders_overlay_popup() {
    let cols = 40u16;
    let rows = 20u16;
    let pixels = solid_pixels(cols as usize, rows as usize, 50, 50, 50);
    let mut frame = make_frame(cols, rows, cols as usize, rows as usize, &pixels, false);
    frame.overlay = Some("Help Overlay\nSecond line");
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("Help Overlay"), "overlay text missing");
    assert!(s.contains("Second line"));
}

#[test]
fn hud_is_clipped_to_terminal_width() {
    let pixels = solid_pixels(6, 2, 0, 0, 0);
    let mut frame = make_frame(6, 2, 6, 2, &pixels, false);
    frame.hud = "abcdefghijkl";
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("abcdef"));
    assert!(!s.contains("abcdefg"));
}

// ── Canvas to terminal ──────────────────────────────────────────────────────

#[test]
fn rendered_tree_reaches_the_terminal() {
    let (cols, rows) = (60u16, 20u16);
    let (w, h) = (cols as usize, rows as usize * 2);
    let mut canvas = Canvas::new(w, h).unwrap();
    canvas.set_scale(fit_scale(w, h));
    let mut scene = Scene::new(PatternKind::Tree, Some(1));
    scene.render(&mut canvas);

    let frame = Frame {
        pixel_width: canvas.width(),
        pixel_height: canvas.height(),
        pixels_rgba: canvas.pixels_rgba(),
        ..make_frame(cols, rows, 0, 0, &[], true)
    };
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert_eq!(s.matches('\u{2580}').count(), 60 * 20);
    // Backdrop plus at least one branch color.
    assert!(s.contains("38;2;10;10;15") || s.contains("48;2;10;10;15"));
    assert!(s.matches("38;2;").count() > 2, "tree produced no colored cells");
}
