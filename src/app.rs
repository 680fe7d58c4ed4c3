use crate::canvas::{Canvas, Surface};
use crate::color::{BACKGROUND, wrap_hue};
use crate::config::{Config, PatternKind, RendererMode};
use crate::pattern::{ParamsFile, Scene};
use crate::render::{AsciiRenderer, BrailleRenderer, Frame, HalfBlockRenderer, Renderer};
use crate::terminal::TerminalSession;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Logical drawing area the patterns are laid out for; the canvas scale maps
/// it onto however many pixels the terminal offers.
pub const REFERENCE_WIDTH: f32 = 800.0;
pub const REFERENCE_HEIGHT: f32 = 600.0;

const HUE_STEP: f32 = 15.0;

const HELP: &str = "\
tui-patterns
q / Esc      quit
space        pause / resume animation
1 2 3        tree / spirograph / flow
Tab          next pattern
c            rainbow / mono palette
[ ]          shift base hue
r            reseed flow particles
h            toggle HUD
?            close help";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    None,
    Quit,
    /// Pattern changed; the canvas is wiped so the new pattern starts clean.
    Switched,
    Relayout,
}

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let file = match &cfg.params {
        Some(path) => ParamsFile::load(path)
            .with_context(|| format!("load params file {}", path.display()))?,
        None => ParamsFile::default(),
    };
    let pattern = cfg.pattern.or(file.pattern).unwrap_or(PatternKind::Tree);

    let mut scene = Scene::from_params(&file, pattern, cfg.seed);
    if cfg.mono {
        scene.color.rainbow = false;
    }
    if let Some(hue) = cfg.hue {
        scene.color.base_hue = wrap_hue(hue);
    }
    scene.anim.running = !cfg.paused;

    let term = TerminalSession::enter(cfg.sync_updates)?;
    let mut out = term.writer();

    let mut renderer: Box<dyn Renderer> = match cfg.renderer {
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Braille => Box::new(BrailleRenderer::new()),
    };
    let (px_w_mul, px_h_mul) = cfg.renderer.cell_pixels();

    let mut last_size = term.size()?;

    let mut show_hud = true;
    let mut show_help = false;
    let mut hud_rows = hud_rows_for_size(last_size, show_hud);
    let mut canvas = build_canvas(last_size, px_w_mul, px_h_mul, hud_rows)?;

    let frame_budget = Duration::from_secs_f64(1.0 / cfg.fps.max(1) as f64);
    let mut fps = FpsCounter::new();

    loop {
        let frame_start = Instant::now();
        let mut relayout = false;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    match handle_key(k.code, k.modifiers, &mut scene, &mut show_hud, &mut show_help) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Switched => canvas.clear(BACKGROUND),
                        KeyAction::Relayout => relayout = true,
                        KeyAction::None => {}
                    }
                }
                Event::Resize(c, r) => {
                    last_size = (c, r);
                    relayout = true;
                }
                _ => {}
            }
        }

        // Resize events can be missed in some terminals.
        let sz = term.size()?;
        if sz != last_size {
            last_size = sz;
            relayout = true;
        }
        if relayout {
            hud_rows = hud_rows_for_size(last_size, show_hud);
            canvas = build_canvas(last_size, px_w_mul, px_h_mul, hud_rows)?;
        }

        scene.tick();
        scene.render(&mut canvas);

        let hud = build_hud(&scene, fps.fps());
        let visual_rows = last_size.1.saturating_sub(hud_rows).max(1);
        let frame = Frame {
            term_cols: last_size.0,
            term_rows: last_size.1,
            visual_rows,
            pixel_width: canvas.width(),
            pixel_height: canvas.height(),
            pixels_rgba: canvas.pixels_rgba(),
            hud: &hud,
            hud_rows,
            overlay: show_help.then_some(HELP),
            sync_updates: cfg.sync_updates,
        };
        let renderer_name = renderer.name();
        renderer
            .render(&frame, &mut out)
            .with_context(|| format!("present frame ({renderer_name})"))?;
        fps.tick();

        let spent = frame_start.elapsed();
        if spent < frame_budget {
            std::thread::sleep(frame_budget - spent);
        }
    }
}

fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    scene: &mut Scene,
    show_hud: &mut bool,
    show_help: &mut bool,
) -> KeyAction {
    match code {
        KeyCode::Char('c') if mods.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc if *show_help => {
            *show_help = false;
            KeyAction::None
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(' ') => {
            scene.toggle_running();
            KeyAction::None
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = (c as u8 - b'1') as usize;
            let next = PatternKind::all()[idx];
            if next == scene.pattern() {
                return KeyAction::None;
            }
            scene.set_pattern(next);
            KeyAction::Switched
        }
        KeyCode::Tab => {
            scene.set_pattern(scene.pattern().next());
            KeyAction::Switched
        }
        KeyCode::Char('c') => {
            scene.color.rainbow = !scene.color.rainbow;
            KeyAction::None
        }
        KeyCode::Char('[') => {
            scene.color.base_hue = wrap_hue(scene.color.base_hue - HUE_STEP);
            KeyAction::None
        }
        KeyCode::Char(']') => {
            scene.color.base_hue = wrap_hue(scene.color.base_hue + HUE_STEP);
            KeyAction::None
        }
        KeyCode::Char('r') => {
            scene.reseed(fastrand::u64(..));
            KeyAction::None
        }
        KeyCode::Char('h') => {
            *show_hud = !*show_hud;
            KeyAction::Relayout
        }
        KeyCode::Char('?') => {
            *show_help = !*show_help;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn build_canvas(
    size: (u16, u16),
    px_w_mul: usize,
    px_h_mul: usize,
    hud_rows: u16,
) -> anyhow::Result<Canvas> {
    let (cols, rows) = size;
    let visual_rows = rows.saturating_sub(hud_rows).max(1);
    let w = (cols as usize).saturating_mul(px_w_mul);
    let h = (visual_rows as usize).saturating_mul(px_h_mul);
    let mut canvas = Canvas::new(w, h).with_context(|| format!("allocate {w}x{h} canvas"))?;
    canvas.set_scale(fit_scale(w, h));
    canvas.clear(BACKGROUND);
    Ok(canvas)
}

/// Pixels per logical unit so the reference area fits inside `w x h`.
pub fn fit_scale(w: usize, h: usize) -> f32 {
    (w as f32 / REFERENCE_WIDTH).min(h as f32 / REFERENCE_HEIGHT)
}

fn hud_rows_for_size(size: (u16, u16), show_hud: bool) -> u16 {
    if !show_hud || size.1 <= 2 {
        return 0;
    }
    1
}

fn build_hud(scene: &Scene, fps: f32) -> String {
    let palette = if scene.color.rainbow { "rainbow" } else { "mono" };
    let state = if scene.anim.running { "running" } else { "paused" };
    format!(
        "{} | {:>5.1} fps | t {:.2} | {} {:.0}\u{b0} | {} | ? help",
        scene.pattern().label(),
        fps,
        scene.anim.progress,
        palette,
        scene.color.base_hue,
        state
    )
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
