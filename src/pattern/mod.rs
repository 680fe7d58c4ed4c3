//! Generative pattern core: three generators, the shared noise field and the
//! per-frame parameter animator. Everything here draws through
//! [`Surface`](crate::canvas::Surface) and never touches the terminal.

pub mod animator;
pub mod flow;
pub mod noise;
pub mod params;
pub mod params_file;
pub mod spirograph;
pub mod tree;

use crate::canvas::Surface;
use crate::config::PatternKind;

pub use animator::{AnimationState, tick};
pub use params::{ColorMode, FlowFieldParameters, ParamError, SpirographParameters, TreeParameters};
pub use params_file::{ParamsFile, ParamsFileError};

/// Uniform floats in `[0, 1)` for particle seeding and jitter.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn next_f32(&mut self) -> f32 {
        self.f32()
    }
}

/// Draws `pattern` with its parameter record.
#[allow(clippy::too_many_arguments)]
pub fn render(
    surface: &mut dyn Surface,
    width: usize,
    height: usize,
    pattern: PatternKind,
    tree: &TreeParameters,
    spiro: &SpirographParameters,
    flow: &FlowFieldParameters,
    color: &ColorMode,
    rng: &mut dyn RandomSource,
) {
    match pattern {
        PatternKind::Tree => tree::generate(surface, width, height, tree, color),
        PatternKind::Spirograph => spirograph::generate(surface, width, height, spiro, color),
        PatternKind::Flow => flow::generate(surface, width, height, flow, color, rng),
    }
}

/// Owns the live parameter records and drives `tick` then `render` once per frame.
pub struct Scene {
    pub tree: TreeParameters,
    pub spirograph: SpirographParameters,
    pub flow: FlowFieldParameters,
    pub color: ColorMode,
    pub anim: AnimationState,
    rng: fastrand::Rng,
}

impl Scene {
    pub fn new(pattern: PatternKind, seed: Option<u64>) -> Self {
        Self::from_params(&ParamsFile::default(), pattern, seed)
    }

    pub fn from_params(file: &ParamsFile, pattern: PatternKind, seed: Option<u64>) -> Self {
        Self {
            tree: file.tree,
            spirograph: file.spirograph,
            flow: file.flow,
            color: file.color,
            anim: AnimationState::new(pattern),
            rng: seed.map(fastrand::Rng::with_seed).unwrap_or_else(fastrand::Rng::new),
        }
    }

    pub fn pattern(&self) -> PatternKind {
        self.anim.active_pattern
    }

    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.anim.active_pattern = pattern;
    }

    pub fn toggle_running(&mut self) {
        self.anim.running = !self.anim.running;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    pub fn tick(&mut self) {
        let (tree, spiro, flow, anim) = tick(self.anim, self.tree, self.spirograph, self.flow);
        self.tree = tree;
        self.spirograph = spiro;
        self.flow = flow;
        self.anim = anim;
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        let (w, h) = surface.size();
        render(
            surface,
            w,
            h,
            self.anim.active_pattern,
            &self.tree,
            &self.spirograph,
            &self.flow,
            &self.color,
            &mut self.rng,
        );
    }
}
