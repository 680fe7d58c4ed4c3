use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-patterns", version, about = "Generative trees, spirographs and flow fields in the terminal")]
pub struct Config {
    /// Pattern shown at startup (overrides `pattern=` in the params file).
    #[arg(long, value_enum)]
    pub pattern: Option<PatternKind>,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for flow-field particles; omitted means a fresh seed each run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the animation paused.
    #[arg(long, default_value_t = false)]
    pub paused: bool,

    /// Single-hue palette instead of the rainbow sweep.
    #[arg(long, default_value_t = false)]
    pub mono: bool,

    #[arg(long)]
    pub hue: Option<f32>,

    /// `key=value` parameter file, e.g. `tree.depth=10`.
    #[arg(long)]
    pub params: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternKind {
    Tree,
    #[value(alias = "spiro")]
    Spirograph,
    #[value(alias = "flowfield", alias = "flow-field")]
    Flow,
}

impl PatternKind {
    pub const fn all() -> [Self; 3] {
        [Self::Tree, Self::Spirograph, Self::Flow]
    }

    pub fn next(self) -> Self {
        match self {
            Self::Tree => Self::Spirograph,
            Self::Spirograph => Self::Flow,
            Self::Flow => Self::Tree,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Spirograph => "Spirograph",
            Self::Flow => "Flow",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tree" => Some(Self::Tree),
            "spirograph" | "spiro" => Some(Self::Spirograph),
            "flow" | "flowfield" | "flow-field" => Some(Self::Flow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    #[value(alias = "hires", alias = "dots")]
    Braille,
}

impl RendererMode {
    /// Canvas pixels per terminal cell (columns, rows).
    pub fn cell_pixels(self) -> (usize, usize) {
        match self {
            Self::Ascii => (1, 1),
            Self::HalfBlock => (1, 2),
            Self::Braille => (2, 4),
        }
    }
}
