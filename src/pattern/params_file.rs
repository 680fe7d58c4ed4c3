use super::params::{
    ColorMode, FlowFieldParameters, ParamError, SpirographParameters, TreeParameters,
};
use crate::config::PatternKind;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Parameter overrides read from a `key=value` file. Keys that are absent
/// keep their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamsFile {
    pub pattern: Option<PatternKind>,
    pub tree: TreeParameters,
    pub spirograph: SpirographParameters,
    pub flow: FlowFieldParameters,
    pub color: ColorMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamsFileError {
    Io(String),
    Parse { line: usize, message: String },
    Invalid(ParamError),
}

impl fmt::Display for ParamsFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse { line, message } => write!(f, "parse error at line {line}: {message}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParamsFileError {}

impl From<ParamError> for ParamsFileError {
    fn from(err: ParamError) -> Self {
        Self::Invalid(err)
    }
}

impl ParamsFile {
    pub fn parse(text: &str) -> Result<Self, ParamsFileError> {
        let mut out = Self::default();
        let mut seen: HashSet<String> = HashSet::new();

        for (line_idx, raw) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or(ParamsFileError::Parse {
                line: line_no,
                message: "expected <key>=<value>".to_string(),
            })?;
            let key = key.trim();
            let value = value.trim();

            if !seen.insert(key.to_string()) {
                return Err(ParamsFileError::Parse {
                    line: line_no,
                    message: format!("duplicate '{key}' field"),
                });
            }

            match key {
                "pattern" => {
                    out.pattern = Some(PatternKind::from_name(value).ok_or_else(|| {
                        ParamsFileError::Parse {
                            line: line_no,
                            message: format!("unknown pattern '{value}'"),
                        }
                    })?);
                }
                "tree.angle" => out.tree.branch_angle_degrees = parse_f32(value, line_no, key)?,
                "tree.depth" => out.tree.depth = parse_u32(value, line_no, key)?,
                "tree.branches" => out.tree.branch_count = parse_u32(value, line_no, key)?,
                "tree.ratio" => out.tree.length_ratio = parse_f32(value, line_no, key)?,
                "tree.thickness" => out.tree.thickness = parse_f32(value, line_no, key)?,
                "spiro.outer" => out.spirograph.outer_radius = parse_f32(value, line_no, key)?,
                "spiro.inner" => out.spirograph.inner_radius = parse_f32(value, line_no, key)?,
                "spiro.offset" => out.spirograph.offset = parse_f32(value, line_no, key)?,
                "spiro.speed" => out.spirograph.speed = parse_f32(value, line_no, key)?,
                "spiro.iterations" => out.spirograph.iterations = parse_u32(value, line_no, key)?,
                "flow.particles" => out.flow.particle_count = parse_u32(value, line_no, key)?,
                "flow.steps" => out.flow.step_count = parse_u32(value, line_no, key)?,
                "flow.noise_scale" => out.flow.noise_scale = parse_f32(value, line_no, key)?,
                "flow.strength" => out.flow.flow_strength = parse_f32(value, line_no, key)?,
                "flow.alpha" => out.flow.alpha = parse_f32(value, line_no, key)?,
                "flow.jitter" => out.flow.jitter = parse_f32(value, line_no, key)?,
                "color.rainbow" => {
                    out.color.rainbow = parse_bool(value).ok_or_else(|| ParamsFileError::Parse {
                        line: line_no,
                        message: "color.rainbow must be true/false".to_string(),
                    })?;
                }
                "color.hue" => out.color.base_hue = parse_f32(value, line_no, key)?,
                _ => {
                    return Err(ParamsFileError::Parse {
                        line: line_no,
                        message: format!("unknown key '{key}'"),
                    });
                }
            }
        }

        out.validate()?;
        Ok(out)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsFileError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ParamsFileError::Io(e.to_string()))?;
        Self::parse(&text)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        self.tree.validate()?;
        self.spirograph.validate()?;
        self.flow.validate()?;
        self.color.validate()
    }

    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(p) = self.pattern {
            lines.push(format!("pattern={}", p.label().to_ascii_lowercase()));
        }
        lines.extend([
            format!("tree.angle={}", self.tree.branch_angle_degrees),
            format!("tree.depth={}", self.tree.depth),
            format!("tree.branches={}", self.tree.branch_count),
            format!("tree.ratio={}", self.tree.length_ratio),
            format!("tree.thickness={}", self.tree.thickness),
            format!("spiro.outer={}", self.spirograph.outer_radius),
            format!("spiro.inner={}", self.spirograph.inner_radius),
            format!("spiro.offset={}", self.spirograph.offset),
            format!("spiro.speed={}", self.spirograph.speed),
            format!("spiro.iterations={}", self.spirograph.iterations),
            format!("flow.particles={}", self.flow.particle_count),
            format!("flow.steps={}", self.flow.step_count),
            format!("flow.noise_scale={}", self.flow.noise_scale),
            format!("flow.strength={}", self.flow.flow_strength),
            format!("flow.alpha={}", self.flow.alpha),
            format!("flow.jitter={}", self.flow.jitter),
            format!("color.rainbow={}", self.color.rainbow),
            format!("color.hue={}", self.color.base_hue),
        ]);
        lines.join("\n")
    }
}

fn parse_u32(s: &str, line: usize, field: &str) -> Result<u32, ParamsFileError> {
    s.parse::<u32>().map_err(|_| ParamsFileError::Parse {
        line,
        message: format!("invalid integer for {field}"),
    })
}

fn parse_f32(s: &str, line: usize, field: &str) -> Result<f32, ParamsFileError> {
    match s.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParamsFileError::Parse {
            line,
            message: format!("invalid float for {field}"),
        }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
