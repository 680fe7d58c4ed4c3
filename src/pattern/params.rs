use std::fmt;

pub const MAX_TREE_DEPTH: u32 = 12;
pub const MAX_BRANCH_COUNT: u32 = 5;
pub const MAX_SPIRO_ITERATIONS: u32 = 20_000;
pub const MAX_PARTICLES: u32 = 2_000;
pub const MAX_FLOW_STEPS: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeParameters {
    /// Spread between sibling branches.
    pub branch_angle_degrees: f32,
    /// Recursion budget; the trunk is drawn at `depth` and leaves at 0.
    pub depth: u32,
    pub branch_count: u32,
    /// Child length as a fraction of its parent.
    pub length_ratio: f32,
    /// Trunk stroke width; every level is 0.7x its parent.
    pub thickness: f32,
}

impl Default for TreeParameters {
    fn default() -> Self {
        Self {
            branch_angle_degrees: 25.0,
            depth: 8,
            branch_count: 2,
            length_ratio: 0.67,
            thickness: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpirographParameters {
    pub outer_radius: f32,
    pub inner_radius: f32,
    /// Pen distance from the rolling circle's center.
    pub offset: f32,
    /// Reserved for animation; the sampler ignores it.
    pub speed: f32,
    pub iterations: u32,
}

impl Default for SpirographParameters {
    fn default() -> Self {
        Self {
            outer_radius: 200.0,
            inner_radius: 100.0,
            offset: 50.0,
            speed: 1.0,
            iterations: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowFieldParameters {
    pub particle_count: u32,
    /// Segments per particle trajectory.
    pub step_count: u32,
    /// Spatial frequency fed into the noise field.
    pub noise_scale: f32,
    /// Displacement per step, in pixels.
    pub flow_strength: f32,
    pub alpha: f32,
    /// Width of the uniform heading jitter in radians. Zero disables it.
    pub jitter: f32,
}

impl Default for FlowFieldParameters {
    fn default() -> Self {
        Self {
            particle_count: 100,
            step_count: 100,
            noise_scale: 0.01,
            flow_strength: 2.0,
            alpha: 0.5,
            jitter: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMode {
    pub rainbow: bool,
    pub base_hue: f32,
}

impl Default for ColorMode {
    fn default() -> Self {
        Self {
            rainbow: true,
            base_hue: 200.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamError {
    OutOfRange {
        field: &'static str,
        message: String,
    },
}

impl ParamError {
    fn range(field: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { field, message } => write!(f, "invalid value for {field}: {message}"),
        }
    }
}

impl std::error::Error for ParamError {}

impl TreeParameters {
    pub fn validate(&self) -> Result<(), ParamError> {
        finite("tree.angle", self.branch_angle_degrees)?;
        if self.depth > MAX_TREE_DEPTH {
            return Err(ParamError::range(
                "tree.depth",
                format!("{} exceeds {MAX_TREE_DEPTH}", self.depth),
            ));
        }
        if !(1..=MAX_BRANCH_COUNT).contains(&self.branch_count) {
            return Err(ParamError::range(
                "tree.branches",
                format!("{} not in 1..={MAX_BRANCH_COUNT}", self.branch_count),
            ));
        }
        if !(self.length_ratio > 0.0 && self.length_ratio < 1.0) {
            return Err(ParamError::range("tree.ratio", "must be in (0, 1)"));
        }
        positive("tree.thickness", self.thickness)
    }
}

impl SpirographParameters {
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("spiro.outer", self.outer_radius)?;
        // The rolling-circle ratio divides by this radius.
        positive("spiro.inner", self.inner_radius)?;
        finite("spiro.offset", self.offset)?;
        finite("spiro.speed", self.speed)?;
        if !(1..=MAX_SPIRO_ITERATIONS).contains(&self.iterations) {
            return Err(ParamError::range(
                "spiro.iterations",
                format!("{} not in 1..={MAX_SPIRO_ITERATIONS}", self.iterations),
            ));
        }
        Ok(())
    }
}

impl FlowFieldParameters {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(1..=MAX_PARTICLES).contains(&self.particle_count) {
            return Err(ParamError::range(
                "flow.particles",
                format!("{} not in 1..={MAX_PARTICLES}", self.particle_count),
            ));
        }
        if !(1..=MAX_FLOW_STEPS).contains(&self.step_count) {
            return Err(ParamError::range(
                "flow.steps",
                format!("{} not in 1..={MAX_FLOW_STEPS}", self.step_count),
            ));
        }
        positive("flow.noise_scale", self.noise_scale)?;
        positive("flow.strength", self.flow_strength)?;
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ParamError::range("flow.alpha", "must be in (0, 1]"));
        }
        if !(self.jitter >= 0.0 && self.jitter.is_finite()) {
            return Err(ParamError::range("flow.jitter", "must be >= 0"));
        }
        Ok(())
    }
}

impl ColorMode {
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(0.0..360.0).contains(&self.base_hue) {
            return Err(ParamError::range("color.hue", "must be in [0, 360)"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ParamError> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(ParamError::range(field, format!("{v} must be > 0")))
    }
}

fn finite(field: &'static str, v: f32) -> Result<(), ParamError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ParamError::range(field, "must be finite"))
    }
}
