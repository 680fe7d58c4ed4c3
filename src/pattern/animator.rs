use super::params::{FlowFieldParameters, SpirographParameters, TreeParameters};
use crate::config::PatternKind;
use std::f32::consts::TAU;

/// Fixed per-tick advance; animation speed follows the tick rate.
pub const PROGRESS_STEP: f32 = 0.01;
/// Float drift tolerated when `progress` wraps past 1.
const WRAP_EPSILON: f32 = 1e-4;

pub const TREE_ANGLE_BASE: f32 = 25.0;
pub const TREE_ANGLE_SWING: f32 = 10.0;
pub const SPIRO_INNER_BASE: f32 = 100.0;
pub const SPIRO_INNER_SWING: f32 = 30.0;
pub const FLOW_SCALE_BASE: f32 = 0.01;
pub const FLOW_SCALE_SWING: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Cyclic animation time in `[0, 1)`.
    pub progress: f32,
    pub active_pattern: PatternKind,
    pub running: bool,
}

impl AnimationState {
    pub fn new(active_pattern: PatternKind) -> Self {
        Self {
            progress: 0.0,
            active_pattern,
            running: true,
        }
    }
}

/// Advances `progress` by one step modulo 1.
pub fn advance_progress(progress: f32) -> f32 {
    let next = progress + PROGRESS_STEP;
    if next < 1.0 - WRAP_EPSILON {
        return next;
    }
    let wrapped = next - next.floor();
    if wrapped < WRAP_EPSILON || wrapped > 1.0 - WRAP_EPSILON {
        0.0
    } else {
        wrapped
    }
}

/// One animation frame: advances progress, then re-derives the single
/// oscillating field of the active pattern. A paused state passes through.
pub fn tick(
    state: AnimationState,
    tree: TreeParameters,
    spiro: SpirographParameters,
    flow: FlowFieldParameters,
) -> (TreeParameters, SpirographParameters, FlowFieldParameters, AnimationState) {
    if !state.running {
        return (tree, spiro, flow, state);
    }

    let state = AnimationState {
        progress: advance_progress(state.progress),
        ..state
    };
    let wave = (state.progress * TAU).sin();

    let (mut tree, mut spiro, mut flow) = (tree, spiro, flow);
    match state.active_pattern {
        PatternKind::Tree => {
            tree.branch_angle_degrees = TREE_ANGLE_BASE + wave * TREE_ANGLE_SWING;
        }
        PatternKind::Spirograph => {
            spiro.inner_radius = SPIRO_INNER_BASE + wave * SPIRO_INNER_SWING;
        }
        PatternKind::Flow => {
            flow.noise_scale = FLOW_SCALE_BASE + wave * FLOW_SCALE_SWING;
        }
    }
    (tree, spiro, flow, state)
}
