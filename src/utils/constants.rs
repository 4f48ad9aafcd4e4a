use crate::utils;

pub const DEFAULT_LAYOUT_CONFIG: utils::LayoutConfig = utils::LayoutConfig {
    gravity: -1.2,
    theta: 1.2,
    drag_coeff: 0.02,
    spring_coeff: 0.0008,
    spring_length: 30.0,
    time_step: 20.0,
    stable_threshold: 0.009,
};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Two positions closer than this on every axis are treated as coincident.
pub const POSITION_EPSILON: f64 = 1e-8;

/// How many times a coincident body is jittered before a tree build gives up.
pub const MAX_JITTER_RETRIES: usize = 3;

/// Half-width, per body, of the cube synthesized around coincident bodies.
pub const DEGENERATE_SIDE_PER_BODY: f64 = 500.0;

/// Hard cap on body speed applied by the integrator.
pub const MAX_SPEED: f64 = 1.0;
