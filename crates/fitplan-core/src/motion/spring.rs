//! Damped spring used for card transforms.

use serde::{Deserialize, Serialize};

/// Distance and speed below which the spring is considered settled.
const REST_EPSILON: f64 = 0.5;
/// Largest integration step; long frames are split into several.
const MAX_STEP_SECS: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping_ratio: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 220.0,
            damping_ratio: 0.9,
        }
    }
}

/// One-dimensional spring integrated per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Retarget, carrying over `velocity` (e.g. from a gesture release).
    pub fn animate_to(&mut self, target: f64, velocity: f64) {
        self.target = target;
        self.velocity = velocity;
    }

    /// Advance by `dt_secs`. Returns `true` once the spring is at rest.
    pub fn update(&mut self, dt_secs: f64, config: SpringConfig) -> bool {
        let stiffness = config.stiffness.max(0.0);
        if stiffness == 0.0 {
            self.snap_to(self.target);
            return true;
        }
        let damping = 2.0 * config.damping_ratio.max(0.0) * stiffness.sqrt();

        let mut remaining = dt_secs.max(0.0);
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECS);
            remaining -= dt;

            let displacement = self.value - self.target;
            let acceleration = -stiffness * displacement - damping * self.velocity;
            self.velocity += acceleration * dt;
            self.value += self.velocity * dt;

            if !self.is_animating() {
                self.snap_to(self.target);
                return true;
            }
        }
        false
    }

    pub fn is_animating(&self) -> bool {
        (self.value - self.target).abs() >= REST_EPSILON || self.velocity.abs() >= REST_EPSILON
    }
}
