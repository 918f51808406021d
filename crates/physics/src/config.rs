use serde::{Deserialize, Serialize};

use crate::resolver::MotionError;

/// Movement tuning, in cells and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (cells/s²).
    pub gravity: f32,
    /// Upward velocity set by a jump (cells/s).
    pub jump_impulse: f32,
    /// Horizontal velocity while a direction is held (cells/s).
    pub walk_speed: f32,
    /// Terminal falling speed (cells/s).
    pub max_fall_speed: f32,
    /// Sub-steps per cell of displacement; bounds the distance moved between
    /// collision tests.
    pub substeps_per_cell: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 45.0,
            jump_impulse: 15.0,
            walk_speed: 5.0,
            max_fall_speed: 30.0,
            substeps_per_cell: 8.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), MotionError> {
        let fields = [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("walk_speed", self.walk_speed),
            ("max_fall_speed", self.max_fall_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(MotionError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.substeps_per_cell.is_finite() || self.substeps_per_cell < 1.0 {
            return Err(MotionError::InvalidConfig(format!(
                "substeps_per_cell must be at least 1, got {}",
                self.substeps_per_cell
            )));
        }
        Ok(())
    }
}
