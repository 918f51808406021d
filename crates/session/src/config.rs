use serde::{Deserialize, Serialize};
use tileworld_common::BlockId;
use tileworld_kernel::WorldConfig;
use tileworld_physics::PhysicsConfig;

use crate::session::SessionError;

/// Top-level configuration; the CLI reads it from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    /// Columns either side of the actor that settle each tick.
    pub settle_radius: u32,
    /// Columns either side of the actor in `visible_columns`.
    pub view_radius: u32,
    /// Fixed simulation rate in ticks per second.
    pub tick_rate: f32,
    pub max_ticks_per_advance: u32,
    pub spawn_column: i32,
    /// Hotbar contents; empty means the default grass/stone/dirt bar.
    pub hotbar: Vec<BlockId>,
    /// Placing never runs out of blocks.
    pub creative: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            physics: PhysicsConfig::default(),
            settle_radius: 24,
            view_radius: 20,
            tick_rate: 60.0,
            max_ticks_per_advance: 5,
            spawn_column: 0,
            hotbar: Vec::new(),
            creative: true,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            world: WorldConfig::with_seed(seed),
            ..Self::default()
        }
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        self.world.validate()?;
        self.physics.validate()?;
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "tick_rate must be finite and positive, got {}",
                self.tick_rate
            )));
        }
        if self.max_ticks_per_advance == 0 {
            return Err(SessionError::InvalidConfig(
                "max_ticks_per_advance must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
