use serde::{Deserialize, Serialize};

use crate::structures::StructureConfig;
use crate::terrain::TerrainConfig;
use crate::world::WorldError;

/// Everything needed to reproduce a world: the seed plus generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub terrain: TerrainConfig,
    pub structures: StructureConfig,
    /// Maximum nesting of structure placement while materializing neighbours.
    pub max_placement_depth: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 21684,
            terrain: TerrainConfig::default(),
            structures: StructureConfig::default(),
            max_placement_depth: 16,
        }
    }
}

impl WorldConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Reject parameters that would make generation panic or degenerate.
    pub fn validate(&self) -> Result<(), WorldError> {
        let t = &self.terrain;
        if t.min_height < 1 {
            return Err(invalid("terrain.min_height must be at least 1"));
        }
        if t.base_height < t.min_height {
            return Err(invalid("terrain.base_height must not be below min_height"));
        }
        if t.dirt_depth < 0 {
            return Err(invalid("terrain.dirt_depth must not be negative"));
        }
        if !(t.amplitude.is_finite() && t.amplitude >= 0.0) {
            return Err(invalid("terrain.amplitude must be finite and non-negative"));
        }
        if !t.frequency.is_finite() {
            return Err(invalid("terrain.frequency must be finite"));
        }
        let s = &self.structures;
        let chances = [
            ("terrain.gold_chance", t.gold_chance),
            ("terrain.coal_chance", t.coal_chance),
            ("terrain.sand_chance", t.sand_chance),
            ("structures.house_chance", s.house_chance),
            ("structures.tree_chance", s.tree_chance),
            ("structures.lake_chance", s.lake_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(WorldError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> WorldError {
    WorldError::InvalidConfig(msg.to_string())
}
