//! Column generator: base terrain for one column as a function of the seed.

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tileworld_common::BlockId;

use crate::column::Column;

/// Stream tags keep terrain and structure draws for the same column independent.
pub(crate) const TERRAIN_STREAM: u64 = 0x5445_5252_4149_4E00;
pub(crate) const STRUCTURE_STREAM: u64 = 0x5354_5255_4354_5300;

/// Terrain shape and layering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Mean surface height in rows.
    pub base_height: i32,
    /// Peak deviation from `base_height`.
    pub amplitude: f64,
    /// Noise samples per column; lower is smoother.
    pub frequency: f64,
    pub min_height: i32,
    /// Dirt rows between the grass row and stone.
    pub dirt_depth: i32,
    /// Rare ore tier, rolled first for every stone cell.
    pub gold_chance: f64,
    pub coal_chance: f64,
    /// Chance of a loose sand block resting on the surface.
    pub sand_chance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_height: 10,
            amplitude: 5.0,
            frequency: 0.1,
            min_height: 1,
            dirt_depth: 3,
            gold_chance: 0.015,
            coal_chance: 0.06,
            sand_chance: 0.08,
        }
    }
}

/// Deterministic terrain source for one seed.
///
/// Height comes from Perlin noise; layering, ore and sand come from a
/// per-column RNG stream, so a column is fully reproducible from
/// `(seed, column)` regardless of the order columns are visited in.
pub struct TerrainGenerator {
    seed: u64,
    noise: Perlin,
    config: TerrainConfig,
}

impl std::fmt::Debug for TerrainGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainGenerator")
            .field("seed", &self.seed)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TerrainGenerator {
    pub fn new(seed: u64, config: TerrainConfig) -> Self {
        // Perlin takes a 32-bit seed; fold the high half in so it still matters.
        let noise_seed = (seed ^ (seed >> 32)) as u32;
        Self {
            seed,
            noise: Perlin::new(noise_seed),
            config,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height of `column`: rows `0..height` hold terrain.
    pub fn height(&self, column: i32) -> i32 {
        let c = &self.config;
        let sample = self.noise.get([column as f64 * c.frequency, 0.5]);
        let max_height = c.base_height + c.amplitude.ceil() as i32;
        let raw = (c.base_height as f64 + sample * c.amplitude).round() as i32;
        raw.clamp(c.min_height, max_height.max(c.min_height))
    }

    /// Build the base terrain for `column`. Structures are not applied here.
    pub fn generate(&self, column: i32) -> Column {
        let c = &self.config;
        let height = self.height(column);
        let mut rng = column_rng(self.seed, column, TERRAIN_STREAM);
        let mut col = Column::new(height);
        let dirt_floor = height - 1 - c.dirt_depth;

        for row in 0..height {
            let block = if row == height - 1 {
                BlockId::GRASS
            } else if row >= dirt_floor {
                BlockId::DIRT
            } else if rng.gen_bool(c.gold_chance) {
                BlockId::GOLD_ORE
            } else if rng.gen_bool(c.coal_chance) {
                BlockId::COAL_ORE
            } else {
                BlockId::STONE
            };
            col.set(row, block);
        }

        if rng.gen_bool(c.sand_chance) {
            col.set(height, BlockId::SAND);
        }
        col
    }
}

/// Seeded RNG for one column and purpose.
pub(crate) fn column_rng(seed: u64, column: i32, stream: u64) -> StdRng {
    let mixed = seed ^ (column as i64 as u64).wrapping_mul(0xC0FF_EE00_D00D_BAAD) ^ stream;
    StdRng::seed_from_u64(splitmix64(mixed))
}

/// Splitmix64 finaliser; spreads nearby inputs across the whole seed space.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
