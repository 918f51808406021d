//! Structure placer: stamps houses, trees and lakes onto freshly generated terrain.
//!
//! Placement for an origin column runs once, from `World` materialization.
//! Writes that land in other columns materialize them first, so a neighbour
//! receives its own terrain and structures before this structure is stamped
//! on top of it.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tileworld_common::BlockId;

use crate::terrain::{STRUCTURE_STREAM, column_rng};
use crate::world::{FLOOR_ROW, World};

pub const HOUSE_WIDTH: RangeInclusive<i32> = 3..=5;
pub const HOUSE_HEIGHT: RangeInclusive<i32> = 3..=4;
pub const TRUNK_HEIGHT: RangeInclusive<i32> = 3..=5;
pub const LAKE_DEPTH: RangeInclusive<i32> = 2..=4;
/// Columns on each side of the origin covered by a lake.
pub const LAKE_REACH: i32 = 2;
/// Canopy columns on each side of the trunk.
pub const CANOPY_REACH: i32 = 2;
/// Canopy cells satisfy `|dx| + dy < CANOPY_LAYERS`.
pub const CANOPY_LAYERS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    House,
    Tree,
    Lake,
}

/// Per-column chance of each structure. Rolled independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub house_chance: f64,
    pub tree_chance: f64,
    pub lake_chance: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            house_chance: 0.04,
            tree_chance: 0.10,
            lake_chance: 0.03,
        }
    }
}

impl StructureConfig {
    /// Bare terrain: no structure ever fires.
    pub fn none() -> Self {
        Self {
            house_chance: 0.0,
            tree_chance: 0.0,
            lake_chance: 0.0,
        }
    }
}

/// Outcome of the structure rolls for one origin column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Plan {
    pub house: Option<(i32, i32)>,
    pub tree: Option<i32>,
    pub lake: Option<i32>,
}

/// Roll every rule for `origin`. Sizes are always drawn so the stream layout
/// does not depend on which rules fire.
pub(crate) fn roll(seed: u64, origin: i32, config: &StructureConfig) -> Plan {
    let mut rng = column_rng(seed, origin, STRUCTURE_STREAM);
    let house = (rng.gen_range(HOUSE_WIDTH), rng.gen_range(HOUSE_HEIGHT));
    let trunk = rng.gen_range(TRUNK_HEIGHT);
    let depth = rng.gen_range(LAKE_DEPTH);
    Plan {
        house: rng.gen_bool(config.house_chance).then_some(house),
        tree: rng.gen_bool(config.tree_chance).then_some(trunk),
        lake: rng.gen_bool(config.lake_chance).then_some(depth),
    }
}

/// Run the placement rules for a freshly materialized origin column.
pub(crate) fn place(world: &mut World, origin: i32) {
    let plan = roll(world.seed(), origin, &world.config().structures);

    if let Some((width, height)) = plan.house {
        if surface_is_grass(world, origin) {
            build_house(world, origin, width, height);
        }
    }
    if let Some(trunk) = plan.tree {
        if surface_is_grass(world, origin) {
            grow_tree(world, origin, trunk);
        }
    }
    if let Some(depth) = plan.lake {
        if surface_is_grass(world, origin) {
            dig_lake(world, origin, depth);
        }
    }
}

fn surface_is_grass(world: &mut World, column: i32) -> bool {
    let height = world.get_column(column).height();
    world.get_block(column, height - 1) == BlockId::GRASS
}

/// Planks walls from the origin's surface up, capped with a snow roof row.
pub(crate) fn build_house(world: &mut World, origin: i32, width: i32, height: i32) {
    let base = world.get_column(origin).height();
    let roof = base + height - 1;
    for column in origin..origin + width {
        for row in base..=roof {
            let block = if row == roof {
                BlockId::SNOW
            } else {
                BlockId::PLANKS
            };
            world.put_block(column, row, block);
        }
    }
    world.record_structure(StructureKind::House, origin);
}

/// Log trunk above the origin's surface with a diamond canopy on top.
/// Canopy cells never overwrite existing blocks.
pub(crate) fn grow_tree(world: &mut World, origin: i32, trunk: i32) {
    let base = world.get_column(origin).height();
    for row in base..base + trunk {
        world.put_block(origin, row, BlockId::LOG);
    }

    let crown = base + trunk;
    for dy in 0..CANOPY_LAYERS {
        for dx in -CANOPY_REACH..=CANOPY_REACH {
            if dx.abs() + dy >= CANOPY_LAYERS {
                continue;
            }
            let (column, row) = (origin + dx, crown + dy);
            if world.get_block(column, row).is_air() {
                world.put_block(column, row, BlockId::LEAVES);
            }
        }
    }
    world.record_structure(StructureKind::Tree, origin);
}

/// Water basin over five columns, carved down from each column's grass row.
/// The basin never reaches below `FLOOR_ROW`.
pub(crate) fn dig_lake(world: &mut World, origin: i32, depth: i32) {
    for column in origin - LAKE_REACH..=origin + LAKE_REACH {
        let top = world.get_column(column).height();
        for row in (top - depth).max(FLOOR_ROW)..top {
            world.put_block(column, row, BlockId::WATER);
        }
    }
    world.record_structure(StructureKind::Lake, origin);
}
