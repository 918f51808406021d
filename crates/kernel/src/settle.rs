//! Granular settling: loose blocks drop one cell per pass into empty space.

use tileworld_common::{BlockId, catalog};

use crate::world::{FLOOR_ROW, World};

/// Run one settling pass over `center - radius ..= center + radius`.
///
/// Every loose block with air directly below it moves down exactly one row.
/// Candidates are collected per column before anything moves, so a block never
/// falls more than once per pass. Returns the number of blocks moved.
pub fn settle(world: &mut World, center: i32, radius: u32) -> usize {
    settle_around(world, center, radius, |_, _| false)
}

/// `settle`, except a block never falls into a cell for which `occupied`
/// returns true. It rests on top of that cell instead.
pub fn settle_around(
    world: &mut World,
    center: i32,
    radius: u32,
    mut occupied: impl FnMut(i32, i32) -> bool,
) -> usize {
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    let mut moved = 0;

    for column in center.saturating_sub(radius)..=center.saturating_add(radius) {
        let col = world.get_column(column);
        let falling: Vec<(i32, BlockId)> = col
            .iter()
            .filter(|&(row, block)| {
                row > FLOOR_ROW
                    && catalog::is_loose(block)
                    && col.get(row - 1).is_air()
                    && !occupied(column, row - 1)
            })
            .collect();

        for (row, block) in falling {
            world.set_block(column, row, BlockId::AIR);
            world.set_block(column, row - 1, block);
            tracing::trace!(column, row, "loose block fell");
            moved += 1;
        }
    }
    moved
}
