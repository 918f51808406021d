//! Box-versus-grid queries.

use std::ops::RangeInclusive;

use glam::Vec2;
use tileworld_common::BlockId;
use tileworld_kernel::World;

/// Contact tolerance in cells. A box edge within `EPS` of a cell boundary
/// counts as touching, not overlapping.
pub const EPS: f32 = 1e-3;

/// Read-only block access for collision.
///
/// Takes `&mut self` so a `World` can materialize columns the actor walks into.
pub trait BlockQuery {
    fn block_at(&mut self, column: i32, row: i32) -> BlockId;

    fn is_solid(&mut self, column: i32, row: i32) -> bool {
        !self.block_at(column, row).is_air()
    }
}

impl BlockQuery for World {
    fn block_at(&mut self, column: i32, row: i32) -> BlockId {
        self.get_block(column, row)
    }
}

pub(crate) fn overlapped_columns(x: f32) -> RangeInclusive<i32> {
    span(x)
}

pub(crate) fn overlapped_rows(y: f32) -> RangeInclusive<i32> {
    span(y)
}

fn span(min: f32) -> RangeInclusive<i32> {
    let first = (min + EPS).floor() as i32;
    let last = (min + 1.0 - EPS).ceil() as i32 - 1;
    first..=last
}

/// Does a one-cell box with bottom-left corner `position` overlap any solid cell?
pub fn rect_collides(world: &mut impl BlockQuery, position: Vec2) -> bool {
    for column in overlapped_columns(position.x) {
        for row in overlapped_rows(position.y) {
            if world.is_solid(column, row) {
                return true;
            }
        }
    }
    false
}

/// Is there a solid cell directly under the box's bottom edge?
pub fn support_beneath(world: &mut impl BlockQuery, position: Vec2) -> bool {
    let row = (position.y - EPS).floor() as i32;
    overlapped_columns(position.x).any(|column| world.is_solid(column, row))
}
