use glam::Vec2;
use serde::{Deserialize, Serialize};
use tileworld_kernel::World;

use crate::collision::{overlapped_columns, overlapped_rows};

/// The single controllable body.
///
/// `position` is the bottom-left corner of a one-cell box, in cell units:
/// the actor covers `[x, x + 1) × [y, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
}

impl Actor {
    /// Side length of the actor's box, in cells.
    pub const SIZE: f32 = 1.0;

    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Place the actor on top of whatever stands in `column`.
    pub fn spawn(world: &mut World, column: i32) -> Self {
        let col = world.get_column(column);
        let floor = col.top().map_or(col.height(), |top| top + 1);
        tracing::debug!(column, floor, "actor spawned");
        Self::new(Vec2::new(column as f32, floor as f32))
    }

    /// Column the actor's left edge is in.
    pub fn column(&self) -> i32 {
        self.position.x.floor() as i32
    }

    /// Row the actor's feet are in.
    pub fn row(&self) -> i32 {
        self.position.y.floor() as i32
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Whether the actor's box overlaps the cell `(column, row)`.
    pub fn occupies(&self, column: i32, row: i32) -> bool {
        overlapped_columns(self.position.x).contains(&column)
            && overlapped_rows(self.position.y).contains(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_common::BlockId;
    use tileworld_kernel::{StructureConfig, WorldConfig};

    #[test]
    fn spawn_stands_on_the_column_top() {
        let mut world = World::new(WorldConfig {
            structures: StructureConfig::none(),
            ..WorldConfig::with_seed(42)
        })
        .unwrap();
        let top = world.get_column(3).top().unwrap();
        let actor = Actor::spawn(&mut world, 3);
        assert_eq!(actor.position, Vec2::new(3.0, (top + 1) as f32));
        assert_eq!(world.get_block(3, actor.row()), BlockId::AIR);
        assert!(!actor.grounded);
    }

    #[test]
    fn cell_of_actor() {
        let actor = Actor::new(Vec2::new(-0.5, 2.25));
        assert_eq!(actor.column(), -1);
        assert_eq!(actor.row(), 2);
    }

    #[test]
    fn occupies_overlapped_cells_only() {
        let aligned = Actor::new(Vec2::new(2.0, 5.0));
        assert!(aligned.occupies(2, 5));
        assert!(!aligned.occupies(3, 5));
        assert!(!aligned.occupies(2, 4));

        let straddling = Actor::new(Vec2::new(2.5, 5.5));
        for (c, r) in [(2, 5), (3, 5), (2, 6), (3, 6)] {
            assert!(straddling.occupies(c, r));
        }
    }
}
