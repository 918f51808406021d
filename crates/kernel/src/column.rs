use std::collections::BTreeMap;
use tileworld_common::BlockId;

/// One vertical slice of the world: a sparse map from row to block.
///
/// Only non-air rows are stored. Writing `BlockId::AIR` deletes the row, so
/// `len()` counts exactly the visible blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    blocks: BTreeMap<i32, BlockId>,
    /// Terrain height this column was generated with (row of the first air
    /// cell above the natural surface).
    height: i32,
}

impl Column {
    /// Create an empty column that remembers its terrain height.
    pub fn new(height: i32) -> Self {
        Self {
            blocks: BTreeMap::new(),
            height,
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Block at `row`, air if nothing is stored there.
    pub fn get(&self, row: i32) -> BlockId {
        self.blocks.get(&row).copied().unwrap_or(BlockId::AIR)
    }

    /// Write a block, returning the previous one. Air removes the row.
    pub fn set(&mut self, row: i32, block: BlockId) -> BlockId {
        let old = if block.is_air() {
            self.blocks.remove(&row)
        } else {
            self.blocks.insert(row, block)
        };
        old.unwrap_or(BlockId::AIR)
    }

    /// Number of stored (non-air) rows.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Stored rows in ascending (bottom-up) order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, BlockId)> + '_ {
        self.blocks.iter().map(|(row, block)| (*row, *block))
    }

    /// Highest non-air row, if any.
    pub fn top(&self) -> Option<i32> {
        self.blocks.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_are_air() {
        let col = Column::new(4);
        assert_eq!(col.get(0), BlockId::AIR);
        assert_eq!(col.get(-1000), BlockId::AIR);
        assert_eq!(col.get(i32::MAX), BlockId::AIR);
        assert!(col.is_empty());
    }

    #[test]
    fn set_returns_previous_block() {
        let mut col = Column::new(4);
        assert_eq!(col.set(2, BlockId::STONE), BlockId::AIR);
        assert_eq!(col.set(2, BlockId::DIRT), BlockId::STONE);
        assert_eq!(col.get(2), BlockId::DIRT);
    }

    #[test]
    fn writing_air_removes_the_row() {
        let mut col = Column::new(4);
        col.set(1, BlockId::STONE);
        col.set(2, BlockId::STONE);
        assert_eq!(col.len(), 2);

        assert_eq!(col.set(2, BlockId::AIR), BlockId::STONE);
        assert_eq!(col.len(), 1);
        assert!(col.iter().all(|(_, block)| !block.is_air()));

        // Clearing an empty cell is a no-op.
        assert_eq!(col.set(7, BlockId::AIR), BlockId::AIR);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn iteration_is_bottom_up() {
        let mut col = Column::new(0);
        col.set(5, BlockId::SAND);
        col.set(-2, BlockId::STONE);
        col.set(1, BlockId::DIRT);
        let rows: Vec<i32> = col.iter().map(|(row, _)| row).collect();
        assert_eq!(rows, vec![-2, 1, 5]);
        assert_eq!(col.top(), Some(5));
    }
}
