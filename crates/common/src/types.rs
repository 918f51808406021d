use serde::{Deserialize, Serialize};

/// Identifier of a tile's material.
///
/// Id 0 is air. Columns never hold an explicit air entry, so a missing row and
/// `BlockId::AIR` mean the same thing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const GRASS: BlockId = BlockId(1);
    pub const STONE: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const SAND: BlockId = BlockId(4);
    pub const COAL_ORE: BlockId = BlockId(5);
    pub const GOLD_ORE: BlockId = BlockId(6);
    pub const LOG: BlockId = BlockId(7);
    pub const LEAVES: BlockId = BlockId(8);
    pub const PLANKS: BlockId = BlockId(9);
    pub const SNOW: BlockId = BlockId(10);
    pub const WATER: BlockId = BlockId(11);

    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::catalog::name(*self))
    }
}
