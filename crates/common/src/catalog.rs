//! Static block catalog: display attributes per block id. No logic beyond lookup.

use crate::types::BlockId;

/// Display attributes of one block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub id: BlockId,
    /// Lowercase key, resolved to display text by the localisation layer.
    pub name: &'static str,
    pub color: [u8; 3],
    /// Single character used by text renderers.
    pub glyph: char,
    /// Loose blocks fall into empty space below them during settling.
    pub loose: bool,
}

/// Colour used for ids missing from the catalog.
pub const FALLBACK_COLOR: [u8; 3] = [255, 0, 255];
pub const FALLBACK_GLYPH: char = '?';
pub const FALLBACK_NAME: &str = "unknown";

pub const CATALOG: [BlockInfo; 12] = [
    BlockInfo {
        id: BlockId::AIR,
        name: "air",
        color: [135, 206, 235],
        glyph: ' ',
        loose: false,
    },
    BlockInfo {
        id: BlockId::GRASS,
        name: "grass",
        color: [0, 255, 0],
        glyph: '"',
        loose: false,
    },
    BlockInfo {
        id: BlockId::STONE,
        name: "stone",
        color: [128, 128, 128],
        glyph: '#',
        loose: false,
    },
    BlockInfo {
        id: BlockId::DIRT,
        name: "dirt",
        color: [139, 69, 19],
        glyph: '%',
        loose: false,
    },
    BlockInfo {
        id: BlockId::SAND,
        name: "sand",
        color: [237, 201, 175],
        glyph: ':',
        loose: true,
    },
    BlockInfo {
        id: BlockId::COAL_ORE,
        name: "coal_ore",
        color: [40, 40, 40],
        glyph: 'c',
        loose: false,
    },
    BlockInfo {
        id: BlockId::GOLD_ORE,
        name: "gold_ore",
        color: [255, 215, 0],
        glyph: 'g',
        loose: false,
    },
    BlockInfo {
        id: BlockId::LOG,
        name: "log",
        color: [101, 67, 33],
        glyph: '|',
        loose: false,
    },
    BlockInfo {
        id: BlockId::LEAVES,
        name: "leaves",
        color: [34, 139, 34],
        glyph: '*',
        loose: false,
    },
    BlockInfo {
        id: BlockId::PLANKS,
        name: "planks",
        color: [193, 154, 107],
        glyph: '=',
        loose: false,
    },
    BlockInfo {
        id: BlockId::SNOW,
        name: "snow",
        color: [250, 250, 250],
        glyph: '^',
        loose: false,
    },
    BlockInfo {
        id: BlockId::WATER,
        name: "water",
        color: [30, 90, 200],
        glyph: '~',
        loose: false,
    },
];

/// Look up a block's attributes. `None` for ids the catalog does not know.
pub fn lookup(id: BlockId) -> Option<&'static BlockInfo> {
    CATALOG.get(id.0 as usize).filter(|info| info.id == id)
}

pub fn color(id: BlockId) -> [u8; 3] {
    lookup(id).map_or(FALLBACK_COLOR, |info| info.color)
}

pub fn glyph(id: BlockId) -> char {
    lookup(id).map_or(FALLBACK_GLYPH, |info| info.glyph)
}

pub fn name(id: BlockId) -> &'static str {
    lookup(id).map_or(FALLBACK_NAME, |info| info.name)
}

pub fn is_loose(id: BlockId) -> bool {
    lookup(id).is_some_and(|info| info.loose)
}
