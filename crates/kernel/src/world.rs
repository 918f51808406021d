use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tileworld_common::BlockId;

use crate::column::Column;
use crate::config::WorldConfig;
use crate::structures::{self, StructureKind};
use crate::terrain::TerrainGenerator;

/// Lowest row loose blocks may settle into.
pub const FLOOR_ROW: i32 = 0;

/// Errors raised by world construction and materialization.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("placement recursion overrun at column {column} (depth {depth})")]
    RecursionOverrun { column: i32, depth: usize },
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
}

/// An event record produced by materialization and block writes.
///
/// Hosts drain the log each frame; tests use it to observe side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A column was generated and cached.
    ColumnMaterialized { column: i32, height: i32 },
    /// A structure was stamped with `origin` as its triggering column.
    StructurePlaced { kind: StructureKind, origin: i32 },
    /// A block changed through `set_block`.
    BlockSet {
        column: i32,
        row: i32,
        old: BlockId,
        new: BlockId,
    },
}

/// The authoritative tile world.
///
/// Columns are materialized lazily on first access and kept for the lifetime
/// of the world. Uses BTreeMap for deterministic iteration order and cheap
/// range queries over a window of columns.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    terrain: TerrainGenerator,
    columns: BTreeMap<i32, Column>,
    /// Columns whose structure placement has already run as an origin.
    generated: BTreeSet<i32>,
    /// Origins whose placement is running; the length is the recursion depth.
    placing: Vec<i32>,
    /// Append-only event log.
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Create an empty world. Nothing is generated until it is accessed.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// World with default generation parameters and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(WorldConfig::with_seed(seed))
    }

    fn build(config: WorldConfig) -> Self {
        let terrain = TerrainGenerator::new(config.seed, config.terrain.clone());
        Self {
            config,
            terrain,
            columns: BTreeMap::new(),
            generated: BTreeSet::new(),
            placing: Vec::new(),
            event_log: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Terrain height of `column`, re-derived from the seed. Never materializes.
    pub fn surface_height(&self, column: i32) -> i32 {
        self.terrain.height(column)
    }

    /// Block at a cell, materializing its column first. Air if nothing is there.
    pub fn get_block(&mut self, column: i32, row: i32) -> BlockId {
        self.materialize(column);
        self.peek_block(column, row)
    }

    /// Block at a cell without materializing. Air for unknown columns.
    pub fn peek_block(&self, column: i32, row: i32) -> BlockId {
        self.columns
            .get(&column)
            .map_or(BlockId::AIR, |col| col.get(row))
    }

    /// Write a block. `BlockId::AIR` clears the cell.
    pub fn set_block(&mut self, column: i32, row: i32, block: BlockId) {
        let old = self.put_block(column, row, block);
        if old != block {
            self.event_log.push(WorldEvent::BlockSet {
                column,
                row,
                old,
                new: block,
            });
        }
    }

    /// The column at `column`, materializing it if needed.
    pub fn get_column(&mut self, column: i32) -> &Column {
        self.materialize(column);
        &self.columns[&column]
    }

    /// The column at `column` if it has been materialized.
    pub fn peek_column(&self, column: i32) -> Option<&Column> {
        self.columns.get(&column)
    }

    /// Materialize `center - radius ..= center + radius` and return a
    /// read-only window over it.
    pub fn visible_columns(&mut self, center: i32, radius: u32) -> ColumnWindow<'_> {
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        let first = center.saturating_sub(radius);
        let last = center.saturating_add(radius);
        for column in first..=last {
            self.materialize(column);
        }
        ColumnWindow {
            columns: &self.columns,
            first,
            last,
        }
    }

    /// Read-only access to all materialized columns.
    pub fn columns(&self) -> &BTreeMap<i32, Column> {
        &self.columns
    }

    /// Number of materialized columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether placement has run with `column` as its origin.
    pub fn is_generated(&self, column: i32) -> bool {
        self.generated.contains(&column)
    }

    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    /// Current structure placement nesting. Zero outside materialization.
    pub fn placement_depth(&self) -> usize {
        self.placing.len()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Compute a deterministic hash of all materialized content.
    /// Uses canonical (BTreeMap) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.config.seed.to_le_bytes());
        for (index, column) in &self.columns {
            mix(&mut h, &index.to_le_bytes());
            mix(&mut h, &column.height().to_le_bytes());
            for (row, block) in column.iter() {
                mix(&mut h, &row.to_le_bytes());
                mix(&mut h, &[block.0]);
            }
        }
        h
    }

    /// Write without logging. Used by materialization and structure placement.
    pub(crate) fn put_block(&mut self, column: i32, row: i32, block: BlockId) -> BlockId {
        self.materialize(column);
        self.columns
            .get_mut(&column)
            .map_or(BlockId::AIR, |col| col.set(row, block))
    }

    pub(crate) fn record_structure(&mut self, kind: StructureKind, origin: i32) {
        tracing::debug!(?kind, origin, "structure placed");
        self.event_log
            .push(WorldEvent::StructurePlaced { kind, origin });
    }

    /// Generate, cache, then place structures for a column seen for the first time.
    ///
    /// The cache insert happens before placement so a structure whose writes
    /// loop back to its own origin finds the column instead of regenerating it.
    fn materialize(&mut self, column: i32) {
        if self.columns.contains_key(&column) {
            return;
        }
        let _span = tracing::debug_span!("materialize", column).entered();

        let generated = self.terrain.generate(column);
        let height = generated.height();
        self.columns.insert(column, generated);
        self.event_log
            .push(WorldEvent::ColumnMaterialized { column, height });

        if !self.generated.insert(column) {
            return;
        }
        if let Err(err) = self.run_placement(column) {
            if cfg!(debug_assertions) {
                panic!("{err}");
            }
            tracing::warn!(%err, "structure placement skipped");
        }
    }

    fn run_placement(&mut self, origin: i32) -> Result<(), WorldError> {
        let depth = self.placing.len();
        if depth >= self.config.max_placement_depth {
            return Err(WorldError::RecursionOverrun {
                column: origin,
                depth,
            });
        }
        self.placing.push(origin);
        structures::place(self, origin);
        self.placing.pop();
        Ok(())
    }
}

/// A bounded, read-only view over consecutive materialized columns.
///
/// Iteration holds no state of its own: every `iter()` starts again at the
/// first column of the window.
#[derive(Debug, Clone, Copy)]
pub struct ColumnWindow<'w> {
    columns: &'w BTreeMap<i32, Column>,
    first: i32,
    last: i32,
}

impl<'w> ColumnWindow<'w> {
    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.last
    }

    /// Number of columns covered by the window.
    pub fn len(&self) -> usize {
        (i64::from(self.last) - i64::from(self.first) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// `(column index, column)` pairs in ascending column order.
    pub fn iter(self) -> impl Iterator<Item = (i32, &'w Column)> {
        self.columns
            .range(self.first..=self.last)
            .map(|(index, column)| (*index, column))
    }

    pub fn get(&self, column: i32) -> Option<&'w Column> {
        if (self.first..=self.last).contains(&column) {
            self.columns.get(&column)
        } else {
            None
        }
    }

    /// Block at a cell inside the window; air outside it.
    pub fn block(&self, column: i32, row: i32) -> BlockId {
        self.get(column).map_or(BlockId::AIR, |col| col.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::StructureConfig;
    use std::collections::HashMap;

    fn bare_config(seed: u64) -> WorldConfig {
        WorldConfig {
            seed,
            structures: StructureConfig::none(),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn world_starts_empty() {
        let w = World::with_seed(42);
        assert_eq!(w.column_count(), 0);
        assert_eq!(w.generated_count(), 0);
        assert!(w.events().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = WorldConfig::default();
        config.structures.house_chance = -0.1;
        assert!(matches!(
            World::new(config),
            Err(WorldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn get_block_materializes_lazily() {
        let mut w = World::with_seed(42);
        assert_eq!(w.peek_block(0, 0), BlockId::AIR);
        assert!(w.peek_column(0).is_none());

        let bottom = w.get_block(0, 0);
        assert!(!bottom.is_air());
        assert!(w.peek_column(0).is_some());
        assert!(w.is_generated(0));
    }

    #[test]
    fn out_of_range_reads_are_air() {
        let mut w = World::with_seed(42);
        assert_eq!(w.get_block(0, 10_000), BlockId::AIR);
        assert_eq!(w.get_block(0, -10_000), BlockId::AIR);
        assert_eq!(w.get_block(i32::MIN, i32::MAX), BlockId::AIR);
    }

    #[test]
    fn cached_height_matches_rederived_height() {
        let mut w = World::with_seed(42);
        for column in -64..64 {
            let cached = w.get_column(column).height();
            assert_eq!(cached, w.surface_height(column));
            assert_eq!(cached, World::with_seed(42).surface_height(column));
        }
    }

    #[test]
    fn repeated_access_returns_cached_column() {
        let mut w = World::with_seed(42);
        for column in -40..40 {
            w.get_column(column);
        }
        let snapshot = w.columns().clone();
        let events = w.events().len();
        let hash = w.state_hash();

        for _ in 0..3 {
            for column in -40..40 {
                w.get_column(column);
                w.get_block(column, 5);
            }
        }
        assert_eq!(w.columns(), &snapshot);
        assert_eq!(w.events().len(), events);
        assert_eq!(w.state_hash(), hash);
    }

    #[test]
    fn each_column_materializes_and_places_once() {
        let mut w = World::with_seed(7);
        for column in -300..300 {
            w.get_block(column, 0);
        }
        let mut seen = BTreeSet::new();
        let mut origins = HashMap::<(i32, StructureKind), usize>::new();
        for event in w.events() {
            match event {
                WorldEvent::ColumnMaterialized { column, .. } => {
                    assert!(seen.insert(*column), "column {column} materialized twice");
                }
                WorldEvent::StructurePlaced { kind, origin } => {
                    *origins.entry((*origin, *kind)).or_default() += 1;
                }
                WorldEvent::BlockSet { .. } => {}
            }
        }
        assert!(origins.values().all(|&count| count == 1));
        assert_eq!(seen.len(), w.column_count());
        assert_eq!(w.generated_count(), w.column_count());
        assert_eq!(w.placement_depth(), 0);
    }

    #[test]
    fn default_world_grows_structures() {
        let mut w = World::with_seed(42);
        for column in -500..500 {
            w.get_column(column);
        }
        let placed = w
            .events()
            .iter()
            .filter(|e| matches!(e, WorldEvent::StructurePlaced { .. }))
            .count();
        assert!(placed > 0);
    }

    #[test]
    fn same_seed_same_world() {
        let mut a = World::with_seed(1234);
        let mut b = World::with_seed(1234);
        let mut other = World::with_seed(4321);
        for column in -100..100 {
            a.get_column(column);
            b.get_column(column);
            other.get_column(column);
        }
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.state_hash(), b.state_hash());
        assert_ne!(a.state_hash(), other.state_hash());
    }

    #[test]
    fn set_air_removes_entry() {
        let mut w = World::new(bare_config(42)).unwrap();
        let h = w.get_column(0).height();
        let before = w.get_column(0).len();

        w.set_block(0, h - 1, BlockId::AIR);
        assert_eq!(w.get_block(0, h - 1), BlockId::AIR);
        assert_eq!(w.get_column(0).len(), before - 1);
        assert!(w.get_column(0).iter().all(|(_, b)| !b.is_air()));

        let window = w.visible_columns(0, 0);
        let visible: usize = window.iter().map(|(_, col)| col.len()).sum();
        assert_eq!(visible, before - 1);
    }

    #[test]
    fn set_block_logs_changes_only() {
        let mut w = World::new(bare_config(42)).unwrap();
        let h = w.get_column(3).height();
        w.drain_events();

        w.set_block(3, h + 2, BlockId::STONE);
        w.set_block(3, h + 2, BlockId::STONE);
        w.set_block(3, h + 2, BlockId::AIR);
        assert_eq!(
            w.drain_events(),
            vec![
                WorldEvent::BlockSet {
                    column: 3,
                    row: h + 2,
                    old: BlockId::AIR,
                    new: BlockId::STONE,
                },
                WorldEvent::BlockSet {
                    column: 3,
                    row: h + 2,
                    old: BlockId::STONE,
                    new: BlockId::AIR,
                },
            ]
        );
    }

    #[test]
    fn set_block_on_fresh_column_generates_first() {
        let mut w = World::new(bare_config(42)).unwrap();
        w.set_block(50, 100, BlockId::SAND);
        let h = w.surface_height(50);
        assert_eq!(w.get_block(50, h - 1), BlockId::GRASS);
        assert_eq!(w.get_block(50, 100), BlockId::SAND);
    }

    #[test]
    fn visible_window_is_finite_and_restartable() {
        let mut w = World::with_seed(42);
        let window = w.visible_columns(10, 3);
        assert_eq!(window.len(), 7);
        assert_eq!((window.first(), window.last()), (7, 13));

        let first: Vec<i32> = window.iter().map(|(c, _)| c).collect();
        let second: Vec<i32> = window.iter().map(|(c, _)| c).collect();
        assert_eq!(first, (7..=13).collect::<Vec<_>>());
        assert_eq!(first, second);
        assert!(window.get(6).is_none());
        assert_eq!(window.block(100, 0), BlockId::AIR);
    }

    #[test]
    fn visible_window_excludes_columns_materialized_by_structures() {
        let mut w = World::with_seed(42);
        // Structures near the window edge may materialize columns outside it.
        let window = w.visible_columns(0, 2);
        assert!(window.iter().all(|(c, _)| (-2..=2).contains(&c)));
        assert_eq!(window.iter().count(), 5);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "recursion overrun")]
    fn placement_overrun_is_fatal_in_debug() {
        let config = WorldConfig {
            seed: 42,
            structures: StructureConfig {
                house_chance: 1.0,
                tree_chance: 0.0,
                lake_chance: 0.0,
            },
            max_placement_depth: 1,
            ..WorldConfig::default()
        };
        let mut w = World::new(config).unwrap();
        w.get_column(0);
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn placement_overrun_is_clamped_in_release() {
        let config = WorldConfig {
            seed: 42,
            structures: StructureConfig {
                house_chance: 1.0,
                tree_chance: 0.0,
                lake_chance: 0.0,
            },
            max_placement_depth: 1,
            ..WorldConfig::default()
        };
        let mut w = World::new(config).unwrap();
        w.get_column(0);
        assert!(w.is_generated(1));
        assert_eq!(w.placement_depth(), 0);
        let houses = w
            .events()
            .iter()
            .filter(|e| matches!(e, WorldEvent::StructurePlaced { .. }))
            .count();
        assert_eq!(houses, 1);
    }
}
