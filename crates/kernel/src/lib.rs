//! World Kernel: authoritative tile world, lazy column materialization, settling.
//!
//! # Invariants
//! - Terrain height is a pure function of `(seed, column)`.
//! - A column is materialized at most once; placement runs at most once per origin.
//! - All block mutations flow through `World::set_block` or materialization.
//! - Air is never stored.

pub mod column;
pub mod config;
pub mod settle;
pub mod structures;
pub mod terrain;
pub mod world;

pub use column::Column;
pub use config::WorldConfig;
pub use settle::{settle, settle_around};
pub use structures::{StructureConfig, StructureKind};
pub use terrain::{TerrainConfig, TerrainGenerator};
pub use world::{ColumnWindow, FLOOR_ROW, World, WorldError, WorldEvent};
